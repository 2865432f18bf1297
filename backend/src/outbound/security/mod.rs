//! Credential hashing and passcode issuance adapters.

mod argon2_hasher;
mod random_passcodes;

pub use argon2_hasher::Argon2CredentialHasher;
pub use random_passcodes::RandomPasscodeGenerator;
