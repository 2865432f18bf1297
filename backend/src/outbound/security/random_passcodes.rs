//! Thread-local RNG implementation of the `PasscodeGenerator` port.

use rand::Rng;

use crate::domain::ports::PasscodeGenerator;
use crate::domain::{PASSCODE_ALPHABET, Passcode};

/// Draws each passcode character uniformly from the passcode alphabet.
///
/// 36^8 codes leave collisions rare; the record store retries the few that
/// happen.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPasscodeGenerator;

impl PasscodeGenerator for RandomPasscodeGenerator {
    fn generate(&self) -> Passcode {
        let mut rng = rand::thread_rng();
        Passcode::from_draws(|| rng.gen_range(0..PASSCODE_ALPHABET.len()))
    }
}
