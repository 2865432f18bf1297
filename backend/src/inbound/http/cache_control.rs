//! Cache policy for per-user responses.

/// Listings tied to a session must never be served from a shared cache.
pub const PRIVATE_NO_CACHE_MUST_REVALIDATE: &str = "private, no-cache, must-revalidate";

/// Header tuple for [`PRIVATE_NO_CACHE_MUST_REVALIDATE`].
pub const fn private_no_cache_header() -> (&'static str, &'static str) {
    ("Cache-Control", PRIVATE_NO_CACHE_MUST_REVALIDATE)
}
