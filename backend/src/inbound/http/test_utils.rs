//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use crate::domain::{DEFAULT_SUMMARY_MAX_CHARS, KeywordSet, SubmissionWorkflow, TextAnalyzer};
use crate::inbound::http::state::HttpState;
use crate::test_support::InMemoryStore;

/// Session middleware with a throwaway key, cookie named `session`, and no
/// `Secure` flag so plain-HTTP test requests carry it.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler state over in-memory storage and heuristic-only analysis.
pub fn in_memory_state() -> (HttpState, InMemoryStore) {
    let memory = InMemoryStore::default();
    let analyzer = Arc::new(TextAnalyzer::new(
        KeywordSet::default(),
        DEFAULT_SUMMARY_MAX_CHARS,
    ));
    let workflow = SubmissionWorkflow::new(analyzer, memory.store.clone());
    let state = HttpState::new(memory.store.clone(), Arc::new(workflow));
    (state, memory)
}
