//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the driving
//! ports, so tests can swap in mocks or in-memory services.

use std::sync::Arc;

use crate::domain::ports::{AccountService, SubmissionService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration and login.
    pub accounts: Arc<dyn AccountService>,
    /// Comment submission, tracking and reporting.
    pub submissions: Arc<dyn SubmissionService>,
}

impl HttpState {
    /// Bundle the account and submission services.
    ///
    /// # Examples
    /// ```rust,ignore
    /// use std::sync::Arc;
    ///
    /// use econsult::domain::{KeywordSet, SubmissionWorkflow, TextAnalyzer};
    /// use econsult::inbound::http::state::HttpState;
    /// use econsult::test_support::InMemoryStore;
    ///
    /// let memory = InMemoryStore::default();
    /// let analyzer = Arc::new(TextAnalyzer::new(KeywordSet::default(), 120));
    /// let workflow = SubmissionWorkflow::new(analyzer, memory.store.clone());
    /// let state = HttpState::new(memory.store.clone(), Arc::new(workflow));
    /// let _accounts = state.accounts.clone();
    /// ```
    pub fn new(
        accounts: Arc<dyn AccountService>,
        submissions: Arc<dyn SubmissionService>,
    ) -> Self {
        Self {
            accounts,
            submissions,
        }
    }
}
