//! Shared application state for all routes.

use crate::store::SubmissionStore;

#[derive(Clone)]
pub struct AppState {
    pub store: SubmissionStore,
}
