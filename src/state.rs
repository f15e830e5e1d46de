//! Shared context handed to the router (`AppState`).
//!
//! Held by value and cloned per request; everything inside is `Arc` so the
//! clone is cheap. No request-scoped mutable state lives here.

use std::sync::Arc;

use crate::services::auth::TokenVerifier;

#[derive(Clone, Debug)]
pub struct AppState {
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(verifier: Arc<TokenVerifier>) -> Self {
        Self { verifier }
    }
}
