//! OAuth / credential errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the credential façade.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum AuthError {
    /// Backend completed the call but did not report a successful login
    #[error("OAuth login not completed (status: {status})")]
    LoginRejected {
        /// Status string reported by the backend
        status: String,
    },

    /// Operation needs credentials and none are cached
    #[error("Not authenticated")]
    NotAuthenticated,
}
