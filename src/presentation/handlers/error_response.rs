use std::error::Error;

use serde::Serialize;

use crate::presentation::config::Environment;

/// Error body shared by every endpoint. `details` describes the failure to
/// the client; local runs additionally append the error's source chain so
/// upstream causes are visible without shipping them to production clients.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(
        error: impl Into<String>,
        cause: &dyn Error,
        environment: Environment,
    ) -> Self {
        let mut details = cause.to_string();
        if environment.is_development() {
            let mut source = cause.source();
            while let Some(inner) = source {
                details.push_str(": ");
                details.push_str(&inner.to_string());
                source = inner.source();
            }
        }

        Self {
            error: error.into(),
            details: Some(details),
        }
    }
}
