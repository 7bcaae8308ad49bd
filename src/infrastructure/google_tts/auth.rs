use async_trait::async_trait;
use google_cloud_auth::credentials::{CacheableResource, Credentials, service_account};
use http::Extensions;
use tokio::sync::OnceCell;

use crate::application::ports::SpeechSynthesizerError;

pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Supplies OAuth2 bearer tokens for Google Cloud API calls.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn bearer_token(&self) -> Result<String, SpeechSynthesizerError>;
}

/// Token source backed by a service-account credentials JSON file.
///
/// The file is read lazily on first use, so a missing or malformed
/// credentials file fails the individual synthesis request instead of
/// preventing the gateway from starting.
pub struct ServiceAccountTokenSource {
    credentials_path: String,
    credentials: OnceCell<Credentials>,
}

impl ServiceAccountTokenSource {
    pub fn new(credentials_path: impl Into<String>) -> Self {
        Self {
            credentials_path: credentials_path.into(),
            credentials: OnceCell::new(),
        }
    }

    async fn credentials(&self) -> Result<&Credentials, SpeechSynthesizerError> {
        self.credentials
            .get_or_try_init(|| async { load_service_account(&self.credentials_path) })
            .await
    }
}

fn load_service_account(path: &str) -> Result<Credentials, SpeechSynthesizerError> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        SpeechSynthesizerError::AuthenticationFailed(format!(
            "read credentials file '{}': {}",
            path, e
        ))
    })?;

    let value: serde_json::Value = serde_json::from_str(&json).map_err(|e| {
        SpeechSynthesizerError::AuthenticationFailed(format!(
            "parse credentials file '{}': {}",
            path, e
        ))
    })?;

    service_account::Builder::new(value)
        .with_access_specifier(service_account::AccessSpecifier::from_scopes(vec![
            CLOUD_PLATFORM_SCOPE.to_string(),
        ]))
        .build()
        .map_err(|e| {
            SpeechSynthesizerError::AuthenticationFailed(format!(
                "load service account credentials: {}",
                e
            ))
        })
}

#[async_trait]
impl TokenSource for ServiceAccountTokenSource {
    async fn bearer_token(&self) -> Result<String, SpeechSynthesizerError> {
        let headers = self
            .credentials()
            .await?
            .headers(Extensions::new())
            .await
            .map_err(|e| {
                SpeechSynthesizerError::AuthenticationFailed(format!(
                    "fetch access token: {}",
                    e
                ))
            })?;

        let header_map = match headers {
            CacheableResource::New { data, .. } => data,
            CacheableResource::NotModified => {
                return Err(SpeechSynthesizerError::AuthenticationFailed(
                    "credentials returned no token headers".to_string(),
                ));
            }
        };

        let value = header_map
            .get(http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                SpeechSynthesizerError::AuthenticationFailed(
                    "no authorization header in credentials response".to_string(),
                )
            })?;

        value
            .strip_prefix("Bearer ")
            .map(str::to_string)
            .ok_or_else(|| {
                SpeechSynthesizerError::AuthenticationFailed(
                    "authorization header is not a bearer token".to_string(),
                )
            })
    }
}
