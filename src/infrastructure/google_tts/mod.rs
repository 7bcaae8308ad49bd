mod auth;
mod client;

pub use auth::{CLOUD_PLATFORM_SCOPE, ServiceAccountTokenSource, TokenSource};
pub use client::GoogleTtsClient;
