use std::path::PathBuf;
use std::time::Duration;

use super::environment::Environment;

/// Runtime configuration, read once from the process environment at startup.
/// Every value has a default so a bare `solace-gateway` invocation comes up
/// listening; only malformed values abort startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub google: GoogleSettings,
    pub audio: AudioSettings,
    pub environment: Environment,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct GoogleSettings {
    /// Gemini API key. Absent or blank means generation and file store
    /// calls fail per request rather than at startup.
    pub api_key: Option<String>,
    pub model: String,
    pub tts_credentials_path: String,
    pub http_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AudioSettings {
    pub staging_dir: PathBuf,
    pub poll_max_attempts: u32,
    pub poll_interval: Duration,
    pub transcode_timeout: Duration,
    pub remote_deadline: Duration,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let host = env_or("HOST", "0.0.0.0");
        let port = parse_var("PORT", 5000)?;

        let api_key = std::env::var("GOOGLE_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let model = env_or("GEMINI_MODEL", "gemini-2.0-flash");
        let tts_credentials_path = env_or("GOOGLE_TTS_CREDENTIALS", "./google-services.json");
        let http_timeout = Duration::from_secs(parse_var("HTTP_TIMEOUT_SECS", 30)?);

        let staging_dir = PathBuf::from(env_or("AUDIO_STAGING_DIR", "./audio"));
        let poll_max_attempts = parse_var("POLL_MAX_ATTEMPTS", 12)?;
        let poll_interval = Duration::from_secs(parse_var("POLL_INTERVAL_SECS", 5)?);
        let transcode_timeout = Duration::from_secs(parse_var("TRANSCODE_TIMEOUT_SECS", 30)?);
        let remote_deadline = Duration::from_secs(parse_var("REQUEST_DEADLINE_SECS", 180)?);

        let environment = match std::env::var("APP_ENV") {
            Ok(raw) => Environment::try_from(raw).map_err(SettingsError::InvalidEnvironment)?,
            Err(_) => Environment::Local,
        };

        Ok(Settings {
            server: ServerSettings { host, port },
            google: GoogleSettings {
                api_key,
                model,
                tts_credentials_path,
                http_timeout,
            },
            audio: AudioSettings {
                staging_dir,
                poll_max_attempts,
                poll_interval,
                transcode_timeout,
                remote_deadline,
            },
            environment,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
    #[error("{0}")]
    InvalidEnvironment(String),
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, SettingsError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| SettingsError::InvalidValue { var, value: raw }),
        Err(_) => Ok(default),
    }
}
