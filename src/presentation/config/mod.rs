mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{AudioSettings, GoogleSettings, ServerSettings, Settings, SettingsError};
