mod audio;
mod error_response;
mod health;
mod tips;
mod tts;

pub use audio::{AudioRequest, AudioResponse, FileInfo, TextOnlyResponse, audio_handler};
pub use error_response::ErrorResponse;
pub use health::{HealthResponse, health_handler};
pub use tips::{TipsRequest, TipsResponse, tips_handler};
pub use tts::{TtsRequest, tts_handler};
