use std::sync::Arc;

use crate::application::services::{AudioPipeline, SpeechService, TipsService};
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub audio_pipeline: Arc<AudioPipeline>,
    pub tips_service: Arc<TipsService>,
    pub speech_service: Arc<SpeechService>,
    pub settings: Settings,
}
