mod audio_pipeline;
mod speech_service;
mod tips_service;

pub use audio_pipeline::{AudioAnswer, AudioPipeline, AudioPipelineError};
pub use speech_service::{SpeechError, SpeechService};
pub use tips_service::{TipsError, TipsService};
