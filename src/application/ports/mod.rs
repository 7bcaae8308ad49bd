mod audio_transcoder;
mod clock;
mod generative_model;
mod media_file_store;
mod speech_synthesizer;
mod staging_area;

pub use audio_transcoder::AudioTranscoder;
pub use clock::Clock;
pub use generative_model::{GenerativeModel, GenerativeModelError};
pub use media_file_store::{MediaFileStore, MediaFileStoreError};
pub use speech_synthesizer::{SpeechSynthesizer, SpeechSynthesizerError};
pub use staging_area::{StagingArea, StagingError};
