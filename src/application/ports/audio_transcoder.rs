use std::path::Path;

use async_trait::async_trait;

use crate::domain::TranscodeOutcome;

/// Converts staged audio into a clean MP3 when a transcoder is available.
#[async_trait]
pub trait AudioTranscoder: Send + Sync {
    /// Attempts to re-encode the staged file. Availability and conversion
    /// problems are reported through the outcome, never as an error: the
    /// caller decides whether to fall back to the original file.
    async fn transcode_to_mp3(&self, input: &Path) -> TranscodeOutcome;
}
