use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    AudioTranscoder, Clock, GenerativeModel, GenerativeModelError, MediaFileStore,
    MediaFileStoreError, StagingArea, StagingError,
};
use crate::domain::{AudioPayload, RemoteFile, RemoteFileState, TranscodeOutcome};

/// MIME type declared to the file store and the generation call. Uploads are
/// always presented as MP3 regardless of what the client recorded; the
/// transcode step exists to make that claim as true as possible.
const UPLOAD_MIME: &str = "audio/mp3";

/// Brokers one audio understanding request end to end: stage the decoded
/// bytes, transcode when possible, verify the file, upload it, wait for the
/// remote store to finish processing, then run a single generation call.
/// Everything written to the staging directory, including a partial output
/// from a failed conversion, is removed before returning, on every path.
pub struct AudioPipeline {
    model: Arc<dyn GenerativeModel>,
    file_store: Arc<dyn MediaFileStore>,
    transcoder: Arc<dyn AudioTranscoder>,
    staging: Arc<dyn StagingArea>,
    clock: Arc<dyn Clock>,
    poll_max_attempts: u32,
    poll_interval: Duration,
    remote_deadline: Duration,
}

impl AudioPipeline {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        model: Arc<dyn GenerativeModel>,
        file_store: Arc<dyn MediaFileStore>,
        transcoder: Arc<dyn AudioTranscoder>,
        staging: Arc<dyn StagingArea>,
        clock: Arc<dyn Clock>,
        poll_max_attempts: u32,
        poll_interval: Duration,
        remote_deadline: Duration,
    ) -> Self {
        Self {
            model,
            file_store,
            transcoder,
            staging,
            clock,
            poll_max_attempts,
            poll_interval,
            remote_deadline,
        }
    }

    /// Answers a prompt with no attached audio. Touches neither the staging
    /// area nor the file store.
    pub async fn answer_text(&self, prompt: &str) -> Result<String, AudioPipelineError> {
        self.model
            .generate_text(prompt)
            .await
            .map_err(AudioPipelineError::Generation)
    }

    /// Answers a prompt grounded in the attached audio payload.
    pub async fn answer_audio(
        &self,
        prompt: &str,
        payload: &AudioPayload,
    ) -> Result<AudioAnswer, AudioPipelineError> {
        let staged = self.staging.stage(payload.bytes()).await?;
        tracing::debug!(
            path = %staged.display(),
            bytes = payload.len(),
            "Audio payload staged"
        );

        let outcome = self.transcoder.transcode_to_mp3(&staged).await;
        let upload_path = match &outcome {
            TranscodeOutcome::Converted(path) => {
                tracing::debug!(path = %path.display(), "Using transcoded audio");
                path.as_path()
            }
            TranscodeOutcome::Skipped { reason } => {
                tracing::info!(reason = %reason, "Transcode skipped, using staged audio as-is");
                staged.as_path()
            }
            TranscodeOutcome::Failed { reason, .. } => {
                tracing::warn!(reason = %reason, "Transcode failed, falling back to staged audio");
                staged.as_path()
            }
        };

        // The remote phase gets a hard ceiling so a stalled upstream cannot
        // pin the request open; local cleanup still runs after it fires.
        let result = match tokio::time::timeout(
            self.remote_deadline,
            self.upload_and_generate(prompt, upload_path),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(AudioPipelineError::DeadlineExceeded),
        };

        self.cleanup(&staged, outcome.output_path()).await;

        result
    }

    async fn upload_and_generate(
        &self,
        prompt: &str,
        path: &Path,
    ) -> Result<AudioAnswer, AudioPipelineError> {
        let size = match self.staging.file_size(path).await {
            Ok(size) => size,
            Err(StagingError::NotFound(_)) => return Err(AudioPipelineError::IntegrityCheckFailed),
            Err(e) => return Err(AudioPipelineError::Staging(e)),
        };
        if size == 0 {
            return Err(AudioPipelineError::IntegrityCheckFailed);
        }

        let data = self.staging.read(path).await?;
        let display_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.mp3");

        let uploaded = self
            .file_store
            .upload(&data, UPLOAD_MIME, display_name)
            .await
            .map_err(AudioPipelineError::Upload)?;
        tracing::info!(uri = %uploaded.uri, "Audio uploaded to remote file store");

        let ready = self.await_file_ready(&uploaded.name).await?;

        tracing::debug!("Generating response for audio request");
        let text = self
            .model
            .generate_with_file(prompt, &uploaded.uri, UPLOAD_MIME)
            .await
            .map_err(AudioPipelineError::Generation)?;

        Ok(AudioAnswer {
            text,
            file_uri: uploaded.uri,
            file_state: ready.state,
        })
    }

    /// Polls the store until the file leaves `PROCESSING`. The first query
    /// counts as attempt one; at most `poll_max_attempts` queries are made,
    /// with one sleep between consecutive queries and none after the last.
    async fn await_file_ready(&self, name: &str) -> Result<RemoteFile, AudioPipelineError> {
        let mut attempts: u32 = 0;
        loop {
            let file = self
                .file_store
                .get(name)
                .await
                .map_err(AudioPipelineError::FileLookup)?;
            attempts += 1;

            match file.state {
                RemoteFileState::Failed => {
                    let detail = file
                        .error_message
                        .unwrap_or_else(|| "Unknown error".to_string());
                    return Err(AudioPipelineError::RemoteProcessingFailed(detail));
                }
                RemoteFileState::Processing if attempts >= self.poll_max_attempts => {
                    tracing::warn!(attempts, "Remote file still processing, giving up");
                    return Err(AudioPipelineError::RemoteProcessingTimedOut);
                }
                RemoteFileState::Processing => {
                    tracing::debug!(
                        attempt = attempts,
                        max_attempts = self.poll_max_attempts,
                        "Remote file still processing"
                    );
                    self.clock.sleep(self.poll_interval).await;
                }
                _ => return Ok(file),
            }
        }
    }

    async fn cleanup(&self, staged: &Path, transcode_output: Option<&Path>) {
        if let Err(e) = self.staging.remove(staged).await {
            tracing::warn!(error = %e, path = %staged.display(), "Failed to remove staged audio");
        }
        if let Some(path) = transcode_output {
            if let Err(e) = self.staging.remove(path).await {
                tracing::warn!(error = %e, path = %path.display(), "Failed to remove transcode output");
            }
        }
    }
}

/// Successful audio pipeline result: the generated text plus the remote file
/// handle the client may want to reference.
#[derive(Debug, Clone)]
pub struct AudioAnswer {
    pub text: String,
    pub file_uri: String,
    pub file_state: RemoteFileState,
}

#[derive(Debug, thiserror::Error)]
pub enum AudioPipelineError {
    #[error("staging: {0}")]
    Staging(#[from] StagingError),
    #[error("Audio file processing failed or file is empty")]
    IntegrityCheckFailed,
    #[error("upload: {0}")]
    Upload(MediaFileStoreError),
    #[error("file lookup: {0}")]
    FileLookup(MediaFileStoreError),
    #[error("Audio processing failed: {0}")]
    RemoteProcessingFailed(String),
    #[error("Audio processing timed out after 60 seconds")]
    RemoteProcessingTimedOut,
    #[error("generation: {0}")]
    Generation(GenerativeModelError),
    #[error("audio request exceeded the processing deadline")]
    DeadlineExceeded,
}
