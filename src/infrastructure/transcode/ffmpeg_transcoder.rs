use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::AudioTranscoder;
use crate::domain::TranscodeOutcome;

/// Shells out to ffmpeg to normalize staged audio into a clean MP3.
///
/// Availability is probed per request with `ffmpeg -version`; both the
/// probe and the conversion run under a timeout, and a conversion child
/// abandoned by that timeout is killed rather than left running. A failed
/// run reports the output path it may have partially written so the caller
/// can remove it.
pub struct FfmpegTranscoder {
    binary: String,
    timeout: Duration,
}

impl FfmpegTranscoder {
    pub fn new(timeout: Duration) -> Self {
        Self::with_binary("ffmpeg", timeout)
    }

    /// Overrides the binary name, mainly to force probe failures in tests.
    pub fn with_binary(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    async fn probe(&self) -> Result<(), String> {
        let status = Command::new(&self.binary)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status();

        match tokio::time::timeout(self.timeout, status).await {
            Err(_) => Err("probe timed out".to_string()),
            Ok(Err(e)) => Err(format!("ffmpeg not found: {}", e)),
            Ok(Ok(status)) if status.success() => Ok(()),
            Ok(Ok(status)) => Err(format!("ffmpeg probe exited with {}", status)),
        }
    }
}

fn converted_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("audio");
    input.with_file_name(format!("{}_converted.mp3", stem))
}

#[async_trait]
impl AudioTranscoder for FfmpegTranscoder {
    async fn transcode_to_mp3(&self, input: &Path) -> TranscodeOutcome {
        if let Err(reason) = self.probe().await {
            return TranscodeOutcome::Skipped { reason };
        }

        let output = converted_path(input);
        let status = Command::new(&self.binary)
            .arg("-y")
            .arg("-i")
            .arg(input)
            .arg("-acodec")
            .arg("libmp3lame")
            .arg("-b:a")
            .arg("128k")
            .arg(&output)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status();

        match tokio::time::timeout(self.timeout, status).await {
            Err(_) => TranscodeOutcome::Failed {
                reason: format!("conversion timed out after {:?}", self.timeout),
                attempted: Some(output),
            },
            Ok(Err(e)) => TranscodeOutcome::Failed {
                reason: format!("failed to run ffmpeg: {}", e),
                attempted: Some(output),
            },
            Ok(Ok(status)) if status.success() => {
                tracing::debug!(output = %output.display(), "Audio converted");
                TranscodeOutcome::Converted(output)
            }
            Ok(Ok(status)) => TranscodeOutcome::Failed {
                reason: format!("ffmpeg exited with {}", status),
                attempted: Some(output),
            },
        }
    }
}
