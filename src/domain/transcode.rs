use std::path::{Path, PathBuf};

/// What the transcoding step decided to do with a staged audio file.
///
/// Transcoding is best-effort: when it cannot run or does not succeed, the
/// pipeline falls back to the originally staged file instead of failing the
/// request. The variant records which of the three policies applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscodeOutcome {
    /// A re-encoded MP3 was produced next to the original file.
    Converted(PathBuf),
    /// No transcoder is available; the original file is used as-is.
    Skipped { reason: String },
    /// Conversion was attempted and did not succeed; the original file is
    /// used as-is. `attempted` is the output path the run may have left a
    /// partial file at.
    Failed {
        reason: String,
        attempted: Option<PathBuf>,
    },
}

impl TranscodeOutcome {
    /// Path of whatever file the transcode attempt wrote, usable or not.
    /// A `Failed` attempt can leave a partial output that still needs
    /// removing.
    pub fn output_path(&self) -> Option<&Path> {
        match self {
            TranscodeOutcome::Converted(path) => Some(path),
            TranscodeOutcome::Failed {
                attempted: Some(path),
                ..
            } => Some(path),
            _ => None,
        }
    }
}
