mod audio_payload;
mod remote_file;
mod tips;
mod transcode;
mod voice;

pub use audio_payload::{AudioPayload, AudioPayloadError};
pub use remote_file::{RemoteFile, RemoteFileState};
pub use tips::{TipsParseError, TipsPayload, parse_tips_response};
pub use transcode::TranscodeOutcome;
pub use voice::{SUPPORTED_LANGUAGES, VoiceSpec, voice_for_language};

pub(crate) use tips::json_truthy;
