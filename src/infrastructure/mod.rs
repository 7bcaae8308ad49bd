mod clock;
pub mod gemini;
pub mod google_tts;
pub mod observability;
pub mod staging;
pub mod transcode;

pub use clock::TokioClock;
