use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use solace_gateway::application::ports::{
    AudioTranscoder, Clock, GenerativeModel, GenerativeModelError, MediaFileStore,
    MediaFileStoreError, SpeechSynthesizer, SpeechSynthesizerError, StagingArea, StagingError,
};
use solace_gateway::domain::{RemoteFile, RemoteFileState, TranscodeOutcome, VoiceSpec};

pub const UPLOADED_FILE_NAME: &str = "files/scripted";
pub const UPLOADED_FILE_URI: &str = "https://files.example.test/scripted";

/// Generative model returning one scripted answer (or failure) for every
/// call, counting how often each operation was invoked.
pub struct ScriptedModel {
    response: Result<String, String>,
    pub text_calls: AtomicUsize,
    pub file_calls: AtomicUsize,
    last_file_uri: Mutex<Option<String>>,
}

impl ScriptedModel {
    pub fn answering(text: &str) -> Self {
        Self {
            response: Ok(text.to_string()),
            text_calls: AtomicUsize::new(0),
            file_calls: AtomicUsize::new(0),
            last_file_uri: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            text_calls: AtomicUsize::new(0),
            file_calls: AtomicUsize::new(0),
            last_file_uri: Mutex::new(None),
        }
    }

    pub fn last_file_uri(&self) -> Option<String> {
        self.last_file_uri.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate_text(&self, _prompt: &str) -> Result<String, GenerativeModelError> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        self.response
            .clone()
            .map_err(GenerativeModelError::ApiRequestFailed)
    }

    async fn generate_with_file(
        &self,
        _prompt: &str,
        file_uri: &str,
        _mime_type: &str,
    ) -> Result<String, GenerativeModelError> {
        self.file_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_file_uri.lock().unwrap() = Some(file_uri.to_string());
        self.response
            .clone()
            .map_err(GenerativeModelError::ApiRequestFailed)
    }
}

/// File store whose `get` pops scripted states in order. Panics when queried
/// more often than scripted, which doubles as an upper bound on poll counts.
pub struct ScriptedFileStore {
    states: Mutex<VecDeque<RemoteFileState>>,
    failure_detail: Option<String>,
    fail_upload: bool,
    pub uploads: AtomicUsize,
    pub queries: AtomicUsize,
    last_upload: Mutex<Option<UploadRecord>>,
}

#[derive(Debug, Clone)]
pub struct UploadRecord {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub display_name: String,
}

impl ScriptedFileStore {
    pub fn with_states(states: impl IntoIterator<Item = RemoteFileState>) -> Self {
        Self {
            states: Mutex::new(states.into_iter().collect()),
            failure_detail: None,
            fail_upload: false,
            uploads: AtomicUsize::new(0),
            queries: AtomicUsize::new(0),
            last_upload: Mutex::new(None),
        }
    }

    pub fn with_failure_detail(
        states: impl IntoIterator<Item = RemoteFileState>,
        detail: &str,
    ) -> Self {
        let mut store = Self::with_states(states);
        store.failure_detail = Some(detail.to_string());
        store
    }

    pub fn failing_upload() -> Self {
        let mut store = Self::with_states([]);
        store.fail_upload = true;
        store
    }

    pub fn last_upload(&self) -> Option<UploadRecord> {
        self.last_upload.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaFileStore for ScriptedFileStore {
    async fn upload(
        &self,
        data: &[u8],
        mime_type: &str,
        display_name: &str,
    ) -> Result<RemoteFile, MediaFileStoreError> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        if self.fail_upload {
            return Err(MediaFileStoreError::UploadFailed(
                "scripted upload failure".to_string(),
            ));
        }

        *self.last_upload.lock().unwrap() = Some(UploadRecord {
            bytes: data.to_vec(),
            mime_type: mime_type.to_string(),
            display_name: display_name.to_string(),
        });

        Ok(RemoteFile {
            name: UPLOADED_FILE_NAME.to_string(),
            uri: UPLOADED_FILE_URI.to_string(),
            state: RemoteFileState::Processing,
            error_message: None,
        })
    }

    async fn get(&self, name: &str) -> Result<RemoteFile, MediaFileStoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let state = self
            .states
            .lock()
            .unwrap()
            .pop_front()
            .expect("file store queried more times than scripted");

        let error_message = if state == RemoteFileState::Failed {
            self.failure_detail.clone()
        } else {
            None
        };

        Ok(RemoteFile {
            name: name.to_string(),
            uri: UPLOADED_FILE_URI.to_string(),
            state,
            error_message,
        })
    }
}

/// File store that never answers, for exercising the outer deadline.
pub struct HangingFileStore;

#[async_trait]
impl MediaFileStore for HangingFileStore {
    async fn upload(
        &self,
        _data: &[u8],
        _mime_type: &str,
        _display_name: &str,
    ) -> Result<RemoteFile, MediaFileStoreError> {
        std::future::pending().await
    }

    async fn get(&self, _name: &str) -> Result<RemoteFile, MediaFileStoreError> {
        std::future::pending().await
    }
}

/// In-memory staging area keyed by synthetic paths. `remaining` exposes how
/// many staged files were left behind, which should be zero after any
/// completed pipeline run.
#[derive(Default)]
pub struct MemoryStagingArea {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    counter: AtomicUsize,
}

impl MemoryStagingArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remaining(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    pub fn insert(&self, path: PathBuf, bytes: Vec<u8>) {
        self.files.lock().unwrap().insert(path, bytes);
    }
}

#[async_trait]
impl StagingArea for MemoryStagingArea {
    async fn stage(&self, bytes: &[u8]) -> Result<PathBuf, StagingError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let path = PathBuf::from(format!("/staging/audio_{}.mp3", n));
        self.insert(path.clone(), bytes.to_vec());
        Ok(path)
    }

    async fn file_size(&self, path: &Path) -> Result<u64, StagingError> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .map(|bytes| bytes.len() as u64)
            .ok_or_else(|| StagingError::NotFound(path.display().to_string()))
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>, StagingError> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StagingError::NotFound(path.display().to_string()))
    }

    async fn remove(&self, path: &Path) -> Result<(), StagingError> {
        self.files.lock().unwrap().remove(path);
        Ok(())
    }
}

/// Transcoder returning a fixed non-converting outcome.
pub struct ScriptedTranscoder {
    outcome: TranscodeOutcome,
}

impl ScriptedTranscoder {
    pub fn skipping() -> Self {
        Self {
            outcome: TranscodeOutcome::Skipped {
                reason: "transcoder unavailable".to_string(),
            },
        }
    }

    pub fn failing() -> Self {
        Self {
            outcome: TranscodeOutcome::Failed {
                reason: "scripted conversion failure".to_string(),
                attempted: None,
            },
        }
    }
}

#[async_trait]
impl AudioTranscoder for ScriptedTranscoder {
    async fn transcode_to_mp3(&self, _input: &Path) -> TranscodeOutcome {
        self.outcome.clone()
    }
}

pub const CONVERTED_BYTES: &[u8] = b"converted audio bytes";

/// Transcoder that writes a converted file into the shared staging area,
/// mirroring how the real one leaves a sibling `_converted.mp3` behind.
/// The aborting variant writes the file and then reports failure, like a
/// conversion run killed partway through its output.
pub struct ConvertingTranscoder {
    staging: std::sync::Arc<MemoryStagingArea>,
    abort_after_write: bool,
}

impl ConvertingTranscoder {
    pub fn new(staging: std::sync::Arc<MemoryStagingArea>) -> Self {
        Self {
            staging,
            abort_after_write: false,
        }
    }

    pub fn aborting(staging: std::sync::Arc<MemoryStagingArea>) -> Self {
        Self {
            staging,
            abort_after_write: true,
        }
    }
}

#[async_trait]
impl AudioTranscoder for ConvertingTranscoder {
    async fn transcode_to_mp3(&self, input: &Path) -> TranscodeOutcome {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("audio");
        let converted = input.with_file_name(format!("{}_converted.mp3", stem));
        self.staging.insert(converted.clone(), CONVERTED_BYTES.to_vec());
        if self.abort_after_write {
            TranscodeOutcome::Failed {
                reason: "scripted conversion abort".to_string(),
                attempted: Some(converted),
            }
        } else {
            TranscodeOutcome::Converted(converted)
        }
    }
}

/// Clock that records sleeps instead of waiting them out.
#[derive(Default)]
pub struct CountingClock {
    sleeps: AtomicUsize,
    total: Mutex<Duration>,
}

impl CountingClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sleep_count(&self) -> usize {
        self.sleeps.load(Ordering::SeqCst)
    }

    pub fn total_slept(&self) -> Duration {
        *self.total.lock().unwrap()
    }
}

#[async_trait]
impl Clock for CountingClock {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.fetch_add(1, Ordering::SeqCst);
        *self.total.lock().unwrap() += duration;
    }
}

/// Synthesizer returning fixed bytes (or a scripted failure) and recording
/// what it was asked to render.
pub struct MockSynthesizer {
    response: Result<Vec<u8>, String>,
    pub calls: AtomicUsize,
    last_voice: Mutex<Option<VoiceSpec>>,
    last_text: Mutex<Option<String>>,
}

impl MockSynthesizer {
    pub fn returning(bytes: &[u8]) -> Self {
        Self {
            response: Ok(bytes.to_vec()),
            calls: AtomicUsize::new(0),
            last_voice: Mutex::new(None),
            last_text: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            last_voice: Mutex::new(None),
            last_text: Mutex::new(None),
        }
    }

    pub fn last_voice(&self) -> Option<VoiceSpec> {
        *self.last_voice.lock().unwrap()
    }

    pub fn last_text(&self) -> Option<String> {
        self.last_text.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceSpec,
    ) -> Result<Vec<u8>, SpeechSynthesizerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_voice.lock().unwrap() = Some(*voice);
        *self.last_text.lock().unwrap() = Some(text.to_string());
        self.response
            .clone()
            .map_err(SpeechSynthesizerError::ApiRequestFailed)
    }
}
