use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Decoded audio bytes extracted from a client-submitted base64 string.
///
/// Clients send either a bare base64 payload or a full data URI
/// (`data:audio/webm;base64,...`). The data-URI media type is retained for
/// logging only; the wire format declared to downstream services is decided
/// by the pipeline, not by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioPayload {
    bytes: Vec<u8>,
    declared_mime: Option<String>,
}

impl AudioPayload {
    /// Parses a raw base64 string, tolerating an optional data-URI prefix
    /// and incidental whitespace inside the encoded text.
    pub fn from_base64(raw: &str) -> Result<Self, AudioPayloadError> {
        let (declared_mime, encoded) = match raw.split_once(',') {
            Some((head, tail)) => (parse_data_uri_mime(head), tail),
            None => (None, raw),
        };

        let compact: String = encoded
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        let bytes = STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| AudioPayloadError::InvalidBase64(e.to_string()))?;

        Ok(Self {
            bytes,
            declared_mime,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Media type the client declared in a data-URI prefix, if any.
    pub fn declared_mime(&self) -> Option<&str> {
        self.declared_mime.as_deref()
    }
}

fn parse_data_uri_mime(head: &str) -> Option<String> {
    let rest = head.strip_prefix("data:")?;
    let mime = rest.split(';').next()?;
    if mime.is_empty() {
        None
    } else {
        Some(mime.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AudioPayloadError {
    #[error("invalid base64 audio payload: {0}")]
    InvalidBase64(String),
}
