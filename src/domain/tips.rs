use serde_json::Value;

/// Parsed result of a tips generation response: the tips object followed by
/// the recommended-video list.
///
/// Both halves are kept as raw JSON values. The gateway validates shape and
/// passes the content through to the client untouched; it does not own the
/// schema of what the model was prompted to produce.
#[derive(Debug, Clone, PartialEq)]
pub struct TipsPayload {
    pub tips: Value,
    pub youtube: Vec<Value>,
}

/// How a tips response failed validation. Each variant names one violated
/// expectation so the client-facing detail can say what was wrong instead
/// of a generic parse failure.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TipsParseError {
    #[error("expected exactly two JSON blocks separated by a blank line, found {0}")]
    WrongBlockCount(usize),
    #[error("tips block is not valid JSON: {0}")]
    TipsBlockInvalid(String),
    #[error("tips block is missing or has an empty `{0}` field")]
    TipsFieldMissing(&'static str),
    #[error("video block is not a JSON array: {0}")]
    VideoBlockInvalid(String),
    #[error("video list is empty")]
    VideoListEmpty,
}

const REQUIRED_TIPS_FIELDS: [&str; 3] = ["tip", "tricks", "suggestions"];

/// Parses a model response expected to hold exactly two JSON documents
/// separated by a blank line: the tips object first, the video array second.
/// Markdown code fences are stripped before splitting.
pub fn parse_tips_response(raw: &str) -> Result<TipsPayload, TipsParseError> {
    let cleaned = strip_code_fences(raw);
    let blocks = split_json_blocks(&cleaned);

    if blocks.len() != 2 {
        return Err(TipsParseError::WrongBlockCount(blocks.len()));
    }

    let tips: Value = serde_json::from_str(blocks[0])
        .map_err(|e| TipsParseError::TipsBlockInvalid(e.to_string()))?;

    for field in REQUIRED_TIPS_FIELDS {
        if !tips.get(field).is_some_and(json_truthy) {
            return Err(TipsParseError::TipsFieldMissing(field));
        }
    }

    let youtube: Vec<Value> = serde_json::from_str(blocks[1])
        .map_err(|e| TipsParseError::VideoBlockInvalid(e.to_string()))?;

    if youtube.is_empty() {
        return Err(TipsParseError::VideoListEmpty);
    }

    Ok(TipsPayload { tips, youtube })
}

fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Splits on runs of blank lines, ignoring leading and trailing blanks.
fn split_json_blocks(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut start: Option<usize> = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() {
            if let Some(s) = start.take() {
                blocks.push(text[s..offset].trim());
            }
        } else if start.is_none() {
            start = Some(offset);
        }
        offset += line.len();
    }

    if let Some(s) = start {
        blocks.push(text[s..].trim());
    }

    blocks
}

/// JavaScript-style truthiness, matching what web clients were built against:
/// null, false, 0 and the empty string are absent; everything else counts.
pub(crate) fn json_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
