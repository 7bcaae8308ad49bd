use std::fmt;
use std::str::FromStr;

/// Lifecycle state reported by the remote media file store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteFileState {
    Processing,
    Active,
    Failed,
    Unspecified,
}

impl RemoteFileState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteFileState::Processing => "PROCESSING",
            RemoteFileState::Active => "ACTIVE",
            RemoteFileState::Failed => "FAILED",
            RemoteFileState::Unspecified => "STATE_UNSPECIFIED",
        }
    }

    /// The store is done working on the file; polling can stop.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RemoteFileState::Processing)
    }
}

impl FromStr for RemoteFileState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PROCESSING" => Ok(RemoteFileState::Processing),
            "ACTIVE" => Ok(RemoteFileState::Active),
            "FAILED" => Ok(RemoteFileState::Failed),
            "STATE_UNSPECIFIED" => Ok(RemoteFileState::Unspecified),
            _ => Err(format!("Invalid remote file state: {}", s)),
        }
    }
}

impl fmt::Display for RemoteFileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Handle to a file held by the remote store, as last observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    /// Resource name used for state lookups, e.g. `files/abc123`.
    pub name: String,
    /// Download URI referenced in generation requests.
    pub uri: String,
    pub state: RemoteFileState,
    /// Failure detail reported by the store when `state` is `Failed`.
    pub error_message: Option<String>,
}
