use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("No profile found for bank '{0}'")]
    UnknownBank(String),
    #[error("Profile [{id}] is invalid: {reason}")]
    Invalid {
        id: String,
        reason: String
    },
    #[error("Could not read profile file [{}]: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error
    },
    #[error("Could not parse profile file: {0}")]
    Json(#[from] serde_json::Error)
}

impl ProfileError {
    pub fn invalid(id: &str, reason: &str) -> Self {
        Self::Invalid {
            id: id.to_string(),
            reason: reason.to_string()
        }
    }
}
