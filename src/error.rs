use std::{io, path::PathBuf};

use http::status::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Error as JsonError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum VaultError {
    #[error("Invalid Command: {0}")]
    Command(String),
    #[error("Duplicate slug '{slug}': {first:?} and {second:?} resolve to the same note")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("File System error: {0}")]
    Io(String),
    #[error("Note not found: {0}")]
    NotFound(String),
    #[error("You do not have permission to access this resource")]
    PermissionDenied,
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
}

impl VaultError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            VaultError::Command(_) => StatusCode::BAD_REQUEST,
            VaultError::DuplicateSlug { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            VaultError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            VaultError::NotFound(_) => StatusCode::NOT_FOUND,
            VaultError::PermissionDenied => StatusCode::FORBIDDEN,
            VaultError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for errors that abort vault construction rather than a single query.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            VaultError::DuplicateSlug { .. } | VaultError::Io(_) | VaultError::PermissionDenied
        )
    }
}

impl From<io::Error> for VaultError {
    fn from(x: io::Error) -> Self {
        match x.kind() {
            io::ErrorKind::PermissionDenied => VaultError::PermissionDenied,
            // A file vanishing mid-scan is a storage failure, not a missing note.
            _ => VaultError::Io(format!("IOError: {x}")),
        }
    }
}

impl From<walkdir::Error> for VaultError {
    fn from(x: walkdir::Error) -> Self {
        let path = x.path().map(|p| p.display().to_string());
        match x.into_io_error() {
            Some(io_err) if io_err.kind() == io::ErrorKind::PermissionDenied => {
                VaultError::PermissionDenied
            }
            Some(io_err) => VaultError::Io(format!("IOError walking {path:?}: {io_err}")),
            None => VaultError::Io(format!("Filesystem loop detected at {path:?}")),
        }
    }
}

impl From<toml::de::Error> for VaultError {
    fn from(src: toml::de::Error) -> VaultError {
        VaultError::Serialization(format!("Toml deserialization error: {src}"))
    }
}

impl From<toml::ser::Error> for VaultError {
    fn from(src: toml::ser::Error) -> VaultError {
        VaultError::Serialization(format!("Toml serialization error: {src}"))
    }
}

impl From<JsonError> for VaultError {
    fn from(src: JsonError) -> VaultError {
        VaultError::Serialization(format!("JSON (de)serialization error: {src}"))
    }
}
