use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the ingestion pipeline. All variants carry the
/// offending identifier or path and are propagated to the caller unchanged.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("file {} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("user {0} is not part of the trainset")]
    UnknownUser(String),

    #[error("item {0} is not part of the trainset")]
    UnknownItem(String),

    #[error("{0} is not a valid inner id")]
    UnknownInnerId(usize),

    #[error("could not parse line {line:?}: {reason}")]
    MalformedLine { line: String, reason: String },

    #[error("corrupt artifact bundle: {0}")]
    CorruptArtifact(String),

    #[error("download of dataset {0} was declined")]
    UserAborted(String),

    #[error("failed to fetch dataset {name}: {source}")]
    Fetch {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
