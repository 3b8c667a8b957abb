// src/error.rs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("{url} answered {status}: {body}")]
    Status { url: String, status: u16, body: String },
    #[error("page structure changed: {0}")]
    Structure(String),
    #[error("no status assignment found in script for #{0}")]
    Unresolved(String),
    #[error("unknown status {0:?}")]
    UnknownStatus(String),
    #[error("can't read hours {0:?}")]
    Hours(String),
    #[error("no schedule row matches {0:?}")]
    MissingSchedule(String),
    #[error("more than one schedule row matches {0:?}")]
    AmbiguousSchedule(String),
    #[error("local time {0} does not exist in the configured timezone")]
    LocalTime(chrono::NaiveDateTime),
    #[error("failed to serialize record")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn structure(msg: impl Into<String>) -> Self {
        Error::Structure(msg.into())
    }
}
