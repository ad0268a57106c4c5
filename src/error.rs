//! Error types for reading kernel packet-scheduler parameters

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while deriving the tick report
#[derive(Error, Debug)]
pub enum TickError {
    /// The parameter source could not be opened or read
    #[error("Cannot open psched source {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source opened but did not hold three usable hex fields
    #[error("Malformed psched data in {}: {reason}", path.display())]
    MalformedData { path: PathBuf, reason: String },
}

impl TickError {
    /// Process exit code for this error, matching the `-1` return of the
    /// classic `tick` tool after the platform's signed-to-unsigned mapping.
    pub fn exit_code(&self) -> u8 {
        255
    }
}

/// Result type for tick computations
pub type Result<T> = std::result::Result<T, TickError>;
