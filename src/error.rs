//! Error taxonomy for a single analyzer run.
//!
//! Every variant is fatal: the binary reports it on stderr and exits non-zero.

use chrono::NaiveDateTime;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Invalid command-line configuration, detected before any input is read.
    #[error("configuration error: {0}")]
    Config(String),

    /// Input could not be opened or a read failed mid-stream.
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A non-blank input line is not a valid event record.
    #[error("decode error on line {line}: {reason}")]
    Decode { line: usize, reason: String },

    /// An event arrived with a minute earlier than one already observed.
    #[error("out-of-order event: {current} arrived after {previous}")]
    OutOfOrder {
        previous: NaiveDateTime,
        current: NaiveDateTime,
    },

    /// Writing an output record failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
