//! Stream-level failures.

use std::io;

/// Error surfaced by a single stream operation.
///
/// The display text is what HTTP clients receive as the error body.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The peer closed its side of the stream.
    #[error("EOF")]
    Closed,

    /// A configured read or write deadline expired.
    #[error("i/o timeout")]
    Timeout,

    /// Any other transport failure.
    #[error("{0}")]
    Io(#[from] io::Error),
}

impl StreamError {
    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            StreamError::Closed => "closed",
            StreamError::Timeout => "timeout",
            StreamError::Io(_) => "io",
        }
    }
}
