//! Stream adapter subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → adapter.rs (lock, one read or write attempt, deadline)
//!     → underlying byte stream (TCP connection, duplex pipe, ...)
//!     → error.rs (transport failure → StreamError)
//! ```
//!
//! # Design Decisions
//! - One lock per direction, held for a single read or write; a pending
//!   read never holds up a write
//! - Reads never loop to fill the buffer
//! - Partial writes are reported alongside the error that cut them short

pub mod adapter;
pub mod error;

#[cfg(test)]
pub(crate) mod testing;

pub use adapter::{ByteStream, StreamAdapter, StreamTimeouts, WriteOutcome, CHUNK_SIZE};
pub use error::StreamError;
