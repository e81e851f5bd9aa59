//! Buffered access to one shared byte stream.
//!
//! # Responsibilities
//! - Own the stream handle injected by the bootstrap layer
//! - Perform exactly one read attempt per call (1 byte or one chunk)
//! - Write a byte sequence and report how much the transport accepted
//! - Apply the optional read/write deadlines
//!
//! Concurrent HTTP handlers share one adapter. The stream is split into a
//! read half and a write half, each behind its own `tokio::sync::Mutex`
//! held for the duration of a single operation. A read parked waiting for
//! data never blocks a write.

use std::fmt;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf};
use tokio::sync::Mutex;
use tokio::time::{self, Instant};

use super::error::StreamError;

/// Size of the buffer used by [`StreamAdapter::read_chunk`].
pub const CHUNK_SIZE: usize = 1 << 16;

/// Any readable and writable byte stream the gateway can front.
pub trait ByteStream: AsyncRead + AsyncWrite + Send + Unpin {}

impl<T> ByteStream for T where T: AsyncRead + AsyncWrite + Send + Unpin {}

/// Deadlines applied to stream operations. `None` waits indefinitely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamTimeouts {
    pub read: Option<Duration>,
    pub write: Option<Duration>,
}

/// Result of a write: the accepted byte count is kept even on failure.
#[derive(Debug)]
pub struct WriteOutcome {
    pub written: usize,
    pub error: Option<StreamError>,
}

impl WriteOutcome {
    fn completed(written: usize) -> Self {
        Self { written, error: None }
    }

    fn failed(written: usize, error: StreamError) -> Self {
        Self {
            written,
            error: Some(error),
        }
    }

    /// Returns true when every byte was accepted without error.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Single-reader/single-writer access to one byte stream.
pub struct StreamAdapter {
    reader: Mutex<ReadHalf<Box<dyn ByteStream>>>,
    writer: Mutex<WriteHalf<Box<dyn ByteStream>>>,
    timeouts: StreamTimeouts,
}

impl StreamAdapter {
    /// Wrap an already connected stream.
    pub fn new<S>(stream: S, timeouts: StreamTimeouts) -> Self
    where
        S: ByteStream + 'static,
    {
        let stream: Box<dyn ByteStream> = Box::new(stream);
        let (reader, writer) = tokio::io::split(stream);
        Self {
            reader: Mutex::new(reader),
            writer: Mutex::new(writer),
            timeouts,
        }
    }

    /// One read attempt into a [`CHUNK_SIZE`] buffer.
    ///
    /// Returns exactly the bytes the transport delivered, which may be
    /// fewer than the buffer holds.
    pub async fn read_chunk(&self) -> Result<Vec<u8>, StreamError> {
        self.read_up_to(CHUNK_SIZE).await
    }

    /// One read attempt into a single-byte buffer.
    pub async fn read_exactly_one(&self) -> Result<Vec<u8>, StreamError> {
        self.read_up_to(1).await
    }

    async fn read_up_to(&self, limit: usize) -> Result<Vec<u8>, StreamError> {
        let mut buf = vec![0u8; limit];

        let n = {
            let mut stream = self.reader.lock().await;
            match self.timeouts.read {
                Some(deadline) => time::timeout(deadline, stream.read(&mut buf))
                    .await
                    .map_err(|_| StreamError::Timeout)??,
                None => stream.read(&mut buf).await?,
            }
        };

        if n == 0 {
            return Err(StreamError::Closed);
        }

        buf.truncate(n);
        tracing::trace!(requested = limit, received = n, "Stream read");
        Ok(buf)
    }

    /// Write `data` to the stream and flush it.
    ///
    /// Keeps writing until the transport has accepted every byte or fails.
    /// The write deadline, if any, covers the whole call.
    pub async fn write_all(&self, data: &[u8]) -> WriteOutcome {
        let deadline = self.timeouts.write.map(|d| Instant::now() + d);
        let mut stream = self.writer.lock().await;
        let mut written = 0;

        while written < data.len() {
            let attempt = stream.write(&data[written..]);
            let result = match deadline {
                Some(deadline) => match time::timeout_at(deadline, attempt).await {
                    Ok(result) => result,
                    Err(_) => return WriteOutcome::failed(written, StreamError::Timeout),
                },
                None => attempt.await,
            };

            match result {
                Ok(0) => {
                    let err = std::io::Error::new(std::io::ErrorKind::WriteZero, "write zero");
                    return WriteOutcome::failed(written, err.into());
                }
                Ok(n) => written += n,
                Err(e) => return WriteOutcome::failed(written, e.into()),
            }
        }

        if let Err(e) = stream.flush().await {
            return WriteOutcome::failed(written, e.into());
        }

        tracing::trace!(written, "Stream write");
        WriteOutcome::completed(written)
    }
}

impl fmt::Debug for StreamAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamAdapter")
            .field("timeouts", &self.timeouts)
            .finish_non_exhaustive()
    }
}
