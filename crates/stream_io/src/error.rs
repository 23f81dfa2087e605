//! Failures recorded by a [`CompressionStream`](crate::CompressionStream).

use std::io;

use compress::EngineError;
use thiserror::Error;

use crate::gzip::HeaderError;

/// Errors surfaced through construction or [`last_error`](crate::CompressionStream::last_error).
#[derive(Debug, Error)]
pub enum StreamError {
    /// The engine could not be created for the requested direction and algorithm.
    #[error("cannot construct stream: {0}")]
    Construction(#[source] EngineError),
    /// The upstream bytes do not start with a gzip header.
    #[error(transparent)]
    HeaderMismatch(#[from] HeaderError),
    /// The first upstream chunk ended before the gzip header did.
    #[error("gzip header does not fit in the first {available} byte(s) of input")]
    HeaderTruncated {
        /// Number of bytes the first refill produced.
        available: usize,
    },
    /// The upstream source failed to open or read.
    #[error("upstream read failed: {0}")]
    Upstream(#[source] io::Error),
    /// The engine rejected its input.
    #[error("processing failed: {0}")]
    Engine(#[source] EngineError),
    /// The engine stopped making progress before reaching the end of its stream.
    #[error("processing failed: compressed stream is truncated")]
    Stalled,
}

impl StreamError {
    /// Returns the I/O error kind closest to this failure.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Self::Construction(_) => io::ErrorKind::Unsupported,
            Self::HeaderMismatch(_) | Self::Engine(_) => io::ErrorKind::InvalidData,
            Self::HeaderTruncated { .. } | Self::Stalled => io::ErrorKind::UnexpectedEof,
            Self::Upstream(error) => error.kind(),
        }
    }
}
