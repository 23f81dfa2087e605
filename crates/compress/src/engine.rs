//! Block engine abstraction.
//!
//! A [`BlockEngine`] transforms one input slice into one output slice per call.
//! Callers own both buffers and advance their own cursors from the
//! [`Progress`] returned by [`BlockEngine::process`]; the engine never
//! allocates output on the caller's behalf.
//!
//! # Examples
//!
//! ```
//! use compress::{Algorithm, CompressionLevel, Direction, Flush, EngineStatus, new_engine};
//!
//! let mut engine = new_engine(Direction::Compress, Algorithm::Zlib, CompressionLevel::Default)?;
//! let mut output = vec![0u8; 256];
//! let progress = engine.process(b"payload", &mut output, Flush::Finish)?;
//! assert_eq!(progress.consumed, 7);
//! assert_eq!(progress.status, EngineStatus::End);
//! # Ok::<(), compress::EngineError>(())
//! ```

use std::io;

use thiserror::Error;

use crate::algorithm::{Algorithm, Direction};
use crate::level::CompressionLevel;
use crate::zlib::FlateEngine;
#[cfg(feature = "zstd")]
use crate::zstd::ZstdEngine;

/// Flush mode handed to [`BlockEngine::process`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Flush {
    /// More input may follow.
    #[default]
    None,
    /// No further input will arrive; emit everything that remains.
    Finish,
}

/// Outcome of a successful engine call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EngineStatus {
    /// Progress was made and more calls may be needed.
    Ok,
    /// The stream is complete. Nothing further will be produced.
    End,
}

/// Bytes consumed and produced by a single [`BlockEngine::process`] call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Progress {
    /// Number of bytes taken from the front of the input slice.
    pub consumed: usize,
    /// Number of bytes written to the front of the output slice.
    pub produced: usize,
    /// Whether the stream has ended.
    pub status: EngineStatus,
}

impl Progress {
    /// Reports whether the call neither consumed nor produced anything.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.consumed == 0 && self.produced == 0
    }
}

/// Errors raised while creating or driving an engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The direction/algorithm pair has no engine.
    #[error("{algorithm} does not support {direction}")]
    Unsupported {
        /// Requested direction.
        direction: Direction,
        /// Requested algorithm.
        algorithm: Algorithm,
    },
    /// The codec library refused to initialise.
    #[error("failed to initialise engine: {0}")]
    Init(#[source] io::Error),
    /// Deflate reported an internal error.
    #[error("deflate failed: {0}")]
    Deflate(String),
    /// Inflate rejected the compressed input.
    #[error("inflate failed: {0}")]
    Inflate(String),
    /// Zstandard reported an error.
    #[error("zstd failed: {0}")]
    Zstd(#[source] io::Error),
}

/// Block-processing primitive driven one input/output slice pair at a time.
pub trait BlockEngine: Send {
    /// Consumes a prefix of `input`, writes a prefix of `output`, and reports
    /// how far each advanced.
    fn process(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: Flush,
    ) -> Result<Progress, EngineError>;
}

/// Creates the engine matching `direction` and `algorithm`.
///
/// Gzip decompression yields a raw deflate engine; the container header is the
/// caller's to strip. Gzip compression is rejected because the container
/// trailer is never written.
pub fn new_engine(
    direction: Direction,
    algorithm: Algorithm,
    level: CompressionLevel,
) -> Result<Box<dyn BlockEngine>, EngineError> {
    match (direction, algorithm) {
        (Direction::Compress, Algorithm::Gzip) => Err(EngineError::Unsupported {
            direction,
            algorithm,
        }),
        (Direction::Compress, Algorithm::Zlib) => Ok(Box::new(FlateEngine::compress(level, true))),
        (Direction::Compress, Algorithm::Deflate) => {
            Ok(Box::new(FlateEngine::compress(level, false)))
        }
        (Direction::Decompress, Algorithm::Zlib) => Ok(Box::new(FlateEngine::decompress(true))),
        (Direction::Decompress, Algorithm::Deflate | Algorithm::Gzip) => {
            Ok(Box::new(FlateEngine::decompress(false)))
        }
        #[cfg(feature = "zstd")]
        (Direction::Compress, Algorithm::Zstd) => Ok(Box::new(ZstdEngine::compress(level)?)),
        #[cfg(feature = "zstd")]
        (Direction::Decompress, Algorithm::Zstd) => Ok(Box::new(ZstdEngine::decompress()?)),
    }
}
