#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `compress` exposes the block engines consumed by the pull-based stream
//! adapter in `stream_io`. An engine accepts one input slice and one output
//! slice per call and reports how many bytes it consumed and produced, and
//! whether the stream has ended. Callers keep ownership of every buffer.
//!
//! # Design
//!
//! - [`engine`] defines the [`BlockEngine`] trait, the [`Flush`] mode,
//!   [`Progress`] reporting and the [`new_engine`] factory.
//! - [`zlib`] implements zlib and raw deflate on top of
//!   [`flate2`](https://docs.rs/flate2)'s low-level state machines.
//! - [`zstd`] implements Zstandard on top of
//!   [`zstd`](https://docs.rs/zstd)'s raw streaming operations.
//!
//! # Invariants
//!
//! - Engines never allocate output buffers; all output lands in the slice the
//!   caller passes in.
//! - Once [`Flush::Finish`] has been passed the caller supplies no further
//!   input, and the engine eventually reports [`EngineStatus::End`].
//! - Gzip compression is unsupported: [`new_engine`] fails with
//!   [`EngineError::Unsupported`] rather than emitting an unterminated container.
//!
//! # Examples
//!
//! ```
//! use compress::{Algorithm, CompressionLevel, Direction, EngineStatus, Flush, new_engine};
//!
//! # fn main() -> Result<(), compress::EngineError> {
//! let mut deflate = new_engine(Direction::Compress, Algorithm::Deflate, CompressionLevel::Fast)?;
//! let mut compressed = vec![0u8; 128];
//! let step = deflate.process(b"streaming example payload", &mut compressed, Flush::Finish)?;
//! assert_eq!(step.status, EngineStatus::End);
//!
//! let mut inflate = new_engine(Direction::Decompress, Algorithm::Deflate, CompressionLevel::Default)?;
//! let mut plain = vec![0u8; 128];
//! let back = inflate.process(&compressed[..step.produced], &mut plain, Flush::None)?;
//! assert_eq!(&plain[..back.produced], b"streaming example payload");
//! # Ok(())
//! # }
//! ```

pub mod algorithm;
pub mod engine;
pub mod level;
pub mod zlib;
#[cfg(feature = "zstd")]
pub mod zstd;

pub use algorithm::{Algorithm, AlgorithmParseError, Direction};
pub use engine::{BlockEngine, EngineError, EngineStatus, Flush, Progress, new_engine};
pub use level::{CompressionLevel, CompressionLevelError};
