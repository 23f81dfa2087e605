#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `stream_io` wraps a readable [`ByteSource`] and exposes the compressed or
//! decompressed form of its bytes through a pull interface. The caller reads
//! from a [`CompressionStream`]; every upstream refill and engine call happens
//! synchronously inside that read, so nothing is ever buffered beyond one
//! input chunk and one output chunk.
//!
//! # Design
//!
//! - [`adapter`] holds the double-buffered [`CompressionStream`] state machine.
//! - [`source`] defines [`ByteSource`] together with adapters for any
//!   [`std::io::Read`] and for files opened lazily by path.
//! - [`gzip`] strips the gzip member header so the payload can be inflated
//!   as raw deflate.
//! - [`config`] sizes the buffers and selects the compression level.
//! - [`oneshot`] drives a stream over an in-memory slice.
//!
//! Block engines come from the `compress` crate; the types a caller needs to
//! pick one are re-exported here.
//!
//! # Invariants
//!
//! - At most one upstream refill and one engine call happen per processing pass.
//! - Once the upstream reports exhaustion the engine is driven to finish and
//!   the source is never read again.
//! - [`CompressionStream::read`] returning 0 means the stream has reached
//!   [`StreamStatus::AtEnd`] or [`StreamStatus::Error`].
//! - Gzip decompression ignores the trailing CRC32 and size footer.
//!
//! # Examples
//!
//! Inflate a gzip file whose header carries an original file name:
//!
//! ```
//! use std::io::Read;
//! use stream_io::{Algorithm, CompressionStream, Direction, ReaderSource};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let member: &[u8] = &[
//!     0x1f, 0x8b, 0x08, 0x08, 0xef, 0xbb, 0xd1, 0x6a, 0x00, 0x03, b't', b'o', b't', b'o', 0x00,
//!     0x2b, 0xc9, 0x2f, 0xc9, 0xe7, 0x02, 0x00, 0xbd, 0x08, 0x7d, 0xf8, 0x05, 0x00, 0x00, 0x00,
//! ];
//! let mut stream =
//!     CompressionStream::new(ReaderSource::new(member), Direction::Decompress, Algorithm::Gzip)?;
//! let mut text = String::new();
//! stream.read_to_string(&mut text)?;
//! assert_eq!(text, "toto\n");
//! # Ok(())
//! # }
//! ```
//!
//! # See also
//!
//! - [`compress::engine`] for the block engine contract.

pub mod adapter;
pub mod config;
pub mod error;
pub mod gzip;
pub mod oneshot;
pub mod source;
pub mod status;
mod trace;

pub use adapter::CompressionStream;
pub use compress::{Algorithm, CompressionLevel, Direction};
pub use config::{DEFAULT_INPUT_CHUNK_SIZE, StreamConfig};
pub use error::StreamError;
pub use gzip::{HeaderError, HeaderParse, parse_header};
pub use oneshot::{compress_to_vec, decompress_to_vec};
pub use source::{ByteSource, FileSource, ReaderSource};
pub use status::{StreamEvent, StreamStatus};
