//! Whole-buffer helpers built on [`CompressionStream`].

use std::io::{self, Read};

use compress::{Algorithm, CompressionLevel, Direction};

use crate::adapter::CompressionStream;
use crate::config::StreamConfig;
use crate::source::ReaderSource;

/// Compresses `input` with `algorithm` at `level`.
///
/// # Errors
///
/// Returns [`io::ErrorKind::Unsupported`] for algorithms that cannot
/// compress (gzip), or any failure reported while draining the stream.
pub fn compress_to_vec(
    input: &[u8],
    algorithm: Algorithm,
    level: CompressionLevel,
) -> io::Result<Vec<u8>> {
    let config = StreamConfig::default().with_level(level);
    drain(input, Direction::Compress, algorithm, config)
}

/// Decompresses `input`, which must hold one complete `algorithm` stream.
///
/// # Errors
///
/// Returns [`io::ErrorKind::InvalidData`] for corrupt input and
/// [`io::ErrorKind::UnexpectedEof`] for truncated input.
pub fn decompress_to_vec(input: &[u8], algorithm: Algorithm) -> io::Result<Vec<u8>> {
    drain(input, Direction::Decompress, algorithm, StreamConfig::default())
}

fn drain(
    input: &[u8],
    direction: Direction,
    algorithm: Algorithm,
    config: StreamConfig,
) -> io::Result<Vec<u8>> {
    let mut stream =
        CompressionStream::with_config(ReaderSource::new(input), direction, algorithm, config)
            .map_err(|error| io::Error::new(error.kind(), error))?;
    let mut output = Vec::new();
    stream.read_to_end(&mut output)?;
    stream.close();
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zlib_round_trip() {
        let plain = b"one shot ".repeat(500);
        let packed = compress_to_vec(&plain, Algorithm::Zlib, CompressionLevel::Fast).unwrap();
        assert_eq!(packed[0], 0x78);
        assert_eq!(decompress_to_vec(&packed, Algorithm::Zlib).unwrap(), plain);
    }

    #[test]
    fn gzip_compression_is_unsupported() {
        let err = compress_to_vec(b"x", Algorithm::Gzip, CompressionLevel::Default).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
    }

    #[test]
    fn truncated_input_is_an_unexpected_eof() {
        let packed =
            compress_to_vec(&b"cut short ".repeat(200), Algorithm::Deflate, CompressionLevel::Default)
                .unwrap();
        let err = decompress_to_vec(&packed[..packed.len() / 2], Algorithm::Deflate).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
