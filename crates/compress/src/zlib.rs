//! Deflate-family engine built on the low-level [`flate2::Compress`] and
//! [`flate2::Decompress`] state machines.
//!
//! The same engine serves zlib-wrapped and raw deflate streams; the only
//! difference is whether the two-byte zlib header and Adler-32 trailer are
//! expected. Gzip payloads are raw deflate once their container header has
//! been removed.

use flate2::{Compress, Decompress, FlushCompress, FlushDecompress, Status};

use crate::engine::{BlockEngine, EngineError, EngineStatus, Flush, Progress};
use crate::level::CompressionLevel;

enum Inner {
    Deflate(Compress),
    Inflate(Decompress),
}

/// Deflate or inflate engine.
pub struct FlateEngine {
    inner: Inner,
}

impl FlateEngine {
    /// Creates a compressing engine; `zlib_header` selects zlib over raw deflate.
    #[must_use]
    pub fn compress(level: CompressionLevel, zlib_header: bool) -> Self {
        Self {
            inner: Inner::Deflate(Compress::new(level.into(), zlib_header)),
        }
    }

    /// Creates a decompressing engine; `zlib_header` selects zlib over raw deflate.
    #[must_use]
    pub fn decompress(zlib_header: bool) -> Self {
        Self {
            inner: Inner::Inflate(Decompress::new(zlib_header)),
        }
    }
}

impl BlockEngine for FlateEngine {
    fn process(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: Flush,
    ) -> Result<Progress, EngineError> {
        match &mut self.inner {
            Inner::Deflate(compressor) => {
                let before_in = compressor.total_in();
                let before_out = compressor.total_out();
                let mode = match flush {
                    Flush::None => FlushCompress::None,
                    Flush::Finish => FlushCompress::Finish,
                };
                let status = compressor
                    .compress(input, output, mode)
                    .map_err(|e| EngineError::Deflate(e.to_string()))?;
                Ok(progress(
                    compressor.total_in() - before_in,
                    compressor.total_out() - before_out,
                    status,
                ))
            }
            Inner::Inflate(decompressor) => {
                let before_in = decompressor.total_in();
                let before_out = decompressor.total_out();
                let mode = match flush {
                    Flush::None => FlushDecompress::None,
                    Flush::Finish => FlushDecompress::Finish,
                };
                let status = decompressor
                    .decompress(input, output, mode)
                    .map_err(|e| EngineError::Inflate(e.to_string()))?;
                Ok(progress(
                    decompressor.total_in() - before_in,
                    decompressor.total_out() - before_out,
                    status,
                ))
            }
        }
    }
}

fn progress(consumed: u64, produced: u64, status: Status) -> Progress {
    Progress {
        consumed: consumed as usize,
        produced: produced as usize,
        // BufError only means no progress was possible this call.
        status: match status {
            Status::StreamEnd => EngineStatus::End,
            Status::Ok | Status::BufError => EngineStatus::Ok,
        },
    }
}
