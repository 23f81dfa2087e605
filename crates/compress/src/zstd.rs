#![allow(clippy::module_name_repetitions)]

//! Zstandard engine driven through the `zstd::stream::raw` operations.
//!
//! The interface mirrors the deflate engine so callers can swap algorithms
//! without reworking their buffer plumbing.

use zstd::stream::raw::{Decoder, Encoder, InBuffer, Operation, OutBuffer};

use crate::engine::{BlockEngine, EngineError, EngineStatus, Flush, Progress};
use crate::level::CompressionLevel;

/// Progress of the encoder towards the end of its single frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum EncodeState {
    /// Accepting input.
    Running,
    /// All input is inside the encoder; only the epilogue is being flushed.
    Finishing,
    /// The frame is complete.
    Finished,
}

enum Inner {
    Encode {
        encoder: Encoder<'static>,
        state: EncodeState,
    },
    Decode(Decoder<'static>),
}

/// Zstandard compressing or decompressing engine.
pub struct ZstdEngine {
    inner: Inner,
}

impl ZstdEngine {
    /// Creates a compressing engine at the given level.
    pub fn compress(level: CompressionLevel) -> Result<Self, EngineError> {
        let encoder = Encoder::new(level.zstd_level()).map_err(EngineError::Init)?;
        Ok(Self {
            inner: Inner::Encode {
                encoder,
                state: EncodeState::Running,
            },
        })
    }

    /// Creates a decompressing engine.
    pub fn decompress() -> Result<Self, EngineError> {
        let decoder = Decoder::new().map_err(EngineError::Init)?;
        Ok(Self {
            inner: Inner::Decode(decoder),
        })
    }
}

impl BlockEngine for ZstdEngine {
    fn process(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: Flush,
    ) -> Result<Progress, EngineError> {
        let mut src = InBuffer::around(input);
        let mut dst = OutBuffer::around(output);

        let status = match &mut self.inner {
            Inner::Encode { state, .. } if *state == EncodeState::Finished => EngineStatus::End,
            Inner::Encode { encoder, state } => {
                // Running the encoder after the epilogue started would open a new frame.
                if *state == EncodeState::Running {
                    encoder
                        .run(&mut src, &mut dst)
                        .map_err(EngineError::Zstd)?;
                    if flush == Flush::Finish && src.pos() == input.len() {
                        *state = EncodeState::Finishing;
                    }
                }
                if *state == EncodeState::Finishing {
                    let remaining = encoder.finish(&mut dst, true).map_err(EngineError::Zstd)?;
                    if remaining == 0 {
                        *state = EncodeState::Finished;
                        EngineStatus::End
                    } else {
                        EngineStatus::Ok
                    }
                } else {
                    EngineStatus::Ok
                }
            }
            Inner::Decode(decoder) => {
                let hint = decoder
                    .run(&mut src, &mut dst)
                    .map_err(EngineError::Zstd)?;
                if hint == 0 {
                    EngineStatus::End
                } else {
                    EngineStatus::Ok
                }
            }
        };

        Ok(Progress {
            consumed: src.pos(),
            produced: dst.pos(),
            status,
        })
    }
}
