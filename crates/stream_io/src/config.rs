//! Buffer sizing and compression tuning for a stream.

use std::num::NonZeroUsize;

use compress::CompressionLevel;

/// Default capacity of the input buffer, in bytes.
pub const DEFAULT_INPUT_CHUNK_SIZE: NonZeroUsize = NonZeroUsize::new(4096).unwrap();

/// Output buffer capacity relative to the input buffer when not set explicitly.
const OUTPUT_TO_INPUT_RATIO: NonZeroUsize = NonZeroUsize::new(2).unwrap();

/// Per-stream configuration.
///
/// The output buffer defaults to twice the input buffer because
/// decompression can expand data within a single engine pass.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StreamConfig {
    /// Upper bound on the bytes pulled from upstream per refill.
    pub input_chunk_size: NonZeroUsize,
    /// Explicit output buffer capacity; `None` means twice the input size.
    pub output_chunk_size: Option<NonZeroUsize>,
    /// Level handed to compressing engines.
    pub level: CompressionLevel,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            input_chunk_size: DEFAULT_INPUT_CHUNK_SIZE,
            output_chunk_size: None,
            level: CompressionLevel::Default,
        }
    }
}

impl StreamConfig {
    /// Sets the input buffer capacity.
    pub const fn with_input_chunk_size(mut self, size: NonZeroUsize) -> Self {
        self.input_chunk_size = size;
        self
    }

    /// Sets an explicit output buffer capacity.
    pub const fn with_output_chunk_size(mut self, size: NonZeroUsize) -> Self {
        self.output_chunk_size = Some(size);
        self
    }

    /// Sets the compression level.
    pub const fn with_level(mut self, level: CompressionLevel) -> Self {
        self.level = level;
        self
    }

    /// Output buffer capacity after applying the default.
    pub fn effective_output_chunk_size(&self) -> NonZeroUsize {
        self.output_chunk_size
            .unwrap_or_else(|| self.input_chunk_size.saturating_mul(OUTPUT_TO_INPUT_RATIO))
    }
}
