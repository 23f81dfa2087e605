//! Compression levels shared by every engine.

use std::{fmt, num::NonZeroU8};

use flate2::Compression;

/// Compression levels recognised by the engines.
///
/// Ignored when decompressing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CompressionLevel {
    /// Favour speed over compression ratio.
    Fast,
    /// Use the codec's default balance between speed and ratio.
    #[default]
    Default,
    /// Favour the best possible compression ratio.
    Best,
    /// Use an explicit level in the range `1..=9`.
    Precise(NonZeroU8),
}

impl CompressionLevel {
    /// Creates a [`CompressionLevel::Precise`] value from an explicit numeric level.
    ///
    /// The supplied `level` must fall within the inclusive range `1..=9`.
    pub fn from_numeric(level: u32) -> Result<Self, CompressionLevelError> {
        u8::try_from(level)
            .ok()
            .filter(|value| (1..=9).contains(value))
            .and_then(NonZeroU8::new)
            .map(Self::Precise)
            .ok_or(CompressionLevelError::new(level))
    }

    /// Constructs a [`CompressionLevel::Precise`] variant from the provided level.
    #[must_use]
    pub const fn precise(level: NonZeroU8) -> Self {
        Self::Precise(level)
    }

    /// Maps the level onto the Zstandard scale.
    #[must_use]
    pub fn zstd_level(self) -> i32 {
        match self {
            Self::Fast => 1,
            Self::Default => 3,
            Self::Best => 19,
            Self::Precise(value) => i32::from(value.get()),
        }
    }
}

impl From<CompressionLevel> for Compression {
    fn from(level: CompressionLevel) -> Self {
        match level {
            CompressionLevel::Fast => Self::fast(),
            CompressionLevel::Default => Self::default(),
            CompressionLevel::Best => Self::best(),
            CompressionLevel::Precise(value) => Self::new(u32::from(value.get())),
        }
    }
}

/// Error returned when a requested compression level falls outside `1..=9`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CompressionLevelError {
    level: u32,
}

impl CompressionLevelError {
    const fn new(level: u32) -> Self {
        Self { level }
    }

    /// Returns the invalid compression level that triggered the error.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }
}

impl fmt::Display for CompressionLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "compression level {} is outside the supported range 1-9",
            self.level
        )
    }
}

impl std::error::Error for CompressionLevelError {}
