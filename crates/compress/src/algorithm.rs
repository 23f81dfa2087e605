//! Shared enumerations describing the codecs and processing directions supported by the workspace.

use core::fmt;
use core::str::FromStr;

/// Codec identifiers recognised by the workspace.
///
/// [`Algorithm::Gzip`] is the framed variant: the payload is raw deflate wrapped
/// in a gzip container whose header must be stripped before the engine sees it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    /// Deflate wrapped in the two-byte zlib header and Adler-32 trailer.
    #[default]
    Zlib,
    /// Raw deflate without any framing.
    Deflate,
    /// Zstandard frames.
    #[cfg(feature = "zstd")]
    Zstd,
    /// Raw deflate inside a gzip container (decompression only).
    Gzip,
}

impl Algorithm {
    /// Returns the canonical display name used for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zlib => "zlib",
            Self::Deflate => "deflate",
            #[cfg(feature = "zstd")]
            Self::Zstd => "zstd",
            Self::Gzip => "gzip",
        }
    }

    /// Reports whether the algorithm carries a container header that must be
    /// stripped before the payload reaches the block engine.
    #[must_use]
    pub const fn has_framing_header(self) -> bool {
        matches!(self, Self::Gzip)
    }

    /// Returns the set of algorithms available in the current build.
    #[must_use]
    pub fn available() -> &'static [Self] {
        #[cfg(feature = "zstd")]
        {
            const ALGORITHMS: &[Algorithm] = &[
                Algorithm::Zlib,
                Algorithm::Deflate,
                Algorithm::Zstd,
                Algorithm::Gzip,
            ];
            ALGORITHMS
        }

        #[cfg(not(feature = "zstd"))]
        {
            const ALGORITHMS: &[Algorithm] =
                &[Algorithm::Zlib, Algorithm::Deflate, Algorithm::Gzip];
            ALGORITHMS
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether an engine turns plain bytes into compressed bytes or the reverse.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// Plain input, compressed output.
    Compress,
    /// Compressed input, plain output.
    Decompress,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Compress => "compress",
            Self::Decompress => "decompress",
        })
    }
}

/// Error returned when attempting to parse an unsupported algorithm name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AlgorithmParseError {
    input: String,
}

impl AlgorithmParseError {
    /// Creates a parse error capturing the original input.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// Returns the invalid input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for AlgorithmParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported compression algorithm: {}", self.input)
    }
}

impl std::error::Error for AlgorithmParseError {}

impl FromStr for Algorithm {
    type Err = AlgorithmParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zlib" => Ok(Self::Zlib),
            "deflate" | "raw" => Ok(Self::Deflate),
            #[cfg(feature = "zstd")]
            "zstd" | "zst" => Ok(Self::Zstd),
            "gzip" | "gz" => Ok(Self::Gzip),
            other => Err(AlgorithmParseError::new(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn available_algorithms_always_include_flate_family() {
        let available = Algorithm::available();
        assert!(available.contains(&Algorithm::Zlib));
        assert!(available.contains(&Algorithm::Deflate));
        assert!(available.contains(&Algorithm::Gzip));
    }

    #[cfg(feature = "zstd")]
    #[test]
    fn available_algorithms_include_zstd_when_feature_enabled() {
        assert!(Algorithm::available().contains(&Algorithm::Zstd));
    }

    #[test]
    fn only_gzip_carries_a_framing_header() {
        for algorithm in Algorithm::available() {
            assert_eq!(
                algorithm.has_framing_header(),
                *algorithm == Algorithm::Gzip,
                "{algorithm}"
            );
        }
    }

    #[test]
    fn parsing_accepts_known_algorithms_and_aliases() {
        assert_eq!("zlib".parse::<Algorithm>().unwrap(), Algorithm::Zlib);
        assert_eq!(" Deflate ".parse::<Algorithm>().unwrap(), Algorithm::Deflate);
        assert_eq!("gz".parse::<Algorithm>().unwrap(), Algorithm::Gzip);
    }

    #[cfg(feature = "zstd")]
    #[test]
    fn parsing_accepts_zstd() {
        assert_eq!("zstd".parse::<Algorithm>().unwrap(), Algorithm::Zstd);
    }

    #[test]
    fn parsing_rejects_unknown_algorithms() {
        let err = "lzfse"
            .parse::<Algorithm>()
            .expect_err("lzfse unsupported");
        assert_eq!(err.input(), "lzfse");
        assert_eq!(err.to_string(), "unsupported compression algorithm: lzfse");
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for algorithm in Algorithm::available() {
            assert_eq!(algorithm.name().parse::<Algorithm>().unwrap(), *algorithm);
        }
    }
}
