//! Stream lifecycle states and readiness events.

use std::fmt;

/// Lifecycle of a [`CompressionStream`](crate::CompressionStream).
///
/// `NotOpen → Open → {Error, AtEnd}`, and any state moves to `Closed`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum StreamStatus {
    /// Constructed but not opened.
    #[default]
    NotOpen,
    /// Producing data.
    Open,
    /// A failure stopped production; see `last_error`.
    Error,
    /// Every byte has been delivered.
    AtEnd,
    /// Torn down. Terminal.
    Closed,
}

impl StreamStatus {
    /// Reports whether no further bytes will ever be produced.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Error | Self::AtEnd | Self::Closed)
    }
}

impl fmt::Display for StreamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotOpen => "not open",
            Self::Open => "open",
            Self::Error => "error",
            Self::AtEnd => "at end",
            Self::Closed => "closed",
        })
    }
}

/// Advisory notifications delivered to a registered event handler.
///
/// Handlers run synchronously inside `open` and `read`; correctness never
/// depends on them.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum StreamEvent {
    /// `open` succeeded.
    OpenCompleted,
    /// A processing pass produced bytes that `read` can return.
    HasBytesAvailable,
    /// The stream moved to [`StreamStatus::AtEnd`].
    EndEncountered,
    /// The stream moved to [`StreamStatus::Error`].
    ErrorOccurred,
}
