use thiserror::Error;

/// A note whose fields fall outside the structural contract.
///
/// The packed layout gives pitch and velocity 7 meaningful bits and assumes
/// times are non-negative with `end >= start`. Anything else would corrupt
/// neighboring bit fields, so it is rejected before packing.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum NoteError {
    /// Pitch byte above 127.
    #[error("pitch {0} is out of range (0-127)")]
    PitchOutOfRange(u8),
    /// Velocity byte above 127.
    #[error("velocity {0} is out of range (0-127)")]
    VelocityOutOfRange(u8),
    /// Negative or non-finite start time.
    #[error("start time {0}s is not a non-negative finite number")]
    BadStart(f64),
    /// Note ends before it begins.
    #[error("note ends at {end}s, before its start at {start}s")]
    EndBeforeStart {
        /// Start time in seconds.
        start: f64,
        /// End time in seconds.
        end: f64,
    },
}

/// A set of errors that can occur while encoding a score into a track.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The score holds no instruments at all.
    #[error("score has no instruments")]
    EmptyScore,
    /// The selector named an instrument that is not in the General MIDI set.
    #[error("{0:?} is not a General MIDI instrument name")]
    UnknownInstrument(String),
    /// The named instrument's program number points past the end of the
    /// score's instrument list.
    #[error("no instrument at index {index}; score has {available}")]
    MissingInstrument {
        /// The program number used as a list index.
        index: usize,
        /// How many instruments the score actually has.
        available: usize,
    },
    /// A percussion encode found no drum-flagged instrument.
    #[error("score has no percussion instrument")]
    NoPercussion,
    /// A selected note failed validation.
    #[error("malformed note: {0}")]
    Note(#[from] NoteError),
}

/// A set of errors that can occur while decoding a track back into a score.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The word slice is empty, so there is no header to read.
    #[error("track has no header word")]
    Empty,
    /// The selector named an instrument that is not in the General MIDI set.
    #[error("{0:?} is not a General MIDI instrument name")]
    UnknownInstrument(String),
}

/// Rejected [`TrackCodec`](crate::TrackCodec) configuration.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A track must at least hold its header word.
    #[error("window size must be at least 1")]
    ZeroWindow,
    /// Time quantization divides by the resolution.
    #[error("ticks per beat must be at least 1")]
    ZeroResolution,
}
