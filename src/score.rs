use core::fmt;

use crate::{NoteEvent, TrackHeader};

/// A time signature, stored as written: `numerator` beats to the bar, one
/// beat per `denominator`th note.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct TimeSignature {
    /// Beats per bar.
    pub numerator: u8,
    /// Note value of one beat (4 = quarter note).
    pub denominator: u8,
}

impl TimeSignature {
    /// Common time, the fallback when a score carries no signature.
    pub const FOUR_FOUR: Self = Self {
        numerator: 4,
        denominator: 4,
    };

    /// Creates a time signature.
    pub const fn new(numerator: u8, denominator: u8) -> Self {
        Self {
            numerator,
            denominator,
        }
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// One instrument's part: a program number, a drum flag, and its notes.
///
/// On channel-10 style percussion parts the program number is meaningless;
/// `is_drum` is what marks them.
#[derive(Clone, PartialEq, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Instrument {
    /// General MIDI program number, 0-127.
    pub program: u8,
    /// True for percussion parts.
    pub is_drum: bool,
    /// The notes of this part, in source order.
    pub notes: Vec<NoteEvent>,
}

impl Instrument {
    /// A melodic instrument with no notes yet.
    pub const fn melodic(program: u8) -> Self {
        Self {
            program,
            is_drum: false,
            notes: Vec::new(),
        }
    }

    /// A percussion part with no notes yet.
    pub const fn percussion() -> Self {
        Self {
            program: 0,
            is_drum: true,
            notes: Vec::new(),
        }
    }
}

#[doc = r#"
A parsed piece of music, reduced to what the codec reads.

This is the hand-off point from whatever music-file library parsed the
source: top-level metadata (all optional) and a list of instrument parts.

# Example
```rust
# use midicode::prelude::*;
let mut piano = Instrument::melodic(0);
piano.notes.push(NoteEvent {
    pitch: 60,
    velocity: 100,
    start: 0.0,
    end: 0.5,
});

let score = Score {
    tempo_bpm: Some(96.0),
    instruments: vec![piano],
    ..Score::default()
};

// Missing metadata falls back: key 0, 120 bpm, 4/4.
assert_eq!(score.header().bpm, 96);
assert_eq!(score.header().numerator, 4);
```
"#]
#[derive(Clone, PartialEq, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Score {
    /// Key signature byte, if the source recorded one. 0 is C major.
    pub key_signature: Option<u8>,
    /// First tempo of the piece in beats per minute.
    pub tempo_bpm: Option<f64>,
    /// First time signature of the piece.
    pub time_signature: Option<TimeSignature>,
    /// Instrument parts in source order.
    pub instruments: Vec<Instrument>,
}

impl Score {
    /// Builds the header word's fields from the score's metadata.
    ///
    /// Absent metadata falls back to key 0, 120 bpm, and 4/4, matching
    /// the corpus this format was built for. The tempo keeps whole beats
    /// only, wrapped to a byte.
    pub fn header(&self) -> TrackHeader {
        let signature = self.time_signature.unwrap_or(TimeSignature::FOUR_FOUR);
        TrackHeader {
            key: self.key_signature.unwrap_or(0),
            bpm: (self.tempo_bpm.unwrap_or(120.0) as i64 & 0xFF) as u8,
            numerator: signature.numerator,
            denominator: signature.denominator,
        }
    }
}

#[test]
fn header_applies_fallbacks() {
    use pretty_assertions::assert_eq;
    let header = Score::default().header();
    assert_eq!(
        header,
        TrackHeader {
            key: 0,
            bpm: 120,
            numerator: 4,
            denominator: 4,
        }
    );
}

#[test]
fn header_keeps_recorded_metadata() {
    use pretty_assertions::assert_eq;
    let score = Score {
        key_signature: Some(5),
        tempo_bpm: Some(89.94),
        time_signature: Some(TimeSignature::new(3, 8)),
        instruments: vec![],
    };
    let header = score.header();
    assert_eq!(header.key, 5);
    assert_eq!(header.bpm, 89); // whole beats only
    assert_eq!(header.numerator, 3);
    assert_eq!(header.denominator, 8);
}

#[test]
fn tempo_byte_wraps() {
    use pretty_assertions::assert_eq;
    let score = Score {
        tempo_bpm: Some(300.0),
        ..Score::default()
    };
    assert_eq!(score.header().bpm, 44);
}

#[test]
fn time_signature_displays_as_written() {
    assert_eq!(TimeSignature::new(7, 8).to_string(), "7/8");
    assert_eq!(TimeSignature::FOUR_FOUR.to_string(), "4/4");
}
