use crate::{
    Codeword, ConfigError, DecodeError, EncodeError, Instrument, NoteEvent, Program, Score,
    TimeSignature, TrackHeader,
};

/// The tick resolution the training corpora this format was built for
/// were quantized at.
///
/// Nothing in a serialized track records its resolution, so encoder and
/// decoder must be handed the same value out of band. This constant is a
/// convention, not a default: [`TrackCodec::new`] always takes the
/// resolution explicitly.
pub const COMMON_RESOLUTION: u32 = 240;

#[doc = r#"
Picks which part of a [`Score`] a track encodes.

The label `"Standard Kit"` is reserved for percussion; every other label
is treated as a General MIDI instrument name.

Two selection rules, both kept from the data this format was built on:

- [`Percussion`](Self::Percussion) merges the notes of every drum-flagged
  part, concatenated in source order.
- [`Name`](Self::Name) resolves the name to its program number, then uses
  that number as an *index into the score's instrument list*. The score's
  parts must be arranged by program for the name to land on the matching
  part.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstrumentSelector<'a> {
    /// Every drum-flagged part, merged.
    Percussion,
    /// A General MIDI instrument name.
    Name(&'a str),
}

impl<'a> InstrumentSelector<'a> {
    /// The label that selects percussion instead of a melodic program.
    pub const STANDARD_KIT: &'static str = "Standard Kit";

    /// Interprets a configured instrument label.
    ///
    /// Exactly `"Standard Kit"` means percussion; anything else is taken
    /// as a General MIDI name, resolved later at encode time.
    pub fn parse(label: &'a str) -> Self {
        if label == Self::STANDARD_KIT {
            Self::Percussion
        } else {
            Self::Name(label)
        }
    }
}

#[doc = r#"
Encodes one instrument of a score into a fixed window of codewords, and
decodes such a window back.

# Layout

Every track is exactly `window_size` words:

```text
slot    0        1        2       ...      window_size - 1
        |header  |note 1  |note 2 |  ...   |
```

Notes keep their source order and are never re-sorted by onset. A part
with fewer notes than the window leaves the tail slots all-zero; a part
with more is cut off at the window.

# Example
```rust
# use midicode::prelude::*;
let mut piano = Instrument::melodic(0);
piano.notes.push(NoteEvent {
    pitch: 64,
    velocity: 100,
    start: 0.0,
    end: 0.125,
});

let score = Score {
    instruments: vec![piano],
    ..Score::default()
};

let codec = TrackCodec::new(8, COMMON_RESOLUTION)?;
let track = codec.encode(&score, InstrumentSelector::Name("Acoustic Grand Piano"))?;

assert_eq!(track.words().len(), 8);
assert_eq!(track.words()[0], score.header().pack());

let decoded = codec.decode(track.words(), InstrumentSelector::Name("Acoustic Grand Piano"))?;
assert_eq!(decoded.instruments[0].notes.len(), 1);
assert_eq!(decoded.instruments[0].notes[0].pitch, 64);
# Ok::<(), Box<dyn std::error::Error>>(())
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackCodec {
    window_size: usize,
    ticks_per_beat: u32,
}

impl TrackCodec {
    /// Creates a codec for a fixed window and tick resolution.
    ///
    /// # Errors
    /// Zero is rejected for either parameter: a track must at least hold
    /// its header word, and quantization divides by the resolution.
    pub const fn new(window_size: usize, ticks_per_beat: u32) -> Result<Self, ConfigError> {
        if window_size == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        if ticks_per_beat == 0 {
            return Err(ConfigError::ZeroResolution);
        }
        Ok(Self {
            window_size,
            ticks_per_beat,
        })
    }

    /// Words per track, header slot included.
    #[inline]
    pub const fn window_size(&self) -> usize {
        self.window_size
    }

    /// Ticks per beat used for time quantization.
    #[inline]
    pub const fn ticks_per_beat(&self) -> u32 {
        self.ticks_per_beat
    }

    /// Encodes the selected part of a score into one track.
    ///
    /// Slot 0 is the packed header (see [`Score::header`] for the metadata
    /// fallbacks); slots onward hold the part's notes in source order,
    /// validated before packing; the rest of the window is zero-filled.
    /// Notes past `window_size - 1` are dropped.
    pub fn encode(
        &self,
        score: &Score,
        selector: InstrumentSelector<'_>,
    ) -> Result<EncodedTrack, EncodeError> {
        if score.instruments.is_empty() {
            return Err(EncodeError::EmptyScore);
        }
        let notes = self.select_notes(score, selector)?;

        let mut words = Vec::with_capacity(self.window_size);
        words.push(score.header().pack());

        let note_slots = self.window_size - 1;
        if notes.len() > note_slots {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "part holds {} notes but the window fits {note_slots}; dropping the tail",
                notes.len()
            );
        }
        for note in notes.iter().take(note_slots) {
            note.validate()?;
            words.push(note.pack(self.ticks_per_beat));
        }
        words.resize(self.window_size, Codeword::ZERO);

        Ok(EncodedTrack { words })
    }

    /// Decodes a track back into a single-instrument score.
    ///
    /// Takes a plain word slice so tracks read straight from disk decode
    /// without rewrapping. Slot 0 becomes the score's metadata; trailing
    /// all-zero padding is skipped, but a zero word *between* sounded
    /// notes keeps its slot and decodes as the pitch-0 rest it encodes.
    ///
    /// # Errors
    /// An empty slice has no header to read. A [`Name`] selector that is
    /// not a General MIDI name fails the same way it does on encode.
    ///
    /// [`Name`]: InstrumentSelector::Name
    pub fn decode(
        &self,
        words: &[Codeword],
        selector: InstrumentSelector<'_>,
    ) -> Result<Score, DecodeError> {
        let (header_word, note_words) = words.split_first().ok_or(DecodeError::Empty)?;
        let header = TrackHeader::unpack(*header_word);

        let mut instrument = match selector {
            InstrumentSelector::Percussion => Instrument::percussion(),
            InstrumentSelector::Name(name) => {
                let program = Program::from_name(name)
                    .ok_or_else(|| DecodeError::UnknownInstrument(name.to_string()))?;
                Instrument::melodic(program.program())
            }
        };

        let sounded = match note_words.iter().rposition(|word| !word.is_zero()) {
            Some(last) => &note_words[..=last],
            None => &note_words[..0],
        };
        instrument.notes = sounded
            .iter()
            .map(|word| NoteEvent::unpack(*word, self.ticks_per_beat))
            .collect();

        Ok(Score {
            key_signature: Some(header.key),
            tempo_bpm: Some(header.bpm as f64),
            time_signature: Some(TimeSignature::new(header.numerator, header.denominator)),
            instruments: vec![instrument],
        })
    }

    fn select_notes<'s>(
        &self,
        score: &'s Score,
        selector: InstrumentSelector<'_>,
    ) -> Result<Vec<&'s NoteEvent>, EncodeError> {
        match selector {
            InstrumentSelector::Percussion => {
                let mut notes = Vec::new();
                let mut found = false;
                for part in score.instruments.iter().filter(|part| part.is_drum) {
                    found = true;
                    notes.extend(part.notes.iter());
                }
                if !found {
                    return Err(EncodeError::NoPercussion);
                }
                Ok(notes)
            }
            InstrumentSelector::Name(name) => {
                let program = Program::from_name(name)
                    .ok_or_else(|| EncodeError::UnknownInstrument(name.to_string()))?;
                let index = program.program() as usize;
                let part = score
                    .instruments
                    .get(index)
                    .ok_or(EncodeError::MissingInstrument {
                        index,
                        available: score.instruments.len(),
                    })?;
                Ok(part.notes.iter().collect())
            }
        }
    }
}

/// A fixed window of codewords produced by [`TrackCodec::encode`].
///
/// The window length is configuration, not data: nothing inside the words
/// records it, which is also why the on-disk form carries no length
/// prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct EncodedTrack {
    words: Vec<Codeword>,
}

impl EncodedTrack {
    /// Wraps words read back from storage.
    pub const fn from_words(words: Vec<Codeword>) -> Self {
        Self { words }
    }

    /// The raw window, padding included.
    #[inline]
    pub fn words(&self) -> &[Codeword] {
        &self.words
    }

    /// Unwraps the window for storage.
    pub fn into_words(self) -> Vec<Codeword> {
        self.words
    }

    /// Reads the header back out of slot 0.
    pub fn header(&self) -> Option<TrackHeader> {
        self.words.first().map(|word| TrackHeader::unpack(*word))
    }

    /// Window length in words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True only for a track with no words at all.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl AsRef<[Codeword]> for EncodedTrack {
    fn as_ref(&self) -> &[Codeword] {
        &self.words
    }
}

#[cfg(test)]
fn note(pitch: u8, start: f64, end: f64, velocity: u8) -> NoteEvent {
    NoteEvent {
        pitch,
        velocity,
        start,
        end,
    }
}

#[cfg(test)]
fn piano_score(notes: Vec<NoteEvent>) -> Score {
    let mut piano = Instrument::melodic(0);
    piano.notes = notes;
    Score {
        key_signature: Some(5),
        tempo_bpm: Some(120.0),
        time_signature: Some(TimeSignature::FOUR_FOUR),
        instruments: vec![piano],
    }
}

#[cfg(test)]
const PIANO: InstrumentSelector<'static> = InstrumentSelector::Name("Acoustic Grand Piano");

#[test]
fn window_lays_out_header_notes_then_padding() {
    use pretty_assertions::assert_eq;
    let notes = vec![
        note(60, 0.0, 0.125, 100),
        note(64, 0.125, 0.25, 90),
        note(67, 0.25, 0.375, 80),
    ];
    let score = piano_score(notes.clone());

    let codec = TrackCodec::new(8, COMMON_RESOLUTION).unwrap();
    let track = codec.encode(&score, PIANO).unwrap();

    assert_eq!(track.len(), 8);
    assert_eq!(track.words()[0], score.header().pack());
    for (slot, original) in track.words()[1..4].iter().zip(&notes) {
        assert_eq!(*slot, original.pack(COMMON_RESOLUTION));
    }
    for slot in &track.words()[4..] {
        assert_eq!(*slot, Codeword::ZERO);
    }
}

#[test]
fn overflowing_parts_are_cut_at_the_window() {
    use pretty_assertions::assert_eq;
    let notes: Vec<_> = (0..6)
        .map(|i| note(60 + i, i as f64 * 0.125, i as f64 * 0.125 + 0.1, 100))
        .collect();
    let score = piano_score(notes.clone());

    let codec = TrackCodec::new(4, COMMON_RESOLUTION).unwrap();
    let track = codec.encode(&score, PIANO).unwrap();

    assert_eq!(track.len(), 4);
    assert_eq!(track.words()[3], notes[2].pack(COMMON_RESOLUTION));
}

#[test]
fn named_selection_indexes_the_instrument_list_by_program() {
    use pretty_assertions::assert_eq;
    // "Electric Grand Piano" is program 2, so slot 2 of the list is
    // chosen no matter what program that part claims to be.
    let mut parts = vec![
        Instrument::melodic(0),
        Instrument::melodic(40),
        Instrument::melodic(99),
    ];
    parts[2].notes.push(note(48, 0.0, 0.1, 64));
    let score = Score {
        instruments: parts,
        ..Score::default()
    };

    let codec = TrackCodec::new(4, COMMON_RESOLUTION).unwrap();
    let track = codec
        .encode(&score, InstrumentSelector::Name("Electric Grand Piano"))
        .unwrap();

    assert_eq!(
        track.words()[1],
        note(48, 0.0, 0.1, 64).pack(COMMON_RESOLUTION)
    );
}

#[test]
fn selection_errors_name_each_failure() {
    let score = piano_score(vec![note(60, 0.0, 0.1, 100)]);
    let codec = TrackCodec::new(8, COMMON_RESOLUTION).unwrap();

    let err = codec
        .encode(&score, InstrumentSelector::Name("Theremin"))
        .unwrap_err();
    assert!(matches!(err, EncodeError::UnknownInstrument(name) if name == "Theremin"));

    // "Gunshot" is program 127; the score only has one part.
    let err = codec
        .encode(&score, InstrumentSelector::Name("Gunshot"))
        .unwrap_err();
    assert!(matches!(
        err,
        EncodeError::MissingInstrument {
            index: 127,
            available: 1
        }
    ));

    let err = codec
        .encode(&Score::default(), PIANO)
        .unwrap_err();
    assert!(matches!(err, EncodeError::EmptyScore));
}

#[test]
fn percussion_merges_every_drum_part_in_order() {
    use pretty_assertions::assert_eq;
    let mut kick = Instrument::percussion();
    kick.notes.push(note(36, 0.0, 0.05, 110));
    kick.notes.push(note(36, 0.5, 0.55, 110));
    let mut hats = Instrument::percussion();
    hats.notes.push(note(42, 0.25, 0.3, 70));

    let score = Score {
        instruments: vec![Instrument::melodic(0), kick, Instrument::melodic(40), hats],
        ..Score::default()
    };

    let codec = TrackCodec::new(8, COMMON_RESOLUTION).unwrap();
    let track = codec.encode(&score, InstrumentSelector::Percussion).unwrap();

    // Both drum parts, kick first, concatenated rather than interleaved.
    let expected = [
        note(36, 0.0, 0.05, 110),
        note(36, 0.5, 0.55, 110),
        note(42, 0.25, 0.3, 70),
    ];
    for (slot, original) in track.words()[1..4].iter().zip(&expected) {
        assert_eq!(*slot, original.pack(COMMON_RESOLUTION));
    }
}

#[test]
fn percussion_needs_a_drum_part() {
    let score = piano_score(vec![note(60, 0.0, 0.1, 100)]);
    let codec = TrackCodec::new(8, COMMON_RESOLUTION).unwrap();
    let err = codec
        .encode(&score, InstrumentSelector::Percussion)
        .unwrap_err();
    assert!(matches!(err, EncodeError::NoPercussion));
}

#[test]
fn malformed_notes_are_rejected_before_packing() {
    use crate::NoteError;
    let score = piano_score(vec![note(200, 0.0, 0.1, 100)]);
    let codec = TrackCodec::new(8, COMMON_RESOLUTION).unwrap();
    let err = codec.encode(&score, PIANO).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::Note(NoteError::PitchOutOfRange(200))
    ));
}

#[test]
fn decode_restores_metadata_and_part_kind() {
    use pretty_assertions::assert_eq;
    let score = piano_score(vec![note(60, 0.0, 0.1, 100)]);
    let codec = TrackCodec::new(8, COMMON_RESOLUTION).unwrap();
    let track = codec.encode(&score, PIANO).unwrap();

    let decoded = codec.decode(track.words(), PIANO).unwrap();
    assert_eq!(decoded.key_signature, Some(5));
    assert_eq!(decoded.tempo_bpm, Some(120.0));
    assert_eq!(decoded.time_signature, Some(TimeSignature::FOUR_FOUR));
    assert_eq!(decoded.instruments.len(), 1);
    assert!(!decoded.instruments[0].is_drum);
    assert_eq!(decoded.instruments[0].program, 0);

    let drums = codec
        .decode(track.words(), InstrumentSelector::Percussion)
        .unwrap();
    assert!(drums.instruments[0].is_drum);
}

#[test]
fn decode_skips_trailing_padding_but_keeps_interior_rests() {
    use pretty_assertions::assert_eq;
    let header = TrackHeader {
        key: 0,
        bpm: 120,
        numerator: 4,
        denominator: 4,
    };
    let sounded = note(60, 0.0, 0.1, 100).pack(COMMON_RESOLUTION);
    let words = [
        header.pack(),
        sounded,
        Codeword::ZERO, // interior rest, kept
        sounded,
        Codeword::ZERO, // padding, dropped
        Codeword::ZERO,
    ];

    let codec = TrackCodec::new(6, COMMON_RESOLUTION).unwrap();
    let decoded = codec.decode(&words, PIANO).unwrap();

    let notes = &decoded.instruments[0].notes;
    assert_eq!(notes.len(), 3);
    assert_eq!(notes[0].pitch, 60);
    assert_eq!(notes[1].pitch, 0);
    assert_eq!(notes[2].pitch, 60);
}

#[test]
fn decode_needs_a_header_word() {
    let codec = TrackCodec::new(8, COMMON_RESOLUTION).unwrap();
    assert!(matches!(
        codec.decode(&[], PIANO).unwrap_err(),
        DecodeError::Empty
    ));
}

#[test]
fn zero_configuration_is_rejected() {
    use crate::ConfigError;
    assert_eq!(TrackCodec::new(0, 240), Err(ConfigError::ZeroWindow));
    assert_eq!(TrackCodec::new(8, 0), Err(ConfigError::ZeroResolution));
}

#[test]
fn standard_kit_label_selects_percussion() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        InstrumentSelector::parse("Standard Kit"),
        InstrumentSelector::Percussion
    );
    assert_eq!(
        InstrumentSelector::parse("Viola"),
        InstrumentSelector::Name("Viola")
    );
    // The sentinel is exact; near-misses fall through to name lookup.
    assert_eq!(
        InstrumentSelector::parse("standard kit"),
        InstrumentSelector::Name("standard kit")
    );
}
