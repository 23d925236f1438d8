use crate::{Codeword, NoteError};

#[doc = r#"
One sounded note, in real time.

This is the structural contract every music-file frontend must meet: a
pitch byte, a velocity byte, and start/end times in seconds. Nothing else
about the source file matters to the codec.

# Layout

A note packs into a [`Codeword`] as:

```text
bit     31              16 15   11 10    7 6       0
        |start tick       |dur    |vel    |pitch   |
         16 bits, mod 2^16 5 bits  4 bits  7 bits
```

Times are quantized to ticks by `floor(seconds * ticks_per_beat)`. The
16-bit start field wraps modulo 65536 ticks and the 5-bit duration field
wraps modulo 32 ticks; both are deliberate wire-format losses, preserved
for compatibility with every track already serialized in this layout.
Velocity is downscaled to a nibble, so a decoded velocity can differ from
the original by up to 9. Pitch survives exactly.

# Example
```rust
# use midicode::prelude::*;
let note = NoteEvent {
    pitch: 60,
    velocity: 100,
    start: 0.5,
    end: 0.625,
};

// 120 ticks in, 30 ticks long, velocity nibble 11
let word = note.pack(240);
assert_eq!(word.value(), (120 << 16) | (30 << 11) | (11 << 7) | 60);

let back = NoteEvent::unpack(word, 240);
assert_eq!(back.pitch, 60);
assert_eq!(back.velocity, 93); // nibble 11 scales back up to 93
```
"#]
#[derive(Clone, Copy, PartialEq, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct NoteEvent {
    /// MIDI key number, 0-127.
    pub pitch: u8,
    /// Key-press velocity, 0-127.
    pub velocity: u8,
    /// Onset in seconds from the start of the piece.
    pub start: f64,
    /// Release in seconds, never before `start`.
    pub end: f64,
}

impl NoteEvent {
    /// Creates a note, checking the structural contract.
    pub const fn new(pitch: u8, start: f64, end: f64, velocity: u8) -> Result<Self, NoteError> {
        let note = Self {
            pitch,
            velocity,
            start,
            end,
        };
        match note.validate() {
            Ok(()) => Ok(note),
            Err(e) => Err(e),
        }
    }

    /// Checks that every field can survive packing.
    ///
    /// Packing itself never fails; it masks. An out-of-range pitch would
    /// spill into the velocity bits, so track encoding validates first.
    pub const fn validate(&self) -> Result<(), NoteError> {
        if self.pitch > 127 {
            return Err(NoteError::PitchOutOfRange(self.pitch));
        }
        if self.velocity > 127 {
            return Err(NoteError::VelocityOutOfRange(self.velocity));
        }
        if !(self.start.is_finite() && self.start >= 0.0) {
            return Err(NoteError::BadStart(self.start));
        }
        if !(self.end.is_finite() && self.end >= self.start) {
            return Err(NoteError::EndBeforeStart {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Packs the note into its codeword at the given tick resolution.
    ///
    /// Pure masking, no validation: the caller guarantees pitch and
    /// velocity fit in 7 bits (see [`validate`](Self::validate)). The
    /// all-rest note (pitch 0, velocity 0, zero times) packs to
    /// [`Codeword::ZERO`], the same word used to pad short tracks.
    pub const fn pack(&self, ticks_per_beat: u32) -> Codeword {
        let start_tick = ticks(self.start, ticks_per_beat);
        let end_tick = ticks(self.end, ticks_per_beat);

        let step = (start_tick & 0xFFFF) as u32;
        let duration = ((end_tick - start_tick) & 0x1F) as u32;
        let velocity = velocity_to_nibble(self.velocity);

        Codeword::new((step << 16) | (duration << 11) | (velocity << 7) | self.pitch as u32)
    }

    /// Reconstructs a note from its codeword at the given tick resolution.
    ///
    /// Must be called with the same `ticks_per_beat` the word was packed
    /// with; nothing in the word records the resolution.
    pub const fn unpack(word: Codeword, ticks_per_beat: u32) -> Self {
        let word = word.value();

        let step = (word >> 16) & 0xFFFF;
        let duration = (word >> 11) & 0x1F;
        let velocity = (word >> 7) & 0xF;
        let pitch = (word & 0x7F) as u8;

        let start = step as f64 / ticks_per_beat as f64;
        let end = start + duration as f64 / ticks_per_beat as f64;

        Self {
            pitch,
            velocity: velocity_from_nibble(velocity),
            start,
            end,
        }
    }
}

/// Seconds to ticks, truncating toward zero.
const fn ticks(seconds: f64, ticks_per_beat: u32) -> i64 {
    (seconds * ticks_per_beat as f64) as i64
}

/// 7-bit velocity down to its 4-bit wire form.
const fn velocity_to_nibble(velocity: u8) -> u32 {
    (velocity as u32 * 15 / 127) & 0xF
}

/// 4-bit wire form back up to a 7-bit velocity, rounding half up.
const fn velocity_from_nibble(nibble: u32) -> u8 {
    ((nibble * 127 + 7) / 15) as u8
}

#[test]
fn pack_matches_reference_word() {
    use pretty_assertions::assert_eq;
    let note = NoteEvent {
        pitch: 60,
        velocity: 100,
        start: 0.5,
        end: 0.75,
    };
    // 120 ticks in, 60 ticks long (28 once the 5-bit field wraps),
    // velocity nibble 11
    let expected = (120u32 << 16) | (28 << 11) | (11 << 7) | 60;
    assert_eq!(note.pack(240).value(), expected);
}

#[test]
fn every_pitch_survives_exactly() {
    for pitch in 0..128u8 {
        let note = NoteEvent {
            pitch,
            velocity: 64,
            start: 1.0,
            end: 1.0,
        };
        let back = NoteEvent::unpack(note.pack(240), 240);
        assert_eq!(back.pitch, pitch);
    }
}

#[test]
fn velocity_error_is_bounded() {
    for velocity in 0..128u8 {
        let note = NoteEvent {
            pitch: 60,
            velocity,
            start: 0.0,
            end: 0.0,
        };
        let back = NoteEvent::unpack(note.pack(240), 240);
        let error = (back.velocity as i16 - velocity as i16).abs();
        assert!(
            error <= 9,
            "velocity {velocity} came back as {} (error {error})",
            back.velocity
        );
    }
}

#[test]
fn velocity_extremes_are_exact() {
    use pretty_assertions::assert_eq;
    for velocity in [0u8, 127] {
        let note = NoteEvent {
            pitch: 0,
            velocity,
            start: 0.0,
            end: 0.0,
        };
        assert_eq!(NoteEvent::unpack(note.pack(240), 240).velocity, velocity);
    }
}

#[test]
fn duration_aliases_mod_32_ticks() {
    use pretty_assertions::assert_eq;
    // 120 ticks long; only 120 mod 32 = 24 fit the wire
    let note = NoteEvent {
        pitch: 72,
        velocity: 90,
        start: 0.0,
        end: 0.5,
    };
    let back = NoteEvent::unpack(note.pack(240), 240);
    let duration_ticks = ((back.end - back.start) * 240.0).round() as u32;
    assert_eq!(duration_ticks, 24);
}

#[test]
fn start_tick_wraps_mod_65536() {
    use pretty_assertions::assert_eq;
    // 300s * 240 = 72000 ticks, which wraps to 6464
    let note = NoteEvent {
        pitch: 60,
        velocity: 64,
        start: 300.0,
        end: 300.0,
    };
    let word = note.pack(240);
    assert_eq!((word.value() >> 16) & 0xFFFF, 72000 % 65536);
}

#[test]
fn rest_note_packs_to_the_padding_word() {
    let note = NoteEvent {
        pitch: 0,
        velocity: 0,
        start: 0.0,
        end: 0.0,
    };
    assert_eq!(note.pack(240), Codeword::ZERO);
}

#[test]
fn validate_rejects_out_of_contract_fields() {
    use pretty_assertions::assert_eq;
    let base = NoteEvent {
        pitch: 60,
        velocity: 80,
        start: 1.0,
        end: 2.0,
    };
    assert_eq!(base.validate(), Ok(()));

    let mut note = base;
    note.pitch = 128;
    assert_eq!(note.validate(), Err(NoteError::PitchOutOfRange(128)));

    let mut note = base;
    note.velocity = 200;
    assert_eq!(note.validate(), Err(NoteError::VelocityOutOfRange(200)));

    let mut note = base;
    note.start = -0.25;
    assert_eq!(note.validate(), Err(NoteError::BadStart(-0.25)));

    let mut note = base;
    note.end = 0.5;
    assert_eq!(
        note.validate(),
        Err(NoteError::EndBeforeStart {
            start: 1.0,
            end: 0.5
        })
    );
}

#[test]
fn constructor_checks_the_contract() {
    assert!(NoteEvent::new(60, 0.0, 1.0, 100).is_ok());
    assert!(NoteEvent::new(255, 0.0, 1.0, 100).is_err());
}
