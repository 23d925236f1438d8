use crate::Codeword;

#[doc = r#"
Track-level metadata packed into slot 0 of every encoded track.

# Layout

```text
bit     31      24 23      16 15       8 7      4 3      0
        |unused   |key       |bpm       |num     |den    |
```

Key and bpm keep their full byte; the time signature's numerator and
denominator are stored as nibbles, so values above 15 alias modulo 16 when
packed. Out-of-range values wrap silently rather than erroring.

# Example
```rust
# use midicode::prelude::*;
let header = TrackHeader {
    key: 5,
    bpm: 120,
    numerator: 4,
    denominator: 4,
};

let word = header.pack();

assert_eq!(word.value(), (5 << 16) | (120 << 8) | (4 << 4) | 4);
assert_eq!(TrackHeader::unpack(word), header);
```
"#]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct TrackHeader {
    /// Key signature byte (0-255). The original corpus uses
    /// 0 for C major / A minor.
    pub key: u8,
    /// Whole beats per minute (0-255).
    pub bpm: u8,
    /// Time signature numerator. Only the low nibble survives packing.
    pub numerator: u8,
    /// Time signature denominator. Only the low nibble survives packing.
    pub denominator: u8,
}

impl TrackHeader {
    /// Packs the header into its codeword.
    ///
    /// Nibble fields are masked, never validated. A 7/8 signature packs
    /// exactly; a hypothetical 19/8 packs as 3/8.
    pub const fn pack(&self) -> Codeword {
        let word = ((self.key as u32) << 16)
            | ((self.bpm as u32) << 8)
            | (((self.numerator & 0xF) as u32) << 4)
            | ((self.denominator & 0xF) as u32);
        Codeword::new(word)
    }

    /// Extracts a header from a codeword.
    ///
    /// The inverse of [`pack`](Self::pack) for every in-range header.
    pub const fn unpack(word: Codeword) -> Self {
        let word = word.value();
        Self {
            key: ((word >> 16) & 0xFF) as u8,
            bpm: ((word >> 8) & 0xFF) as u8,
            numerator: ((word >> 4) & 0xF) as u8,
            denominator: (word & 0xF) as u8,
        }
    }
}

#[test]
fn pack_matches_reference_word() {
    use pretty_assertions::assert_eq;
    let header = TrackHeader {
        key: 5,
        bpm: 120,
        numerator: 4,
        denominator: 4,
    };
    let expected = (5u32 << 16) | (120 << 8) | (4 << 4) | 4;
    assert_eq!(header.pack().value(), expected);
    assert_eq!(TrackHeader::unpack(Codeword::new(expected)), header);
}

#[test]
fn round_trips_every_key_and_bpm() {
    for key in 0..=255u8 {
        for bpm in 0..=255u8 {
            let header = TrackHeader {
                key,
                bpm,
                numerator: 3,
                denominator: 8,
            };
            assert_eq!(TrackHeader::unpack(header.pack()), header);
        }
    }
}

#[test]
fn round_trips_every_time_signature_nibble() {
    for numerator in 0..=15u8 {
        for denominator in 0..=15u8 {
            let header = TrackHeader {
                key: 0,
                bpm: 90,
                numerator,
                denominator,
            };
            assert_eq!(TrackHeader::unpack(header.pack()), header);
        }
    }
}

#[test]
fn oversized_nibbles_alias_mod_16() {
    use pretty_assertions::assert_eq;
    let header = TrackHeader {
        key: 200,
        bpm: 240,
        numerator: 19,
        denominator: 16,
    };
    let unpacked = TrackHeader::unpack(header.pack());
    assert_eq!(unpacked.numerator, 3);
    assert_eq!(unpacked.denominator, 0);
    assert_eq!(unpacked.key, 200);
    assert_eq!(unpacked.bpm, 240);
}
