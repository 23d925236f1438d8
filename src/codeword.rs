use core::fmt;

#[doc = r#"
A single 32-bit codeword.

Every value this crate produces or consumes on the wire is one of these.
Two layouts share the type:

```text
header  |........|kkkkkkkk|bbbbbbbb|nnnndddd|
         31    24 23    16 15     8 7      0
         (unused) key      bpm      num/den

note    |ssssssss ssssssss|lllll|vvvv|ppppppp|
         31              16 15-11 10-7 6    0
         start tick         dur   vel  pitch
```

See [`TrackHeader`](crate::TrackHeader) and [`NoteEvent`](crate::NoteEvent)
for the field semantics. The all-zero word doubles as the padding value for
unused track slots.
"#]
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Default, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Codeword(u32);

impl Codeword {
    /// The padding word. Fills track slots that hold no note.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw 32-bit value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw 32-bit value.
    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// True for the padding word.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Codeword {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Codeword> for u32 {
    fn from(value: Codeword) -> Self {
        value.0
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

#[test]
fn display_is_fixed_width_hex() {
    use pretty_assertions::assert_eq;
    assert_eq!(Codeword::new(0x5_7844).to_string(), "0x00057844");
    assert_eq!(Codeword::ZERO.to_string(), "0x00000000");
}

#[test]
fn zero_word_is_padding() {
    assert!(Codeword::ZERO.is_zero());
    assert!(!Codeword::new(1).is_zero());
    assert_eq!(Codeword::default(), Codeword::ZERO);
}
