#![doc = r#"
Codeword sequences as Unicode text.

Subword tokenizers chew on strings, not integer arrays. Each codeword
maps to the `char` with its scalar value, one character per word, so a
whole track becomes a string and the exact words come back out of the
string's characters.

Not every word has a character: the surrogate range and anything above
U+10FFFF are unrepresentable, which in the note layout means start
ticks past 16 fall outside the text form. Such words are reported,
never skipped, so a produced string always carries every word it was
asked for.
"#]

use thiserror::Error;

use crate::Codeword;

/// A codeword that cannot become text.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TextError {
    /// The word's value is a surrogate or lies above U+10FFFF, so no
    /// character can carry it.
    #[error("codeword {0} is not a Unicode scalar value")]
    InvalidScalar(Codeword),
}

/// Renders words as text, one character per word.
///
/// # Errors
/// The first unrepresentable word is reported and nothing is emitted;
/// a word is never silently dropped from the output.
pub fn words_to_string(words: &[Codeword]) -> Result<String, TextError> {
    words
        .iter()
        .map(|word| char::from_u32(word.value()).ok_or(TextError::InvalidScalar(*word)))
        .collect()
}

/// Recovers the words behind a string produced by [`words_to_string`].
///
/// Every `char` already is a scalar value, so this direction cannot
/// fail and the round trip is exact.
pub fn string_to_words(text: &str) -> Vec<Codeword> {
    text.chars().map(|c| Codeword::new(c as u32)).collect()
}

#[test]
fn round_trips_an_encodable_track() {
    use pretty_assertions::assert_eq;
    // a header word and a few low-tick note words
    let words = vec![
        Codeword::new((5 << 16) | (120 << 8) | (4 << 4) | 4),
        Codeword::new((30 << 11) | (11 << 7) | 60),
        Codeword::new((3 << 16) | (15 << 11) | (7 << 7) | 42),
        Codeword::ZERO,
    ];

    let text = words_to_string(&words).unwrap();
    assert_eq!(text.chars().count(), words.len());
    assert_eq!(string_to_words(&text), words);
}

#[test]
fn empty_sequence_is_the_empty_string() {
    use pretty_assertions::assert_eq;
    assert_eq!(words_to_string(&[]).unwrap(), "");
    assert_eq!(string_to_words(""), Vec::new());
}

#[test]
fn surrogate_words_are_reported() {
    use pretty_assertions::assert_eq;
    let surrogate = Codeword::new(0xD800);
    assert_eq!(
        words_to_string(&[Codeword::new(65), surrogate]),
        Err(TextError::InvalidScalar(surrogate))
    );
}

#[test]
fn words_past_the_last_code_point_are_reported() {
    use pretty_assertions::assert_eq;
    // a start tick of 17 puts the word just past U+10FFFF
    let word = Codeword::new(17 << 16);
    assert_eq!(
        words_to_string(&[word]),
        Err(TextError::InvalidScalar(word))
    );
    // one tick earlier still fits
    assert!(words_to_string(&[Codeword::new((17 << 16) - 1)]).is_ok());
}

#[test]
fn ascii_words_render_readably() {
    use pretty_assertions::assert_eq;
    let words = [Codeword::new(107), Codeword::new(105), Codeword::new(116)];
    assert_eq!(words_to_string(&words).unwrap(), "kit");
}
