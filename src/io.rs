#![doc = r#"
Flat binary storage for codeword tracks.

A track file is nothing but its words: 32-bit integers, little-endian,
in array order, with no magic number and no length prefix. How many
words form one window is configuration shared out of band between
writer and reader, so several windows may be concatenated into a single
corpus file and split apart again after reading.

The byte layout matches a flat `int32` array: a codeword's bits are the
same whether the four bytes are reinterpreted signed or unsigned, so
files written here read back bit-exact in tools that expect signed
words.
"#]

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::Codeword;

/// Writes every word to the stream, four bytes each, in array order.
///
/// # Errors
/// Any error from the underlying writer, unmodified.
pub fn write_words<W: Write>(writer: &mut W, words: &[Codeword]) -> io::Result<()> {
    for word in words {
        writer.write_all(&word.value().to_le_bytes())?;
    }
    writer.flush()
}

/// Reads words from the stream until it ends.
///
/// Length is implicit in stream size: nothing marks where one window
/// stops, so the caller slices the result by its configured window
/// size. A stream ending mid-word is [`io::ErrorKind::UnexpectedEof`].
pub fn read_words<R: Read>(reader: &mut R) -> io::Result<Vec<Codeword>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    if bytes.len() % 4 != 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!(
                "track stream holds {} bytes, not a whole number of words",
                bytes.len()
            ),
        ));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| Codeword::new(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])))
        .collect())
}

/// Writes a track file at `path`, replacing any existing file.
pub fn write_track_file<P: AsRef<Path>>(path: P, words: &[Codeword]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_words(&mut writer, words)
}

/// Reads every word of the track file at `path`.
pub fn read_track_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Codeword>> {
    let mut reader = BufReader::new(File::open(path)?);
    read_words(&mut reader)
}

#[test]
fn round_trips_any_word_array() {
    use pretty_assertions::assert_eq;
    let words = [
        Codeword::new(0x0005_7844),
        Codeword::ZERO,
        Codeword::new(u32::MAX),
        Codeword::new(1),
    ];
    let mut buf = Vec::new();
    write_words(&mut buf, &words).unwrap();
    assert_eq!(buf.len(), 16);

    let mut cursor = std::io::Cursor::new(&buf);
    let back = read_words(&mut cursor).unwrap();
    assert_eq!(back, words);
}

#[test]
fn words_are_little_endian_on_the_wire() {
    use pretty_assertions::assert_eq;
    let mut buf = Vec::new();
    write_words(&mut buf, &[Codeword::new(0x0102_0304)]).unwrap();
    assert_eq!(buf, [0x04, 0x03, 0x02, 0x01]);
}

#[test]
fn high_bit_words_read_back_bit_exact() {
    // 0xFFFFFFFF is -1 as a signed word; the bits come back untouched
    let word = Codeword::new(0xFFFF_FFFF);
    let mut buf = Vec::new();
    write_words(&mut buf, &[word]).unwrap();

    let mut cursor = std::io::Cursor::new(&buf);
    assert_eq!(read_words(&mut cursor).unwrap(), vec![word]);
}

#[test]
fn empty_stream_reads_as_no_words() {
    let mut cursor = std::io::Cursor::new(Vec::new());
    assert!(read_words(&mut cursor).unwrap().is_empty());
}

#[test]
fn torn_word_is_unexpected_eof() {
    let mut cursor = std::io::Cursor::new(vec![1u8, 2, 3]);
    let err = read_words(&mut cursor).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
}

#[test]
fn concatenated_windows_split_by_configured_size() {
    use pretty_assertions::assert_eq;
    let first: Vec<_> = (0..4u32).map(Codeword::new).collect();
    let second: Vec<_> = (10..14u32).map(Codeword::new).collect();

    let mut buf = Vec::new();
    write_words(&mut buf, &first).unwrap();
    write_words(&mut buf, &second).unwrap();

    let mut cursor = std::io::Cursor::new(&buf);
    let all = read_words(&mut cursor).unwrap();
    assert_eq!(all.len(), 8);

    let mut windows = all.chunks_exact(4);
    assert_eq!(windows.next().unwrap(), &first[..]);
    assert_eq!(windows.next().unwrap(), &second[..]);
}
