#![doc = r#"
Fixed-width codewords for symbolic music.

`midicode` packs note events into 32-bit [`Codeword`]s a sequence model
can treat as tokens, and unpacks generated codewords back into playable
notes. Around that core it carries the rest of a token pipeline: flat
binary [`io`] for track files, a capacity-bounded [`vocab`] index that
compacts sparse words into dense model ids, and a [`text`] form for
feeding codewords to subword tokenizers.

Parsing music files is someone else's job: any frontend that produces
[`Score`]s (instrument parts holding `{pitch, start, end, velocity}`
notes) plugs in.

# Quick start

```rust
use midicode::prelude::*;

// One bar of kick drum from whatever parsed the file.
let mut kick = Instrument::percussion();
kick.notes.push(NoteEvent {
    pitch: 36,
    velocity: 110,
    start: 0.0,
    end: 0.125,
});
kick.notes.push(NoteEvent {
    pitch: 36,
    velocity: 95,
    start: 0.5,
    end: 0.625,
});

let score = Score {
    tempo_bpm: Some(120.0),
    instruments: vec![kick],
    ..Score::default()
};

// Encode one fixed window: header in slot 0, notes after, zero-padded.
let codec = TrackCodec::new(8, COMMON_RESOLUTION)?;
let track = codec.encode(&score, InstrumentSelector::Percussion)?;
assert_eq!(track.words().len(), 8);

// Compact the sparse words into dense model tokens.
let mut vocab = VocabIndex::new(1024);
let tokens = vocab.index_words(track.words())?;
assert_eq!(tokens[1], 1); // the first note word got the second id

// The same codec configuration reverses the whole trip.
let decoded = codec.decode(track.words(), InstrumentSelector::Percussion)?;
assert_eq!(decoded.instruments[0].notes[0].pitch, 36);
# Ok::<(), Box<dyn std::error::Error>>(())
```

Encoding is deliberately lossy in places; [`NoteEvent`] documents which
fields survive exactly and which are quantized.
"#]
#![warn(missing_docs)]

mod codeword;
pub use codeword::*;

mod error;
pub use error::*;

pub mod gm;
pub use gm::Program;

mod header;
pub use header::*;

pub mod io;

mod note;
pub use note::*;

mod score;
pub use score::*;

pub mod text;

mod track;
pub use track::*;

pub mod vocab;
pub use vocab::VocabIndex;

#[doc = r#"
Re-exports the whole codec surface.

```rust
use midicode::prelude::*;
```
"#]
pub mod prelude {
    pub use crate::{
        COMMON_RESOLUTION, Codeword, ConfigError, DecodeError, EncodeError, EncodedTrack,
        Instrument, InstrumentSelector, NoteError, NoteEvent, Program, Score, TimeSignature,
        TrackCodec, TrackHeader,
        io::{read_track_file, read_words, write_track_file, write_words},
        text::{TextError, string_to_words, words_to_string},
        vocab::{SnapshotError, VocabError, VocabIndex},
    };
}
