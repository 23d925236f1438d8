#![doc = r#"
Dense token ids for raw codewords.

A sequence model wants a compact, contiguous id space, but codewords
are sparse 32-bit values. [`VocabIndex`] hands out ids 0, 1, 2, ... in
first-seen order, never re-uses or re-orders one, and refuses new
values once a configured capacity is reached, so an id space sized to a
model's embedding table can never silently outgrow it.

Snapshots make the assignment durable: a restored index resumes from
the saved counter, keeping ids stable across training runs.
"#]

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Codeword;

/// A rejected [`VocabIndex`] mutation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VocabError {
    /// A never-seen value arrived with every id already assigned.
    ///
    /// The index is left exactly as it was. The remedy is a larger
    /// capacity and another pass over the data, never silent
    /// truncation.
    #[error("cannot index {value:#010x}: all {capacity} ids are assigned")]
    CapacityExceeded {
        /// The value that found no free id.
        value: u32,
        /// The configured id-space size.
        capacity: usize,
    },
}

/// A failure while saving or loading a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The underlying read or write failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The snapshot is not valid JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// The snapshot parsed but breaks an index invariant.
    #[error("snapshot is inconsistent: {0}")]
    Corrupt(String),
}

/// On-disk form: the raw values in id order, plus the saved counter.
#[derive(Serialize, Deserialize)]
struct Snapshot {
    entries: Vec<u32>,
    counter: u32,
}

#[doc = r#"
A capacity-bounded map from raw 32-bit values to dense sequential ids.

Ids are assigned in first-seen order and stay contiguous over
`0..len()`. Adding a known value returns its existing id unchanged;
adding a novel one with the index full fails without mutating
anything.

# Example
```rust
# use midicode::prelude::*;
let mut vocab = VocabIndex::new(3);

assert_eq!(vocab.add(0x78E5BC), Ok(0));
assert_eq!(vocab.add(0x78E5BC), Ok(0)); // same value, same id
assert_eq!(vocab.add(7), Ok(1));

assert_eq!(vocab.reverse_lookup(1), Some(7));
assert_eq!(vocab.len(), 2);
```
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabIndex {
    /// raw value -> dense id
    forward: HashMap<u32, u32>,
    /// dense id -> raw value, always in lockstep with `forward`
    reverse: Vec<u32>,
    capacity: usize,
}

impl VocabIndex {
    /// An empty index that will assign at most `capacity` distinct ids.
    pub fn new(capacity: usize) -> Self {
        Self {
            forward: HashMap::new(),
            reverse: Vec::new(),
            capacity,
        }
    }

    /// Returns the id for `value`, assigning the next free one if the
    /// value is new.
    ///
    /// # Errors
    /// [`VocabError::CapacityExceeded`] for a novel value once the
    /// index is full; known values keep resolving even then.
    pub fn add(&mut self, value: u32) -> Result<u32, VocabError> {
        if let Some(&id) = self.forward.get(&value) {
            return Ok(id);
        }
        if self.reverse.len() >= self.capacity {
            return Err(VocabError::CapacityExceeded {
                value,
                capacity: self.capacity,
            });
        }
        let id = self.reverse.len() as u32;
        self.forward.insert(value, id);
        self.reverse.push(value);
        Ok(id)
    }

    /// Indexes a whole codeword slice, one id per word, in order.
    ///
    /// Each word goes through [`add`](Self::add), so repeats within the
    /// slice resolve to one shared id. On failure the ids assigned to
    /// earlier words are kept and the error names the word that did
    /// not fit.
    pub fn index_words(&mut self, words: &[Codeword]) -> Result<Vec<u32>, VocabError> {
        words.iter().map(|word| self.add(word.value())).collect()
    }

    /// Looks up the id of a value without assigning one.
    pub fn get(&self, value: u32) -> Option<u32> {
        self.forward.get(&value).copied()
    }

    /// Returns the raw value behind a dense id, if one was assigned.
    pub fn reverse_lookup(&self, id: u32) -> Option<u32> {
        self.reverse.get(id as usize).copied()
    }

    /// How many ids are assigned; the next novel value gets this id.
    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    /// True before the first value is indexed.
    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }

    /// The configured maximum number of distinct ids.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Serializes the complete id assignment to a writer as JSON.
    pub fn snapshot_to_writer<W: Write>(&self, writer: W) -> Result<(), SnapshotError> {
        let snapshot = Snapshot {
            entries: self.reverse.clone(),
            counter: self.reverse.len() as u32,
        };
        serde_json::to_writer(writer, &snapshot)?;
        Ok(())
    }

    /// Rebuilds an index from a snapshot.
    ///
    /// Capacity is runtime configuration, not snapshot data: the
    /// caller supplies it again and may supply a larger one to grow
    /// the id space around an existing assignment. The restored index
    /// keeps assigning from the saved counter.
    ///
    /// # Errors
    /// [`SnapshotError::Corrupt`] when the counter disagrees with the
    /// entry count, an entry appears twice, or the entries do not fit
    /// the given capacity.
    pub fn restore_from_reader<R: Read>(reader: R, capacity: usize) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_reader(reader)?;
        Self::from_snapshot(snapshot, capacity)
    }

    /// Writes a snapshot file at `path`, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.snapshot_to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Restores an index from the snapshot file at `path`.
    pub fn load<P: AsRef<Path>>(path: P, capacity: usize) -> Result<Self, SnapshotError> {
        let reader = BufReader::new(File::open(path)?);
        Self::restore_from_reader(reader, capacity)
    }

    fn from_snapshot(snapshot: Snapshot, capacity: usize) -> Result<Self, SnapshotError> {
        let Snapshot { entries, counter } = snapshot;
        if counter as usize != entries.len() {
            return Err(SnapshotError::Corrupt(format!(
                "counter says {counter} ids but {} entries are recorded",
                entries.len()
            )));
        }
        if entries.len() > capacity {
            return Err(SnapshotError::Corrupt(format!(
                "{} assigned ids do not fit a capacity of {capacity}",
                entries.len()
            )));
        }
        let mut forward = HashMap::with_capacity(entries.len());
        for (id, &value) in entries.iter().enumerate() {
            if forward.insert(value, id as u32).is_some() {
                return Err(SnapshotError::Corrupt(format!(
                    "{value:#010x} appears under two ids"
                )));
            }
        }
        Ok(Self {
            forward,
            reverse: entries,
            capacity,
        })
    }
}

#[test]
fn ids_are_dense_and_first_seen_ordered() {
    use pretty_assertions::assert_eq;
    let mut vocab = VocabIndex::new(3);
    assert_eq!(vocab.add(2), Ok(0));
    assert_eq!(vocab.add(2), Ok(0));
    assert_eq!(vocab.add(3), Ok(1));
    assert_eq!(vocab.add(4), Ok(2));
    assert_eq!(
        vocab.add(5),
        Err(VocabError::CapacityExceeded {
            value: 5,
            capacity: 3
        })
    );

    // the failed add mutated nothing
    assert_eq!(vocab.len(), 3);
    assert_eq!(vocab.get(2), Some(0));
    assert_eq!(vocab.get(3), Some(1));
    assert_eq!(vocab.get(4), Some(2));
    assert_eq!(vocab.get(5), None);
}

#[test]
fn readding_a_value_advances_the_counter_once() {
    use pretty_assertions::assert_eq;
    let mut vocab = VocabIndex::new(8);
    let first = vocab.add(0xCAFE).unwrap();
    let second = vocab.add(0xCAFE).unwrap();
    assert_eq!(first, second);
    assert_eq!(vocab.len(), 1);
    assert_eq!(vocab.add(0xBEEF), Ok(1));
}

#[test]
fn full_index_still_answers_for_known_values() {
    let mut vocab = VocabIndex::new(1);
    vocab.add(9).unwrap();
    assert_eq!(vocab.add(9), Ok(0));
    assert!(vocab.add(10).is_err());
}

#[test]
fn reverse_lookup_inverts_every_assignment() {
    let mut vocab = VocabIndex::new(16);
    for value in [40u32, 90, 7, 1_000_000] {
        let id = vocab.add(value).unwrap();
        assert_eq!(vocab.reverse_lookup(id), Some(value));
    }
    assert_eq!(vocab.reverse_lookup(4), None);
}

#[test]
fn index_words_keeps_order_and_shares_repeats() {
    use pretty_assertions::assert_eq;
    let words = [
        Codeword::new(500),
        Codeword::new(7),
        Codeword::new(500),
        Codeword::ZERO,
    ];
    let mut vocab = VocabIndex::new(8);
    let ids = vocab.index_words(&words).unwrap();
    assert_eq!(ids, vec![0, 1, 0, 2]);

    // a second pass over the same words resolves identically
    assert_eq!(vocab.index_words(&words).unwrap(), ids);
}

#[test]
fn index_words_failure_names_the_word_and_keeps_earlier_ids() {
    use pretty_assertions::assert_eq;
    let words = [Codeword::new(1), Codeword::new(2), Codeword::new(3)];
    let mut vocab = VocabIndex::new(2);
    let err = vocab.index_words(&words).unwrap_err();
    assert_eq!(
        err,
        VocabError::CapacityExceeded {
            value: 3,
            capacity: 2
        }
    );
    assert_eq!(vocab.get(1), Some(0));
    assert_eq!(vocab.get(2), Some(1));
}

#[test]
fn snapshot_restores_the_exact_assignment() {
    use pretty_assertions::assert_eq;
    let mut vocab = VocabIndex::new(8);
    for value in [11u32, 22, 33] {
        vocab.add(value).unwrap();
    }

    let mut buf = Vec::new();
    vocab.snapshot_to_writer(&mut buf).unwrap();
    let mut restored = VocabIndex::restore_from_reader(buf.as_slice(), 8).unwrap();

    assert_eq!(restored, vocab);
    // the counter picks up where it stopped
    assert_eq!(restored.add(44), Ok(3));
}

#[test]
fn restore_can_grow_capacity_but_not_shrink_below_counter() {
    let mut vocab = VocabIndex::new(2);
    vocab.add(1).unwrap();
    vocab.add(2).unwrap();

    let mut buf = Vec::new();
    vocab.snapshot_to_writer(&mut buf).unwrap();

    let mut grown = VocabIndex::restore_from_reader(buf.as_slice(), 4).unwrap();
    assert_eq!(grown.add(3), Ok(2));

    let err = VocabIndex::restore_from_reader(buf.as_slice(), 1).unwrap_err();
    assert!(matches!(err, SnapshotError::Corrupt(_)));
}

#[test]
fn restore_rejects_inconsistent_snapshots() {
    let wrong_counter = br#"{"entries":[1,2],"counter":3}"#;
    let err = VocabIndex::restore_from_reader(&wrong_counter[..], 8).unwrap_err();
    assert!(matches!(err, SnapshotError::Corrupt(_)));

    let duplicate = br#"{"entries":[5,5],"counter":2}"#;
    let err = VocabIndex::restore_from_reader(&duplicate[..], 8).unwrap_err();
    assert!(matches!(err, SnapshotError::Corrupt(_)));

    let not_json = b"kick snare kick";
    let err = VocabIndex::restore_from_reader(&not_json[..], 8).unwrap_err();
    assert!(matches!(err, SnapshotError::Json(_)));
}
