use midicode::prelude::*;

/// Words from one encoded excerpt, the way a training pass feeds them.
fn corpus_words() -> Vec<Codeword> {
    let mut drums = Instrument::percussion();
    drums.notes = vec![
        NoteEvent {
            pitch: 36,
            velocity: 110,
            start: 0.0,
            end: 0.0625,
        },
        NoteEvent {
            pitch: 42,
            velocity: 70,
            start: 0.125,
            end: 0.1875,
        },
        NoteEvent {
            pitch: 36,
            velocity: 110,
            start: 0.5,
            end: 0.5625,
        },
    ];
    let score = Score {
        tempo_bpm: Some(110.0),
        instruments: vec![drums],
        ..Score::default()
    };

    let codec = TrackCodec::new(8, COMMON_RESOLUTION).unwrap();
    codec
        .encode(&score, InstrumentSelector::Percussion)
        .unwrap()
        .into_words()
}

#[test]
fn snapshot_keeps_ids_stable_across_instances() {
    let words = corpus_words();
    let mut vocab = VocabIndex::new(64);
    let ids = vocab.index_words(&words).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vocab.json");
    vocab.save(&path).unwrap();

    // a fresh process resumes with the same assignment
    let mut restored = VocabIndex::load(&path, 64).unwrap();
    assert_eq!(restored.index_words(&words).unwrap(), ids);
    assert_eq!(restored.len(), vocab.len());

    // and its counter continues rather than restarting
    let novel = restored.add(0xABCD_EF01).unwrap();
    assert_eq!(novel as usize, vocab.len());
}

#[test]
fn restored_index_answers_reverse_lookups() {
    let words = corpus_words();
    let mut vocab = VocabIndex::new(64);
    vocab.index_words(&words).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vocab.json");
    vocab.save(&path).unwrap();
    let restored = VocabIndex::load(&path, 64).unwrap();

    for word in &words {
        let id = restored.get(word.value()).unwrap();
        assert_eq!(restored.reverse_lookup(id), Some(word.value()));
    }
}

#[test]
fn capacity_stays_runtime_configuration() {
    let words = corpus_words();
    let mut vocab = VocabIndex::new(64);
    vocab.index_words(&words).unwrap();
    let assigned = vocab.len();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vocab.json");
    vocab.save(&path).unwrap();

    // reloaded exactly full: known values resolve, novel ones do not fit
    let mut full = VocabIndex::load(&path, assigned).unwrap();
    assert_eq!(full.add(words[0].value()), Ok(0));
    assert!(matches!(
        full.add(0xABCD_EF01),
        Err(VocabError::CapacityExceeded { .. })
    ));

    // reloaded with room to grow: the old assignment is untouched
    let mut grown = VocabIndex::load(&path, assigned + 8).unwrap();
    assert_eq!(grown.add(words[0].value()), Ok(0));
    assert_eq!(grown.add(0xABCD_EF01), Ok(assigned as u32));
}

#[test]
fn damaged_snapshot_files_never_restore_partially() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vocab.json");

    std::fs::write(&path, b"not a snapshot").unwrap();
    assert!(matches!(
        VocabIndex::load(&path, 8),
        Err(SnapshotError::Json(_))
    ));

    std::fs::write(&path, br#"{"entries":[1,2,3],"counter":7}"#).unwrap();
    assert!(matches!(
        VocabIndex::load(&path, 8),
        Err(SnapshotError::Corrupt(_))
    ));

    assert!(matches!(
        VocabIndex::load(dir.path().join("missing.json"), 8),
        Err(SnapshotError::Io(_))
    ));
}
