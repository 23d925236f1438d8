use midicode::prelude::*;

/// A two-part drum groove, split across parts the way exporters often
/// split kit pieces.
fn drum_score() -> Score {
    let mut kit = Instrument::percussion();
    kit.notes = vec![
        note(36, 0.0, 0.0625, 112),
        note(38, 0.25, 0.3125, 98),
        note(36, 0.5, 0.5625, 104),
    ];
    let mut cymbals = Instrument::percussion();
    cymbals.notes = vec![note(42, 0.125, 0.1875, 64), note(42, 0.375, 0.4375, 58)];

    Score {
        key_signature: Some(0),
        tempo_bpm: Some(96.0),
        time_signature: Some(TimeSignature::new(4, 4)),
        instruments: vec![kit, cymbals],
    }
}

fn note(pitch: u8, start: f64, end: f64, velocity: u8) -> NoteEvent {
    NoteEvent {
        pitch,
        velocity,
        start,
        end,
    }
}

#[test]
fn encoded_track_survives_disk_and_decodes_within_quantization() {
    let codec = TrackCodec::new(16, COMMON_RESOLUTION).unwrap();
    let score = drum_score();
    let track = codec.encode(&score, InstrumentSelector::Percussion).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("groove.notes");
    write_track_file(&path, track.words()).unwrap();

    // nothing but the words: 16 four-byte slots
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 64);

    let words = read_track_file(&path).unwrap();
    assert_eq!(words, track.words());

    let decoded = codec
        .decode(&words, InstrumentSelector::Percussion)
        .unwrap();
    assert_eq!(decoded.key_signature, Some(0));
    assert_eq!(decoded.tempo_bpm, Some(96.0));
    assert_eq!(decoded.time_signature, Some(TimeSignature::new(4, 4)));

    let part = &decoded.instruments[0];
    assert!(part.is_drum);

    // both drum parts, concatenated in source order
    let originals: Vec<NoteEvent> = score.instruments[0]
        .notes
        .iter()
        .chain(&score.instruments[1].notes)
        .copied()
        .collect();
    assert_eq!(part.notes.len(), originals.len());

    let tick = 1.0 / COMMON_RESOLUTION as f64;
    for (decoded, original) in part.notes.iter().zip(&originals) {
        assert_eq!(decoded.pitch, original.pitch);
        assert!((decoded.start - original.start).abs() < tick);
        assert!((decoded.end - original.end).abs() < 2.0 * tick);
        let velocity_error = (decoded.velocity as i16 - original.velocity as i16).abs();
        assert!(velocity_error <= 9, "velocity off by {velocity_error}");
    }
}

#[test]
fn windows_concatenate_into_one_corpus_file() {
    let codec = TrackCodec::new(8, COMMON_RESOLUTION).unwrap();

    let slow = drum_score();
    let fast = Score {
        tempo_bpm: Some(168.0),
        ..drum_score()
    };
    let first = codec.encode(&slow, InstrumentSelector::Percussion).unwrap();
    let second = codec.encode(&fast, InstrumentSelector::Percussion).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corpus.notes");
    {
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = std::io::BufWriter::new(file);
        write_words(&mut writer, first.words()).unwrap();
        write_words(&mut writer, second.words()).unwrap();
    }

    // the file itself records no boundaries; the window size is shared
    // configuration, and slicing by it recovers each track
    let all = read_track_file(&path).unwrap();
    assert_eq!(all.len(), 16);

    let mut tempos = Vec::new();
    for window in all.chunks_exact(codec.window_size()) {
        let decoded = codec
            .decode(window, InstrumentSelector::Percussion)
            .unwrap();
        tempos.push(decoded.tempo_bpm);
    }
    assert_eq!(tempos, vec![Some(96.0), Some(168.0)]);
}

#[test]
fn melodic_track_round_trips_under_its_program_name() {
    // parts arranged by program number, the layout name selection expects
    let mut parts: Vec<Instrument> = (0..3).map(Instrument::melodic).collect();
    parts[2].notes = vec![note(52, 0.0, 0.125, 88), note(59, 0.125, 0.25, 92)];
    let score = Score {
        instruments: parts,
        ..Score::default()
    };

    let codec = TrackCodec::new(8, COMMON_RESOLUTION).unwrap();
    let selector = InstrumentSelector::Name("Electric Grand Piano");
    let track = codec.encode(&score, selector).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("piano.notes");
    write_track_file(&path, track.words()).unwrap();

    let restored = EncodedTrack::from_words(read_track_file(&path).unwrap());
    assert_eq!(restored.header(), track.header());

    let decoded = codec.decode(restored.words(), selector).unwrap();
    let part = &decoded.instruments[0];
    assert!(!part.is_drum);
    assert_eq!(part.program, 2);
    assert_eq!(part.notes.len(), 2);
    assert_eq!(part.notes[0].pitch, 52);
    assert_eq!(part.notes[1].pitch, 59);
}

#[test]
fn truncated_track_files_are_rejected_whole() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("torn.notes");
    // six bytes: one whole word and half of another
    std::fs::write(&path, [0u8, 1, 2, 3, 4, 5]).unwrap();

    let err = read_track_file(&path).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
}
