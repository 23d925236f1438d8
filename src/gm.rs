#![doc = r#"
The General MIDI Level 1 sound set.

Program numbers 0-127 with their canonical instrument names. Name lookup
is what resolves a configured instrument label to a program number before
encoding; it ignores surrounding whitespace and ASCII case, but performs
no fuzzy matching beyond that.
"#]

use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
A General MIDI Level 1 program.

# Example
```rust
# use midicode::prelude::*;
let program = Program::from_name("Acoustic Grand Piano").unwrap();

assert_eq!(program, Program::AcousticGrandPiano);
assert_eq!(program.program(), 0);
assert_eq!(Program::try_from(42u8).unwrap(), Program::Cello);
```
"#]
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Program {
    // Piano
    AcousticGrandPiano = 0,
    BrightAcousticPiano = 1,
    ElectricGrandPiano = 2,
    HonkyTonkPiano = 3,
    ElectricPiano1 = 4,
    ElectricPiano2 = 5,
    Harpsichord = 6,
    Clavinet = 7,
    // Chromatic percussion
    Celesta = 8,
    Glockenspiel = 9,
    MusicBox = 10,
    Vibraphone = 11,
    Marimba = 12,
    Xylophone = 13,
    TubularBells = 14,
    Dulcimer = 15,
    // Organ
    DrawbarOrgan = 16,
    PercussiveOrgan = 17,
    RockOrgan = 18,
    ChurchOrgan = 19,
    ReedOrgan = 20,
    Accordion = 21,
    Harmonica = 22,
    TangoAccordion = 23,
    // Guitar
    AcousticGuitarNylon = 24,
    AcousticGuitarSteel = 25,
    ElectricGuitarJazz = 26,
    ElectricGuitarClean = 27,
    ElectricGuitarMuted = 28,
    OverdrivenGuitar = 29,
    DistortionGuitar = 30,
    GuitarHarmonics = 31,
    // Bass
    AcousticBass = 32,
    ElectricBassFinger = 33,
    ElectricBassPick = 34,
    FretlessBass = 35,
    SlapBass1 = 36,
    SlapBass2 = 37,
    SynthBass1 = 38,
    SynthBass2 = 39,
    // Strings
    Violin = 40,
    Viola = 41,
    Cello = 42,
    Contrabass = 43,
    TremoloStrings = 44,
    PizzicatoStrings = 45,
    OrchestralHarp = 46,
    Timpani = 47,
    // Ensemble
    StringEnsemble1 = 48,
    StringEnsemble2 = 49,
    SynthStrings1 = 50,
    SynthStrings2 = 51,
    ChoirAahs = 52,
    VoiceOohs = 53,
    SynthVoice = 54,
    OrchestraHit = 55,
    // Brass
    Trumpet = 56,
    Trombone = 57,
    Tuba = 58,
    MutedTrumpet = 59,
    FrenchHorn = 60,
    BrassSection = 61,
    SynthBrass1 = 62,
    SynthBrass2 = 63,
    // Reed
    SopranoSax = 64,
    AltoSax = 65,
    TenorSax = 66,
    BaritoneSax = 67,
    Oboe = 68,
    EnglishHorn = 69,
    Bassoon = 70,
    Clarinet = 71,
    // Pipe
    Piccolo = 72,
    Flute = 73,
    Recorder = 74,
    PanFlute = 75,
    BlownBottle = 76,
    Shakuhachi = 77,
    Whistle = 78,
    Ocarina = 79,
    // Synth lead
    Lead1Square = 80,
    Lead2Sawtooth = 81,
    Lead3Calliope = 82,
    Lead4Chiff = 83,
    Lead5Charang = 84,
    Lead6Voice = 85,
    Lead7Fifths = 86,
    Lead8BassLead = 87,
    // Synth pad
    Pad1NewAge = 88,
    Pad2Warm = 89,
    Pad3Polysynth = 90,
    Pad4Choir = 91,
    Pad5Bowed = 92,
    Pad6Metallic = 93,
    Pad7Halo = 94,
    Pad8Sweep = 95,
    // Synth effects
    Fx1Rain = 96,
    Fx2Soundtrack = 97,
    Fx3Crystal = 98,
    Fx4Atmosphere = 99,
    Fx5Brightness = 100,
    Fx6Goblins = 101,
    Fx7Echoes = 102,
    Fx8SciFi = 103,
    // Ethnic
    Sitar = 104,
    Banjo = 105,
    Shamisen = 106,
    Koto = 107,
    Kalimba = 108,
    Bagpipe = 109,
    Fiddle = 110,
    Shanai = 111,
    // Percussive
    TinkleBell = 112,
    Agogo = 113,
    SteelDrums = 114,
    Woodblock = 115,
    TaikoDrum = 116,
    MelodicTom = 117,
    SynthDrum = 118,
    ReverseCymbal = 119,
    // Sound effects
    GuitarFretNoise = 120,
    BreathNoise = 121,
    Seashore = 122,
    BirdTweet = 123,
    TelephoneRing = 124,
    Helicopter = 125,
    Applause = 126,
    Gunshot = 127,
}

impl Program {
    /// The raw program number, 0-127.
    #[inline]
    pub const fn program(&self) -> u8 {
        *self as u8
    }

    /// The canonical General MIDI name.
    pub const fn name(&self) -> &'static str {
        use Program::*;
        match self {
            AcousticGrandPiano => "Acoustic Grand Piano",
            BrightAcousticPiano => "Bright Acoustic Piano",
            ElectricGrandPiano => "Electric Grand Piano",
            HonkyTonkPiano => "Honky-tonk Piano",
            ElectricPiano1 => "Electric Piano 1",
            ElectricPiano2 => "Electric Piano 2",
            Harpsichord => "Harpsichord",
            Clavinet => "Clavinet",
            Celesta => "Celesta",
            Glockenspiel => "Glockenspiel",
            MusicBox => "Music Box",
            Vibraphone => "Vibraphone",
            Marimba => "Marimba",
            Xylophone => "Xylophone",
            TubularBells => "Tubular Bells",
            Dulcimer => "Dulcimer",
            DrawbarOrgan => "Drawbar Organ",
            PercussiveOrgan => "Percussive Organ",
            RockOrgan => "Rock Organ",
            ChurchOrgan => "Church Organ",
            ReedOrgan => "Reed Organ",
            Accordion => "Accordion",
            Harmonica => "Harmonica",
            TangoAccordion => "Tango Accordion",
            AcousticGuitarNylon => "Acoustic Guitar (nylon)",
            AcousticGuitarSteel => "Acoustic Guitar (steel)",
            ElectricGuitarJazz => "Electric Guitar (jazz)",
            ElectricGuitarClean => "Electric Guitar (clean)",
            ElectricGuitarMuted => "Electric Guitar (muted)",
            OverdrivenGuitar => "Overdriven Guitar",
            DistortionGuitar => "Distortion Guitar",
            GuitarHarmonics => "Guitar Harmonics",
            AcousticBass => "Acoustic Bass",
            ElectricBassFinger => "Electric Bass (finger)",
            ElectricBassPick => "Electric Bass (pick)",
            FretlessBass => "Fretless Bass",
            SlapBass1 => "Slap Bass 1",
            SlapBass2 => "Slap Bass 2",
            SynthBass1 => "Synth Bass 1",
            SynthBass2 => "Synth Bass 2",
            Violin => "Violin",
            Viola => "Viola",
            Cello => "Cello",
            Contrabass => "Contrabass",
            TremoloStrings => "Tremolo Strings",
            PizzicatoStrings => "Pizzicato Strings",
            OrchestralHarp => "Orchestral Harp",
            Timpani => "Timpani",
            StringEnsemble1 => "String Ensemble 1",
            StringEnsemble2 => "String Ensemble 2",
            SynthStrings1 => "Synth Strings 1",
            SynthStrings2 => "Synth Strings 2",
            ChoirAahs => "Choir Aahs",
            VoiceOohs => "Voice Oohs",
            SynthVoice => "Synth Voice",
            OrchestraHit => "Orchestra Hit",
            Trumpet => "Trumpet",
            Trombone => "Trombone",
            Tuba => "Tuba",
            MutedTrumpet => "Muted Trumpet",
            FrenchHorn => "French Horn",
            BrassSection => "Brass Section",
            SynthBrass1 => "Synth Brass 1",
            SynthBrass2 => "Synth Brass 2",
            SopranoSax => "Soprano Sax",
            AltoSax => "Alto Sax",
            TenorSax => "Tenor Sax",
            BaritoneSax => "Baritone Sax",
            Oboe => "Oboe",
            EnglishHorn => "English Horn",
            Bassoon => "Bassoon",
            Clarinet => "Clarinet",
            Piccolo => "Piccolo",
            Flute => "Flute",
            Recorder => "Recorder",
            PanFlute => "Pan Flute",
            BlownBottle => "Blown Bottle",
            Shakuhachi => "Shakuhachi",
            Whistle => "Whistle",
            Ocarina => "Ocarina",
            Lead1Square => "Lead 1 (square)",
            Lead2Sawtooth => "Lead 2 (sawtooth)",
            Lead3Calliope => "Lead 3 (calliope)",
            Lead4Chiff => "Lead 4 (chiff)",
            Lead5Charang => "Lead 5 (charang)",
            Lead6Voice => "Lead 6 (voice)",
            Lead7Fifths => "Lead 7 (fifths)",
            Lead8BassLead => "Lead 8 (bass + lead)",
            Pad1NewAge => "Pad 1 (new age)",
            Pad2Warm => "Pad 2 (warm)",
            Pad3Polysynth => "Pad 3 (polysynth)",
            Pad4Choir => "Pad 4 (choir)",
            Pad5Bowed => "Pad 5 (bowed)",
            Pad6Metallic => "Pad 6 (metallic)",
            Pad7Halo => "Pad 7 (halo)",
            Pad8Sweep => "Pad 8 (sweep)",
            Fx1Rain => "FX 1 (rain)",
            Fx2Soundtrack => "FX 2 (soundtrack)",
            Fx3Crystal => "FX 3 (crystal)",
            Fx4Atmosphere => "FX 4 (atmosphere)",
            Fx5Brightness => "FX 5 (brightness)",
            Fx6Goblins => "FX 6 (goblins)",
            Fx7Echoes => "FX 7 (echoes)",
            Fx8SciFi => "FX 8 (sci-fi)",
            Sitar => "Sitar",
            Banjo => "Banjo",
            Shamisen => "Shamisen",
            Koto => "Koto",
            Kalimba => "Kalimba",
            Bagpipe => "Bagpipe",
            Fiddle => "Fiddle",
            Shanai => "Shanai",
            TinkleBell => "Tinkle Bell",
            Agogo => "Agogo",
            SteelDrums => "Steel Drums",
            Woodblock => "Woodblock",
            TaikoDrum => "Taiko Drum",
            MelodicTom => "Melodic Tom",
            SynthDrum => "Synth Drum",
            ReverseCymbal => "Reverse Cymbal",
            GuitarFretNoise => "Guitar Fret Noise",
            BreathNoise => "Breath Noise",
            Seashore => "Seashore",
            BirdTweet => "Bird Tweet",
            TelephoneRing => "Telephone Ring",
            Helicopter => "Helicopter",
            Applause => "Applause",
            Gunshot => "Gunshot",
        }
    }

    /// Looks a program up by name.
    ///
    /// Surrounding whitespace and ASCII case are ignored; otherwise the
    /// name must match the canonical table entry exactly.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        (0..=127u8).find_map(|n| {
            let program = Self::try_from(n).ok()?;
            program.name().eq_ignore_ascii_case(name).then_some(program)
        })
    }
}

impl core::fmt::Display for Program {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[test]
fn every_program_number_round_trips() {
    for n in 0..128u8 {
        let program = Program::try_from(n).unwrap();
        assert_eq!(u8::from(program), n);
        assert_eq!(program.program(), n);
    }
}

#[test]
fn every_name_resolves_to_its_program() {
    for n in 0..128u8 {
        let program = Program::try_from(n).unwrap();
        assert_eq!(Program::from_name(program.name()), Some(program));
    }
}

#[test]
fn lookup_ignores_case_and_whitespace() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        Program::from_name("  acoustic grand piano "),
        Some(Program::AcousticGrandPiano)
    );
    assert_eq!(Program::from_name("CELLO"), Some(Program::Cello));
}

#[test]
fn lookup_rejects_unknown_names() {
    assert_eq!(Program::from_name("Theremin"), None);
    // The percussion sentinel is not a melodic program.
    assert_eq!(Program::from_name("Standard Kit"), None);
}

#[test]
fn out_of_range_bytes_are_rejected() {
    assert!(Program::try_from(128u8).is_err());
    assert!(Program::try_from(255u8).is_err());
}
