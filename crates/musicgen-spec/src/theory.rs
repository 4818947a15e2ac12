//! Constant music-theory tables: keys, scales, note lengths, duration-variety
//! profiles, and rhythm patterns.
//!
//! Everything here is immutable lookup data. Keys and scales are closed sets
//! and parse strictly; rhythm-pattern and duration-variety names are resolved
//! leniently by the generator, so their lookups return `Option` and callers
//! choose the fallback.

use serde::{Deserialize, Serialize};

/// Lowest pitch kept in the scale-note universe (A0).
pub const PIANO_LOW: i32 = 21;

/// Highest pitch kept in the scale-note universe (C8).
pub const PIANO_HIGH: i32 = 108;

/// Named pitch class used as the tonic of the generated sequence.
///
/// Enharmonic spellings are distinct names with the same semitone offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Key {
    #[default]
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C#")]
    CSharp,
    #[serde(rename = "Db")]
    DFlat,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "D#")]
    DSharp,
    #[serde(rename = "Eb")]
    EFlat,
    #[serde(rename = "E")]
    E,
    #[serde(rename = "F")]
    F,
    #[serde(rename = "F#")]
    FSharp,
    #[serde(rename = "Gb")]
    GFlat,
    #[serde(rename = "G")]
    G,
    #[serde(rename = "G#")]
    GSharp,
    #[serde(rename = "Ab")]
    AFlat,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A#")]
    ASharp,
    #[serde(rename = "Bb")]
    BFlat,
    #[serde(rename = "B")]
    B,
}

impl Key {
    /// All 17 key names, in table order.
    pub const ALL: [Key; 17] = [
        Key::C,
        Key::CSharp,
        Key::DFlat,
        Key::D,
        Key::DSharp,
        Key::EFlat,
        Key::E,
        Key::F,
        Key::FSharp,
        Key::GFlat,
        Key::G,
        Key::GSharp,
        Key::AFlat,
        Key::A,
        Key::ASharp,
        Key::BFlat,
        Key::B,
    ];

    /// Returns the key name as written in configurations.
    pub fn as_str(&self) -> &'static str {
        match self {
            Key::C => "C",
            Key::CSharp => "C#",
            Key::DFlat => "Db",
            Key::D => "D",
            Key::DSharp => "D#",
            Key::EFlat => "Eb",
            Key::E => "E",
            Key::F => "F",
            Key::FSharp => "F#",
            Key::GFlat => "Gb",
            Key::G => "G",
            Key::GSharp => "G#",
            Key::AFlat => "Ab",
            Key::A => "A",
            Key::ASharp => "A#",
            Key::BFlat => "Bb",
            Key::B => "B",
        }
    }

    /// Semitone offset of this key above C (0-11).
    pub fn semitone_offset(&self) -> i32 {
        match self {
            Key::C => 0,
            Key::CSharp | Key::DFlat => 1,
            Key::D => 2,
            Key::DSharp | Key::EFlat => 3,
            Key::E => 4,
            Key::F => 5,
            Key::FSharp | Key::GFlat => 6,
            Key::G => 7,
            Key::GSharp | Key::AFlat => 8,
            Key::A => 9,
            Key::ASharp | Key::BFlat => 10,
            Key::B => 11,
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown key: {}", s))
    }
}

/// Named interval set defining which pitch classes the generator may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    #[default]
    Major,
    Minor,
    PentatonicMajor,
    PentatonicMinor,
    Blues,
    Dorian,
    Mixolydian,
}

impl Scale {
    /// All 7 scales, in table order.
    pub const ALL: [Scale; 7] = [
        Scale::Major,
        Scale::Minor,
        Scale::PentatonicMajor,
        Scale::PentatonicMinor,
        Scale::Blues,
        Scale::Dorian,
        Scale::Mixolydian,
    ];

    /// Returns the scale name as written in configurations.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scale::Major => "major",
            Scale::Minor => "minor",
            Scale::PentatonicMajor => "pentatonic_major",
            Scale::PentatonicMinor => "pentatonic_minor",
            Scale::Blues => "blues",
            Scale::Dorian => "dorian",
            Scale::Mixolydian => "mixolydian",
        }
    }

    /// Ascending semitone offsets within one octave; the first is always 0.
    pub fn intervals(&self) -> &'static [i32] {
        match self {
            Scale::Major => &[0, 2, 4, 5, 7, 9, 11],
            Scale::Minor => &[0, 2, 3, 5, 7, 8, 10],
            Scale::PentatonicMajor => &[0, 2, 4, 7, 9],
            Scale::PentatonicMinor => &[0, 3, 5, 7, 10],
            Scale::Blues => &[0, 3, 5, 6, 7, 10],
            Scale::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            Scale::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
        }
    }
}

impl std::fmt::Display for Scale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Scale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scale::ALL
            .iter()
            .copied()
            .find(|sc| sc.as_str() == s)
            .ok_or_else(|| format!("unknown scale: {}", s))
    }
}

/// Named note length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteLength {
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
    DottedQuarter,
    DottedEighth,
}

impl NoteLength {
    /// Length in beats (quarter note = 1.0).
    pub fn beats(&self) -> f64 {
        match self {
            NoteLength::Whole => 4.0,
            NoteLength::Half => 2.0,
            NoteLength::Quarter => 1.0,
            NoteLength::Eighth => 0.5,
            NoteLength::Sixteenth => 0.25,
            NoteLength::DottedQuarter => 1.5,
            NoteLength::DottedEighth => 0.75,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NoteLength::Whole => "whole",
            NoteLength::Half => "half",
            NoteLength::Quarter => "quarter",
            NoteLength::Eighth => "eighth",
            NoteLength::Sixteenth => "sixteenth",
            NoteLength::DottedQuarter => "dotted_quarter",
            NoteLength::DottedEighth => "dotted_eighth",
        }
    }
}

/// Rhythmic-complexity tier selecting a weighted table of note lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DurationVariety {
    Low,
    #[default]
    Medium,
    High,
}

impl DurationVariety {
    pub const ALL: [DurationVariety; 3] = [
        DurationVariety::Low,
        DurationVariety::Medium,
        DurationVariety::High,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DurationVariety::Low => "low",
            DurationVariety::Medium => "medium",
            DurationVariety::High => "high",
        }
    }

    /// Looks up a tier by name. Unknown names return `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == name)
    }

    /// Relative weights over note lengths. Weights need not sum to 1.
    pub fn profile(&self) -> &'static [(NoteLength, f64)] {
        match self {
            DurationVariety::Low => &[
                (NoteLength::Quarter, 0.7),
                (NoteLength::Half, 0.2),
                (NoteLength::Eighth, 0.1),
            ],
            DurationVariety::Medium => &[
                (NoteLength::Quarter, 0.4),
                (NoteLength::Half, 0.15),
                (NoteLength::Eighth, 0.25),
                (NoteLength::DottedQuarter, 0.1),
                (NoteLength::Sixteenth, 0.1),
            ],
            DurationVariety::High => &[
                (NoteLength::Quarter, 0.2),
                (NoteLength::Half, 0.1),
                (NoteLength::Eighth, 0.2),
                (NoteLength::Sixteenth, 0.2),
                (NoteLength::DottedQuarter, 0.15),
                (NoteLength::DottedEighth, 0.1),
                (NoteLength::Whole, 0.05),
            ],
        }
    }
}

/// Named cyclic list of beat durations.
///
/// `Mixed` is a sentinel meaning "pick one of the concrete patterns".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RhythmPattern {
    #[default]
    Straight,
    Dotted,
    Syncopated,
    Triplet,
    Waltz,
    Swing,
    Mixed,
}

impl RhythmPattern {
    /// Every pattern name, including the `mixed` sentinel.
    pub const ALL: [RhythmPattern; 7] = [
        RhythmPattern::Straight,
        RhythmPattern::Dotted,
        RhythmPattern::Syncopated,
        RhythmPattern::Triplet,
        RhythmPattern::Waltz,
        RhythmPattern::Swing,
        RhythmPattern::Mixed,
    ];

    /// Patterns with a fixed beat list.
    pub const CONCRETE: [RhythmPattern; 6] = [
        RhythmPattern::Straight,
        RhythmPattern::Dotted,
        RhythmPattern::Syncopated,
        RhythmPattern::Triplet,
        RhythmPattern::Waltz,
        RhythmPattern::Swing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RhythmPattern::Straight => "straight",
            RhythmPattern::Dotted => "dotted",
            RhythmPattern::Syncopated => "syncopated",
            RhythmPattern::Triplet => "triplet",
            RhythmPattern::Waltz => "waltz",
            RhythmPattern::Swing => "swing",
            RhythmPattern::Mixed => "mixed",
        }
    }

    /// Looks up a pattern by name. Unknown names return `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.as_str() == name)
    }

    /// Beat durations for a concrete pattern; `None` for `Mixed`.
    pub fn beats(&self) -> Option<&'static [f64]> {
        match self {
            RhythmPattern::Straight => Some(&[1.0, 1.0, 1.0, 1.0]),
            RhythmPattern::Dotted => Some(&[1.5, 0.5, 1.5, 0.5]),
            RhythmPattern::Syncopated => Some(&[0.5, 1.0, 1.5, 0.5, 0.5]),
            RhythmPattern::Triplet => Some(&[0.667, 0.667, 0.667]),
            RhythmPattern::Waltz => Some(&[1.5, 0.75, 0.75]),
            RhythmPattern::Swing => Some(&[0.75, 0.25, 0.75, 0.25]),
            RhythmPattern::Mixed => None,
        }
    }
}
