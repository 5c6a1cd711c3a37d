//! The seven playable notes and their fixed mappings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Vertical distance between two neighbouring lanes on the canvas
pub const LANE_SPACING: f32 = 50.0;
/// Lane position of the first note
pub const LANE_OFFSET: f32 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Note {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Note {
    pub const ALL: [Note; 7] = [Note::C, Note::D, Note::E, Note::F, Note::G, Note::A, Note::B];
    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Note::C => "C",
            Note::D => "D",
            Note::E => "E",
            Note::F => "F",
            Note::G => "G",
            Note::A => "A",
            Note::B => "B",
        }
    }

    /// Synthesis frequency in Hz
    pub fn frequency(self) -> f32 {
        match self {
            Note::C => 261.63,
            Note::D => 293.66,
            Note::E => 329.63,
            Note::F => 349.23,
            Note::G => 392.00,
            Note::A => 440.00,
            Note::B => 493.88,
        }
    }

    /// Keyboard key bound to this note
    pub fn key(self) -> char {
        match self {
            Note::C => 'a',
            Note::D => 's',
            Note::E => 'd',
            Note::F => 'f',
            Note::G => 'g',
            Note::A => 'h',
            Note::B => 'j',
        }
    }

    /// Vertical canvas position of this note's lane
    pub fn lane(self) -> f32 {
        self.index() as f32 * LANE_SPACING + LANE_OFFSET
    }

    /// Note whose lane is closest to `y`. Equal distances resolve to the lower note.
    pub fn nearest_to(y: f32) -> Note {
        // min_by keeps the first of equal elements
        Self::ALL
            .into_iter()
            .min_by(|a, b| (y - a.lane()).abs().total_cmp(&(y - b.lane()).abs()))
            .unwrap_or(Note::C)
    }

    /// Button caption, e.g. `C (A)`
    pub fn label(self) -> String {
        format!("{} ({})", self.name(), self.key().to_ascii_uppercase())
    }

    /// Asset file name, e.g. `C.wav`
    pub fn file_name(self) -> String {
        format!("{}.wav", self.name())
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
