//! tonecore: notes, sequences, canvas and sound bank behind tonepad

pub mod bank;
pub mod canvas;
pub mod controller;
pub mod mixer;
pub mod note;
pub mod palette;
pub mod recorder;
pub mod sequence;
pub mod sequencer;
pub mod settings;
pub mod store;
pub mod synth;
pub mod timer;

pub use controller::{Command, Controller, Level, Notice, Prompt};
pub use note::Note;
pub use sequence::{Event, Sequence};
pub use settings::Settings;
