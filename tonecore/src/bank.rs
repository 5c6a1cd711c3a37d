//! Sound bank: one in-memory sample buffer per note, played fire-and-forget.

use crate::note::Note;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BankError {
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
    #[error("no sound loaded for note {0}")]
    NotLoaded(Note),
    #[error("no audio output device")]
    NoDevice,
    #[error("audio error: {0}")]
    Play(#[from] rodio::PlayError),
}

pub type Result<T> = std::result::Result<T, BankError>;

/// Decoded PCM, interleaved f32
#[derive(Clone, Debug)]
pub struct Tone {
    pub channels: u16,
    pub sample_rate: u32,
    pub samples: Vec<f32>,
}

impl Tone {
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();
        let samples = match spec.sample_format {
            hound::SampleFormat::Float => reader.samples::<f32>().collect::<std::result::Result<Vec<_>, _>>()?,
            hound::SampleFormat::Int => {
                let max_val = (1_i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / max_val))
                    .collect::<std::result::Result<Vec<_>, _>>()?
            }
        };
        Ok(Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            samples,
        })
    }
}

/// Where tones go when played
pub trait Output {
    fn emit(&mut self, tone: &Tone) -> Result<()>;
}

/// Default audio device via rodio. Without a device every emit fails with `NoDevice`.
pub struct RodioOutput {
    _stream: Option<OutputStream>,
    handle: Option<OutputStreamHandle>,
}

impl RodioOutput {
    pub fn open() -> Self {
        let (stream, handle) = OutputStream::try_default().ok().unzip();
        if handle.is_none() {
            log::warn!("no audio output device, notes will be silent");
        }
        Self { _stream: stream, handle }
    }
}

impl Output for RodioOutput {
    fn emit(&mut self, tone: &Tone) -> Result<()> {
        let handle = self.handle.as_ref().ok_or(BankError::NoDevice)?;
        let sink = Sink::try_new(handle)?;
        sink.append(SamplesBuffer::new(tone.channels, tone.sample_rate, tone.samples.clone()));
        sink.detach(); // let it play without blocking
        Ok(())
    }
}

/// Anything that can sound a note
pub trait NotePlayer {
    fn play(&mut self, note: Note) -> Result<()>;
}

pub struct SoundBank<O> {
    tones: [Option<Tone>; Note::COUNT],
    output: O,
}

impl<O: Output> SoundBank<O> {
    /// Load `<dir>/<note>.wav` for each note.
    ///
    /// A note that fails to load keeps an empty slot; its error is returned
    /// alongside the bank instead of aborting.
    pub fn load(dir: &Path, output: O) -> (Self, Vec<(Note, BankError)>) {
        let mut failures = Vec::new();
        let tones = Note::ALL.map(|note| {
            let path = dir.join(note.file_name());
            match Tone::load(&path) {
                Ok(tone) => {
                    log::debug!("loaded {}", path.display());
                    Some(tone)
                }
                Err(e) => {
                    failures.push((note, e));
                    None
                }
            }
        });
        log::info!(
            "sound bank: {} of {} notes loaded from {}",
            Note::COUNT - failures.len(),
            Note::COUNT,
            dir.display()
        );
        (Self { tones, output }, failures)
    }
}

impl<O: Output> NotePlayer for SoundBank<O> {
    fn play(&mut self, note: Note) -> Result<()> {
        let tone = self.tones[note.index()].as_ref().ok_or(BankError::NotLoaded(note))?;
        self.output.emit(tone)
    }
}
