//! Offline sine-tone synthesis of the per-note sample files.

use crate::note::Note;
use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SAMPLE_RATE: u32 = 44_100;
pub const DURATION_SECS: f64 = 1.0;
pub const AMPLITUDE: f64 = 0.5;

#[derive(Error, Debug)]
pub enum SynthError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}

pub type Result<T> = std::result::Result<T, SynthError>;

/// `AMPLITUDE * sin(2π f t)` sampled at `t = i / sample_rate` over `[0, duration)`.
pub fn sine_wave(frequency: f32, sample_rate: u32, duration: f64) -> Vec<f32> {
    let n = (sample_rate as f64 * duration) as usize;
    let f = frequency as f64;
    (0..n)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            (AMPLITUDE * (2.0 * PI * f * t).sin()) as f32
        })
        .collect()
}

/// Write mono 32-bit float samples as a WAV file.
pub fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &s in samples {
        writer.write_sample(s)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Synthesize `<dir>/<note>.wav` for every note, creating `dir` if needed.
pub fn generate_all(dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(Note::COUNT);
    for note in Note::ALL {
        let path = dir.join(note.file_name());
        let wave = sine_wave(note.frequency(), SAMPLE_RATE, DURATION_SECS);
        write_wav(&path, &wave, SAMPLE_RATE)?;
        log::info!("saved {}", path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_count_and_range() {
        let wave = sine_wave(440.0, SAMPLE_RATE, DURATION_SECS);
        assert_eq!(wave.len(), 44_100);
        assert_eq!(wave[0], 0.0);
        let peak = wave.iter().fold(0.0_f32, |m, s| m.max(s.abs()));
        assert!(peak <= 0.5 && peak > 0.49);
    }

    #[test]
    fn test_quarter_period() {
        // 11025 Hz at 44100 Hz puts a peak on sample 1
        let wave = sine_wave(11_025.0, SAMPLE_RATE, 0.001);
        assert!((wave[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_generate_all_writes_float_wavs() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("sounds");
        let written = generate_all(&out).unwrap();
        assert_eq!(written.len(), 7);
        for note in Note::ALL {
            let reader = hound::WavReader::open(out.join(note.file_name())).unwrap();
            let spec = reader.spec();
            assert_eq!(spec.sample_rate, 44_100);
            assert_eq!(spec.channels, 1);
            assert_eq!(spec.sample_format, hound::SampleFormat::Float);
            assert_eq!(reader.duration(), 44_100);
        }
    }
}
