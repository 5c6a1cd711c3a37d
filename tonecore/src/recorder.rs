//! Recording of played notes into the active sequence.

use crate::note::Note;
use crate::sequence::Sequence;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RecorderState {
    Idle,
    Recording,
}

/// What `Recorder::stop` did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopOutcome {
    /// Recording ended and `usize` events were normalized
    Normalized(usize),
    /// Recording ended without any events
    Empty,
    /// Nothing was being recorded
    NotRecording,
}

/// Owns the active sequence. Playback, saving, mixing and canvas drawing all work
/// on this buffer.
#[derive(Debug)]
pub struct Recorder {
    state: RecorderState,
    sequence: Sequence,
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            state: RecorderState::Idle,
            sequence: Sequence::new(),
        }
    }

    pub fn is_recording(&self) -> bool {
        self.state == RecorderState::Recording
    }

    /// Discard the active sequence and start capturing.
    pub fn start(&mut self) {
        self.sequence.clear();
        self.state = RecorderState::Recording;
    }

    pub fn stop(&mut self) -> StopOutcome {
        if self.state != RecorderState::Recording {
            return StopOutcome::NotRecording;
        }
        self.state = RecorderState::Idle;
        if self.sequence.is_empty() {
            StopOutcome::Empty
        } else {
            self.sequence.normalize();
            StopOutcome::Normalized(self.sequence.len())
        }
    }

    /// Append `(note, now)` if recording. Returns whether the event was kept.
    pub fn capture(&mut self, note: Note, now: f64) -> bool {
        if self.is_recording() {
            self.sequence.push(note, now);
            true
        } else {
            false
        }
    }

    /// Append unconditionally; canvas strokes log this way.
    pub fn append(&mut self, note: Note, time: f64) {
        self.sequence.push(note, time);
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn replace(&mut self, sequence: Sequence) {
        self.sequence = sequence;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::Event;

    #[test]
    fn test_record_and_stop() {
        let mut rec = Recorder::new();
        rec.start();
        assert!(rec.capture(Note::C, 1_700_000_000.0));
        assert!(rec.capture(Note::E, 1_700_000_000.5));
        assert_eq!(rec.stop(), StopOutcome::Normalized(2));
        assert_eq!(
            rec.sequence().events(),
            &[Event::new(Note::C, 0.0), Event::new(Note::E, 0.5)]
        );
        assert!(!rec.is_recording());
    }

    #[test]
    fn test_minimum_is_zero_after_stop() {
        let mut rec = Recorder::new();
        rec.start();
        for (i, note) in Note::ALL.into_iter().enumerate() {
            rec.capture(note, 500.0 + i as f64 * 0.3);
        }
        rec.stop();
        let min = rec.sequence().iter().map(|e| e.time).fold(f64::INFINITY, f64::min);
        assert_eq!(min, 0.0);
    }

    #[test]
    fn test_idle_does_not_capture() {
        let mut rec = Recorder::new();
        assert!(!rec.capture(Note::D, 12.0));
        assert!(rec.sequence().is_empty());
    }

    #[test]
    fn test_stop_empty_and_idle() {
        let mut rec = Recorder::new();
        assert_eq!(rec.stop(), StopOutcome::NotRecording);
        rec.start();
        assert_eq!(rec.stop(), StopOutcome::Empty);
        assert!(!rec.is_recording());
    }

    #[test]
    fn test_start_discards_previous() {
        let mut rec = Recorder::new();
        rec.append(Note::B, 3.0);
        rec.start();
        assert!(rec.sequence().is_empty());
    }

    #[test]
    fn test_stop_when_idle_keeps_times() {
        let mut rec = Recorder::new();
        rec.append(Note::G, 2.5);
        rec.append(Note::A, 3.0);
        assert_eq!(rec.stop(), StopOutcome::NotRecording);
        assert_eq!(rec.sequence().first_time(), Some(2.5));
    }
}
