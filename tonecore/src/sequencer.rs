//! Deferred playback of a sequence.

use crate::note::Note;
use crate::sequence::Sequence;
use crate::timer::TimerQueue;

#[derive(Default)]
pub struct Sequencer {
    pending: TimerQueue<Note>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule every event at `now` plus its offset from the first event.
    ///
    /// Returns the number of scheduled notes; an empty sequence schedules nothing.
    pub fn play(&mut self, sequence: &Sequence, now: f64) -> usize {
        let mut count = 0;
        for (note, delay) in sequence.delays() {
            self.pending.schedule(now + delay, note);
            count += 1;
        }
        count
    }

    /// Notes whose time has come, in firing order
    pub fn due(&mut self, now: f64) -> Vec<Note> {
        self.pending.pop_due(now)
    }

    pub fn next_due(&self) -> Option<f64> {
        self.pending.next_due()
    }

    pub fn cancel(&mut self) -> usize {
        self.pending.clear()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::Event;

    #[test]
    fn test_schedules_relative_to_now() {
        let seq: Sequence = vec![
            Event::new(Note::C, 10.0),
            Event::new(Note::E, 10.5),
            Event::new(Note::G, 11.0),
        ]
        .into();
        let mut s = Sequencer::new();
        assert_eq!(s.play(&seq, 100.0), 3);
        assert_eq!(s.next_due(), Some(100.0));
        assert_eq!(s.due(100.0), vec![Note::C]);
        assert!(s.due(100.4).is_empty());
        assert_eq!(s.due(100.5), vec![Note::E]);
        assert_eq!(s.due(200.0), vec![Note::G]);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn test_empty_sequence_schedules_nothing() {
        let mut s = Sequencer::new();
        assert_eq!(s.play(&Sequence::new(), 0.0), 0);
        assert_eq!(s.next_due(), None);
    }

    #[test]
    fn test_cancel() {
        let seq: Sequence = vec![Event::new(Note::A, 0.0), Event::new(Note::B, 2.0)].into();
        let mut s = Sequencer::new();
        s.play(&seq, 0.0);
        assert_eq!(s.due(0.0), vec![Note::A]);
        assert_eq!(s.cancel(), 1);
        assert!(s.due(5.0).is_empty());
    }
}
