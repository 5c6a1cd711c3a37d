//! Timestamped note events and the sequences they form.

use crate::note::Note;
use serde::{Deserialize, Serialize};

/// A note played at `time` seconds.
///
/// Serialized as a two-element array `["C", 0.5]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "(Note, f64)", into = "(Note, f64)")]
pub struct Event {
    pub note: Note,
    pub time: f64,
}

impl Event {
    pub fn new(note: Note, time: f64) -> Self {
        Self { note, time }
    }
}

impl From<(Note, f64)> for Event {
    fn from((note, time): (Note, f64)) -> Self {
        Self { note, time }
    }
}

impl From<Event> for (Note, f64) {
    fn from(event: Event) -> Self {
        (event.note, event.time)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence {
    events: Vec<Event>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, note: Note, time: f64) {
        self.events.push(Event::new(note, time));
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    pub fn first_time(&self) -> Option<f64> {
        self.events.first().map(|e| e.time)
    }

    /// Shift every time so the first event sits at 0.
    pub fn normalize(&mut self) {
        if let Some(base) = self.first_time() {
            for event in &mut self.events {
                event.time -= base;
            }
        }
    }

    /// Offset of each event from the first one, in order
    pub fn delays(&self) -> impl Iterator<Item = (Note, f64)> + '_ {
        let base = self.first_time().unwrap_or(0.0);
        self.events.iter().map(move |e| (e.note, e.time - base))
    }
}

impl From<Vec<Event>> for Sequence {
    fn from(events: Vec<Event>) -> Self {
        Self { events }
    }
}

impl FromIterator<Event> for Sequence {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self { events: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl Extend<Event> for Sequence {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}
