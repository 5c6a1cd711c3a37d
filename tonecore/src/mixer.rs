//! Merging loaded sequences into one time-ordered sequence.

use crate::sequence::Sequence;

/// Concatenate `sequences` in order and stable-sort by time.
///
/// Returns `None` for an empty collection.
pub fn mix(sequences: &[Sequence]) -> Option<Sequence> {
    if sequences.is_empty() {
        return None;
    }
    let mut events: Vec<_> = sequences.iter().flat_map(|s| s.iter().copied()).collect();
    // sort_by is stable: equal times keep concatenation order
    events.sort_by(|a, b| a.time.total_cmp(&b.time));
    Some(events.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::Note;
    use crate::sequence::Event;

    fn seq(events: &[(Note, f64)]) -> Sequence {
        events.iter().map(|&(n, t)| Event::new(n, t)).collect()
    }

    #[test]
    fn test_mix_sorted() {
        let a = seq(&[(Note::C, 0.0), (Note::E, 1.0)]);
        let b = seq(&[(Note::D, 0.5)]);
        let mixed = mix(&[a, b]).unwrap();
        assert_eq!(mixed, seq(&[(Note::C, 0.0), (Note::D, 0.5), (Note::E, 1.0)]));
    }

    #[test]
    fn test_mix_is_stable() {
        let a = seq(&[(Note::A, 0.0), (Note::B, 1.0), (Note::C, 1.0)]);
        let b = seq(&[(Note::D, 0.0), (Note::E, 1.0)]);
        let mixed = mix(&[a, b]).unwrap();
        let notes: Vec<Note> = mixed.iter().map(|e| e.note).collect();
        assert_eq!(notes, vec![Note::A, Note::D, Note::B, Note::C, Note::E]);
    }

    #[test]
    fn test_mix_empty_collection() {
        assert!(mix(&[]).is_none());
    }

    #[test]
    fn test_mix_of_empty_sequences() {
        let mixed = mix(&[Sequence::new(), Sequence::new()]).unwrap();
        assert!(mixed.is_empty());
    }
}
