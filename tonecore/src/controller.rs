//! Application state and the single command handler every UI action goes through.

use crate::bank::{BankError, NotePlayer};
use crate::canvas::{Canvas, Point};
use crate::mixer;
use crate::note::Note;
use crate::palette::PaletteColor;
use crate::recorder::{Recorder, StopOutcome};
use crate::sequence::Sequence;
use crate::sequencer::Sequencer;
use crate::store::{self, StoreError};
use crate::timer::Clock;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

impl Level {
    pub fn title(self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

/// A message for the user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

/// A file path the UI has to ask the user for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prompt {
    SavePath,
    LoadPath,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    PlayNote(Note),
    StartRecording,
    StopRecording,
    PlaySequence,
    /// Ask for a save path; answered with `SaveTo`
    RequestSave,
    SaveTo(PathBuf),
    /// Ask for a sequence file; answered with `LoadFrom`
    RequestLoad,
    LoadFrom(PathBuf),
    Mix,
    PenDown(Point),
    PenMove(Point),
    PenUp,
    UndoStroke,
    SetColor(PaletteColor),
}

pub struct Controller<P, C> {
    player: P,
    clock: C,
    recorder: Recorder,
    sequencer: Sequencer,
    collection: Vec<Sequence>,
    canvas: Canvas,
    notices: VecDeque<Notice>,
    prompt: Option<Prompt>,
}

impl<P: NotePlayer, C: Clock> Controller<P, C> {
    pub fn new(player: P, clock: C, canvas: Canvas) -> Self {
        Self {
            player,
            clock,
            recorder: Recorder::new(),
            sequencer: Sequencer::new(),
            collection: Vec::new(),
            canvas,
            notices: VecDeque::new(),
            prompt: None,
        }
    }

    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::PlayNote(note) => self.play_note(note),
            Command::StartRecording => {
                self.recorder.start();
                log::info!("recording started");
            }
            Command::StopRecording => self.stop_recording(),
            Command::PlaySequence => self.play_sequence(),
            Command::RequestSave => {
                if self.recorder.sequence().is_empty() {
                    self.notify(Level::Warning, "No sequence to save.");
                } else {
                    self.prompt = Some(Prompt::SavePath);
                }
            }
            Command::SaveTo(path) => self.save_to(path),
            Command::RequestLoad => self.prompt = Some(Prompt::LoadPath),
            Command::LoadFrom(path) => self.load_from(path),
            Command::Mix => self.mix(),
            Command::PenDown(at) => self.canvas.press(at),
            Command::PenMove(at) => {
                if let Some((note, time)) = self.canvas.move_to(at) {
                    // strokes log into the active sequence whether recording or not
                    self.recorder.append(note, time);
                    self.play_note(note);
                }
            }
            Command::PenUp => self.canvas.release(),
            Command::UndoStroke => {
                if !self.canvas.undo() {
                    log::debug!("nothing to undo");
                }
            }
            Command::SetColor(color) => self.canvas.set_color(color),
        }
    }

    /// Fire every scheduled note that is due. Returns how many fired.
    pub fn tick(&mut self) -> usize {
        let due = self.sequencer.due(self.clock.now());
        let fired = due.len();
        for note in due {
            if let Err(e) = self.player.play(note) {
                self.report_play_error(note, e);
            }
        }
        fired
    }

    /// Time until the next scheduled note, if any
    pub fn next_wakeup(&self) -> Option<Duration> {
        self.sequencer.next_due().map(|due| {
            let wait = (due - self.clock.now()).max(0.0);
            Duration::try_from_secs_f64(wait).unwrap_or(Duration::MAX)
        })
    }

    pub fn notify(&mut self, level: Level, message: impl Into<String>) {
        let message = message.into();
        match level {
            Level::Info => log::info!("{message}"),
            Level::Warning => log::warn!("{message}"),
            Level::Error => log::error!("{message}"),
        }
        self.notices.push_back(Notice { level, message });
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    pub fn take_prompt(&mut self) -> Option<Prompt> {
        self.prompt.take()
    }

    pub fn sequence(&self) -> &Sequence {
        self.recorder.sequence()
    }

    pub fn collection(&self) -> &[Sequence] {
        &self.collection
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    pub fn pending_notes(&self) -> usize {
        self.sequencer.pending()
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    fn play_note(&mut self, note: Note) {
        match self.player.play(note) {
            Ok(()) => {}
            // a note without a sound is not played, so it is not recorded either
            Err(e @ BankError::NotLoaded(_)) => {
                self.report_play_error(note, e);
                return;
            }
            Err(e) => self.report_play_error(note, e),
        }
        self.recorder.capture(note, self.clock.now());
    }

    fn report_play_error(&mut self, note: Note, error: BankError) {
        let message = match error {
            BankError::NotLoaded(_) => format!("No sound loaded for note {note}"),
            e => format!("Cannot play note {note}: {e}"),
        };
        self.notify(Level::Warning, message);
    }

    fn stop_recording(&mut self) {
        let cancelled = self.sequencer.cancel();
        if cancelled > 0 {
            log::debug!("cancelled {cancelled} scheduled notes");
        }
        match self.recorder.stop() {
            StopOutcome::Normalized(n) => {
                log::debug!("normalized {n} events");
                self.notify(Level::Info, "Recording stopped.");
            }
            StopOutcome::Empty => {
                self.notify(Level::Info, "Recording stopped. No notes were recorded.");
            }
            StopOutcome::NotRecording => {}
        }
    }

    fn play_sequence(&mut self) {
        if self.recorder.sequence().is_empty() {
            self.notify(Level::Warning, "No sequence to play.");
            return;
        }
        let scheduled = self.sequencer.play(self.recorder.sequence(), self.clock.now());
        log::debug!("scheduled {scheduled} notes");
        self.canvas.draw_sequence(self.recorder.sequence());
    }

    fn save_to(&mut self, path: PathBuf) {
        if self.recorder.sequence().is_empty() {
            self.notify(Level::Warning, "No sequence to save.");
            return;
        }
        let path = store::with_default_extension(path);
        match store::save(self.recorder.sequence(), &path) {
            Ok(()) => {
                log::info!("saved {} events to {}", self.recorder.sequence().len(), path.display());
                self.notify(Level::Info, "Sequence saved successfully.");
            }
            Err(e) => self.notify(Level::Error, format!("Cannot save {}: {}", path.display(), e)),
        }
    }

    fn load_from(&mut self, path: PathBuf) {
        match store::load(&path) {
            Ok(sequence) => {
                log::info!("loaded {} events from {}", sequence.len(), path.display());
                self.collection.push(sequence);
                self.notify(Level::Info, "Sequence loaded successfully.");
            }
            Err(StoreError::Io(e)) => {
                self.notify(Level::Error, format!("Cannot read {}: {}", path.display(), e))
            }
            Err(e) => self.notify(Level::Error, format!("Cannot parse {}: {}", path.display(), e)),
        }
    }

    fn mix(&mut self) {
        match mixer::mix(&self.collection) {
            Some(mixed) => {
                log::info!("mixed {} sequences into {} events", self.collection.len(), mixed.len());
                self.recorder.replace(mixed);
                self.play_sequence();
            }
            None => self.notify(Level::Warning, "No sequences to mix."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{Result as BankResult, SoundBank, Output, Tone};
    use crate::canvas::Shape;
    use crate::sequence::Event;
    use crate::synth;
    use crate::timer::ManualClock;

    #[derive(Default)]
    struct FakePlayer {
        played: Vec<Note>,
        missing: Vec<Note>,
        broken: bool,
    }

    impl NotePlayer for FakePlayer {
        fn play(&mut self, note: Note) -> BankResult<()> {
            if self.missing.contains(&note) {
                return Err(BankError::NotLoaded(note));
            }
            if self.broken {
                return Err(BankError::NoDevice);
            }
            self.played.push(note);
            Ok(())
        }
    }

    fn controller() -> (Controller<FakePlayer, ManualClock>, ManualClock) {
        let clock = ManualClock::new(1_700_000_000.0);
        let ctl = Controller::new(FakePlayer::default(), clock.clone(), Canvas::new(800.0, 400.0));
        (ctl, clock)
    }

    fn events(seq: &Sequence) -> Vec<(Note, f64)> {
        seq.iter().map(|e| (e.note, e.time)).collect()
    }

    fn levels(ctl: &mut Controller<FakePlayer, ManualClock>) -> Vec<Level> {
        ctl.take_notices().into_iter().map(|n| n.level).collect()
    }

    #[test]
    fn test_record_two_notes() {
        let (mut ctl, clock) = controller();
        ctl.dispatch(Command::StartRecording);
        ctl.dispatch(Command::PlayNote(Note::C));
        clock.advance(0.5);
        ctl.dispatch(Command::PlayNote(Note::E));
        ctl.dispatch(Command::StopRecording);

        assert_eq!(events(ctl.sequence()), vec![(Note::C, 0.0), (Note::E, 0.5)]);
        assert_eq!(ctl.player().played, vec![Note::C, Note::E]);
        let notices = ctl.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, "Recording stopped.");
    }

    #[test]
    fn test_notes_not_recorded_when_idle() {
        let (mut ctl, _) = controller();
        ctl.dispatch(Command::PlayNote(Note::G));
        assert!(ctl.sequence().is_empty());
        assert_eq!(ctl.player().played, vec![Note::G]);
    }

    #[test]
    fn test_stop_with_nothing_recorded() {
        let (mut ctl, _) = controller();
        ctl.dispatch(Command::StopRecording);
        assert!(ctl.take_notices().is_empty());
        ctl.dispatch(Command::StartRecording);
        ctl.dispatch(Command::StopRecording);
        assert_eq!(levels(&mut ctl), vec![Level::Info]);
        assert!(!ctl.is_recording());
    }

    #[test]
    fn test_empty_operations_warn() {
        let (mut ctl, _) = controller();
        ctl.dispatch(Command::PlaySequence);
        ctl.dispatch(Command::RequestSave);
        ctl.dispatch(Command::Mix);
        assert_eq!(levels(&mut ctl), vec![Level::Warning; 3]);
        assert_eq!(ctl.take_prompt(), None);
        assert_eq!(ctl.pending_notes(), 0);
    }

    #[test]
    fn test_missing_sound_warns_and_is_not_recorded() {
        let (mut ctl, clock) = controller();
        ctl.player.missing.push(Note::D);
        ctl.dispatch(Command::StartRecording);
        ctl.dispatch(Command::PlayNote(Note::D));
        let notices = ctl.take_notices();
        assert_eq!(notices[0].level, Level::Warning);
        assert_eq!(notices[0].message, "No sound loaded for note D");
        assert!(ctl.sequence().is_empty());

        clock.advance(0.5);
        ctl.dispatch(Command::PlayNote(Note::E));
        ctl.dispatch(Command::StopRecording);
        assert_eq!(events(ctl.sequence()), vec![(Note::E, 0.0)]);
    }

    #[test]
    fn test_device_error_still_records() {
        let (mut ctl, _) = controller();
        ctl.player.broken = true;
        ctl.dispatch(Command::StartRecording);
        ctl.dispatch(Command::PlayNote(Note::G));
        let notices = ctl.take_notices();
        assert_eq!(notices[0].message, "Cannot play note G: no audio output device");
        assert_eq!(ctl.sequence().len(), 1);
    }

    #[test]
    fn test_huge_times_are_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("far.json");
        std::fs::write(&path, r#"[["C", 0.0], ["E", 1e300]]"#).unwrap();

        let (mut ctl, _) = controller();
        ctl.dispatch(Command::LoadFrom(path));
        let notices = ctl.take_notices();
        assert_eq!(notices[0].level, Level::Error);
        assert!(notices[0].message.starts_with("Cannot parse"));
        assert!(ctl.collection().is_empty());

        ctl.dispatch(Command::Mix);
        assert_eq!(levels(&mut ctl), vec![Level::Warning]);
        assert_eq!(ctl.pending_notes(), 0);
        assert_eq!(ctl.next_wakeup(), None);
    }

    #[test]
    fn test_far_future_wakeup_does_not_overflow() {
        let clock = ManualClock::new(1_700_000_000.0);
        let mut ctl = Controller::new(FakePlayer::default(), clock.clone(), Canvas::new(1e-30, 400.0));
        ctl.dispatch(Command::PenDown(Point::new(0.0, 50.0)));
        ctl.dispatch(Command::PenMove(Point::new(0.0, 50.0)));
        ctl.dispatch(Command::PenMove(Point::new(800.0, 50.0)));
        ctl.dispatch(Command::PenUp);
        assert!(ctl.sequence().events()[1].time > 1e30);

        ctl.dispatch(Command::PlaySequence);
        assert_eq!(ctl.tick(), 1);
        assert_eq!(ctl.next_wakeup(), Some(Duration::MAX));
    }

    #[test]
    fn test_playback_is_deferred() {
        let (mut ctl, clock) = controller();
        ctl.dispatch(Command::StartRecording);
        ctl.dispatch(Command::PlayNote(Note::C));
        clock.advance(1.0);
        ctl.dispatch(Command::PlayNote(Note::A));
        ctl.dispatch(Command::StopRecording);
        ctl.take_notices();

        let start = clock.now() + 10.0;
        clock.set(start);
        ctl.dispatch(Command::PlaySequence);
        assert_eq!(ctl.pending_notes(), 2);
        assert_eq!(ctl.next_wakeup(), Some(Duration::ZERO));
        assert_eq!(ctl.tick(), 1);
        assert_eq!(ctl.next_wakeup(), Some(Duration::from_secs(1)));
        clock.set(start + 0.5);
        assert_eq!(ctl.tick(), 0);
        clock.set(start + 1.0);
        assert_eq!(ctl.tick(), 1);
        assert_eq!(ctl.player().played, vec![Note::C, Note::A, Note::C, Note::A]);
        // playback does not record
        assert_eq!(ctl.sequence().len(), 2);
    }

    #[test]
    fn test_play_draws_markers() {
        let (mut ctl, clock) = controller();
        ctl.dispatch(Command::SetColor(PaletteColor::Blue));
        ctl.dispatch(Command::StartRecording);
        ctl.dispatch(Command::PlayNote(Note::C));
        clock.advance(3.5);
        ctl.dispatch(Command::PlayNote(Note::B));
        ctl.dispatch(Command::StopRecording);
        ctl.dispatch(Command::PlaySequence);

        let markers: Vec<(Point, PaletteColor)> = ctl
            .canvas()
            .shapes()
            .filter_map(|(_, s)| match s {
                Shape::Marker { center, color, .. } => Some((*center, *color)),
                _ => None,
            })
            .collect();
        assert_eq!(
            markers,
            vec![
                (Point::new(0.0, 50.0), PaletteColor::Blue),
                (Point::new(400.0, 350.0), PaletteColor::Blue),
            ]
        );
    }

    #[test]
    fn test_stop_cancels_scheduled_playback() {
        let (mut ctl, clock) = controller();
        ctl.dispatch(Command::StartRecording);
        ctl.dispatch(Command::PlayNote(Note::C));
        clock.advance(2.0);
        ctl.dispatch(Command::PlayNote(Note::D));
        ctl.dispatch(Command::StopRecording);
        ctl.dispatch(Command::PlaySequence);
        assert_eq!(ctl.pending_notes(), 2);
        ctl.dispatch(Command::StopRecording);
        assert_eq!(ctl.pending_notes(), 0);
        clock.advance(5.0);
        assert_eq!(ctl.tick(), 0);
    }

    #[test]
    fn test_save_prompt_and_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ctl, clock) = controller();
        ctl.dispatch(Command::StartRecording);
        ctl.dispatch(Command::PlayNote(Note::F));
        clock.advance(0.25);
        ctl.dispatch(Command::PlayNote(Note::G));
        ctl.dispatch(Command::StopRecording);
        ctl.take_notices();

        ctl.dispatch(Command::RequestSave);
        assert_eq!(ctl.take_prompt(), Some(Prompt::SavePath));
        ctl.dispatch(Command::SaveTo(dir.path().join("tune")));
        assert_eq!(levels(&mut ctl), vec![Level::Info]);

        ctl.dispatch(Command::RequestLoad);
        assert_eq!(ctl.take_prompt(), Some(Prompt::LoadPath));
        ctl.dispatch(Command::LoadFrom(dir.path().join("tune.json")));
        assert_eq!(levels(&mut ctl), vec![Level::Info]);
        assert_eq!(ctl.collection(), &[ctl.sequence().clone()]);
    }

    #[test]
    fn test_save_failure_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ctl, _) = controller();
        ctl.dispatch(Command::StartRecording);
        ctl.dispatch(Command::PlayNote(Note::C));
        ctl.dispatch(Command::StopRecording);
        ctl.take_notices();
        ctl.dispatch(Command::SaveTo(dir.path().join("missing").join("tune.json")));
        assert_eq!(levels(&mut ctl), vec![Level::Error]);
    }

    #[test]
    fn test_malformed_load_leaves_collection() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        std::fs::write(&good, r#"[["C", 0.0]]"#).unwrap();
        std::fs::write(&bad, r#"[["C", "soon"]]"#).unwrap();

        let (mut ctl, _) = controller();
        ctl.dispatch(Command::LoadFrom(good));
        ctl.dispatch(Command::LoadFrom(bad));
        ctl.dispatch(Command::LoadFrom(dir.path().join("absent.json")));
        let notices = ctl.take_notices();
        assert_eq!(notices.iter().map(|n| n.level).collect::<Vec<_>>(), vec![Level::Info, Level::Error, Level::Error]);
        assert!(notices[1].message.starts_with("Cannot parse"));
        assert!(notices[2].message.starts_with("Cannot read"));
        assert_eq!(ctl.collection().len(), 1);
    }

    #[test]
    fn test_mix_loaded_sequences() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        std::fs::write(&a, r#"[["C", 0.0], ["E", 1.0]]"#).unwrap();
        std::fs::write(&b, r#"[["D", 0.5]]"#).unwrap();

        let (mut ctl, clock) = controller();
        ctl.dispatch(Command::LoadFrom(a));
        ctl.dispatch(Command::LoadFrom(b));
        ctl.dispatch(Command::Mix);
        assert_eq!(events(ctl.sequence()), vec![(Note::C, 0.0), (Note::D, 0.5), (Note::E, 1.0)]);
        assert_eq!(ctl.pending_notes(), 3);

        ctl.tick();
        clock.advance(0.5);
        ctl.tick();
        clock.advance(0.5);
        ctl.tick();
        assert_eq!(ctl.player().played, vec![Note::C, Note::D, Note::E]);
    }

    #[test]
    fn test_drawing_logs_and_plays() {
        let (mut ctl, _) = controller();
        ctl.dispatch(Command::PenDown(Point::new(0.0, 0.0)));
        ctl.dispatch(Command::PenMove(Point::new(400.0, 100.0)));
        ctl.dispatch(Command::PenMove(Point::new(800.0, 360.0)));
        ctl.dispatch(Command::PenUp);
        ctl.dispatch(Command::PenMove(Point::new(10.0, 10.0)));

        assert_eq!(events(ctl.sequence()), vec![(Note::D, 3.5), (Note::B, 7.0)]);
        assert_eq!(ctl.player().played, vec![Note::D, Note::B]);
        assert_eq!(ctl.canvas().shape_count(), 2);

        ctl.dispatch(Command::UndoStroke);
        assert_eq!(ctl.canvas().shape_count(), 0);
        ctl.dispatch(Command::UndoStroke);
        assert!(ctl.take_notices().is_empty());
    }

    #[test]
    fn test_drawing_while_recording_logs_twice() {
        let (mut ctl, clock) = controller();
        ctl.dispatch(Command::StartRecording);
        ctl.dispatch(Command::PenDown(Point::new(0.0, 0.0)));
        ctl.dispatch(Command::PenMove(Point::new(0.0, 50.0)));
        let seq = ctl.sequence().events().to_vec();
        assert_eq!(seq, vec![Event::new(Note::C, 0.0), Event::new(Note::C, clock.now())]);
    }

    struct SilentOutput;

    impl Output for SilentOutput {
        fn emit(&mut self, _tone: &Tone) -> BankResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_with_sound_bank() {
        let dir = tempfile::tempdir().unwrap();
        synth::generate_all(dir.path()).unwrap();
        std::fs::remove_file(dir.path().join("A.wav")).unwrap();
        let (bank, failures) = SoundBank::load(dir.path(), SilentOutput);
        assert_eq!(failures.len(), 1);

        let mut ctl = Controller::new(bank, ManualClock::new(0.0), Canvas::new(800.0, 400.0));
        ctl.dispatch(Command::PlayNote(Note::C));
        assert!(ctl.take_notices().is_empty());
        ctl.dispatch(Command::PlayNote(Note::A));
        let notices = ctl.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, Level::Warning);
    }
}
