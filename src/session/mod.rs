//! Practice session engine — the state machine driving every mode.
//!
//! The engine is `Idle` until a mode is entered, then holds exactly one
//! [`SessionState`] until `exit`. All mutation flows through the engine:
//! one logical actor, one ordered event stream, no locking. Playback is
//! fire-and-forget — a failed request is stashed as a warning for the UI
//! and never changes session state.

pub mod state;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::audio::{Playback, PlaybackError};
use crate::catalog::{Catalog, ChordDefinition};
use crate::library::Library;
use crate::render::{render_diagram, render_tab, DiagramModel, TabModel};

pub use state::{
    Direction, Mode, ModeSpec, SessionState, TickOutcome, BEATS_PER_BAR, DEFAULT_METRONOME_BPM,
    MAX_METRONOME_BPM, MIN_METRONOME_BPM,
};

/// Session engine errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A session operation was invoked while the engine is idle.
    NoActiveSession,
    /// A mode-entry selector did not resolve to a known sequence.
    InvalidSelector(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NoActiveSession => write!(f, "no active practice session"),
            SessionError::InvalidSelector(sel) => write!(f, "unknown selector '{sel}'"),
        }
    }
}

impl std::error::Error for SessionError {}

/// The current chord plus both display renderings.
///
/// Views are rendered on demand — the renderers are cheap pure functions,
/// so nothing is cached.
pub struct CurrentView<'a> {
    pub chord: &'a ChordDefinition,
    pub diagram: DiagramModel,
    pub tab: TabModel,
}

/// The practice session engine.
///
/// Holds shared read-only catalog and library data, the playback
/// capability, and at most one active session.
pub struct PracticeEngine {
    catalog: Arc<Catalog>,
    library: Arc<Library>,
    playback: Box<dyn Playback>,
    session: Option<SessionState>,
    /// Metronome settings seeded into new sessions and kept across them.
    metronome_bpm: f64,
    metronome_on: bool,
    last_warning: Option<PlaybackError>,
}

impl PracticeEngine {
    pub fn new(catalog: Arc<Catalog>, library: Arc<Library>, playback: Box<dyn Playback>) -> Self {
        Self {
            catalog,
            library,
            playback,
            session: None,
            metronome_bpm: DEFAULT_METRONOME_BPM,
            metronome_on: false,
            last_warning: None,
        }
    }

    /// Whether a session is active.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    /// Take the most recent playback warning, if one occurred.
    pub fn take_warning(&mut self) -> Option<PlaybackError> {
        self.last_warning.take()
    }

    /// Enter a practice mode, replacing any active session.
    ///
    /// Builds the active sequence (full catalog order for Browse and
    /// TimedDrill, library lookup otherwise) and resets position and
    /// timers. Fails with `InvalidSelector` when the selector does not
    /// resolve, leaving the previous engine state untouched.
    pub fn enter(&mut self, spec: ModeSpec) -> Result<(), SessionError> {
        let (mode, label, sequence, pacing) = match spec {
            ModeSpec::Browse => (
                Mode::Browse,
                "Browse Chords".to_string(),
                self.catalog.names(),
                None,
            ),
            ModeSpec::TimedDrill { pacing } => (
                Mode::TimedDrill,
                "Timed Practice".to_string(),
                self.catalog.names(),
                Some(pacing),
            ),
            ModeSpec::Progression { key, pacing } => {
                let progression = self
                    .library
                    .progression(&key)
                    .map_err(|_| SessionError::InvalidSelector(key.clone()))?;
                (
                    Mode::Progression { key: progression.key.to_string() },
                    progression.label(),
                    progression.chords.to_vec(),
                    Some(pacing),
                )
            }
            ModeSpec::Song { title, pacing } => {
                let song = self
                    .library
                    .song(&title)
                    .map_err(|_| SessionError::InvalidSelector(title.clone()))?;
                (
                    Mode::Song { title: song.title.to_string() },
                    song.label(),
                    song.chords.to_vec(),
                    Some(pacing),
                )
            }
        };

        // Library data is validated against the catalog by tests, but a
        // selector resolving to an unknown chord must still fail cleanly.
        for name in &sequence {
            if self.catalog.lookup(name).is_err() {
                return Err(SessionError::InvalidSelector(name.to_string()));
            }
        }

        self.session = Some(SessionState {
            mode,
            label,
            sequence,
            index: 0,
            pacing,
            elapsed: Duration::ZERO,
            metronome_on: self.metronome_on,
            metronome_bpm: self.metronome_bpm,
            beat_elapsed: Duration::ZERO,
            beat_count: 0,
        });
        Ok(())
    }

    /// Exit to idle, discarding the session and any in-flight timer state.
    pub fn exit(&mut self) {
        self.session = None;
    }

    /// Move one step through the sequence, wrapping circularly.
    ///
    /// Resets the pacing timer: a manual advance restarts the countdown.
    pub fn advance(&mut self, direction: Direction) -> Result<(), SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NoActiveSession)?;
        let len = session.sequence.len();
        session.index = match direction {
            Direction::Next => (session.index + 1) % len,
            Direction::Previous => (session.index + len - 1) % len,
        };
        session.elapsed = Duration::ZERO;
        Ok(())
    }

    /// Feed elapsed wall-clock time into the session.
    ///
    /// When pacing is set, each full interval contained in the accumulated
    /// time triggers exactly one automatic advance — a coalesced delivery
    /// of several intervals advances several steps, one at a time, and the
    /// remainder stays on the clock. When the metronome is on, every beat
    /// boundary (60/bpm seconds) crossed emits one click request, with the
    /// first beat of each bar accented.
    pub fn tick(&mut self, delta: Duration) -> Result<TickOutcome, SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NoActiveSession)?;
        let mut outcome = TickOutcome::default();

        if session.metronome_on {
            session.beat_elapsed += delta;
            let period = Duration::from_secs_f64(60.0 / session.metronome_bpm);
            while session.beat_elapsed >= period {
                session.beat_elapsed -= period;
                let accent = session.beat_count % BEATS_PER_BAR == 0;
                session.beat_count += 1;
                outcome.beats += 1;
                if let Err(e) = self.playback.play_click(accent) {
                    self.last_warning = Some(e);
                }
            }
        }

        if let Some(pacing) = session.pacing.filter(|p| !p.is_zero()) {
            session.elapsed += delta;
            let len = session.sequence.len();
            while session.elapsed >= pacing {
                session.elapsed -= pacing;
                session.index = (session.index + 1) % len;
                outcome.auto_advances += 1;
            }
            if outcome.auto_advances > 0 {
                let name = session.sequence[session.index];
                let chord = self.catalog.lookup(name).expect("sequence validated on entry");
                if let Err(e) = self.playback.play_chord(chord) {
                    self.last_warning = Some(e);
                }
            }
        }

        Ok(outcome)
    }

    /// Flip the metronome. Enabling restarts the beat clock so the first
    /// click lands one full period later, on an accented downbeat.
    pub fn toggle_metronome(&mut self) -> Result<bool, SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NoActiveSession)?;
        session.metronome_on = !session.metronome_on;
        if session.metronome_on {
            session.beat_elapsed = Duration::ZERO;
            session.beat_count = 0;
        }
        self.metronome_on = session.metronome_on;
        Ok(session.metronome_on)
    }

    /// Set the metronome tempo, clamped to the playable range.
    pub fn set_metronome_bpm(&mut self, bpm: f64) -> Result<(), SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NoActiveSession)?;
        let clamped = bpm.clamp(MIN_METRONOME_BPM, MAX_METRONOME_BPM);
        session.metronome_bpm = clamped;
        self.metronome_bpm = clamped;
        Ok(())
    }

    /// Seed metronome defaults for sessions entered later. Used at startup;
    /// has no effect on an already-active session.
    pub fn configure_metronome(&mut self, bpm: f64, enabled: bool) {
        self.metronome_bpm = bpm.clamp(MIN_METRONOME_BPM, MAX_METRONOME_BPM);
        self.metronome_on = enabled;
    }

    /// Change the pacing interval of the active session.
    pub fn set_pacing(&mut self, pacing: Duration) -> Result<(), SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NoActiveSession)?;
        session.pacing = Some(pacing);
        Ok(())
    }

    /// The chord at the current index plus both rendered views.
    pub fn current(&self) -> Result<CurrentView<'_>, SessionError> {
        let session = self.session.as_ref().ok_or(SessionError::NoActiveSession)?;
        let chord = self
            .catalog
            .lookup(session.current_name())
            .expect("sequence validated on entry");
        Ok(CurrentView {
            chord,
            diagram: render_diagram(chord),
            tab: render_tab(chord),
        })
    }

    /// Request playback of the current chord. Playback failures are
    /// absorbed here and surfaced only via [`take_warning`](Self::take_warning).
    pub fn play_current_sound(&mut self) -> Result<(), SessionError> {
        let session = self.session.as_ref().ok_or(SessionError::NoActiveSession)?;
        let chord = self
            .catalog
            .lookup(session.current_name())
            .expect("sequence validated on entry");
        if let Err(e) = self.playback.play_chord(chord) {
            self.last_warning = Some(e);
        }
        Ok(())
    }

    /// Jump to a chord by name (case-insensitive) within the active
    /// sequence. Returns whether the name was found; a successful jump
    /// resets the pacing timer and strums the chord.
    pub fn jump_to(&mut self, name: &str) -> Result<bool, SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NoActiveSession)?;
        let Some(position) = session
            .sequence
            .iter()
            .position(|n| n.eq_ignore_ascii_case(name))
        else {
            return Ok(false);
        };
        session.index = position;
        session.elapsed = Duration::ZERO;
        let chord = self
            .catalog
            .lookup(session.sequence[position])
            .expect("sequence validated on entry");
        if let Err(e) = self.playback.play_chord(chord) {
            self.last_warning = Some(e);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every playback request; optionally fails each one.
    #[derive(Default)]
    struct Recorder {
        chords: Rc<RefCell<Vec<String>>>,
        clicks: Rc<RefCell<Vec<bool>>>,
        fail: bool,
    }

    impl Playback for Recorder {
        fn play_chord(&mut self, chord: &ChordDefinition) -> Result<(), PlaybackError> {
            if self.fail {
                return Err(PlaybackError::QueueFull);
            }
            self.chords.borrow_mut().push(chord.name.to_string());
            Ok(())
        }

        fn play_click(&mut self, accent: bool) -> Result<(), PlaybackError> {
            if self.fail {
                return Err(PlaybackError::QueueFull);
            }
            self.clicks.borrow_mut().push(accent);
            Ok(())
        }
    }

    struct Harness {
        engine: PracticeEngine,
        chords: Rc<RefCell<Vec<String>>>,
        clicks: Rc<RefCell<Vec<bool>>>,
    }

    fn harness() -> Harness {
        harness_with(false)
    }

    fn harness_with(fail: bool) -> Harness {
        let recorder = Recorder {
            fail,
            ..Recorder::default()
        };
        let chords = recorder.chords.clone();
        let clicks = recorder.clicks.clone();
        let engine = PracticeEngine::new(
            Arc::new(Catalog::new()),
            Arc::new(Library::new()),
            Box::new(recorder),
        );
        Harness {
            engine,
            chords,
            clicks,
        }
    }

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn starts_idle() {
        let h = harness();
        assert!(!h.engine.is_active());
        assert!(h.engine.session().is_none());
    }

    #[test]
    fn enter_browse_builds_full_catalog_sequence() {
        let mut h = harness();
        h.engine.enter(ModeSpec::Browse).unwrap();
        let session = h.engine.session().unwrap();
        assert_eq!(session.mode, Mode::Browse);
        assert_eq!(session.sequence.len(), Catalog::new().len());
        assert_eq!(session.index, 0);
        assert!(session.pacing.is_none());
    }

    #[test]
    fn enter_progression_resolves_sequence() {
        let mut h = harness();
        h.engine
            .enter(ModeSpec::Progression {
                key: "pop".to_string(),
                pacing: secs(5.0),
            })
            .unwrap();
        let session = h.engine.session().unwrap();
        assert_eq!(session.sequence, ["G", "D", "Em", "C"]);
        assert_eq!(session.label, "Pop (I-V-vi-IV)");
    }

    #[test]
    fn invalid_selector_leaves_engine_idle() {
        let mut h = harness();
        let err = h
            .engine
            .enter(ModeSpec::Progression {
                key: "nonexistent".to_string(),
                pacing: secs(5.0),
            })
            .unwrap_err();
        assert_eq!(err, SessionError::InvalidSelector("nonexistent".to_string()));
        assert!(!h.engine.is_active());
    }

    #[test]
    fn pop_progression_walkthrough() {
        let mut h = harness();
        h.engine
            .enter(ModeSpec::Progression {
                key: "pop".to_string(),
                pacing: secs(5.0),
            })
            .unwrap();

        assert_eq!(h.engine.current().unwrap().chord.name, "G");
        for _ in 0..3 {
            h.engine.advance(Direction::Next).unwrap();
        }
        assert_eq!(h.engine.current().unwrap().chord.name, "C");
        h.engine.advance(Direction::Next).unwrap();
        assert_eq!(h.engine.current().unwrap().chord.name, "G");
    }

    #[test]
    fn previous_from_zero_wraps_to_last() {
        let mut h = harness();
        h.engine.enter(ModeSpec::Browse).unwrap();
        h.engine.advance(Direction::Previous).unwrap();
        let session = h.engine.session().unwrap();
        assert_eq!(session.index, session.sequence.len() - 1);
    }

    #[test]
    fn full_cycle_returns_to_start() {
        let mut h = harness();
        h.engine.enter(ModeSpec::Browse).unwrap();
        let len = h.engine.session().unwrap().sequence.len();
        for _ in 0..len {
            h.engine.advance(Direction::Next).unwrap();
        }
        assert_eq!(h.engine.session().unwrap().index, 0);
    }

    #[test]
    fn tick_one_interval_advances_once() {
        let mut h = harness();
        h.engine
            .enter(ModeSpec::TimedDrill { pacing: secs(5.0) })
            .unwrap();
        let outcome = h.engine.tick(secs(5.0)).unwrap();
        assert_eq!(outcome.auto_advances, 1);
        assert_eq!(h.engine.session().unwrap().index, 1);

        // Just under a full interval afterwards: no advance.
        let outcome = h.engine.tick(secs(4.9)).unwrap();
        assert_eq!(outcome.auto_advances, 0);
        assert_eq!(h.engine.session().unwrap().index, 1);
    }

    #[test]
    fn coalesced_tick_advances_per_interval() {
        let mut h = harness();
        h.engine
            .enter(ModeSpec::TimedDrill { pacing: secs(4.0) })
            .unwrap();
        let outcome = h.engine.tick(secs(10.0)).unwrap(); // 2.5 intervals
        assert_eq!(outcome.auto_advances, 2);
        let session = h.engine.session().unwrap();
        assert_eq!(session.index, 2);
        assert!((session.elapsed.as_secs_f64() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn manual_advance_resets_pacing_timer() {
        let mut h = harness();
        h.engine
            .enter(ModeSpec::TimedDrill { pacing: secs(5.0) })
            .unwrap();
        h.engine.tick(secs(3.0)).unwrap();
        h.engine.advance(Direction::Next).unwrap();
        assert_eq!(h.engine.session().unwrap().elapsed, Duration::ZERO);
        let outcome = h.engine.tick(secs(4.9)).unwrap();
        assert_eq!(outcome.auto_advances, 0);
    }

    #[test]
    fn auto_advance_strums_new_chord() {
        let mut h = harness();
        h.engine
            .enter(ModeSpec::Progression {
                key: "pop".to_string(),
                pacing: secs(5.0),
            })
            .unwrap();
        h.engine.tick(secs(5.0)).unwrap();
        assert_eq!(h.chords.borrow().as_slice(), ["D"]);
    }

    #[test]
    fn drill_wraps_indefinitely() {
        let mut h = harness();
        h.engine
            .enter(ModeSpec::TimedDrill { pacing: secs(1.0) })
            .unwrap();
        let len = h.engine.session().unwrap().sequence.len();
        h.engine.tick(secs(len as f64 + 1.0)).unwrap();
        assert_eq!(h.engine.session().unwrap().index, 1);
    }

    #[test]
    fn metronome_beat_count_over_a_minute() {
        let mut h = harness();
        h.engine.enter(ModeSpec::Browse).unwrap();
        h.engine.set_metronome_bpm(60.0).unwrap();
        h.engine.toggle_metronome().unwrap();

        // Sixty seconds delivered in uneven chunks: exactly 60 crossings.
        let mut beats = 0;
        for chunk in [13.0, 17.5, 9.25, 20.25] {
            beats += h.engine.tick(secs(chunk)).unwrap().beats;
        }
        assert_eq!(beats, 60);
        assert_eq!(h.clicks.borrow().len(), 60);
    }

    #[test]
    fn metronome_accents_every_fourth_beat() {
        let mut h = harness();
        h.engine.enter(ModeSpec::Browse).unwrap();
        h.engine.set_metronome_bpm(60.0).unwrap();
        h.engine.toggle_metronome().unwrap();
        h.engine.tick(secs(8.0)).unwrap();

        let clicks = h.clicks.borrow();
        assert_eq!(clicks.len(), 8);
        assert_eq!(
            clicks.as_slice(),
            [true, false, false, false, true, false, false, false]
        );
    }

    #[test]
    fn metronome_independent_of_pacing() {
        let mut h = harness();
        h.engine
            .enter(ModeSpec::TimedDrill { pacing: secs(5.0) })
            .unwrap();
        h.engine.set_metronome_bpm(120.0).unwrap(); // 0.5s period
        h.engine.toggle_metronome().unwrap();

        let outcome = h.engine.tick(secs(5.0)).unwrap();
        assert_eq!(outcome.auto_advances, 1);
        assert_eq!(outcome.beats, 10);
    }

    #[test]
    fn toggling_metronome_restarts_beat_clock() {
        let mut h = harness();
        h.engine.enter(ModeSpec::Browse).unwrap();
        h.engine.set_metronome_bpm(60.0).unwrap();
        h.engine.toggle_metronome().unwrap();
        h.engine.tick(secs(0.9)).unwrap();
        h.engine.toggle_metronome().unwrap(); // off
        h.engine.toggle_metronome().unwrap(); // on again, clock reset
        let outcome = h.engine.tick(secs(0.9)).unwrap();
        assert_eq!(outcome.beats, 0);
    }

    #[test]
    fn metronome_bpm_clamped() {
        let mut h = harness();
        h.engine.enter(ModeSpec::Browse).unwrap();
        h.engine.set_metronome_bpm(999.0).unwrap();
        assert!((h.engine.session().unwrap().metronome_bpm - MAX_METRONOME_BPM).abs() < 1e-9);
        h.engine.set_metronome_bpm(1.0).unwrap();
        assert!((h.engine.session().unwrap().metronome_bpm - MIN_METRONOME_BPM).abs() < 1e-9);
    }

    #[test]
    fn metronome_settings_survive_across_sessions() {
        let mut h = harness();
        h.engine.enter(ModeSpec::Browse).unwrap();
        h.engine.set_metronome_bpm(100.0).unwrap();
        h.engine.toggle_metronome().unwrap();
        h.engine.exit();
        h.engine.enter(ModeSpec::Browse).unwrap();
        let session = h.engine.session().unwrap();
        assert!(session.metronome_on);
        assert!((session.metronome_bpm - 100.0).abs() < 1e-9);
    }

    #[test]
    fn play_current_sound_records_request() {
        let mut h = harness();
        h.engine.enter(ModeSpec::Browse).unwrap();
        h.engine.play_current_sound().unwrap();
        let first = h.engine.session().unwrap().sequence[0].to_string();
        assert_eq!(h.chords.borrow().as_slice(), [first]);
    }

    #[test]
    fn playback_failure_is_absorbed() {
        let mut h = harness_with(true);
        h.engine
            .enter(ModeSpec::TimedDrill { pacing: secs(5.0) })
            .unwrap();
        // The command succeeds even though playback failed.
        h.engine.play_current_sound().unwrap();
        assert_eq!(h.engine.take_warning(), Some(PlaybackError::QueueFull));
        assert!(h.engine.take_warning().is_none());

        // A failing strum during tick still advances on schedule.
        let outcome = h.engine.tick(secs(5.0)).unwrap();
        assert_eq!(outcome.auto_advances, 1);
        assert_eq!(h.engine.session().unwrap().index, 1);
        assert_eq!(h.engine.take_warning(), Some(PlaybackError::QueueFull));
    }

    #[test]
    fn operations_while_idle_fail() {
        let mut h = harness();
        assert_eq!(
            h.engine.advance(Direction::Next).unwrap_err(),
            SessionError::NoActiveSession
        );
        assert_eq!(
            h.engine.tick(secs(1.0)).unwrap_err(),
            SessionError::NoActiveSession
        );
        assert_eq!(
            h.engine.toggle_metronome().unwrap_err(),
            SessionError::NoActiveSession
        );
        assert!(h.engine.current().is_err());
        assert_eq!(
            h.engine.play_current_sound().unwrap_err(),
            SessionError::NoActiveSession
        );
        assert!(!h.engine.is_active());
    }

    #[test]
    fn exit_discards_session() {
        let mut h = harness();
        h.engine
            .enter(ModeSpec::TimedDrill { pacing: secs(5.0) })
            .unwrap();
        h.engine.tick(secs(3.0)).unwrap();
        h.engine.exit();
        assert!(!h.engine.is_active());
        assert!(h.engine.current().is_err());
    }

    #[test]
    fn jump_to_chord_by_name() {
        let mut h = harness();
        h.engine.enter(ModeSpec::Browse).unwrap();
        assert!(h.engine.jump_to("am7").unwrap());
        assert_eq!(h.engine.current().unwrap().chord.name, "Am7");
        assert_eq!(h.chords.borrow().as_slice(), ["Am7"]);
        assert!(!h.engine.jump_to("Xyz9").unwrap());
    }

    #[test]
    fn current_renders_both_views() {
        let mut h = harness();
        h.engine
            .enter(ModeSpec::Song {
                title: "Wonderwall".to_string(),
                pacing: secs(5.0),
            })
            .unwrap();
        let view = h.engine.current().unwrap();
        assert_eq!(view.chord.name, "Em");
        assert_eq!(view.tab.lines.len(), 6);
        assert!(view.diagram.rows.len() >= 4);
    }

    #[test]
    fn song_selector_is_case_insensitive() {
        let mut h = harness();
        h.engine
            .enter(ModeSpec::Song {
                title: "wonderwall".to_string(),
                pacing: secs(5.0),
            })
            .unwrap();
        assert_eq!(h.engine.session().unwrap().label, "Wonderwall — Oasis");
    }
}
