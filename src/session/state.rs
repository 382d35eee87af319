//! Session state — the data carried by an active practice session.

use std::time::Duration;

/// Default metronome tempo, matching a comfortable practice pace.
pub const DEFAULT_METRONOME_BPM: f64 = 80.0;

/// Metronome tempo bounds.
pub const MIN_METRONOME_BPM: f64 = 40.0;
pub const MAX_METRONOME_BPM: f64 = 200.0;

/// Beats per metronome bar; the first beat of each bar is accented.
pub const BEATS_PER_BAR: u64 = 4;

/// The practice mode of an active session.
///
/// Variants carry only what that mode needs beyond the shared session
/// state: progression and song modes remember their selector for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Browse,
    TimedDrill,
    Progression { key: String },
    Song { title: String },
}

/// How to enter a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeSpec {
    Browse,
    TimedDrill { pacing: Duration },
    Progression { key: String, pacing: Duration },
    Song { title: String, pacing: Duration },
}

/// Manual navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// What a single `tick` did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Automatic advances triggered by elapsed pacing intervals.
    pub auto_advances: u32,
    /// Metronome beat boundaries crossed.
    pub beats: u32,
}

/// Mutable state of an active practice session.
///
/// Created on mode entry, discarded on exit. Owned exclusively by the
/// engine; nothing outside it mutates a session.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub mode: Mode,
    /// Display label, e.g. `Pop (I-V-vi-IV)` or `Browse Chords`.
    pub label: String,
    /// Chord names in play order. Never empty.
    pub sequence: Vec<&'static str>,
    /// Current position: `0 <= index < sequence.len()`.
    pub index: usize,
    /// Interval between automatic advances; `None` disables pacing.
    pub pacing: Option<Duration>,
    /// Time accumulated since the last advance.
    pub elapsed: Duration,
    pub metronome_on: bool,
    pub metronome_bpm: f64,
    /// Time accumulated toward the next metronome beat.
    pub beat_elapsed: Duration,
    /// Beats emitted since the metronome was enabled.
    pub beat_count: u64,
}

impl SessionState {
    /// Name of the chord at the current index.
    pub fn current_name(&self) -> &'static str {
        self.sequence[self.index]
    }

    /// Seconds remaining until the next automatic advance, if pacing.
    pub fn remaining(&self) -> Option<Duration> {
        self.pacing.map(|p| p.saturating_sub(self.elapsed))
    }

    /// Fraction of the current pacing interval that has elapsed (0.0..=1.0).
    pub fn pacing_progress(&self) -> Option<f64> {
        self.pacing.map(|p| {
            if p.is_zero() {
                1.0
            } else {
                (self.elapsed.as_secs_f64() / p.as_secs_f64()).clamp(0.0, 1.0)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(pacing: Option<Duration>) -> SessionState {
        SessionState {
            mode: Mode::Browse,
            label: "Browse Chords".to_string(),
            sequence: vec!["G", "C", "D"],
            index: 0,
            pacing,
            elapsed: Duration::ZERO,
            metronome_on: false,
            metronome_bpm: DEFAULT_METRONOME_BPM,
            beat_elapsed: Duration::ZERO,
            beat_count: 0,
        }
    }

    #[test]
    fn current_name_follows_index() {
        let mut s = state(None);
        assert_eq!(s.current_name(), "G");
        s.index = 2;
        assert_eq!(s.current_name(), "D");
    }

    #[test]
    fn remaining_counts_down() {
        let mut s = state(Some(Duration::from_secs(5)));
        s.elapsed = Duration::from_secs(2);
        assert_eq!(s.remaining(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn remaining_saturates_at_zero() {
        let mut s = state(Some(Duration::from_secs(5)));
        s.elapsed = Duration::from_secs(7);
        assert_eq!(s.remaining(), Some(Duration::ZERO));
    }

    #[test]
    fn no_pacing_no_remaining() {
        assert_eq!(state(None).remaining(), None);
    }

    #[test]
    fn pacing_progress_fraction() {
        let mut s = state(Some(Duration::from_secs(4)));
        s.elapsed = Duration::from_secs(1);
        assert!((s.pacing_progress().unwrap() - 0.25).abs() < 1e-9);
    }
}
