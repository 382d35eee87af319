//! Progression and song library — static ordered chord sequences.
//!
//! Progressions are looked up by a short selector key ("pop", "blues", ...),
//! songs by their title. Both are read-only after construction.

pub mod data;

use std::fmt;

/// A harmonic pattern: an ordered chord sequence with a display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progression {
    /// Selector key, e.g. `pop`.
    pub key: &'static str,
    /// Display name, e.g. `Pop`.
    pub name: &'static str,
    /// Roman-numeral label, e.g. `I-V-vi-IV`.
    pub numerals: &'static str,
    /// Chord names in play order. Never empty.
    pub chords: &'static [&'static str],
}

impl Progression {
    /// Display label combining name and numerals, e.g. `Pop (I-V-vi-IV)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.numerals)
    }
}

/// A song and the chords it loops over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    pub title: &'static str,
    pub artist: &'static str,
    /// Chord names in play order. Never empty.
    pub chords: &'static [&'static str],
}

impl Song {
    /// Display label, e.g. `Wonderwall — Oasis`.
    pub fn label(&self) -> String {
        format!("{} — {}", self.title, self.artist)
    }
}

/// Library errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
    /// No progression with the given key.
    ProgressionNotFound(String),
    /// No song with the given title.
    SongNotFound(String),
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::ProgressionNotFound(key) => {
                write!(f, "progression '{key}' not found")
            }
            LibraryError::SongNotFound(title) => write!(f, "song '{title}' not found"),
        }
    }
}

impl std::error::Error for LibraryError {}

/// The progression/song registry. Read-only after construction.
pub struct Library {
    progressions: Vec<Progression>,
    songs: Vec<Song>,
}

impl Library {
    /// Build the library from the static tables.
    pub fn new() -> Self {
        Self {
            progressions: data::all_progressions(),
            songs: data::all_songs(),
        }
    }

    /// All progressions in fixed display order.
    pub fn progressions(&self) -> &[Progression] {
        &self.progressions
    }

    /// All songs in fixed display order.
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Look up a progression by selector key (case-insensitive).
    pub fn progression(&self, key: &str) -> Result<&Progression, LibraryError> {
        self.progressions
            .iter()
            .find(|p| p.key.eq_ignore_ascii_case(key))
            .ok_or_else(|| LibraryError::ProgressionNotFound(key.to_string()))
    }

    /// Look up a song by title (case-insensitive).
    pub fn song(&self, title: &str) -> Result<&Song, LibraryError> {
        self.songs
            .iter()
            .find(|s| s.title.eq_ignore_ascii_case(title))
            .ok_or_else(|| LibraryError::SongNotFound(title.to_string()))
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn pop_progression_sequence() {
        let library = Library::new();
        let pop = library.progression("pop").unwrap();
        assert_eq!(pop.chords, ["G", "D", "Em", "C"]);
        assert_eq!(pop.label(), "Pop (I-V-vi-IV)");
    }

    #[test]
    fn progression_lookup_is_case_insensitive() {
        let library = Library::new();
        assert!(library.progression("BLUES").is_ok());
    }

    #[test]
    fn unknown_progression_fails() {
        let library = Library::new();
        let err = library.progression("nonexistent").unwrap_err();
        assert_eq!(
            err,
            LibraryError::ProgressionNotFound("nonexistent".to_string())
        );
    }

    #[test]
    fn song_lookup_by_title() {
        let library = Library::new();
        let song = library.song("Wonderwall").unwrap();
        assert_eq!(song.artist, "Oasis");
        assert_eq!(song.chords, ["Em", "G", "D", "A"]);
    }

    #[test]
    fn unknown_song_fails() {
        let library = Library::new();
        assert!(library.song("Free Bird").is_err());
    }

    #[test]
    fn sequences_are_never_empty() {
        let library = Library::new();
        for p in library.progressions() {
            assert!(!p.chords.is_empty(), "{} has no chords", p.key);
        }
        for s in library.songs() {
            assert!(!s.chords.is_empty(), "{} has no chords", s.title);
        }
    }

    #[test]
    fn every_referenced_chord_exists_in_catalog() {
        let catalog = Catalog::new();
        let library = Library::new();
        for p in library.progressions() {
            for name in p.chords {
                assert!(catalog.lookup(name).is_ok(), "{}: unknown chord {name}", p.key);
            }
        }
        for s in library.songs() {
            for name in s.chords {
                assert!(
                    catalog.lookup(name).is_ok(),
                    "{}: unknown chord {name}",
                    s.title
                );
            }
        }
    }
}
