//! Chord catalog — the immutable registry of chord definitions.
//!
//! Built once at startup from the static table in [`defs`] and shared
//! read-only with the session engine and renderers. Lookup is case-sensitive
//! on canonical chord names; [`Catalog::find`] offers a case-insensitive
//! convenience for user-typed input.

pub mod defs;

use std::fmt;

/// Number of strings on a standard guitar.
pub const STRING_COUNT: usize = 6;

/// String names low to high, matching the order of fret/finger arrays.
pub const STRING_NAMES: [char; STRING_COUNT] = ['E', 'A', 'D', 'G', 'B', 'e'];

/// What a single string does in a chord shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFret {
    /// String is not played.
    Muted,
    /// String rings open.
    Open,
    /// String is fretted at the given fret (1-based).
    Fret(u8),
}

impl StringFret {
    /// The fretted position, if any. Open strings return `Some(0)`.
    pub fn sounding_fret(self) -> Option<u8> {
        match self {
            StringFret::Muted => None,
            StringFret::Open => Some(0),
            StringFret::Fret(n) => Some(n),
        }
    }
}

/// Fretting-hand finger labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    /// Conventional finger number (1 = index .. 4 = pinky).
    pub fn number(self) -> u8 {
        match self {
            Finger::Index => 1,
            Finger::Middle => 2,
            Finger::Ring => 3,
            Finger::Pinky => 4,
        }
    }

    /// Circled-digit glyph used in chord diagrams.
    pub fn glyph(self) -> char {
        match self {
            Finger::Index => '\u{2460}',
            Finger::Middle => '\u{2461}',
            Finger::Ring => '\u{2462}',
            Finger::Pinky => '\u{2463}',
        }
    }
}

/// A barre: one finger pressing a span of strings at the same fret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Barre {
    /// Fret the barre sits on.
    pub fret: u8,
    /// First string index covered (low-E = 0).
    pub from: usize,
    /// Last string index covered, inclusive.
    pub to: usize,
}

/// Display grouping for catalog ordering.
///
/// Ordering priority follows the enum declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChordCategory {
    Open,
    Seventh,
    Sus,
    Barre,
    Add,
}

impl fmt::Display for ChordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChordCategory::Open => "Open",
            ChordCategory::Seventh => "7th",
            ChordCategory::Sus => "Sus",
            ChordCategory::Barre => "Barre",
            ChordCategory::Add => "Add",
        };
        f.write_str(label)
    }
}

/// A chord shape: per-string frets and finger labels, plus an optional barre.
///
/// The fret and finger arrays are parallel, low-E string first. Immutable
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordDefinition {
    pub name: &'static str,
    pub category: ChordCategory,
    pub frets: [StringFret; STRING_COUNT],
    pub fingers: [Option<Finger>; STRING_COUNT],
    pub barre: Option<Barre>,
}

impl ChordDefinition {
    /// Highest fretted position across all strings (0 if fully open/muted).
    pub fn max_fret(&self) -> u8 {
        self.frets
            .iter()
            .filter_map(|f| match f {
                StringFret::Fret(n) => Some(*n),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Compact finger summary, e.g. `2-1-x-0-0-3`.
    pub fn finger_summary(&self) -> String {
        let mut parts = Vec::with_capacity(STRING_COUNT);
        for (fret, finger) in self.frets.iter().zip(self.fingers.iter()) {
            let part = match (fret, finger) {
                (StringFret::Muted, _) => "x".to_string(),
                (_, Some(f)) => f.number().to_string(),
                (StringFret::Open, None) => "0".to_string(),
                (StringFret::Fret(_), None) => "0".to_string(),
            };
            parts.push(part);
        }
        parts.join("-")
    }
}

/// Catalog errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No chord with the given name exists.
    NotFound(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::NotFound(name) => write!(f, "chord '{name}' not found"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// The chord registry. Read-only after construction.
pub struct Catalog {
    chords: Vec<ChordDefinition>,
}

impl Catalog {
    /// Build the catalog from the static chord table.
    ///
    /// Display order is category priority (Open, 7th, Sus, Barre, Add) with
    /// names sorted alphabetically within each category.
    pub fn new() -> Self {
        let mut chords = defs::all_chords();
        chords.sort_by(|a, b| a.category.cmp(&b.category).then(a.name.cmp(b.name)));
        Self { chords }
    }

    /// Look up a chord by exact, case-sensitive name.
    pub fn lookup(&self, name: &str) -> Result<&ChordDefinition, CatalogError> {
        self.chords
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))
    }

    /// Case-insensitive lookup for user-typed input.
    pub fn find(&self, name: &str) -> Option<&ChordDefinition> {
        self.chords
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// All chords in fixed display order.
    pub fn all(&self) -> &[ChordDefinition] {
        &self.chords
    }

    /// All chord names in display order.
    pub fn names(&self) -> Vec<&'static str> {
        self.chords.iter().map(|c| c.name).collect()
    }

    /// Number of chords in the catalog.
    pub fn len(&self) -> usize {
        self.chords.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_chord() {
        let catalog = Catalog::new();
        let g = catalog.lookup("G").unwrap();
        assert_eq!(g.name, "G");
        assert_eq!(g.category, ChordCategory::Open);
    }

    #[test]
    fn lookup_unknown_chord_fails() {
        let catalog = Catalog::new();
        let err = catalog.lookup("Xyz9").unwrap_err();
        assert_eq!(err, CatalogError::NotFound("Xyz9".to_string()));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let catalog = Catalog::new();
        assert!(catalog.lookup("am7").is_err());
        assert!(catalog.lookup("Am7").is_ok());
    }

    #[test]
    fn find_is_case_insensitive() {
        let catalog = Catalog::new();
        assert_eq!(catalog.find("am7").unwrap().name, "Am7");
        assert_eq!(catalog.find("FMAJ7").unwrap().name, "Fmaj7");
        assert!(catalog.find("Xyz9").is_none());
    }

    #[test]
    fn categories_appear_in_priority_order() {
        let catalog = Catalog::new();
        let categories: Vec<ChordCategory> = catalog.all().iter().map(|c| c.category).collect();
        let mut sorted = categories.clone();
        sorted.sort();
        assert_eq!(categories, sorted);
    }

    #[test]
    fn names_sorted_within_category() {
        let catalog = Catalog::new();
        for window in catalog.all().windows(2) {
            if window[0].category == window[1].category {
                assert!(
                    window[0].name < window[1].name,
                    "{} should sort before {}",
                    window[0].name,
                    window[1].name
                );
            }
        }
    }

    #[test]
    fn all_names_unique() {
        let catalog = Catalog::new();
        let mut names = catalog.names();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn barre_consistent_with_fretted_positions() {
        let catalog = Catalog::new();
        for chord in catalog.all() {
            if let Some(barre) = chord.barre {
                for idx in barre.from..=barre.to {
                    match chord.frets[idx] {
                        StringFret::Fret(n) => assert!(
                            n >= barre.fret,
                            "{}: string {idx} fretted below its barre",
                            chord.name
                        ),
                        StringFret::Muted => {}
                        StringFret::Open => panic!(
                            "{}: open string {idx} inside barre span",
                            chord.name
                        ),
                    }
                }
            }
        }
    }

    #[test]
    fn finger_summary_format() {
        let catalog = Catalog::new();
        let g = catalog.lookup("G").unwrap();
        assert_eq!(g.finger_summary(), "2-1-0-0-0-3");
        let c = catalog.lookup("C").unwrap();
        assert_eq!(c.finger_summary(), "x-3-2-0-1-0");
    }

    #[test]
    fn finger_glyphs_are_circled_digits() {
        assert_eq!(Finger::Index.glyph(), '①');
        assert_eq!(Finger::Pinky.glyph(), '④');
    }
}
