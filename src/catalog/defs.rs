//! Static chord table.
//!
//! Fret values: -1 = muted, 0 = open, n = fret number. Finger values:
//! 0 = none, 1-4 = index through pinky. Both arrays run low-E to high-e.

use super::{Barre, ChordCategory, ChordDefinition, Finger, StringFret, STRING_COUNT};

fn chord(
    name: &'static str,
    category: ChordCategory,
    frets: [i8; STRING_COUNT],
    fingers: [u8; STRING_COUNT],
    barre: Option<Barre>,
) -> ChordDefinition {
    let frets = frets.map(|f| match f {
        -1 => StringFret::Muted,
        0 => StringFret::Open,
        n => StringFret::Fret(n as u8),
    });
    let fingers = fingers.map(|f| match f {
        0 => None,
        1 => Some(Finger::Index),
        2 => Some(Finger::Middle),
        3 => Some(Finger::Ring),
        _ => Some(Finger::Pinky),
    });
    ChordDefinition {
        name,
        category,
        frets,
        fingers,
        barre,
    }
}

/// Every chord shape capo knows about, in no particular order.
/// The [`Catalog`](super::Catalog) sorts these into display order.
pub fn all_chords() -> Vec<ChordDefinition> {
    use ChordCategory::*;

    vec![
        // Open majors and minors
        chord("G", Open, [3, 2, 0, 0, 0, 3], [2, 1, 0, 0, 0, 3], None),
        chord("C", Open, [-1, 3, 2, 0, 1, 0], [0, 3, 2, 0, 1, 0], None),
        chord("D", Open, [-1, -1, 0, 2, 3, 2], [0, 0, 0, 1, 3, 2], None),
        chord("E", Open, [0, 2, 2, 1, 0, 0], [0, 2, 3, 1, 0, 0], None),
        chord("A", Open, [-1, 0, 2, 2, 2, 0], [0, 0, 1, 2, 3, 0], None),
        chord("Em", Open, [0, 2, 2, 0, 0, 0], [0, 2, 3, 0, 0, 0], None),
        chord("Am", Open, [-1, 0, 2, 2, 1, 0], [0, 0, 2, 3, 1, 0], None),
        chord("Dm", Open, [-1, -1, 0, 2, 3, 1], [0, 0, 0, 2, 3, 1], None),
        // Sevenths
        chord("G7", Seventh, [3, 2, 0, 0, 0, 1], [3, 2, 0, 0, 0, 1], None),
        chord("C7", Seventh, [-1, 3, 2, 3, 1, 0], [0, 3, 2, 4, 1, 0], None),
        chord("D7", Seventh, [-1, -1, 0, 2, 1, 2], [0, 0, 0, 2, 1, 3], None),
        chord("A7", Seventh, [-1, 0, 2, 0, 2, 0], [0, 0, 2, 0, 3, 0], None),
        chord("E7", Seventh, [0, 2, 0, 1, 0, 0], [0, 2, 0, 1, 0, 0], None),
        chord("Am7", Seventh, [-1, 0, 2, 0, 1, 0], [0, 0, 2, 0, 1, 0], None),
        chord("Em7", Seventh, [0, 2, 0, 0, 0, 0], [0, 2, 0, 0, 0, 0], None),
        chord("Dm7", Seventh, [-1, -1, 0, 2, 1, 1], [0, 0, 0, 2, 1, 1], None),
        chord("Cmaj7", Seventh, [-1, 3, 2, 0, 0, 0], [0, 3, 2, 0, 0, 0], None),
        chord("Fmaj7", Seventh, [-1, -1, 3, 2, 1, 0], [0, 0, 3, 2, 1, 0], None),
        // Suspended
        chord("Dsus2", Sus, [-1, -1, 0, 2, 3, 0], [0, 0, 0, 1, 3, 0], None),
        chord("Dsus4", Sus, [-1, -1, 0, 2, 3, 3], [0, 0, 0, 1, 3, 4], None),
        chord("Asus2", Sus, [-1, 0, 2, 2, 0, 0], [0, 0, 1, 2, 0, 0], None),
        chord("Asus4", Sus, [-1, 0, 2, 2, 3, 0], [0, 0, 1, 2, 4, 0], None),
        chord("Esus4", Sus, [0, 2, 2, 2, 0, 0], [0, 2, 3, 4, 0, 0], None),
        // Barres
        chord(
            "F",
            Barre,
            [1, 3, 3, 2, 1, 1],
            [1, 3, 4, 2, 1, 1],
            Some(super::Barre { fret: 1, from: 0, to: 5 }),
        ),
        chord(
            "Bm",
            Barre,
            [-1, 2, 4, 4, 3, 2],
            [0, 1, 3, 4, 2, 1],
            Some(super::Barre { fret: 2, from: 1, to: 5 }),
        ),
        chord(
            "F#m",
            Barre,
            [2, 4, 4, 2, 2, 2],
            [1, 3, 4, 1, 1, 1],
            Some(super::Barre { fret: 2, from: 0, to: 5 }),
        ),
        chord(
            "Bb",
            Barre,
            [-1, 1, 3, 3, 3, 1],
            [0, 1, 2, 3, 4, 1],
            Some(super::Barre { fret: 1, from: 1, to: 5 }),
        ),
        chord(
            "B",
            Barre,
            [-1, 2, 4, 4, 4, 2],
            [0, 1, 2, 3, 4, 1],
            Some(super::Barre { fret: 2, from: 1, to: 5 }),
        ),
        // Added-tone
        chord("Cadd9", Add, [-1, 3, 2, 0, 3, 0], [0, 2, 1, 0, 3, 0], None),
        chord("Gadd9", Add, [3, 2, 0, 2, 0, 3], [2, 1, 0, 3, 0, 4], None),
        // D6/9 keeps "Horse With No Name" playable with two fingers
        chord("D6/9", Add, [-1, -1, 0, 2, 0, 0], [0, 0, 0, 2, 0, 0], None),
    ]
}
