//! Tab renderer — chord definition to six fixed-width tablature lines.

use crate::catalog::{ChordDefinition, StringFret, STRING_COUNT, STRING_NAMES};

/// Six tab lines, high-e string first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabModel {
    pub lines: [String; STRING_COUNT],
}

/// Render a chord into tab notation. Pure.
///
/// Each line reads `e ──0──` with the fret value (or `x` for a muted
/// string) right-aligned into a common cell width, so multi-digit frets
/// never break column alignment across the six lines.
pub fn render_tab(chord: &ChordDefinition) -> TabModel {
    let values: Vec<String> = chord
        .frets
        .iter()
        .map(|f| match f {
            StringFret::Muted => "x".to_string(),
            StringFret::Open => "0".to_string(),
            StringFret::Fret(n) => n.to_string(),
        })
        .collect();

    let width = values.iter().map(String::len).max().unwrap_or(1);

    // High-e first: walk strings in reverse order.
    let lines = std::array::from_fn(|i| {
        let string = STRING_COUNT - 1 - i;
        format!(
            "{} \u{2500}\u{2500}{:>width$}\u{2500}\u{2500}",
            STRING_NAMES[string],
            values[string],
        )
    });

    TabModel { lines }
}
