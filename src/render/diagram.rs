//! Diagram renderer — chord definition to vertical fret-grid model.

use crate::catalog::{ChordDefinition, Finger, StringFret, STRING_COUNT, STRING_NAMES};

/// Minimum number of fret rows in a diagram.
pub const MIN_ROWS: u8 = 4;

/// Per-string marker shown above the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringMarker {
    /// String is not played (`×`).
    Muted,
    /// String rings open (`○`).
    Open,
    /// String is fretted somewhere in the grid.
    Fretted,
}

/// One cell of the fret grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagramCell {
    /// Finger occupying this cell, if the string sounds at this fret.
    pub finger: Option<Finger>,
    /// Whether this cell lies inside a barre span at this fret.
    pub barre: bool,
}

impl DiagramCell {
    /// Whether anything presses the string at this cell.
    pub fn occupied(&self) -> bool {
        self.finger.is_some() || self.barre
    }
}

/// One fret row of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramRow {
    /// Fret number this row represents (1-based).
    pub fret: u8,
    pub cells: [DiagramCell; STRING_COUNT],
}

/// A chord diagram: per-string headers plus a grid of fret rows.
///
/// Rows run from fret 1 to the chord's highest fretted position, with a
/// minimum of [`MIN_ROWS`] rows so shallow chords still get a full box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramModel {
    pub headers: [StringMarker; STRING_COUNT],
    pub rows: Vec<DiagramRow>,
}

/// Render a chord into its diagram model. Pure.
pub fn render_diagram(chord: &ChordDefinition) -> DiagramModel {
    let headers = chord.frets.map(|f| match f {
        StringFret::Muted => StringMarker::Muted,
        StringFret::Open => StringMarker::Open,
        StringFret::Fret(_) => StringMarker::Fretted,
    });

    let row_count = chord.max_fret().max(MIN_ROWS);
    let mut rows = Vec::with_capacity(row_count as usize);
    for fret in 1..=row_count {
        let mut cells = [DiagramCell::default(); STRING_COUNT];
        for (string, cell) in cells.iter_mut().enumerate() {
            if chord.frets[string] == StringFret::Fret(fret) {
                cell.finger = chord.fingers[string];
            }
            if let Some(barre) = chord.barre {
                if barre.fret == fret && (barre.from..=barre.to).contains(&string) {
                    cell.barre = true;
                }
            }
        }
        rows.push(DiagramRow { fret, cells });
    }

    DiagramModel { headers, rows }
}

impl DiagramModel {
    /// Project the model into box-drawing text lines.
    ///
    /// Shared by the TUI chord panel and the one-shot CLI output.
    pub fn to_lines(&self) -> Vec<String> {
        const GUTTER: &str = "    ";

        let mut lines = Vec::with_capacity(self.rows.len() * 2 + 3);

        let mut names = String::from(GUTTER);
        for name in STRING_NAMES {
            names.push(' ');
            names.push(name);
        }
        lines.push(names);

        let mut markers = String::from(GUTTER);
        for marker in self.headers {
            markers.push(' ');
            markers.push(match marker {
                StringMarker::Muted => '\u{00d7}',
                StringMarker::Open => '\u{25cb}',
                StringMarker::Fretted => ' ',
            });
        }
        lines.push(markers);

        lines.push(format!("{GUTTER}\u{2552}\u{2550}\u{2564}\u{2550}\u{2564}\u{2550}\u{2564}\u{2550}\u{2564}\u{2550}\u{2564}\u{2550}\u{2555}"));

        for (i, row) in self.rows.iter().enumerate() {
            let mut line = format!("{:>3} ", row.fret);
            line.push('\u{2502}');
            for cell in &row.cells {
                line.push(cell_glyph(cell));
                line.push('\u{2502}');
            }
            lines.push(line);

            if i + 1 < self.rows.len() {
                lines.push(format!("{GUTTER}\u{251c}\u{2500}\u{253c}\u{2500}\u{253c}\u{2500}\u{253c}\u{2500}\u{253c}\u{2500}\u{253c}\u{2500}\u{2524}"));
            }
        }

        lines.push(format!("{GUTTER}\u{2514}\u{2500}\u{2534}\u{2500}\u{2534}\u{2500}\u{2534}\u{2500}\u{2534}\u{2500}\u{2534}\u{2500}\u{2518}"));

        lines
    }
}

fn cell_glyph(cell: &DiagramCell) -> char {
    if cell.barre {
        // The barre runs continuously; non-index fingers inside the span
        // still get their own glyph.
        match cell.finger {
            Some(f) if f != Finger::Index => f.glyph(),
            _ => '\u{2501}',
        }
    } else {
        match cell.finger {
            Some(f) => f.glyph(),
            None => ' ',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn minimum_four_rows() {
        let catalog = Catalog::new();
        let em7 = catalog.lookup("Em7").unwrap(); // highest fret is 2
        let model = render_diagram(em7);
        assert_eq!(model.rows.len(), 4);
    }

    #[test]
    fn rows_match_highest_fret() {
        let catalog = Catalog::new();
        let bm = catalog.lookup("Bm").unwrap(); // highest fret is 4
        let model = render_diagram(bm);
        assert_eq!(model.rows.len(), 4);
        assert_eq!(model.rows.last().unwrap().fret, 4);
    }

    #[test]
    fn headers_reflect_string_state() {
        let catalog = Catalog::new();
        let c = catalog.lookup("C").unwrap(); // x32010
        let model = render_diagram(c);
        assert_eq!(model.headers[0], StringMarker::Muted);
        assert_eq!(model.headers[1], StringMarker::Fretted);
        assert_eq!(model.headers[3], StringMarker::Open);
        assert_eq!(model.headers[5], StringMarker::Open);
    }

    #[test]
    fn fingers_land_on_their_frets() {
        let catalog = Catalog::new();
        let g = catalog.lookup("G").unwrap(); // 320003, fingers 2-1-0-0-0-3
        let model = render_diagram(g);
        // Low E at fret 3 with middle finger
        assert_eq!(model.rows[2].cells[0].finger, Some(Finger::Middle));
        // A string at fret 2 with index
        assert_eq!(model.rows[1].cells[1].finger, Some(Finger::Index));
        // Open strings occupy nothing
        assert!(!model.rows[0].cells[2].occupied());
    }

    #[test]
    fn barre_spans_continuously() {
        let catalog = Catalog::new();
        let f = catalog.lookup("F").unwrap(); // barre at fret 1 across all strings
        let model = render_diagram(f);
        for cell in &model.rows[0].cells {
            assert!(cell.barre);
        }
        // No barre on other rows
        for cell in &model.rows[1].cells {
            assert!(!cell.barre);
        }
    }

    #[test]
    fn render_is_pure() {
        let catalog = Catalog::new();
        let chord = catalog.lookup("F#m").unwrap();
        assert_eq!(render_diagram(chord), render_diagram(chord));
    }

    #[test]
    fn lines_share_a_consistent_box_width() {
        let catalog = Catalog::new();
        let model = render_diagram(catalog.lookup("Am").unwrap());
        let lines = model.to_lines();
        // Box lines (everything past the two header lines) are equal width.
        let widths: Vec<usize> = lines[2..].iter().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{widths:?}");
    }

    #[test]
    fn barre_renders_as_continuous_marker() {
        let catalog = Catalog::new();
        let model = render_diagram(catalog.lookup("Bb").unwrap());
        let lines = model.to_lines();
        // Fret-1 row is the first grid row (line 3).
        let row = &lines[3];
        assert!(row.contains('\u{2501}'), "expected barre marker in {row}");
    }
}
