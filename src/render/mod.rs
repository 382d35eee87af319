//! Chord rendering — pure projections from a chord definition to display
//! models. The diagram is a vertical fret-grid; the tab is six horizontal
//! text lines. Neither touches any state: same chord in, same model out.

pub mod diagram;
pub mod tab;

pub use diagram::{render_diagram, DiagramCell, DiagramModel, DiagramRow, StringMarker};
pub use tab::{render_tab, TabModel};
