//! Screen — which view the application is currently showing.

/// Top-level screens. `Session` covers every active practice mode; the
/// engine's own state says which one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Session,
    ProgressionPicker,
    SongPicker,
    Settings,
}

impl Screen {
    /// Where `Back` leads from this screen.
    pub fn back(self) -> Option<Screen> {
        match self {
            Screen::Menu => None,
            _ => Some(Screen::Menu),
        }
    }
}
