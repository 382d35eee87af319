//! TUI — menu, pickers, settings, and the practice session view.
//!
//! The App struct holds all UI state and drives the event loop: one thread
//! polling crossterm for keys, feeding wall-clock deltas into the engine,
//! and redrawing. Keystrokes and timer ticks therefore reach the engine as
//! a single ordered stream.

pub mod console;
pub mod keybindings;
pub mod screen;

pub use console::MessageConsole;
pub use keybindings::{map_key, Action};
pub use screen::Screen;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::audio::Playback;
use crate::catalog::{Catalog, ChordDefinition};
use crate::config::{Config, MAX_PACING_SECS, MIN_PACING_SECS};
use crate::library::Library;
use crate::render::{DiagramModel, TabModel};
use crate::session::{
    Direction as NavDirection, ModeSpec, PracticeEngine, SessionError, MAX_METRONOME_BPM,
    MIN_METRONOME_BPM,
};

/// Input poll timeout per loop iteration.
const POLL_INTERVAL_MS: u64 = 50;

/// Console history cap.
const CONSOLE_CAP: usize = 50;

/// Settings fields, top to bottom.
const SETTINGS_FIELDS: usize = 3;

/// Combine a chord's diagram, tab, and finger summary into display lines.
///
/// The tab block is bottom-aligned beside the diagram, the way the
/// original panel reads.
pub fn chord_panel(chord: &ChordDefinition, diagram: &DiagramModel, tab: &TabModel) -> Vec<String> {
    let diagram_lines = diagram.to_lines();
    let width = diagram_lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);

    let rows = diagram_lines.len().max(tab.lines.len());
    let tab_offset = rows - tab.lines.len();

    let mut lines = Vec::with_capacity(rows + 2);
    for i in 0..rows {
        let d = diagram_lines.get(i).map(String::as_str).unwrap_or("");
        let t = if i >= tab_offset {
            tab.lines[i - tab_offset].as_str()
        } else {
            ""
        };
        let pad = width.saturating_sub(d.chars().count()) + 4;
        let mut line = String::from(d);
        if !t.is_empty() {
            line.extend(std::iter::repeat(' ').take(pad));
            line.push_str(t);
        }
        lines.push(line);
    }
    lines.push(String::new());
    lines.push(format!("    Fingers: {}", chord.finger_summary()));
    lines
}

/// The main TUI application state.
pub struct App {
    pub engine: PracticeEngine,
    pub screen: Screen,
    pub console: MessageConsole,
    pub should_quit: bool,
    catalog: Arc<Catalog>,
    library: Arc<Library>,
    pacing_secs: u64,
    metronome_bpm: f64,
    metronome_on: bool,
    picker_index: usize,
    settings_field: usize,
    jump_input: Option<String>,
    audio_available: bool,
    last_tick: Option<Instant>,
}

impl App {
    /// Create the app around shared data, a playback service, and config.
    pub fn new(
        catalog: Arc<Catalog>,
        library: Arc<Library>,
        playback: Box<dyn Playback>,
        config: &Config,
        audio_available: bool,
    ) -> Self {
        let mut engine = PracticeEngine::new(catalog.clone(), library.clone(), playback);
        engine.configure_metronome(config.metronome_bpm, config.metronome_on);
        Self {
            engine,
            screen: Screen::Menu,
            console: MessageConsole::new(CONSOLE_CAP),
            should_quit: false,
            catalog,
            library,
            pacing_secs: config.pacing_secs,
            metronome_bpm: config.metronome_bpm,
            metronome_on: config.metronome_on,
            picker_index: 0,
            settings_field: 0,
            jump_input: None,
            audio_available,
            last_tick: None,
        }
    }

    /// Current pacing interval from settings.
    fn pacing(&self) -> Duration {
        Duration::from_secs(self.pacing_secs)
    }

    /// Whether the jump-to-chord input is open.
    pub fn jump_active(&self) -> bool {
        self.jump_input.is_some()
    }

    /// Enter a practice mode and switch to the session screen.
    pub fn start_mode(&mut self, spec: ModeSpec) -> Result<(), SessionError> {
        self.engine.enter(spec)?;
        self.screen = Screen::Session;
        self.jump_input = None;
        self.last_tick = None;
        if let Some(session) = self.engine.session() {
            self.console.log(session.label.clone());
        }
        Ok(())
    }

    /// Process an action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Back => match self.screen.back() {
                None => self.should_quit = true,
                Some(target) => {
                    if self.screen == Screen::Session {
                        self.engine.exit();
                        self.jump_input = None;
                    }
                    self.screen = target;
                }
            },
            Action::Select(i) => match self.screen {
                Screen::Menu => self.menu_select(i),
                Screen::ProgressionPicker => {
                    if i < self.library.progressions().len() {
                        self.picker_index = i;
                        self.confirm_picker();
                    }
                }
                Screen::SongPicker => {
                    if i < self.library.songs().len() {
                        self.picker_index = i;
                        self.confirm_picker();
                    }
                }
                _ => {}
            },
            Action::Next => {
                let _ = self.engine.advance(NavDirection::Next);
            }
            Action::Previous => {
                let _ = self.engine.advance(NavDirection::Previous);
            }
            Action::PlaySound => {
                let _ = self.engine.play_current_sound();
            }
            Action::ToggleMetronome => {
                if let Ok(on) = self.engine.toggle_metronome() {
                    self.metronome_on = on;
                    self.console
                        .log(if on { "metronome on" } else { "metronome off" });
                }
            }
            Action::ListUp => match self.screen {
                Screen::Settings => {
                    self.settings_field =
                        (self.settings_field + SETTINGS_FIELDS - 1) % SETTINGS_FIELDS;
                }
                _ => self.picker_index = self.picker_index.saturating_sub(1),
            },
            Action::ListDown => match self.screen {
                Screen::Settings => {
                    self.settings_field = (self.settings_field + 1) % SETTINGS_FIELDS;
                }
                _ => {
                    let max = self.picker_len().saturating_sub(1);
                    self.picker_index = (self.picker_index + 1).min(max);
                }
            },
            Action::Confirm => match self.screen {
                Screen::ProgressionPicker | Screen::SongPicker => self.confirm_picker(),
                Screen::Settings if self.settings_field == 2 => {
                    self.metronome_on = !self.metronome_on;
                    self.engine
                        .configure_metronome(self.metronome_bpm, self.metronome_on);
                }
                _ => {}
            },
            Action::AdjustDown => self.adjust_setting(-1),
            Action::AdjustUp => self.adjust_setting(1),
            Action::ActivateJump => {
                if self.screen == Screen::Session {
                    self.jump_input = Some(String::new());
                }
            }
            Action::JumpInsert(c) => {
                if let Some(buf) = &mut self.jump_input {
                    buf.push(c);
                }
            }
            Action::JumpBackspace => {
                if let Some(buf) = &mut self.jump_input {
                    buf.pop();
                }
            }
            Action::JumpCancel => self.jump_input = None,
            Action::JumpSubmit => {
                if let Some(buf) = self.jump_input.take() {
                    let name = buf.trim();
                    if !name.is_empty() {
                        match self.engine.jump_to(name) {
                            Ok(true) => {}
                            Ok(false) => self.console.log(format!("chord '{name}' not found")),
                            Err(_) => {}
                        }
                    }
                }
            }
        }
    }

    fn menu_select(&mut self, entry: usize) {
        match entry {
            0 => {
                let _ = self.start_mode(ModeSpec::Browse);
            }
            1 => {
                let _ = self.start_mode(ModeSpec::TimedDrill {
                    pacing: self.pacing(),
                });
            }
            2 => {
                self.picker_index = 0;
                self.screen = Screen::ProgressionPicker;
            }
            3 => {
                self.picker_index = 0;
                self.screen = Screen::SongPicker;
            }
            4 => {
                self.settings_field = 0;
                self.screen = Screen::Settings;
            }
            _ => {}
        }
    }

    fn picker_len(&self) -> usize {
        match self.screen {
            Screen::ProgressionPicker => self.library.progressions().len(),
            Screen::SongPicker => self.library.songs().len(),
            _ => 0,
        }
    }

    fn confirm_picker(&mut self) {
        let spec = match self.screen {
            Screen::ProgressionPicker => {
                self.library
                    .progressions()
                    .get(self.picker_index)
                    .map(|p| ModeSpec::Progression {
                        key: p.key.to_string(),
                        pacing: self.pacing(),
                    })
            }
            Screen::SongPicker => self.library.songs().get(self.picker_index).map(|s| {
                ModeSpec::Song {
                    title: s.title.to_string(),
                    pacing: self.pacing(),
                }
            }),
            _ => None,
        };
        if let Some(spec) = spec {
            if let Err(e) = self.start_mode(spec) {
                self.console.log(e.to_string());
            }
        }
    }

    fn adjust_setting(&mut self, delta: i64) {
        if self.screen != Screen::Settings {
            return;
        }
        match self.settings_field {
            0 => {
                let pacing = (self.pacing_secs as i64 + delta)
                    .clamp(MIN_PACING_SECS as i64, MAX_PACING_SECS as i64);
                self.pacing_secs = pacing as u64;
            }
            1 => {
                self.metronome_bpm = (self.metronome_bpm + delta as f64 * 5.0)
                    .clamp(MIN_METRONOME_BPM, MAX_METRONOME_BPM);
                self.engine
                    .configure_metronome(self.metronome_bpm, self.metronome_on);
            }
            2 => {
                self.metronome_on = !self.metronome_on;
                self.engine
                    .configure_metronome(self.metronome_bpm, self.metronome_on);
            }
            _ => {}
        }
    }

    /// Feed wall-clock time into the engine while a session is on screen.
    fn advance_clock(&mut self) {
        if self.screen != Screen::Session || !self.engine.is_active() {
            self.last_tick = None;
            return;
        }
        let now = Instant::now();
        if let Some(last) = self.last_tick {
            let _ = self.engine.tick(now.duration_since(last));
        }
        self.last_tick = Some(now);
    }

    /// Surface absorbed playback failures as console messages.
    fn drain_warnings(&mut self) {
        if let Some(warning) = self.engine.take_warning() {
            self.console.log(format!("audio: {warning}"));
        }
    }

    /// Context-sensitive hint for the status bar.
    pub fn context_hint(&self) -> &str {
        if self.jump_input.is_some() {
            return "type a chord name | Enter:jump  Esc:cancel";
        }
        match self.screen {
            Screen::Menu => "1-5:select  q:quit",
            Screen::Session => "n/p:next/prev  s:play  m:metronome  /:jump  q:back",
            Screen::ProgressionPicker | Screen::SongPicker => {
                "Up/Down:move  Enter:start  1-9:quick pick  q:back"
            }
            Screen::Settings => "Up/Down:field  Left/Right:adjust  Enter:toggle  q:back",
        }
    }

    /// Draw the UI.
    pub fn draw(&mut self, frame: &mut Frame) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(1)])
            .split(size);

        match self.screen {
            Screen::Menu => self.draw_menu(frame, chunks[0]),
            Screen::Session => self.draw_session(frame, chunks[0]),
            Screen::ProgressionPicker | Screen::SongPicker => self.draw_picker(frame, chunks[0]),
            Screen::Settings => self.draw_settings(frame, chunks[0]),
        }

        self.draw_status(frame, chunks[1]);
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Capo — Chord Trainer ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue));

        let entries = [
            ("1", "Browse Chords", format!("{} chords", self.catalog.len())),
            (
                "2",
                "Timed Practice",
                format!("{}s per chord", self.pacing_secs),
            ),
            (
                "3",
                "Chord Progressions",
                format!("{} patterns", self.library.progressions().len()),
            ),
            (
                "4",
                "Song Mode",
                format!("{} songs", self.library.songs().len()),
            ),
            ("5", "Settings", format!("pacing {}s", self.pacing_secs)),
            ("q", "Quit", String::new()),
        ];

        let mut lines = vec![Line::from("")];
        for (key, label, desc) in entries {
            let mut spans = vec![
                Span::raw("  "),
                Span::styled(key, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                Span::raw(". "),
                Span::raw(label),
            ];
            if !desc.is_empty() {
                spans.push(Span::styled(
                    format!("  ({desc})"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(""));
        let audio_note = if self.audio_available {
            Span::styled("  Audio: available", Style::default().fg(Color::Green))
        } else {
            Span::styled("  Audio: unavailable", Style::default().fg(Color::DarkGray))
        };
        lines.push(Line::from(audio_note));

        let paragraph = Paragraph::new(lines).block(block);
        frame.render_widget(paragraph, area);
    }

    fn draw_session(&mut self, frame: &mut Frame, area: Rect) {
        let Ok(view) = self.engine.current() else {
            return;
        };
        let Some(session) = self.engine.session() else {
            return;
        };

        let has_pacing = session.pacing.is_some();
        let jump_active = self.jump_input.is_some();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),                               // header
                Constraint::Length(1),                               // sequence strip
                Constraint::Length(if has_pacing { 1 } else { 0 }),  // countdown
                Constraint::Min(8),                                  // chord panel
                Constraint::Length(4),                               // console
                Constraint::Length(if jump_active { 1 } else { 0 }), // jump bar
            ])
            .split(area);

        // Header: label, position, metronome indicator
        let mut header = vec![
            Span::styled(
                session.label.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "  [{}/{}]",
                session.index + 1,
                session.sequence.len()
            )),
        ];
        if session.metronome_on {
            header.push(Span::styled(
                format!("  \u{2669} {:.0} bpm", session.metronome_bpm),
                Style::default().fg(Color::Green),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(header)), chunks[0]);

        // Sequence strip with the current chord highlighted
        let mut strip: Vec<Span> = Vec::new();
        for (i, name) in session.sequence.iter().enumerate() {
            if i > 0 {
                strip.push(Span::styled(" \u{2192} ", Style::default().fg(Color::DarkGray)));
            }
            if i == session.index {
                strip.push(Span::styled(
                    format!("[{name}]"),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ));
            } else {
                strip.push(Span::styled(*name, Style::default().fg(Color::DarkGray)));
            }
        }
        frame.render_widget(Paragraph::new(Line::from(strip)), chunks[1]);

        // Countdown gauge
        if has_pacing {
            let ratio = session.pacing_progress().unwrap_or(0.0);
            let remaining = session
                .remaining()
                .map(|r| r.as_secs_f64().ceil() as u64)
                .unwrap_or(0);
            let gauge = Gauge::default()
                .ratio(ratio)
                .label(format!("{remaining}s"))
                .gauge_style(Style::default().fg(Color::Cyan));
            frame.render_widget(gauge, chunks[2]);
        }

        // Chord panel
        let panel_block = Block::default()
            .title(format!(" {} ", view.chord.name))
            .title_bottom(format!(" {} ", view.chord.category))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue));
        let panel_lines: Vec<Line> = chord_panel(view.chord, &view.diagram, &view.tab)
            .into_iter()
            .map(Line::from)
            .collect();
        frame.render_widget(Paragraph::new(panel_lines).block(panel_block), chunks[3]);

        // Console
        let items: Vec<ListItem> = self
            .console
            .entries()
            .iter()
            .rev()
            .map(|m| ListItem::new(m.as_str()))
            .collect();
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(list, chunks[4]);

        // Jump bar
        if let Some(buf) = &self.jump_input {
            let line = Line::from(vec![
                Span::styled(
                    " / ",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw(buf.as_str()),
            ]);
            frame.render_widget(Paragraph::new(line), chunks[5]);
            let x = chunks[5].x + 3 + buf.chars().count() as u16;
            if x < chunks[5].x + chunks[5].width {
                frame.set_cursor_position((x, chunks[5].y));
            }
        }
    }

    fn draw_picker(&self, frame: &mut Frame, area: Rect) {
        let (title, labels): (&str, Vec<String>) = match self.screen {
            Screen::ProgressionPicker => (
                " Chord Progressions ",
                self.library
                    .progressions()
                    .iter()
                    .map(|p| format!("{}  [{}]", p.label(), p.chords.join(" \u{2192} ")))
                    .collect(),
            ),
            _ => (
                " Song Mode ",
                self.library
                    .songs()
                    .iter()
                    .map(|s| format!("{}  [{}]", s.label(), s.chords.join(" \u{2192} ")))
                    .collect(),
            ),
        };

        let items: Vec<ListItem> = labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                if i < 9 {
                    ListItem::new(format!("{}. {label}", i + 1))
                } else {
                    ListItem::new(format!("   {label}"))
                }
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(self.picker_index));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_settings(&self, frame: &mut Frame, area: Rect) {
        let fields = [
            format!("Pacing: {} seconds per chord", self.pacing_secs),
            format!("Metronome tempo: {:.0} bpm", self.metronome_bpm),
            format!(
                "Metronome: {}",
                if self.metronome_on { "ON" } else { "OFF" }
            ),
        ];

        let items: Vec<ListItem> = fields
            .iter()
            .map(|f| ListItem::new(f.as_str()))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .title(" Settings ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(self.settings_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(format!(" {}", self.context_hint()))
            .style(Style::default().bg(Color::DarkGray).fg(Color::White));
        frame.render_widget(paragraph, area);
    }

    /// Run the TUI event loop.
    pub fn run(
        &mut self,
        terminal: &mut ratatui::Terminal<impl ratatui::backend::Backend>,
    ) -> io::Result<()> {
        while !self.should_quit {
            terminal
                .draw(|frame| self.draw(frame))
                .map_err(|e| io::Error::other(e.to_string()))?;

            if event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
                if let CrosstermEvent::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if let Some(action) =
                            keybindings::map_key(key, self.screen, self.jump_input.is_some())
                        {
                            self.handle_action(action);
                        }
                    }
                }
            }

            self.advance_clock();
            self.drain_warnings();
        }

        Ok(())
    }
}
