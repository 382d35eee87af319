//! Capo — terminal guitar chord trainer.
//!
//! With no arguments, runs the interactive TUI. Flags select one-shot
//! output (chord display, listings) or jump straight into a practice mode.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use capo::audio::{CpalPlayer, NullPlayback, Playback};
use capo::catalog::Catalog;
use capo::config::Config;
use capo::library::Library;
use capo::render::{render_diagram, render_tab};
use capo::session::ModeSpec;
use capo::tui::{chord_panel, App};

/// Seed for the deterministic pluck synthesis.
const SEED: u64 = 42;

#[derive(Parser)]
#[command(name = "capo", version, about = "Terminal-native guitar chord trainer")]
struct Cli {
    /// Display a specific chord and exit (e.g. G, Am7, Fmaj7)
    #[arg(short, long, value_name = "NAME")]
    chord: Option<String>,

    /// Start in timed practice mode
    #[arg(short, long)]
    practice: bool,

    /// Seconds per chord in paced modes (2-30)
    #[arg(long, value_name = "SECONDS")]
    pacing: Option<u64>,

    /// Start a progression by name (pop, rock, blues, sad, jazz, ...)
    #[arg(long, value_name = "NAME")]
    progression: Option<String>,

    /// Start a song by title
    #[arg(long, value_name = "TITLE")]
    song: Option<String>,

    /// Enable the metronome at the given tempo (40-200 BPM)
    #[arg(short, long, value_name = "BPM")]
    metronome: Option<f64>,

    /// List all chords grouped by category
    #[arg(long)]
    list_chords: bool,

    /// List all progressions
    #[arg(long)]
    list_progressions: bool,

    /// List all songs
    #[arg(long)]
    list_songs: bool,

    /// Disable audio output
    #[arg(long)]
    no_audio: bool,
}

fn main() {
    let cli = Cli::parse();
    let catalog = Arc::new(Catalog::new());
    let library = Arc::new(Library::new());

    if cli.list_chords {
        list_chords(&catalog);
        return;
    }
    if cli.list_progressions {
        list_progressions(&library);
        return;
    }
    if cli.list_songs {
        list_songs(&library);
        return;
    }

    let mut config = Config::load().unwrap_or_default();
    if let Some(pacing) = cli.pacing {
        config.pacing_secs = pacing.clamp(2, 30);
    }
    if let Some(bpm) = cli.metronome {
        config.metronome_bpm = bpm.clamp(40.0, 200.0);
        config.metronome_on = true;
    }

    if let Some(name) = &cli.chord {
        show_single_chord(&catalog, name, &config, cli.no_audio);
        return;
    }

    // Validate selectors before touching the terminal.
    let initial_mode = match resolve_initial_mode(&cli, &library, &config) {
        Ok(mode) => mode,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
    };

    let (playback, audio_available) = build_playback(&config, cli.no_audio);
    let mut app = App::new(catalog, library, playback, &config, audio_available);

    if let Some(spec) = initial_mode {
        if let Err(e) = app.start_mode(spec) {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }

    if let Err(e) = run_tui(&mut app) {
        eprintln!("terminal error: {e}");
        std::process::exit(1);
    }
}

/// Resolve `--practice`/`--progression`/`--song` into an initial mode.
/// Unknown selectors produce an error message listing the valid names.
fn resolve_initial_mode(
    cli: &Cli,
    library: &Library,
    config: &Config,
) -> Result<Option<ModeSpec>, String> {
    let pacing = Duration::from_secs(config.pacing_secs);

    if let Some(key) = &cli.progression {
        let progression = library.progression(key).map_err(|e| {
            let keys: Vec<_> = library.progressions().iter().map(|p| p.key).collect();
            format!("{e}\navailable progressions: {}", keys.join(", "))
        })?;
        return Ok(Some(ModeSpec::Progression {
            key: progression.key.to_string(),
            pacing,
        }));
    }

    if let Some(title) = &cli.song {
        let song = library.song(title).map_err(|e| {
            format!("{e}\nuse --list-songs to see available titles")
        })?;
        return Ok(Some(ModeSpec::Song {
            title: song.title.to_string(),
            pacing,
        }));
    }

    if cli.practice {
        return Ok(Some(ModeSpec::TimedDrill { pacing }));
    }

    Ok(None)
}

/// Build the playback service, falling back to silence when audio is
/// disabled or no device is available.
fn build_playback(config: &Config, no_audio: bool) -> (Box<dyn Playback>, bool) {
    if no_audio {
        return (Box::new(NullPlayback), false);
    }
    match CpalPlayer::new(config.volume, SEED) {
        Ok(player) => (Box::new(player), true),
        Err(e) => {
            eprintln!("audio unavailable: {e}");
            (Box::new(NullPlayback), false)
        }
    }
}

/// Print a single chord panel, strum it if audio is up, and exit.
fn show_single_chord(catalog: &Catalog, name: &str, config: &Config, no_audio: bool) {
    let Some(chord) = catalog.find(name) else {
        eprintln!("chord '{name}' not found");
        eprintln!("available chords: {}", catalog.names().join(", "));
        std::process::exit(1);
    };

    println!("{}  [{}]", chord.name, chord.category);
    println!();
    for line in chord_panel(chord, &render_diagram(chord), &render_tab(chord)) {
        println!("{line}");
    }

    if !no_audio {
        if let Ok(mut player) = CpalPlayer::new(config.volume, SEED) {
            let _ = player.play_chord(chord);
            // Let the strum ring out before the stream drops.
            std::thread::sleep(Duration::from_secs(2));
        }
    }
}

fn list_chords(catalog: &Catalog) {
    let mut current_category = None;
    for chord in catalog.all() {
        if current_category != Some(chord.category) {
            if current_category.is_some() {
                println!();
            }
            println!("{}", chord.category);
            current_category = Some(chord.category);
        }
        println!("  {:<8}{}", chord.name, chord.finger_summary());
    }
}

fn list_progressions(library: &Library) {
    for p in library.progressions() {
        println!("{:<12}{}  [{}]", p.key, p.label(), p.chords.join(" \u{2192} "));
    }
}

fn list_songs(library: &Library) {
    for s in library.songs() {
        println!("{}  [{}]", s.label(), s.chords.join(" \u{2192} "));
    }
}

/// Set up the terminal, run the app, and restore on every exit path.
fn run_tui(app: &mut App) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}
