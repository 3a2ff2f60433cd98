use std::path::PathBuf;
use std::sync::mpsc;

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::app::App;
use crate::audio::AudioPlayer;
use crate::library::expand_paths;
use crate::mpris::ControlCmd;
use crate::playlist::{Defaults, PlaylistController};

mod event_loop;
mod keys;
mod logging;
mod mpris_sync;
mod settings;

/// Terminal music player.
#[derive(Debug, Parser)]
#[command(name = "reel", version, about)]
struct Args {
    /// Audio files or directories to put on the playlist.
    paths: Vec<PathBuf>,

    /// Config file to read instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the effective settings as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let settings = settings::load_settings(args.config.as_deref())?;

    if args.print_config {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    if let Err(e) = logging::init_logging(&settings.logging) {
        eprintln!("reel: logging disabled: {e}");
    }
    info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let audio_player = AudioPlayer::new()?;
    let app = App::new(settings.ui.follow_current);
    let mut controller = PlaylistController::new(audio_player, app, Defaults::from_settings(&settings));

    let files = expand_paths(&args.paths, &settings.library);
    let added = controller.add_tracks(files)?;
    info!(added, "initial playlist");
    if controller.is_empty() {
        controller
            .view_mut()
            .set_status("playlist is empty, press [a] to add files");
    }

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    mpris_sync::update_mpris(&mpris, &controller, &settings.ui.placeholder_cover);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new(&controller);

        event_loop::run(
            &mut terminal,
            &settings,
            &mut controller,
            &mpris,
            &control_rx,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
