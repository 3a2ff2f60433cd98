use std::env;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::{App, InputMode};
use crate::audio::AudioPlayer;
use crate::config;
use crate::error::Result;
use crate::library::expand_paths;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::playlist::PlaylistController;
use crate::runtime::keys::{Action, expand_tilde, map_key};
use crate::runtime::mpris_sync::{MprisSnapshot, sync_mpris};
use crate::ui::{self, Areas};

pub type Controller = PlaylistController<AudioPlayer, App>;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// What MPRIS was last told.
    last_mpris: MprisSnapshot,
    /// Clickable regions from the most recent frame.
    areas: Areas,
}

impl EventLoopState {
    pub fn new(controller: &Controller) -> Self {
        Self {
            last_mpris: MprisSnapshot::of(controller),
            areas: Areas::default(),
        }
    }
}

/// Main terminal event loop. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    controller: &mut Controller,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, settings, controller) {
                return Ok(());
            }
        }

        sync_playback(controller);

        // Media keys, auto-advance and the keyboard all end up here.
        sync_mpris(mpris, controller, &settings.ui.placeholder_cover, &mut state.last_mpris);

        let mut areas = state.areas;
        terminal.draw(|f| {
            areas = ui::draw(f, controller.view(), &settings.ui, &settings.controls);
        })?;
        state.areas = areas;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(key, settings, controller) {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, controller, state),
                _ => {}
            }
        }
    }

    Ok(())
}

/// Feed the audio thread's progress into the controller and advance when a
/// track has run out.
fn sync_playback(controller: &mut Controller) {
    let ended = controller.engine().take_ended();
    let info = controller.engine().info();
    controller.on_progress_tick(info.elapsed, info.duration);
    controller.view_mut().set_clock(info.elapsed, info.duration);

    if ended {
        let result = controller.on_playback_ended();
        report(controller.view_mut(), result);
    }
}

fn handle_control_cmd(cmd: ControlCmd, settings: &config::Settings, controller: &mut Controller) -> bool {
    let result = match cmd {
        ControlCmd::Quit => {
            quit(settings, controller);
            return true;
        }
        ControlCmd::Play => controller.play(),
        ControlCmd::Pause => controller.pause(),
        ControlCmd::PlayPause => controller.toggle_play(),
        ControlCmd::Next => controller.next(),
        ControlCmd::Prev => controller.previous(),
    };
    report(controller.view_mut(), result);
    false
}

fn handle_key_event(key: KeyEvent, settings: &config::Settings, controller: &mut Controller) -> bool {
    if controller.view().input_mode == InputMode::AddPath {
        handle_prompt_key(key, settings, controller);
        return false;
    }

    let Some(action) = map_key(key) else {
        return false;
    };

    let scrub = i64::try_from(settings.controls.scrub_seconds).unwrap_or(i64::MAX);
    let result = match action {
        Action::Quit => {
            quit(settings, controller);
            return true;
        }
        Action::TogglePlay => controller.toggle_play(),
        Action::Next => controller.next(),
        Action::Previous => controller.previous(),
        Action::CursorDown => {
            controller.view_mut().next();
            Ok(())
        }
        Action::CursorUp => {
            controller.view_mut().prev();
            Ok(())
        }
        Action::CursorTop => {
            controller.view_mut().select_first();
            Ok(())
        }
        Action::CursorBottom => {
            controller.view_mut().select_last();
            Ok(())
        }
        Action::Select => {
            if controller.view().has_entries() {
                let index = controller.view().selected;
                controller.select(index)
            } else {
                Ok(())
            }
        }
        Action::Delete => delete_at_cursor(controller),
        Action::ScrubBack => controller.seek_by(-scrub).map(|_| ()),
        Action::ScrubForward => controller.seek_by(scrub).map(|_| ()),
        Action::SeekTenths(n) => controller.seek_to(u16::from(n) * 10, 100).map(|_| ()),
        Action::AddPath => {
            controller.view_mut().enter_add_mode();
            Ok(())
        }
    };
    report(controller.view_mut(), result);
    false
}

fn handle_prompt_key(key: KeyEvent, settings: &config::Settings, controller: &mut Controller) {
    match key.code {
        KeyCode::Esc => controller.view_mut().cancel_input(),
        KeyCode::Backspace => controller.view_mut().pop_input_char(),
        KeyCode::Enter => {
            let typed = controller.view_mut().take_input();
            if typed.trim().is_empty() {
                return;
            }
            let result = add_typed_path(&typed, settings, controller);
            report(controller.view_mut(), result);
        }
        KeyCode::Char(c) if !c.is_control() => controller.view_mut().push_input_char(c),
        _ => {}
    }
}

fn add_typed_path(typed: &str, settings: &config::Settings, controller: &mut Controller) -> Result<()> {
    let path = expand_tilde(typed, env::var_os("HOME").map(Into::into));
    let files = expand_paths(&[&path], &settings.library);
    if files.is_empty() {
        controller
            .view_mut()
            .set_status(format!("no audio files at {}", path.display()));
        return Ok(());
    }

    let added = controller.add_tracks(files)?;
    info!(added, path = %path.display(), "added tracks");
    controller
        .view_mut()
        .set_status(format!("added {added} track(s) from {}", path.display()));
    Ok(())
}

fn delete_at_cursor(controller: &mut Controller) -> Result<()> {
    if !controller.view().has_entries() {
        return Ok(());
    }
    let index = controller.view().selected;
    let removed = controller.delete_track(index)?;
    controller
        .view_mut()
        .set_status(format!("removed {}", removed.display_name));
    Ok(())
}

fn handle_mouse_event(mouse: MouseEvent, controller: &mut Controller, state: &EventLoopState) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }

    let result = if let Some(x) = state.areas.progress_hit(mouse.column, mouse.row) {
        controller.seek_to(x, state.areas.progress.width).map(|_| ())
    } else if let Some(index) = state.areas.list_hit(mouse.column, mouse.row, controller.len()) {
        controller.view_mut().set_selected(index);
        controller.select(index)
    } else {
        return;
    };
    report(controller.view_mut(), result);
}

fn quit(settings: &config::Settings, controller: &Controller) {
    info!("quit requested");
    controller
        .engine()
        .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
}

/// Log a failed playlist operation and surface it on the status line.
fn report(app: &mut App, result: Result<()>) {
    if let Err(e) = result {
        warn!(error = %e, "playlist operation failed");
        app.set_status(e.to_string());
    }
}
