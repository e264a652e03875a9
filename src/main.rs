//! pm-tui - a terminal people directory
//!
//! Browse a directory of people on the home page and open a details
//! page per person, with the list avatar animating into place on entry.

mod action;
mod anim;
mod app;
mod components;
mod config;
mod model;
mod router;
mod section;
mod stage;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::config::Config;
use crate::model::PersonRepository;
use crate::tui::Tui;
use anyhow::Result;
use crossterm::event::Event;
use std::path::Path;
use std::time::Duration;

fn main() -> Result<()> {
    let mut config = Config::load().unwrap_or_default();
    if let Some(path) = data_path_arg() {
        config.people_path = Some(path);
        // Remember the chosen data file for the next launch
        config.save()?;
    }

    let repo = match config
        .people_path
        .as_deref()
        .filter(|p| Path::new(p).exists())
    {
        Some(path) => PersonRepository::new(Some(Path::new(path))),
        None => PersonRepository::builtin(),
    };

    // Setup terminal
    let mut tui = Tui::new()?
        .with_tick_rate(Duration::from_millis(config.tick_rate_ms))
        .with_animations(config.animations);
    tui.enter()?;

    // Create app state
    let mut app = App::new(config, repo)?;
    let result = app.init(&mut tui).and_then(|()| run_app(&mut tui, &mut app));

    // Cleanup terminal
    tui.exit()?;

    if let Err(err) = result {
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Value of the `--data <path>` argument, if given
fn data_path_arg() -> Option<String> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--data" {
            return args.next();
        }
    }
    None
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame) {
                eprintln!("Draw error: {}", e);
            }
        })?;

        // Poll for events
        if let Some(event) = tui.next_event()? {
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // An action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a, tui)?;
            }
        } else {
            // No event - send a tick for time-based updates
            app.update(Action::Tick, tui)?;
        }
    }

    Ok(())
}
