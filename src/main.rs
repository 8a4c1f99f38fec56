//! netlabeler - bulk label style assignment for pipe networks
//!
//! Terminal UI for inspecting a pipe-network drawing snapshot, grouping its
//! parts by family, and assigning, replacing, or deleting label styles in
//! bulk. Uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod host;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::host::SnapshotDrawing;
use crate::logging::DiagnosticsLog;
use crate::tui::Tui;
use anyhow::Result;
use crossterm::event::Event;
use std::path::PathBuf;
use std::time::Duration;

fn main() -> Result<()> {
    let mut config = Config::load().unwrap_or_default();

    let log = DiagnosticsLog::new(
        config
            .log_file
            .as_ref()
            .map(PathBuf::from)
            .or_else(DiagnosticsLog::default_path),
    );
    log.log("netlabeler starting");

    // Drawing path: command-line argument, falling back to the last one used.
    let drawing_path = match std::env::args().nth(1) {
        Some(path) => path,
        None if !config.last_drawing.is_empty() => config.last_drawing.clone(),
        None => {
            eprintln!("Usage: netlabeler <drawing.json>");
            std::process::exit(2);
        }
    };

    let doc = match SnapshotDrawing::load(&drawing_path) {
        Ok(doc) => doc,
        Err(err) => {
            log.error("error opening drawing", &err);
            eprintln!("Error opening drawing '{}': {:#}", drawing_path, err);
            std::process::exit(1);
        }
    };

    config.last_drawing = drawing_path;
    if let Err(err) = config.save() {
        log.error("error saving config", &err);
    }

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    // Create app state
    let mut app = App::new(Box::new(doc), config, log);
    app.init()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                eprintln!("Draw error: {}", e);
            }
        })?;

        // Poll for events
        if let Some(event) = tui.next_event()? {
            // Convert event to action
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Process the action
            if let Some(action) = action {
                // Action might produce a follow-up action
                let mut current_action = Some(action);
                while let Some(a) = current_action {
                    current_action = app.update(a)?;
                }
            }
        } else {
            // No event - send a tick for time-based updates
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}
