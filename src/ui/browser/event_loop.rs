//! Event polling, dispatching, and rendering loop.
//!
//! The loop owns the [`App`]. Terminal input arrives from a reader task as
//! [`UiEvent`]s, is mapped to actions and pushed through the same
//! dispatcher that background tasks report on, so every state change goes
//! through [`apply_actions`].

use std::{
    error::Error,
    sync::Arc,
    time::{Duration, Instant},
};

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;

use crate::catalog::CatalogSource;
use crate::core::app::{apply_actions, App, AppAction, AppActionDispatcher};
use crate::ui::renderer::ui;

use super::executors::CommandExecutor;
use super::keybindings::actions_for_key;
use super::lifecycle::{restore_terminal, setup_terminal, BrowserTerminal};

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
}

pub struct BrowserOptions {
    pub page_size: usize,
    pub scout_delay: Duration,
}

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<UiEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => {
                        continue;
                    }
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

/// Map pending terminal events to actions. Returns whether anything arrived.
fn process_ui_events(
    app: &App,
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
    dispatcher: &AppActionDispatcher,
) -> bool {
    let mut events_processed = false;
    while let Ok(ev) = event_rx.try_recv() {
        events_processed = true;
        match ev {
            UiEvent::Crossterm(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                dispatcher.dispatch_many(actions_for_key(app, key));
            }
            UiEvent::Crossterm(_) => {}
        }
    }
    events_processed
}

fn drain_action_queue(
    app: &mut App,
    executor: &mut CommandExecutor,
    action_rx: &mut mpsc::UnboundedReceiver<AppAction>,
) -> bool {
    let mut pending = Vec::new();
    while let Ok(action) = action_rx.try_recv() {
        pending.push(action);
    }

    if pending.is_empty() {
        return false;
    }

    for command in apply_actions(app, pending) {
        executor.execute(command);
    }
    true
}

fn try_draw_frame(
    app: &App,
    terminal: &mut BrowserTerminal,
    request_redraw: &mut bool,
    last_draw: &mut Instant,
    frame_duration: Duration,
) -> std::io::Result<()> {
    if !*request_redraw {
        return Ok(());
    }

    let now = Instant::now();
    if now.duration_since(*last_draw) < frame_duration {
        return Ok(());
    }

    terminal.draw(|f| ui(f, app))?;
    *last_draw = now;
    *request_redraw = false;
    Ok(())
}

pub async fn run_browser(
    source: Arc<dyn CatalogSource>,
    options: BrowserOptions,
) -> Result<(), Box<dyn Error>> {
    let mut app = App::new(source.describe(), options.page_size);

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppAction>();
    let dispatcher = AppActionDispatcher::new(action_tx);
    let mut executor = CommandExecutor::new(source, dispatcher.clone(), options.scout_delay);
    dispatcher.dispatch_many([AppAction::ReloadPage, AppAction::LoadTeams]);

    let mut terminal = setup_terminal()?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
    let event_reader_handle = spawn_event_reader(event_tx);

    const MAX_FPS: u64 = 30;
    let frame_duration = Duration::from_millis(1000 / MAX_FPS);
    let mut last_draw = Instant::now() - frame_duration;
    let mut request_redraw = true;

    let result = 'main_loop: loop {
        if app.exit_requested {
            break 'main_loop Ok(());
        }

        if let Err(err) = try_draw_frame(
            &app,
            &mut terminal,
            &mut request_redraw,
            &mut last_draw,
            frame_duration,
        ) {
            break 'main_loop Err(err.into());
        }

        let events_processed = process_ui_events(&app, &mut event_rx, &dispatcher);
        let actions_applied = drain_action_queue(&mut app, &mut executor, &mut action_rx);

        if events_processed || actions_applied {
            request_redraw = true;
        }

        if !events_processed && !actions_applied && !request_redraw {
            tokio::time::sleep(Duration::from_millis(16)).await;
        } else {
            tokio::task::yield_now().await;
        }
    };

    event_reader_handle.abort();
    restore_terminal(&mut terminal)?;
    result
}
