//! Application state for the terminal browser.
//!
//! [`App`] is owned by the event loop and only changes through
//! [`apply_action`]. Anything that needs I/O comes back out as an
//! [`AppCommand`] for the loop to execute; results return as actions.

use std::time::Duration;

use crate::catalog::CharacterRecord;

pub mod actions;
pub mod state;


pub use actions::{
    apply_action, apply_actions, cycle_options, AppAction, AppActionDispatcher, AppCommand,
};
pub use state::{ActiveView, BrowseState, ScoutState};

/// Quiet period after the last keystroke before a search is committed.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

pub struct App {
    /// Human-readable origin of the data, shown in the title bar.
    pub source_label: String,
    pub view: ActiveView,
    pub browse: BrowseState,
    pub scout: ScoutState,
    /// Last scout failure, cleared when the next draw starts.
    pub scout_error: Option<String>,
    /// Record shown in the detail overlay.
    pub detail: Option<CharacterRecord>,
    pub status: Option<String>,
    pub exit_requested: bool,
    next_request_id: u64,
    next_draw_id: u64,
}

impl App {
    pub fn new(source_label: impl Into<String>, page_size: usize) -> Self {
        Self {
            source_label: source_label.into(),
            view: ActiveView::default(),
            browse: BrowseState::new(page_size),
            scout: ScoutState::Idle,
            scout_error: None,
            detail: None,
            status: None,
            exit_requested: false,
            next_request_id: 0,
            next_draw_id: 0,
        }
    }

    pub fn is_current_request(&self, request_id: u64) -> bool {
        self.browse.latest_request_id == Some(request_id)
    }

    pub fn is_current_draw(&self, draw_id: u64) -> bool {
        matches!(self.scout, ScoutState::Pending { draw_id: pending } if pending == draw_id)
    }

    fn allocate_request_id(&mut self) -> u64 {
        self.next_request_id += 1;
        self.next_request_id
    }

    fn allocate_draw_id(&mut self) -> u64 {
        self.next_draw_id += 1;
        self.next_draw_id
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Label on the scout button.
    pub fn scout_label(&self) -> &'static str {
        if self.scout.is_pending() {
            "SCOUTING..."
        } else if self.browse.results.is_none() && self.browse.loading {
            "LOADING..."
        } else {
            "RANDOM!"
        }
    }
}
