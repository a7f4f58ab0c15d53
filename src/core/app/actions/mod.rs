mod browse;
mod scout;

pub use browse::cycle_options;

use std::time::Duration;

use tokio::sync::mpsc;

use super::App;
use crate::catalog::{CharacterRecord, Filter, FilterField, PageRequest, PageResult, QuerySpec};

pub enum AppAction {
    SearchChanged {
        text: String,
    },
    SearchDebounceElapsed {
        generation: u64,
    },
    SetFilter {
        field: FilterField,
        filter: Filter,
    },
    CycleFilter {
        field: FilterField,
    },
    NextPage,
    PreviousPage,
    ReloadPage,
    PageLoaded {
        request_id: u64,
        page: PageResult,
    },
    PageFailed {
        request_id: u64,
        message: String,
    },
    LoadTeams,
    TeamsLoaded {
        teams: Vec<String>,
    },
    TeamsFailed {
        message: String,
    },
    SelectNext,
    SelectPrevious,
    OpenSelected,
    DismissDetail,
    RequestScout,
    ScoutResolved {
        draw_id: u64,
        record: CharacterRecord,
    },
    ScoutFailed {
        draw_id: u64,
        message: String,
    },
    SwitchView,
    ClearStatus,
    Quit,
}

#[derive(Clone)]
pub struct AppActionDispatcher {
    tx: mpsc::UnboundedSender<AppAction>,
}

impl AppActionDispatcher {
    pub fn new(tx: mpsc::UnboundedSender<AppAction>) -> Self {
        Self { tx }
    }

    pub fn dispatch(&self, action: AppAction) {
        let _ = self.tx.send(action);
    }

    pub fn dispatch_many<I>(&self, actions: I)
    where
        I: IntoIterator<Item = AppAction>,
    {
        for action in actions.into_iter() {
            self.dispatch(action);
        }
    }
}

/// Side effects requested by the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    FetchPage {
        request_id: u64,
        query: QuerySpec,
        request: PageRequest,
    },
    FetchTeams,
    ScheduleDebounce {
        generation: u64,
        delay: Duration,
    },
    StartScout {
        draw_id: u64,
    },
}

pub fn apply_actions(app: &mut App, actions: impl IntoIterator<Item = AppAction>) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for action in actions {
        if let Some(cmd) = apply_action(app, action) {
            commands.push(cmd);
        }
    }
    commands
}

pub fn apply_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::SearchChanged { text } => browse::search_changed(app, text),
        AppAction::SearchDebounceElapsed { generation } => {
            browse::search_debounce_elapsed(app, generation)
        }
        AppAction::SetFilter { field, filter } => browse::set_filter(app, field, filter),
        AppAction::CycleFilter { field } => browse::cycle_filter(app, field),
        AppAction::NextPage => browse::next_page(app),
        AppAction::PreviousPage => browse::previous_page(app),
        AppAction::ReloadPage => Some(browse::issue_fetch(app)),
        AppAction::PageLoaded { request_id, page } => {
            browse::page_loaded(app, request_id, page);
            None
        }
        AppAction::PageFailed {
            request_id,
            message,
        } => {
            browse::page_failed(app, request_id, message);
            None
        }
        AppAction::LoadTeams => Some(AppCommand::FetchTeams),
        AppAction::TeamsLoaded { teams } => {
            app.browse.teams = teams;
            None
        }
        AppAction::TeamsFailed { message } => {
            app.set_status(format!("Could not load teams: {message}"));
            None
        }
        AppAction::SelectNext => {
            browse::move_selection(app, 1);
            None
        }
        AppAction::SelectPrevious => {
            browse::move_selection(app, -1);
            None
        }
        AppAction::OpenSelected => {
            app.detail = app.browse.selected_record().cloned();
            None
        }
        AppAction::DismissDetail => {
            scout::dismiss_detail(app);
            None
        }
        AppAction::RequestScout => scout::request_scout(app),
        AppAction::ScoutResolved { draw_id, record } => {
            scout::scout_resolved(app, draw_id, record);
            None
        }
        AppAction::ScoutFailed { draw_id, message } => {
            scout::scout_failed(app, draw_id, message);
            None
        }
        AppAction::SwitchView => {
            app.view = app.view.toggled();
            None
        }
        AppAction::ClearStatus => {
            app.clear_status();
            None
        }
        AppAction::Quit => {
            app.exit_requested = true;
            None
        }
    }
}
