use tracing::debug;

use super::AppCommand;
use crate::catalog::query::{filter_options, ELEMENT_OPTIONS, GENDER_OPTIONS, POSITION_OPTIONS};
use crate::catalog::{Filter, FilterField, PageResult};
use crate::core::app::{App, SEARCH_DEBOUNCE};

/// Start a fetch of the current page with the committed query. Any earlier
/// in-flight request becomes stale.
pub(super) fn issue_fetch(app: &mut App) -> AppCommand {
    let request_id = app.allocate_request_id();
    let browse = &mut app.browse;
    browse.latest_request_id = Some(request_id);
    browse.loading = true;
    browse.error = None;
    AppCommand::FetchPage {
        request_id,
        query: browse.query.clone(),
        request: browse.page_request(),
    }
}

fn restart_from_first_page(app: &mut App) -> AppCommand {
    app.browse.page = 0;
    app.browse.selected = 0;
    app.browse.results_outdated = true;
    issue_fetch(app)
}

pub(super) fn search_changed(app: &mut App, text: String) -> Option<AppCommand> {
    if app.browse.search_input == text {
        return None;
    }
    app.browse.search_input = text;
    app.browse.search_generation += 1;
    Some(AppCommand::ScheduleDebounce {
        generation: app.browse.search_generation,
        delay: SEARCH_DEBOUNCE,
    })
}

pub(super) fn search_debounce_elapsed(app: &mut App, generation: u64) -> Option<AppCommand> {
    if generation != app.browse.search_generation {
        debug!(
            generation,
            current = app.browse.search_generation,
            "Ignoring superseded search debounce"
        );
        return None;
    }

    let committed = app.browse.query.name.trim();
    if committed == app.browse.search_input.trim() {
        return None;
    }

    app.browse.query.name = app.browse.search_input.trim().to_string();
    Some(restart_from_first_page(app))
}

pub(super) fn set_filter(app: &mut App, field: FilterField, filter: Filter) -> Option<AppCommand> {
    if *app.browse.query.filter(field) == filter {
        return None;
    }
    app.browse.query.set_filter(field, filter);
    Some(restart_from_first_page(app))
}

/// Option list a filter cycles through, `All` first.
pub fn cycle_options(app: &App, field: FilterField) -> Vec<String> {
    match field {
        FilterField::Element => ELEMENT_OPTIONS.iter().map(|s| s.to_string()).collect(),
        FilterField::Position => POSITION_OPTIONS.iter().map(|s| s.to_string()).collect(),
        FilterField::Gender => GENDER_OPTIONS.iter().map(|s| s.to_string()).collect(),
        FilterField::Team => filter_options(app.browse.teams.iter().cloned()),
        FilterField::Role | FilterField::SchoolYear => Vec::new(),
    }
}

pub(super) fn cycle_filter(app: &mut App, field: FilterField) -> Option<AppCommand> {
    let options = cycle_options(app, field);
    if options.len() < 2 {
        return None;
    }

    let current = app.browse.query.filter(field).to_string();
    let next = options
        .iter()
        .position(|option| *option == current)
        .map_or(0, |index| (index + 1) % options.len());
    set_filter(app, field, Filter::parse(&options[next]))
}

pub(super) fn next_page(app: &mut App) -> Option<AppCommand> {
    if !app.browse.can_go_next() {
        return None;
    }
    app.browse.page += 1;
    app.browse.selected = 0;
    Some(issue_fetch(app))
}

pub(super) fn previous_page(app: &mut App) -> Option<AppCommand> {
    if !app.browse.can_go_previous() {
        return None;
    }
    app.browse.page -= 1;
    app.browse.selected = 0;
    Some(issue_fetch(app))
}

pub(super) fn page_loaded(app: &mut App, request_id: u64, page: PageResult) {
    if !app.is_current_request(request_id) {
        debug!(request_id, "Discarding stale page response");
        return;
    }
    let browse = &mut app.browse;
    browse.loading = false;
    browse.error = None;
    browse.results_outdated = false;
    browse.page = page.number;
    browse.selected = browse.selected.min(page.content.len().saturating_sub(1));
    browse.results = Some(page);
}

pub(super) fn page_failed(app: &mut App, request_id: u64, message: String) {
    if !app.is_current_request(request_id) {
        debug!(request_id, "Discarding stale page failure");
        return;
    }
    app.browse.loading = false;
    app.browse.error = Some(message);
}

pub(super) fn move_selection(app: &mut App, delta: isize) {
    let len = app.browse.rows().len();
    if len == 0 {
        app.browse.selected = 0;
        return;
    }
    let current = app.browse.selected.min(len - 1);
    app.browse.selected = current.saturating_add_signed(delta).min(len - 1);
}
