use tracing::debug;

use super::AppCommand;
use crate::catalog::CharacterRecord;
use crate::core::app::{App, ScoutState};

pub(super) fn request_scout(app: &mut App) -> Option<AppCommand> {
    if app.scout.is_pending() {
        return None;
    }
    let draw_id = app.allocate_draw_id();
    app.scout = ScoutState::Pending { draw_id };
    app.scout_error = None;
    app.detail = None;
    Some(AppCommand::StartScout { draw_id })
}

pub(super) fn scout_resolved(app: &mut App, draw_id: u64, record: CharacterRecord) {
    if !app.is_current_draw(draw_id) {
        debug!(draw_id, "Discarding stale scout result");
        return;
    }
    app.detail = Some(record.clone());
    app.scout = ScoutState::Resolved(record);
}

pub(super) fn scout_failed(app: &mut App, draw_id: u64, message: String) {
    if !app.is_current_draw(draw_id) {
        debug!(draw_id, "Discarding stale scout failure");
        return;
    }
    app.scout = ScoutState::Idle;
    app.scout_error = Some(message);
}

pub(super) fn dismiss_detail(app: &mut App) {
    app.detail = None;
    if matches!(app.scout, ScoutState::Resolved(_)) {
        app.scout = ScoutState::Idle;
    }
}
