use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::catalog::scout::scout;
use crate::catalog::{CatalogSource, PageRequest, QuerySpec};
use crate::core::app::{AppAction, AppActionDispatcher, AppCommand};

/// Runs [`AppCommand`]s as tokio tasks and reports back through the
/// dispatcher. In-flight requests are never cancelled; stale answers are
/// dropped by the state machine. Only the search debounce timer is.
pub struct CommandExecutor {
    source: Arc<dyn CatalogSource>,
    dispatcher: AppActionDispatcher,
    scout_delay: Duration,
    debounce: Option<CancellationToken>,
}

impl CommandExecutor {
    pub fn new(
        source: Arc<dyn CatalogSource>,
        dispatcher: AppActionDispatcher,
        scout_delay: Duration,
    ) -> Self {
        Self {
            source,
            dispatcher,
            scout_delay,
            debounce: None,
        }
    }

    pub fn execute(&mut self, command: AppCommand) {
        match command {
            AppCommand::FetchPage {
                request_id,
                query,
                request,
            } => self.spawn_page_fetch(request_id, query, request),
            AppCommand::FetchTeams => self.spawn_team_fetch(),
            AppCommand::ScheduleDebounce { generation, delay } => {
                self.schedule_debounce(generation, delay)
            }
            AppCommand::StartScout { draw_id } => self.spawn_scout(draw_id),
        }
    }

    fn spawn_page_fetch(&self, request_id: u64, query: QuerySpec, request: PageRequest) {
        let source = Arc::clone(&self.source);
        let dispatcher = self.dispatcher.clone();
        tokio::spawn(async move {
            debug!(request_id, page = request.page, size = request.size, "Fetching page");
            let action = match source.fetch_page(&query, request).await {
                Ok(page) => AppAction::PageLoaded { request_id, page },
                Err(err) => {
                    if err.is_network() {
                        warn!(request_id, error = %err, "Catalog unreachable");
                    } else {
                        error!(request_id, error = %err, "Page fetch failed");
                    }
                    AppAction::PageFailed {
                        request_id,
                        message: err.to_string(),
                    }
                }
            };
            dispatcher.dispatch(action);
        });
    }

    fn spawn_team_fetch(&self) {
        let source = Arc::clone(&self.source);
        let dispatcher = self.dispatcher.clone();
        tokio::spawn(async move {
            let action = match source.fetch_teams().await {
                Ok(teams) => AppAction::TeamsLoaded { teams },
                Err(err) => AppAction::TeamsFailed {
                    message: err.to_string(),
                },
            };
            dispatcher.dispatch(action);
        });
    }

    fn schedule_debounce(&mut self, generation: u64, delay: Duration) {
        if let Some(previous) = self.debounce.take() {
            previous.cancel();
        }
        let token = CancellationToken::new();
        self.debounce = Some(token.clone());

        let dispatcher = self.dispatcher.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    dispatcher.dispatch(AppAction::SearchDebounceElapsed { generation });
                }
            }
        });
    }

    fn spawn_scout(&self, draw_id: u64) {
        let source = Arc::clone(&self.source);
        let dispatcher = self.dispatcher.clone();
        let delay = self.scout_delay;
        tokio::spawn(async move {
            let mut rng = StdRng::from_entropy();
            let action = match scout(source.as_ref(), &mut rng, delay).await {
                Ok(record) => AppAction::ScoutResolved { draw_id, record },
                Err(err) => AppAction::ScoutFailed {
                    draw_id,
                    message: err.to_string(),
                },
            };
            dispatcher.dispatch(action);
        });
    }
}
