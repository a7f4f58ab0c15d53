//! Uniform random draws ("scouting") over a whole catalog.

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::catalog::query::{PageRequest, QuerySpec};
use crate::catalog::record::CharacterRecord;
use crate::catalog::source::{CatalogSource, SourceError};

/// Shortest time a scout stays pending, so the pending state is visible.
pub const DEFAULT_SCOUT_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug)]
pub enum ScoutError {
    Source(SourceError),
    /// The catalog has no records to draw from.
    EmptyUniverse,
    /// The drawn index no longer exists (catalog shrank between the two requests).
    Vanished { index: usize },
}

impl fmt::Display for ScoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoutError::Source(err) => write!(f, "{err}"),
            ScoutError::EmptyUniverse => write!(f, "No characters available to scout"),
            ScoutError::Vanished { index } => {
                write!(f, "Character #{index} disappeared before it could be scouted")
            }
        }
    }
}

impl StdError for ScoutError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ScoutError::Source(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SourceError> for ScoutError {
    fn from(err: SourceError) -> Self {
        ScoutError::Source(err)
    }
}

/// Uniform pick from a collection already in memory.
pub fn pick_uniform<'a, R>(records: &'a [CharacterRecord], rng: &mut R) -> Option<&'a CharacterRecord>
where
    R: Rng + ?Sized,
{
    if records.is_empty() {
        return None;
    }
    records.get(rng.gen_range(0..records.len()))
}

/// Draw one record uniformly from everything `source` holds.
///
/// In-memory sources are picked from directly. Otherwise the first request
/// asks for a single-record page only to learn the total `N`; the second
/// fetches the one-record page at a random index in `[0, N)`.
pub async fn draw<R>(source: &dyn CatalogSource, rng: &mut R) -> Result<CharacterRecord, ScoutError>
where
    R: Rng + Send + ?Sized,
{
    if let Some(records) = source.snapshot() {
        return pick_uniform(records, rng)
            .cloned()
            .ok_or(ScoutError::EmptyUniverse);
    }

    let universe = QuerySpec::default();
    let probe = source.fetch_page(&universe, PageRequest::new(0, 1)).await?;
    let total = probe.total_elements;
    if total == 0 {
        return Err(ScoutError::EmptyUniverse);
    }

    let index = rng.gen_range(0..total);
    debug!(total, index, "Scout draw");

    let page = source.fetch_page(&universe, PageRequest::new(index, 1)).await?;
    page.content
        .into_iter()
        .next()
        .ok_or(ScoutError::Vanished { index })
}

/// [`draw`], but never resolves before `min_duration` has passed.
pub async fn scout<R>(
    source: &dyn CatalogSource,
    rng: &mut R,
    min_duration: Duration,
) -> Result<CharacterRecord, ScoutError>
where
    R: Rng + Send + ?Sized,
{
    let (outcome, ()) = tokio::join!(draw(source, rng), tokio::time::sleep(min_duration));
    outcome
}
