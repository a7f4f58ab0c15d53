//! Character records, the sources they come from, and the query, paging and
//! random-draw logic built on top of them.

pub mod query;
pub mod record;
pub mod scout;
pub mod source;
pub mod tabular;

pub use query::{Filter, FilterField, PageRequest, PageResult, QuerySpec};
pub use record::{CharacterRecord, ElementKind, GenderKind, StatBlock};
pub use scout::{ScoutError, DEFAULT_SCOUT_DELAY};
pub use source::{CatalogSource, LocalSource, RemoteSource, SourceError};
