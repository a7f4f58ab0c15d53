//! Data sources the views read characters from.
//!
//! Views only ever talk to a [`CatalogSource`] and only ever hold the page
//! they were handed. [`RemoteSource`] forwards queries to the backend, while
//! [`LocalSource`] keeps a whole CSV collection in memory and answers with
//! [`project`].

use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::api;
use crate::catalog::query::{distinct_values, project, FilterField, PageRequest, PageResult, QuerySpec};
use crate::catalog::record::CharacterRecord;
use crate::catalog::tabular;

/// Failures at the data-source boundary.
#[derive(Debug)]
pub enum SourceError {
    /// Non-success HTTP status (`status` set) or a transport failure.
    Network {
        status: Option<u16>,
        message: String,
    },

    /// The response body was not the expected JSON shape.
    Decode(String),

    /// The CSV file could not be opened.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The CSV header could not be read.
    Csv(String),
}

impl SourceError {
    pub fn is_network(&self) -> bool {
        matches!(self, SourceError::Network { .. })
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Network {
                status: Some(status),
                message,
            } => write!(f, "Failed to fetch characters ({status}): {message}"),
            SourceError::Network {
                status: None,
                message,
            } => write!(f, "Failed to reach the catalog: {message}"),
            SourceError::Decode(msg) => write!(f, "Unexpected catalog response: {msg}"),
            SourceError::Io { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            SourceError::Csv(msg) => write!(f, "Invalid character table: {msg}"),
        }
    }
}

impl StdError for SourceError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            SourceError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SourceError::Decode(err.to_string())
        } else {
            SourceError::Network {
                status: err.status().map(|status| status.as_u16()),
                message: err.to_string(),
            }
        }
    }
}

/// Anything that can answer a page query.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_page(
        &self,
        query: &QuerySpec,
        request: PageRequest,
    ) -> Result<PageResult, SourceError>;

    /// Distinct team names, without the `All` sentinel.
    async fn fetch_teams(&self) -> Result<Vec<String>, SourceError>;

    /// Where the characters come from, for titles and logs.
    fn describe(&self) -> String;

    /// The whole collection, when it is already in memory.
    fn snapshot(&self) -> Option<&[CharacterRecord]> {
        None
    }
}

/// Backend REST API.
#[derive(Clone)]
pub struct RemoteSource {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteSource {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CatalogSource for RemoteSource {
    async fn fetch_page(
        &self,
        query: &QuerySpec,
        request: PageRequest,
    ) -> Result<PageResult, SourceError> {
        if !query.role.is_all() || !query.school_year.is_all() {
            debug!(
                role = %query.role,
                school_year = %query.school_year,
                "Backend does not filter by role or school year; ignoring"
            );
        }
        api::fetch_characters(&self.client, &self.base_url, query, request).await
    }

    async fn fetch_teams(&self) -> Result<Vec<String>, SourceError> {
        api::fetch_teams(&self.client, &self.base_url).await
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// A whole collection held in memory, usually loaded from CSV.
pub struct LocalSource {
    label: String,
    records: Vec<CharacterRecord>,
}

impl LocalSource {
    pub fn new(label: impl Into<String>, records: Vec<CharacterRecord>) -> Self {
        Self {
            label: label.into(),
            records,
        }
    }

    pub fn from_csv_path(path: &Path) -> Result<Self, SourceError> {
        let records = tabular::load_characters(path)?;
        Ok(Self::new(path.display().to_string(), records))
    }

    pub fn records(&self) -> &[CharacterRecord] {
        &self.records
    }
}

#[async_trait]
impl CatalogSource for LocalSource {
    async fn fetch_page(
        &self,
        query: &QuerySpec,
        request: PageRequest,
    ) -> Result<PageResult, SourceError> {
        Ok(project(&self.records, query, request))
    }

    async fn fetch_teams(&self) -> Result<Vec<String>, SourceError> {
        Ok(distinct_values(&self.records, FilterField::Team))
    }

    fn describe(&self) -> String {
        self.label.clone()
    }

    fn snapshot(&self) -> Option<&[CharacterRecord]> {
        Some(&self.records)
    }
}
