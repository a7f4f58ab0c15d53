//! Typed client for the characters REST API.

pub mod models;

use tracing::debug;

use crate::api::models::PageEnvelope;
use crate::catalog::query::{FilterField, PageRequest, PageResult, QuerySpec};
use crate::catalog::source::SourceError;

pub const CHARACTERS_PATH: &str = "api/characters";
pub const TEAMS_PATH: &str = "api/characters/teams";

/// Fields the backend knows how to filter on, with their parameter names.
const REMOTE_FILTERS: [(FilterField, &str); 4] = [
    (FilterField::Element, "element"),
    (FilterField::Position, "position"),
    (FilterField::Gender, "gender"),
    (FilterField::Team, "team"),
];

/// Join a base URL and an endpoint path with exactly one slash between them.
///
/// ```
/// use scoutdex::api::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://localhost:8080/", "/api/characters"),
///     "http://localhost:8080/api/characters"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Query string for a page request. Blank names and `All` filters are left out.
pub fn page_query_params(query: &QuerySpec, request: PageRequest) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("page", request.page.to_string()),
        ("size", request.size.to_string()),
    ];

    if let Some(name) = query.name_fragment() {
        params.push(("name", name.to_string()));
    }

    for (field, param) in REMOTE_FILTERS {
        if let Some(value) = query.filter(field).as_exact() {
            params.push((param, value.to_string()));
        }
    }

    params
}

fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, SourceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.to_string());
    Err(SourceError::Network {
        status: Some(status.as_u16()),
        message,
    })
}

pub async fn fetch_characters(
    client: &reqwest::Client,
    base_url: &str,
    query: &QuerySpec,
    request: PageRequest,
) -> Result<PageResult, SourceError> {
    let url = construct_api_url(base_url, CHARACTERS_PATH);
    let params = page_query_params(query, request);
    debug!(%url, page = request.page, size = request.size, "Fetching character page");

    let response = client.get(&url).query(&params).send().await?;
    let response = ensure_success(response)?;
    let body = response.text().await?;
    let envelope: PageEnvelope =
        serde_json::from_str(&body).map_err(|err| SourceError::Decode(err.to_string()))?;

    let page = envelope.into_page(request);
    debug!(
        total_elements = page.total_elements,
        returned = page.content.len(),
        "Character page received"
    );
    Ok(page)
}

pub async fn fetch_teams(client: &reqwest::Client, base_url: &str) -> Result<Vec<String>, SourceError> {
    let url = construct_api_url(base_url, TEAMS_PATH);
    debug!(%url, "Fetching team list");

    let response = client.get(&url).send().await?;
    let response = ensure_success(response)?;
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|err| SourceError::Decode(err.to_string()))
}

#[cfg(test)]
mod tests;
