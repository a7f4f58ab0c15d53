//! Query constraints, page requests and the in-memory projection used by the
//! static-table source.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::record::CharacterRecord;

/// Sentinel shown at the top of every option list.
pub const ALL: &str = "All";

pub const ELEMENT_OPTIONS: [&str; 5] = [ALL, "Fire", "Wind", "Forest", "Mountain"];
pub const POSITION_OPTIONS: [&str; 5] = [ALL, "GK", "DF", "MF", "FW"];
pub const GENDER_OPTIONS: [&str; 3] = [ALL, "Male", "Female"];

/// A single categorical constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    #[default]
    All,
    Exact(String),
}

impl Filter {
    /// `"All"` (any case) and blank input mean no constraint.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            Filter::All
        } else {
            Filter::Exact(trimmed.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Filter::All)
    }

    pub fn as_exact(&self) -> Option<&str> {
        match self {
            Filter::All => None,
            Filter::Exact(value) => Some(value.as_str()),
        }
    }

    fn admits(&self, value: Option<&str>) -> bool {
        match self {
            Filter::All => true,
            Filter::Exact(expected) => value == Some(expected.as_str()),
        }
    }
}

impl From<&str> for Filter {
    fn from(value: &str) -> Self {
        Filter::parse(value)
    }
}

impl From<Option<String>> for Filter {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(Filter::parse).unwrap_or_default()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str(ALL),
            Filter::Exact(value) => f.write_str(value),
        }
    }
}

/// The categorical fields a query can constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Element,
    Position,
    Gender,
    Team,
    Role,
    SchoolYear,
}

impl FilterField {
    pub const ALL_FIELDS: [FilterField; 6] = [
        FilterField::Element,
        FilterField::Position,
        FilterField::Gender,
        FilterField::Team,
        FilterField::Role,
        FilterField::SchoolYear,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilterField::Element => "Element",
            FilterField::Position => "Pos",
            FilterField::Gender => "Gender",
            FilterField::Team => "Team",
            FilterField::Role => "Role",
            FilterField::SchoolYear => "Year",
        }
    }

    pub fn value_of(self, record: &CharacterRecord) -> Option<&str> {
        match self {
            FilterField::Element => Some(record.element.as_str()),
            FilterField::Position => Some(record.position.as_str()),
            FilterField::Gender => Some(record.gender.as_str()),
            FilterField::Team => Some(record.team.as_str()),
            FilterField::Role => record.character_role.as_deref(),
            FilterField::SchoolYear => record.school_year.as_deref(),
        }
    }
}

/// Active search and filter constraints, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySpec {
    /// Case-insensitive fragment matched against name or nickname.
    pub name: String,
    pub element: Filter,
    pub position: Filter,
    pub gender: Filter,
    pub team: Filter,
    pub role: Filter,
    pub school_year: Filter,
}

impl QuerySpec {
    pub fn filter(&self, field: FilterField) -> &Filter {
        match field {
            FilterField::Element => &self.element,
            FilterField::Position => &self.position,
            FilterField::Gender => &self.gender,
            FilterField::Team => &self.team,
            FilterField::Role => &self.role,
            FilterField::SchoolYear => &self.school_year,
        }
    }

    pub fn set_filter(&mut self, field: FilterField, filter: Filter) {
        let slot = match field {
            FilterField::Element => &mut self.element,
            FilterField::Position => &mut self.position,
            FilterField::Gender => &mut self.gender,
            FilterField::Team => &mut self.team,
            FilterField::Role => &mut self.role,
            FilterField::SchoolYear => &mut self.school_year,
        };
        *slot = filter;
    }

    pub fn name_fragment(&self) -> Option<&str> {
        let trimmed = self.name.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub fn is_unconstrained(&self) -> bool {
        self.name_fragment().is_none()
            && FilterField::ALL_FIELDS
                .iter()
                .all(|field| self.filter(*field).is_all())
    }

    pub fn matches(&self, record: &CharacterRecord) -> bool {
        if let Some(fragment) = self.name_fragment() {
            let needle = fragment.to_lowercase();
            let hit = record.name.to_lowercase().contains(&needle)
                || record.nickname.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }

        FilterField::ALL_FIELDS
            .iter()
            .all(|field| self.filter(*field).admits(field.value_of(record)))
    }
}

/// 0-based page index plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl PageRequest {
    /// A zero size is clamped to one.
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size: size.max(1),
        }
    }

    pub fn first(size: usize) -> Self {
        Self::new(0, size)
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

/// One page of records plus pagination metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub content: Vec<CharacterRecord>,
    pub total_elements: usize,
    pub total_pages: usize,
    pub number: usize,
    pub size: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl PageResult {
    pub fn new(
        content: Vec<CharacterRecord>,
        request: PageRequest,
        total_elements: usize,
    ) -> Self {
        let total_pages = total_pages(total_elements, request.size);
        Self {
            empty: content.is_empty(),
            content,
            total_elements,
            total_pages,
            number: request.page,
            size: request.size,
            first: request.page == 0,
            last: request.page.saturating_add(1) >= total_pages,
        }
    }
}

/// `ceil(total_elements / size)`, zero when there is nothing to show.
pub fn total_pages(total_elements: usize, size: usize) -> usize {
    total_elements.div_ceil(size.max(1))
}

/// Filter `collection` with `query` and cut out the requested page.
/// Collection order is preserved.
pub fn project(
    collection: &[CharacterRecord],
    query: &QuerySpec,
    request: PageRequest,
) -> PageResult {
    let request = PageRequest::new(request.page, request.size);
    let matching: Vec<&CharacterRecord> = collection
        .iter()
        .filter(|record| query.matches(record))
        .collect();
    let total = matching.len();
    let content = matching
        .into_iter()
        .skip(request.offset())
        .take(request.size)
        .cloned()
        .collect();
    PageResult::new(content, request, total)
}

/// Sorted unique non-empty values of `field` across the collection.
pub fn distinct_values(collection: &[CharacterRecord], field: FilterField) -> Vec<String> {
    collection
        .iter()
        .filter_map(|record| field.value_of(record))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Prefix an option list with the `All` sentinel, dropping any duplicate.
pub fn filter_options<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut options = vec![ALL.to_string()];
    options.extend(values.into_iter().filter(|value| value != ALL));
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, element: &str, position: &str, team: &str) -> CharacterRecord {
        CharacterRecord {
            id: id.to_string(),
            name: name.to_string(),
            nickname: String::new(),
            element: element.to_string(),
            position: position.to_string(),
            team: team.to_string(),
            gender: "Male".to_string(),
            ..CharacterRecord::default()
        }
    }

    fn roster() -> Vec<CharacterRecord> {
        vec![
            record("1", "Axel Blaze", "Fire", "FW", "Raimon"),
            record("2", "Kevin Dragonfly", "Wind", "FW", "Raimon"),
            record("3", "Mark Evans", "Mountain", "GK", "Raimon"),
            record("4", "Shawn Frost", "Wind", "DF", "Alpine"),
            record("5", "Byron Love", "Forest", "MF", "Zeus"),
        ]
    }

    #[test]
    fn element_filter_with_all_position_keeps_only_fire() {
        let collection = vec![
            record("fire", "Axel", "Fire", "FW", "Raimon"),
            record("wind", "Kevin", "Wind", "FW", "Raimon"),
        ];
        let query = QuerySpec {
            element: Filter::parse("Fire"),
            position: Filter::parse("All"),
            ..QuerySpec::default()
        };

        let page = project(&collection, &query, PageRequest::first(25));
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].id, "fire");
    }

    #[test]
    fn every_result_satisfies_every_active_filter() {
        let collection = roster();
        let queries = [
            QuerySpec {
                position: Filter::parse("FW"),
                team: Filter::parse("Raimon"),
                ..QuerySpec::default()
            },
            QuerySpec {
                name: "o".to_string(),
                element: Filter::parse("Wind"),
                ..QuerySpec::default()
            },
            QuerySpec {
                gender: Filter::parse("Female"),
                ..QuerySpec::default()
            },
        ];

        for query in &queries {
            let page = project(&collection, query, PageRequest::first(100));
            for hit in &page.content {
                assert!(collection.contains(hit));
                assert!(query.matches(hit));
                for field in FilterField::ALL_FIELDS {
                    if let Some(expected) = query.filter(field).as_exact() {
                        assert_eq!(field.value_of(hit), Some(expected));
                    }
                }
            }
            let expected = collection.iter().filter(|r| query.matches(r)).count();
            assert_eq!(page.total_elements, expected);
        }
    }

    #[test]
    fn name_search_is_case_insensitive_and_checks_nickname() {
        let mut collection = roster();
        collection[1].nickname = "Dragon Tornado".to_string();

        let query = QuerySpec {
            name: "  BLAZE ".to_string(),
            ..QuerySpec::default()
        };
        let page = project(&collection, &query, PageRequest::first(10));
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].id, "1");

        let query = QuerySpec {
            name: "tornado".to_string(),
            ..QuerySpec::default()
        };
        let page = project(&collection, &query, PageRequest::first(10));
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].id, "2");
    }

    #[test]
    fn optional_fields_never_match_exact_filters() {
        let mut collection = roster();
        collection[0].character_role = Some("Captain".to_string());

        let query = QuerySpec {
            role: Filter::parse("Captain"),
            ..QuerySpec::default()
        };
        let page = project(&collection, &query, PageRequest::first(10));
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content[0].id, "1");
    }

    #[test]
    fn pages_slice_in_collection_order() {
        let collection = roster();
        let query = QuerySpec::default();

        let first = project(&collection, &query, PageRequest::new(0, 2));
        let second = project(&collection, &query, PageRequest::new(1, 2));
        let third = project(&collection, &query, PageRequest::new(2, 2));

        let ids = |page: &PageResult| page.content.iter().map(|r| r.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&first), ["1", "2"]);
        assert_eq!(ids(&second), ["3", "4"]);
        assert_eq!(ids(&third), ["5"]);

        assert!(first.first && !first.last);
        assert!(!second.first && !second.last);
        assert!(third.last);
        assert_eq!(third.total_pages, 3);
    }

    #[test]
    fn page_past_the_end_is_empty_but_keeps_totals() {
        let page = project(&roster(), &QuerySpec::default(), PageRequest::new(9, 2));
        assert!(page.content.is_empty());
        assert!(page.empty);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
        assert!(page.last);
    }

    #[test]
    fn no_matches_yields_zero_pages_flagged_first_and_last() {
        let query = QuerySpec {
            team: Filter::parse("Nobody"),
            ..QuerySpec::default()
        };
        let page = project(&roster(), &query, PageRequest::first(25));
        assert_eq!(page.total_pages, 0);
        assert!(page.first && page.last && page.empty);
    }

    #[test]
    fn total_pages_is_ceiling_division() {
        assert_eq!(total_pages(0, 25), 0);
        assert_eq!(total_pages(1, 25), 1);
        assert_eq!(total_pages(25, 25), 1);
        assert_eq!(total_pages(26, 25), 2);
        assert_eq!(total_pages(37, 1), 37);
        assert_eq!(total_pages(10, 0), 10);
    }

    #[test]
    fn one_record_page_reports_full_total() {
        let collection: Vec<_> = (0..37)
            .map(|i| record(&i.to_string(), &format!("Player {i}"), "Fire", "MF", "Raimon"))
            .collect();
        let page = project(&collection, &QuerySpec::default(), PageRequest::new(0, 1));
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.total_elements, 37);
        assert_eq!(page.total_pages, 37);
    }

    #[test]
    fn filter_parse_treats_all_and_blank_as_unconstrained() {
        assert_eq!(Filter::parse("All"), Filter::All);
        assert_eq!(Filter::parse("all"), Filter::All);
        assert_eq!(Filter::parse("   "), Filter::All);
        assert_eq!(Filter::parse(" FW "), Filter::Exact("FW".to_string()));
        assert!(QuerySpec::default().is_unconstrained());
    }

    #[test]
    fn distinct_values_are_sorted_unique_and_prefixed() {
        let mut collection = roster();
        collection[2].team = "  ".to_string();
        let teams = distinct_values(&collection, FilterField::Team);
        assert_eq!(teams, ["Alpine", "Raimon", "Zeus"]);

        let options = filter_options(teams);
        assert_eq!(options, ["All", "Alpine", "Raimon", "Zeus"]);
    }
}
