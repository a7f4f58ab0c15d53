use crate::catalog::{CharacterRecord, PageRequest, PageResult, QuerySpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Scout,
    Encyclopedia,
}

impl ActiveView {
    pub fn toggled(self) -> Self {
        match self {
            ActiveView::Scout => ActiveView::Encyclopedia,
            ActiveView::Encyclopedia => ActiveView::Scout,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ActiveView::Scout => "Scout",
            ActiveView::Encyclopedia => "Encyclopedia",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScoutState {
    Idle,
    Pending { draw_id: u64 },
    Resolved(CharacterRecord),
}

impl ScoutState {
    pub fn is_pending(&self) -> bool {
        matches!(self, ScoutState::Pending { .. })
    }
}

/// Encyclopedia state. Only the current page is held; every page change
/// goes back to the source.
#[derive(Debug, Clone)]
pub struct BrowseState {
    /// Constraints the current results were (or are being) fetched with.
    pub query: QuerySpec,
    /// Search box contents, committed into `query.name` after the debounce.
    pub search_input: String,
    pub search_generation: u64,
    /// 0-based page index.
    pub page: usize,
    pub page_size: usize,
    pub results: Option<PageResult>,
    pub loading: bool,
    pub error: Option<String>,
    /// Distinct team names reported by the source.
    pub teams: Vec<String>,
    pub selected: usize,
    /// `results` still belong to the query that was replaced; paging
    /// forward waits for the new first page.
    pub results_outdated: bool,
    pub(super) latest_request_id: Option<u64>,
}

impl BrowseState {
    pub fn new(page_size: usize) -> Self {
        Self {
            query: QuerySpec::default(),
            search_input: String::new(),
            search_generation: 0,
            page: 0,
            page_size: page_size.max(1),
            results: None,
            loading: false,
            error: None,
            teams: Vec::new(),
            selected: 0,
            results_outdated: false,
            latest_request_id: None,
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }

    pub fn total_pages(&self) -> usize {
        self.results.as_ref().map_or(0, |page| page.total_pages)
    }

    pub fn total_elements(&self) -> usize {
        self.results.as_ref().map_or(0, |page| page.total_elements)
    }

    pub fn rows(&self) -> &[CharacterRecord] {
        self.results
            .as_ref()
            .map_or(&[][..], |page| page.content.as_slice())
    }

    pub fn selected_record(&self) -> Option<&CharacterRecord> {
        self.rows().get(self.selected)
    }

    pub fn can_go_next(&self) -> bool {
        !self.results_outdated && self.page + 1 < self.total_pages()
    }

    pub fn can_go_previous(&self) -> bool {
        self.page > 0
    }

    /// `Found: N | Page x/y`, with at least one page shown.
    pub fn status_line(&self) -> String {
        format!(
            "Found: {} | Page {}/{}",
            self.total_elements(),
            self.page + 1,
            self.total_pages().max(1)
        )
    }
}
