use serde::Deserialize;

use crate::catalog::query::{PageRequest, PageResult};
use crate::catalog::record::CharacterRecord;

/// Spring Data page envelope as served by `/api/characters`.
///
/// Every field is optional on the wire; [`PageEnvelope::into_page`] fills
/// gaps from the request and the content itself.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PageEnvelope {
    pub content: Vec<CharacterRecord>,
    pub total_pages: Option<usize>,
    pub total_elements: Option<usize>,
    pub size: Option<usize>,
    pub number: Option<usize>,
    pub first: Option<bool>,
    pub last: Option<bool>,
    pub empty: Option<bool>,
}

impl PageEnvelope {
    pub fn into_page(self, request: PageRequest) -> PageResult {
        let number = self.number.unwrap_or(request.page);
        let size = self.size.filter(|size| *size > 0).unwrap_or(request.size);
        let total_elements = self
            .total_elements
            .unwrap_or_else(|| number * size + self.content.len());
        let fallback = PageResult::new(Vec::new(), PageRequest::new(number, size), total_elements);

        PageResult {
            total_pages: self.total_pages.unwrap_or(fallback.total_pages),
            first: self.first.unwrap_or(fallback.first),
            last: self.last.unwrap_or_else(|| {
                number.saturating_add(1) >= self.total_pages.unwrap_or(fallback.total_pages)
            }),
            empty: self.empty.unwrap_or(self.content.is_empty()),
            content: self.content,
            total_elements,
            number,
            size,
        }
    }
}
