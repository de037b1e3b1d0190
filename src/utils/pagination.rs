use crate::error::{Error, Result, INVALID_PAGINATION};

pub const DEFAULT_PAGE: usize = 1;

/// A validated 1-based page window. `per_page` is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    per_page: usize,
}

impl PageRequest {
    pub fn new(page: usize, per_page: usize) -> Result<Self> {
        if per_page == 0 {
            return Err(Error::BadRequest(INVALID_PAGINATION.to_string()));
        }
        Ok(Self { page, per_page })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Half-open index range of this page, before clamping. `None` when the
    /// window lies entirely outside any collection (page 0 or overflow).
    pub fn bounds(&self) -> Option<(usize, usize)> {
        let start = self.page.checked_sub(1)?.checked_mul(self.per_page)?;
        let end = start.saturating_add(self.per_page);
        Some((start, end))
    }

    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.per_page)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

pub fn paginate<T: Clone>(items: &[T], request: PageRequest) -> Page<T> {
    let total = items.len();
    let window = match request.bounds() {
        Some((start, end)) if start < total => items[start..end.min(total)].to_vec(),
        _ => Vec::new(),
    };

    Page {
        items: window,
        total,
        page: request.page(),
        per_page: request.per_page(),
        total_pages: request.total_pages(total),
    }
}
