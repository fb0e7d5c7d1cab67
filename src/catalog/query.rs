//! Filtering, sorting, and pagination for book listings.

use crate::modules::books::models::{Book, ListBooksParams};

/// Conjunctive book predicates; absent bounds match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BookFilter {
    pub author_id: Option<i64>,
    /// Inclusive lower price bound
    pub price_min: Option<f64>,
    /// Inclusive upper price bound
    pub price_max: Option<f64>,
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        self.author_id.map_or(true, |id| book.author_id == id)
            && self.price_min.map_or(true, |min| book.price >= min)
            && self.price_max.map_or(true, |max| book.price <= max)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
    /// Keep the filtered listing as it is
    #[default]
    Unsorted,
}

impl SortOrder {
    /// `price_asc` and `price_desc` are recognised; any other key leaves order unchanged.
    pub fn from_key(key: Option<&str>) -> Self {
        match key {
            Some("price_asc") => SortOrder::PriceAsc,
            Some("price_desc") => SortOrder::PriceDesc,
            _ => SortOrder::Unsorted,
        }
    }

    /// Stable sort; books with equal prices keep their relative order.
    pub fn apply(self, books: &mut [Book]) {
        match self {
            SortOrder::PriceAsc => books.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortOrder::PriceDesc => books.sort_by(|a, b| b.price.total_cmp(&a.price)),
            SortOrder::Unsorted => {}
        }
    }
}

/// One-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
}

impl Pagination {
    pub const DEFAULT_PAGE: usize = 1;

    pub fn new(page: usize, limit: usize) -> Self {
        Self { page, limit }
    }

    /// Zero-based offset of the first item, `None` for page 0 which has no window.
    pub fn offset(&self) -> Option<usize> {
        self.page.checked_sub(1)?.checked_mul(self.limit)
    }

    /// Slice the window out of `items`. Windows past the end are empty.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        match self.offset() {
            Some(offset) => items.into_iter().skip(offset).take(self.limit).collect(),
            None => Vec::new(),
        }
    }
}

/// A fully resolved listing request: filter, then sort, then paginate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookListing {
    pub filter: BookFilter,
    pub sort: SortOrder,
    pub pagination: Pagination,
}

impl BookListing {
    pub fn from_params(params: &ListBooksParams, default_limit: usize) -> Self {
        Self {
            filter: BookFilter {
                author_id: params.author_id,
                price_min: params.price_min,
                price_max: params.price_max,
            },
            sort: SortOrder::from_key(params.sort_by.as_deref()),
            pagination: Pagination::new(
                params.page.unwrap_or(Pagination::DEFAULT_PAGE),
                params.limit.unwrap_or(default_limit),
            ),
        }
    }

    pub fn run<'a>(&self, books: impl Iterator<Item = &'a Book>) -> Vec<Book> {
        let mut selected: Vec<Book> = books.filter(|b| self.filter.matches(b)).cloned().collect();
        self.sort.apply(&mut selected);
        self.pagination.apply(selected)
    }
}

impl Default for BookListing {
    fn default() -> Self {
        Self {
            filter: BookFilter::default(),
            sort: SortOrder::Unsorted,
            pagination: Pagination::new(Pagination::DEFAULT_PAGE, 10),
        }
    }
}
