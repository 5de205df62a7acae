//! Filter + paginate semantics for the item listing.
//!
//! The listing always operates on a freshly loaded collection, so the
//! functions here are pure: collection in, page out. All numeric query
//! inputs are coerced, never rejected — a malformed `page` means page 1,
//! a malformed `limit` means the default page size.

use crate::domain::item::Item;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A resolved listing query. Construct with [`ItemQuery::from_raw`] to get
/// the coercion rules applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemQuery {
    pub search: Option<String>,
    pub page: usize,
    pub page_size: usize,
}

impl ItemQuery {
    /// Builds a query from raw, untrusted parameter strings.
    ///
    /// Empty search terms are treated as absent. `page` and `page_size`
    /// fall back to their defaults unless the raw value parses as a
    /// positive integer.
    pub fn from_raw(search: Option<&str>, page: Option<&str>, page_size: Option<&str>) -> Self {
        let search = search
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_string);

        Self {
            search,
            page: parse_or_default(page, DEFAULT_PAGE),
            page_size: parse_or_default(page_size, DEFAULT_PAGE_SIZE),
        }
    }
}

impl Default for ItemQuery {
    fn default() -> Self {
        Self::from_raw(None, None, None)
    }
}

/// One page of the filtered listing plus the metadata the client needs to
/// render a pager.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemsPage {
    pub items: Vec<Item>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

/// Coerces a raw parameter into a positive integer, falling back to
/// `default` for anything that does not parse or is zero.
pub fn parse_or_default(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| *value >= 1)
        .unwrap_or(default)
}

/// Applies the search filter and page slicing to a collection.
///
/// `total` and `total_pages` describe the filtered collection, not the
/// slice. A page past the end yields an empty slice with the requested
/// page echoed back unchanged; callers can tell they ran off the end by
/// comparing `page` against `total_pages`.
pub fn run(collection: &[Item], query: &ItemQuery) -> ItemsPage {
    let filtered: Vec<&Item> = match &query.search {
        Some(term) => {
            let needle = term.to_lowercase();
            collection
                .iter()
                .filter(|item| item.name.to_lowercase().contains(&needle))
                .collect()
        }
        None => collection.iter().collect(),
    };

    let total = filtered.len();
    let total_pages = total.div_ceil(query.page_size);

    let start = (query.page - 1).saturating_mul(query.page_size);
    let end = start.saturating_add(query.page_size).min(total);
    let items = if start < end {
        filtered[start..end].iter().map(|item| (*item).clone()).collect()
    } else {
        Vec::new()
    };

    ItemsPage {
        items,
        total,
        page: query.page,
        total_pages,
    }
}
