//! Facets, filtering and pagination over an assembled catalog.
//!
//! All functions here are pure and cheap enough to re-run on every request.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::products::Product;

/// Which listing tab is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogTab {
    #[default]
    All,
    Featured,
}

impl FromStr for CatalogTab {
    type Err = InvalidTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(Self::All),
            "featured" => Ok(Self::Featured),
            other => Err(InvalidTab {
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid tab \"{value}\": expected \"all\" or \"featured\"")]
pub struct InvalidTab {
    pub value: String,
}

/// Active facet selections. `None` and empty strings both mean "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFilters {
    pub brand: Option<String>,
    pub size: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub tab: CatalogTab,
}

impl CatalogFilters {
    /// `true` when `product` passes every active filter (logical AND, exact
    /// string equality).
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        facet_matches(self.brand.as_deref(), &product.brand)
            && facet_matches(self.size.as_deref(), &product.size)
            && facet_matches(self.status.as_deref(), &product.status)
            && (self.tab == CatalogTab::All || product.featured)
    }
}

fn facet_matches(selected: Option<&str>, value: &str) -> bool {
    match selected {
        None | Some("") => true,
        Some(selected) => selected == value,
    }
}

/// Selectable values for each facet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub brands: Vec<String>,
    pub sizes: Vec<String>,
    pub statuses: Vec<String>,
}

/// Derives facet options from the full, unfiltered collection: distinct,
/// non-empty values in ascending order.
#[must_use]
pub fn facet_options(all: &[Product]) -> Facets {
    Facets {
        brands: distinct_values(all, |p| p.brand.as_str()),
        sizes: distinct_values(all, |p| p.size.as_str()),
        statuses: distinct_values(all, |p| p.status.as_str()),
    }
}

fn distinct_values<'a>(all: &'a [Product], field: impl Fn(&'a Product) -> &'a str) -> Vec<String> {
    all.iter()
        .map(field)
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Items-per-page choices offered by the storefront.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum PageSize {
    #[default]
    Ten,
    Twenty,
    Thirty,
}

impl PageSize {
    pub const ALL: [PageSize; 3] = [PageSize::Ten, PageSize::Twenty, PageSize::Thirty];

    #[must_use]
    pub fn get(self) -> usize {
        match self {
            PageSize::Ten => 10,
            PageSize::Twenty => 20,
            PageSize::Thirty => 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid page size {value}: expected one of 10, 20, 30")]
pub struct InvalidPageSize {
    pub value: String,
}

impl TryFrom<usize> for PageSize {
    type Error = InvalidPageSize;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            10 => Ok(PageSize::Ten),
            20 => Ok(PageSize::Twenty),
            30 => Ok(PageSize::Thirty),
            other => Err(InvalidPageSize {
                value: other.to_string(),
            }),
        }
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl FromStr for PageSize {
    type Err = InvalidPageSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .map_err(|_| InvalidPageSize {
                value: s.to_string(),
            })
            .and_then(PageSize::try_from)
    }
}

/// One rendered page of the filtered catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogPage<'a> {
    pub items: Vec<&'a Product>,
    /// 1-based page actually shown, after clamping.
    pub page: usize,
    pub total_pages: usize,
    /// Number of products matching the filters across all pages.
    pub total_items: usize,
    /// `false` on page 1; the "previous" control is disabled.
    pub has_previous: bool,
    /// `false` on the last page; the "next" control is disabled.
    pub has_next: bool,
}

/// Number of pages for `filtered_count` items: never less than one.
#[must_use]
pub fn total_pages(filtered_count: usize, page_size: PageSize) -> usize {
    filtered_count.div_ceil(page_size.get()).max(1)
}

/// Filters `all` and returns the requested page.
///
/// `page` is 1-based and clamped to `[1, total_pages]`, so an out-of-range
/// request shows the nearest valid page rather than an empty one.
#[must_use]
pub fn view<'a>(
    all: &'a [Product],
    filters: &CatalogFilters,
    page: usize,
    page_size: PageSize,
) -> CatalogPage<'a> {
    let filtered: Vec<&Product> = all.iter().filter(|p| filters.matches(p)).collect();
    let total_items = filtered.len();
    let total_pages = total_pages(total_items, page_size);
    let page = page.clamp(1, total_pages);

    let items = filtered
        .into_iter()
        .skip((page - 1) * page_size.get())
        .take(page_size.get())
        .collect();

    CatalogPage {
        items,
        page,
        total_pages,
        total_items,
        has_previous: page > 1,
        has_next: page < total_pages,
    }
}

/// Interactive browsing state: current filters, page and page size.
///
/// Changing any filter or the page size returns to page 1, so narrowing the
/// result set never leaves the shopper on an empty page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseState {
    filters: CatalogFilters,
    page: usize,
    page_size: PageSize,
}

impl BrowseState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            filters: CatalogFilters::default(),
            page: 1,
            page_size: PageSize::default(),
        }
    }

    /// Starts on page 1 with the given filters and page size.
    #[must_use]
    pub fn with_filters(filters: CatalogFilters, page_size: PageSize) -> Self {
        Self {
            filters,
            page: 1,
            page_size,
        }
    }

    #[must_use]
    pub fn filters(&self) -> &CatalogFilters {
        &self.filters
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn set_brand(&mut self, brand: Option<String>) {
        self.filters.brand = brand;
        self.page = 1;
    }

    pub fn set_size(&mut self, size: Option<String>) {
        self.filters.size = size;
        self.page = 1;
    }

    pub fn set_status(&mut self, status: Option<String>) {
        self.filters.status = status;
        self.page = 1;
    }

    pub fn set_tab(&mut self, tab: CatalogTab) {
        self.filters.tab = tab;
        self.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 1;
    }

    /// Jumps to `page`, clamped to the pages available for `all`.
    pub fn go_to_page(&mut self, all: &[Product], page: usize) {
        self.page = page.clamp(1, self.total_pages(all));
    }

    /// Advances one page unless already on the last one.
    pub fn next_page(&mut self, all: &[Product]) {
        if self.page() < self.total_pages(all) {
            self.page += 1;
        }
    }

    /// Goes back one page unless already on the first one.
    pub fn previous_page(&mut self) {
        if self.page() > 1 {
            self.page -= 1;
        }
    }

    #[must_use]
    pub fn total_pages(&self, all: &[Product]) -> usize {
        let count = all.iter().filter(|p| self.filters.matches(p)).count();
        total_pages(count, self.page_size)
    }

    #[must_use]
    pub fn view<'a>(&self, all: &'a [Product]) -> CatalogPage<'a> {
        view(all, &self.filters, self.page, self.page_size)
    }
}

impl Default for BrowseState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
