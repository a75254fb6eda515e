//! Filtered, sorted, paginated product views.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use clementine_core::ProductId;

use super::{FacetCount, ProductListing, facet_counts};

/// Default number of listings per page.
pub const DEFAULT_PAGE_SIZE: usize = 16;

/// Pagination collapses to first/last plus ellipses above this many pages.
const MAX_PLAIN_PAGES: usize = 7;

/// Active sort order, serialized with the query-parameter tags
/// (`"price-low"`, `"price-high"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Promoted listings first (editor's choice, then bestseller), ties
    /// broken by rating descending.
    #[default]
    Relevance,
    /// Price ascending.
    PriceLow,
    /// Price descending.
    PriceHigh,
    /// Rating descending.
    Rating,
    /// Identifier descending (proxy for recency).
    Newest,
}

/// The current user selection driving the derived view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    /// Free-text search over listing names (case-insensitive substring).
    pub search: String,
    /// Selected categories; empty means "all".
    pub categories: BTreeSet<String>,
    /// Selected brands; empty means "all".
    pub brands: BTreeSet<String>,
    /// Selected minimum-rating thresholds ("4 stars & up" checkboxes);
    /// a listing passes if it meets at least one.
    pub min_ratings: BTreeSet<u8>,
    /// Inclusive lower price bound; `None` is open-ended.
    pub price_min: Option<Decimal>,
    /// Inclusive upper price bound; `None` is open-ended.
    pub price_max: Option<Decimal>,
    /// Show out-of-stock listings too.
    pub include_out_of_stock: bool,
    /// Active sort order.
    pub sort: SortKey,
}

impl FilterCriteria {
    /// Whether `listing` survives every active predicate.
    ///
    /// An inverted price range (min > max) simply matches nothing.
    #[must_use]
    pub fn matches(&self, listing: &ProductListing) -> bool {
        if !self.search.is_empty()
            && !listing
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase())
        {
            return false;
        }

        if !self.categories.is_empty() && !self.categories.contains(&listing.category) {
            return false;
        }

        if !self.brands.is_empty() && !self.brands.contains(&listing.brand) {
            return false;
        }

        if !self.min_ratings.is_empty()
            && !self
                .min_ratings
                .iter()
                .any(|threshold| listing.rating >= f32::from(*threshold))
        {
            return false;
        }

        if let Some(min) = self.price_min {
            if listing.price.amount < min {
                return false;
            }
        }
        if let Some(max) = self.price_max {
            if listing.price.amount > max {
                return false;
            }
        }

        if !listing.in_stock && !self.include_out_of_stock {
            return false;
        }

        true
    }

    /// Whether any filter (not the sort) deviates from the default.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty()
            || !self.categories.is_empty()
            || !self.brands.is_empty()
            || !self.min_ratings.is_empty()
            || self.price_min.is_some()
            || self.price_max.is_some()
            || self.include_out_of_stock
    }
}

/// A partial criteria update; `Some` fields replace the corresponding
/// criterion, `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CriteriaPatch {
    /// Replace the search string.
    pub search: Option<String>,
    /// Replace the category set.
    pub categories: Option<BTreeSet<String>>,
    /// Replace the brand set.
    pub brands: Option<BTreeSet<String>>,
    /// Replace the minimum-rating set.
    pub min_ratings: Option<BTreeSet<u8>>,
    /// Replace both price bounds.
    pub price_bounds: Option<(Option<Decimal>, Option<Decimal>)>,
    /// Replace the out-of-stock toggle.
    pub include_out_of_stock: Option<bool>,
    /// Replace the sort order.
    pub sort: Option<SortKey>,
}

impl CriteriaPatch {
    /// A patch changing only the sort order (preserves the current page).
    #[must_use]
    pub fn sort(key: SortKey) -> Self {
        Self {
            sort: Some(key),
            ..Self::default()
        }
    }

    fn changes_filters(&self) -> bool {
        self.search.is_some()
            || self.categories.is_some()
            || self.brands.is_some()
            || self.min_ratings.is_some()
            || self.price_bounds.is_some()
            || self.include_out_of_stock.is_some()
    }
}

/// Entry in the compact pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    /// A selectable page number (1-based).
    Page(usize),
    /// A collapsed run of pages.
    Ellipsis,
}

/// Owns the catalog and derives a filtered/sorted/paginated view from the
/// current [`FilterCriteria`].
///
/// All operations are synchronous and total: invalid input degrades to an
/// empty view, never an error.
#[derive(Debug)]
pub struct ProductFilterEngine {
    catalog: Vec<ProductListing>,
    criteria: FilterCriteria,
    page: usize,
    page_size: usize,
    view: Vec<ProductListing>,
    category_facets: Vec<FacetCount>,
    brand_facets: Vec<FacetCount>,
}

impl ProductFilterEngine {
    /// Create an engine over `catalog` with the default page size.
    #[must_use]
    pub fn new(catalog: Vec<ProductListing>) -> Self {
        Self::with_page_size(catalog, DEFAULT_PAGE_SIZE)
    }

    /// Create an engine over `catalog` with a custom page size.
    ///
    /// A page size of zero is treated as one.
    #[must_use]
    pub fn with_page_size(catalog: Vec<ProductListing>, page_size: usize) -> Self {
        let category_facets = facet_counts(&catalog, |listing| &listing.category);
        let brand_facets = facet_counts(&catalog, |listing| &listing.brand);
        let mut engine = Self {
            catalog,
            criteria: FilterCriteria::default(),
            page: 1,
            page_size: page_size.max(1),
            view: Vec::new(),
            category_facets,
            brand_facets,
        };
        engine.derive();
        engine
    }

    /// The full catalog, unfiltered.
    #[must_use]
    pub fn catalog(&self) -> &[ProductListing] {
        &self.catalog
    }

    /// Look up a listing by id in the full catalog.
    #[must_use]
    pub fn listing(&self, id: ProductId) -> Option<&ProductListing> {
        self.catalog.iter().find(|listing| listing.id == id)
    }

    /// The current criteria.
    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Merge a partial update into the criteria and recompute the view.
    ///
    /// The page index resets to 1 whenever a filter changes, but is
    /// preserved across a pure sort-order change.
    pub fn set_criteria(&mut self, patch: CriteriaPatch) {
        if let Some(search) = patch.search.clone() {
            self.criteria.search = search;
        }
        if let Some(categories) = patch.categories.clone() {
            self.criteria.categories = categories;
        }
        if let Some(brands) = patch.brands.clone() {
            self.criteria.brands = brands;
        }
        if let Some(min_ratings) = patch.min_ratings.clone() {
            self.criteria.min_ratings = min_ratings;
        }
        if let Some((min, max)) = patch.price_bounds {
            self.criteria.price_min = min;
            self.criteria.price_max = max;
        }
        if let Some(include) = patch.include_out_of_stock {
            self.criteria.include_out_of_stock = include;
        }
        if let Some(sort) = patch.sort {
            self.criteria.sort = sort;
        }

        if patch.changes_filters() {
            self.page = 1;
        }
        self.derive();
    }

    /// Toggle one category in the selected set.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.criteria.categories.remove(category) {
            self.criteria.categories.insert(category.to_owned());
        }
        self.page = 1;
        self.derive();
    }

    /// Toggle one brand in the selected set.
    pub fn toggle_brand(&mut self, brand: &str) {
        if !self.criteria.brands.remove(brand) {
            self.criteria.brands.insert(brand.to_owned());
        }
        self.page = 1;
        self.derive();
    }

    /// Toggle one minimum-rating threshold.
    pub fn toggle_min_rating(&mut self, threshold: u8) {
        if !self.criteria.min_ratings.remove(&threshold) {
            self.criteria.min_ratings.insert(threshold);
        }
        self.page = 1;
        self.derive();
    }

    /// Replace the search string.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.criteria.search = search.into();
        self.page = 1;
        self.derive();
    }

    /// Replace both price bounds; a `None` bound is open-ended.
    pub fn set_price_bounds(&mut self, min: Option<Decimal>, max: Option<Decimal>) {
        self.criteria.price_min = min;
        self.criteria.price_max = max;
        self.page = 1;
        self.derive();
    }

    /// Show or hide out-of-stock listings.
    pub fn set_include_out_of_stock(&mut self, include: bool) {
        self.criteria.include_out_of_stock = include;
        self.page = 1;
        self.derive();
    }

    /// Change the sort order, preserving the current page.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.criteria.sort = sort;
        self.derive();
    }

    /// Reset every filter (the sort order is kept) and recompute.
    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria {
            sort: self.criteria.sort,
            ..FilterCriteria::default()
        };
        self.page = 1;
        self.derive();
    }

    /// Jump to a 1-based page of the current view.
    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Current 1-based page index.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Listings per page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of listings matching the current criteria.
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.view.len()
    }

    /// Total page count; 0 when nothing matches.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.view.len().div_ceil(self.page_size)
    }

    /// The current page of the derived view.
    #[must_use]
    pub fn page_items(&self) -> &[ProductListing] {
        let start = (self.page - 1).saturating_mul(self.page_size).min(self.view.len());
        let end = start.saturating_add(self.page_size).min(self.view.len());
        self.view.get(start..end).unwrap_or(&[])
    }

    /// 1-based index of the first item on the current page (0 when empty).
    #[must_use]
    pub fn start_index(&self) -> usize {
        if self.view.is_empty() {
            0
        } else {
            (self.page - 1)
                .saturating_mul(self.page_size)
                .saturating_add(1)
        }
    }

    /// 1-based index of the last item on the current page (0 when empty).
    #[must_use]
    pub fn end_index(&self) -> usize {
        self.page.saturating_mul(self.page_size).min(self.view.len())
    }

    /// Compact page-number list for pagination controls.
    ///
    /// Up to 7 pages are listed plainly. Beyond that: first 5 + ellipsis +
    /// last when near the start; first + ellipsis + last 5 when near the
    /// end; first + ellipsis + a 3-wide window around the current page +
    /// ellipsis + last otherwise.
    #[must_use]
    pub fn visible_pages(&self) -> Vec<PageToken> {
        let total = self.page_count();
        let current = self.page;
        let mut tokens = Vec::new();

        if total <= MAX_PLAIN_PAGES {
            tokens.extend((1..=total).map(PageToken::Page));
        } else if current <= 4 {
            tokens.extend((1..=5).map(PageToken::Page));
            tokens.push(PageToken::Ellipsis);
            tokens.push(PageToken::Page(total));
        } else if current >= total - 3 {
            tokens.push(PageToken::Page(1));
            tokens.push(PageToken::Ellipsis);
            tokens.extend((total - 4..=total).map(PageToken::Page));
        } else {
            tokens.push(PageToken::Page(1));
            tokens.push(PageToken::Ellipsis);
            tokens.extend((current - 1..=current + 1).map(PageToken::Page));
            tokens.push(PageToken::Ellipsis);
            tokens.push(PageToken::Page(total));
        }

        tokens
    }

    /// Category facets derived from the full catalog at construction.
    #[must_use]
    pub fn category_facets(&self) -> &[FacetCount] {
        &self.category_facets
    }

    /// Brand facets derived from the full catalog at construction.
    #[must_use]
    pub fn brand_facets(&self) -> &[FacetCount] {
        &self.brand_facets
    }

    /// Recompute the derived view: filter, then sort, then paginate.
    fn derive(&mut self) {
        let mut view: Vec<ProductListing> = self
            .catalog
            .iter()
            .filter(|listing| self.criteria.matches(listing))
            .cloned()
            .collect();

        match self.criteria.sort {
            SortKey::PriceLow => {
                view.sort_by(|a, b| a.price.amount.cmp(&b.price.amount));
            }
            SortKey::PriceHigh => {
                view.sort_by(|a, b| b.price.amount.cmp(&a.price.amount));
            }
            SortKey::Rating => view.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            SortKey::Newest => view.sort_by(|a, b| b.id.cmp(&a.id)),
            SortKey::Relevance => view.sort_by(|a, b| {
                a.promotion_rank()
                    .cmp(&b.promotion_rank())
                    .then_with(|| b.rating.total_cmp(&a.rating))
            }),
        }

        debug!(
            matches = view.len(),
            page = self.page,
            sort = ?self.criteria.sort,
            "derived product view"
        );
        self.view = view;
    }
}
