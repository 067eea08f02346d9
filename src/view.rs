//! Derived views over the listing store: platform filter, free-text search,
//! and multi-criterion sort.
//!
//! A view is a pure function of four explicit inputs:
//!
//! ```text
//! listings ──▶ platform filter ──▶ query filter ──▶ stable sort ──▶ Vec<&Listing>
//! ```
//!
//! Nothing is cached or indexed: every change of filter, query, or sort key
//! recomputes the view from the store. The result borrows from the store, so
//! listings are never copied or modified on the way through.
//!
//! ## Sorting
//!
//! All sorts are stable. Listings that compare equal keep the order they had
//! in the store, which makes the output deterministic for identical inputs.
//!
//! | Key          | Order                                               |
//! |--------------|-----------------------------------------------------|
//! | `sales`      | sales, highest first                                |
//! | `price_asc`  | numeric price ([`parse_price`]), lowest first       |
//! | `price_desc` | numeric price, highest first                        |
//! | `rating`     | rating, highest first                               |
//! | `newest`     | `scrapedAt`, most recent first; unparsable = epoch  |

use crate::price::parse_price;
use crate::types::Listing;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Sentinel platform value meaning "no platform filter".
pub const ALL_PLATFORMS: &str = "all";

#[derive(Error, Debug, PartialEq)]
#[error("unknown sort key '{0}' (expected sales, price_asc, price_desc, rating or newest)")]
pub struct ParseSortKeyError(String);

/// Ordering applied to a derived view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Sales,
    PriceAsc,
    PriceDesc,
    Rating,
    Newest,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Sales,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::Rating,
        SortKey::Newest,
    ];

    /// Wire name used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Sales => "sales",
            SortKey::PriceAsc => "price_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::Rating => "rating",
            SortKey::Newest => "newest",
        }
    }

    /// Human label for sort pickers.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Sales => "Most Popular",
            SortKey::PriceAsc => "Price: Low → High",
            SortKey::PriceDesc => "Price: High → Low",
            SortKey::Rating => "Top Rated",
            SortKey::Newest => "Newest",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ParseSortKeyError(s.to_string()))
    }
}

/// Platform dimension of a view: everything, or one exact platform value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum PlatformFilter {
    #[default]
    All,
    /// Case-sensitive match against [`Listing::platform`].
    Only(String),
}

impl PlatformFilter {
    pub fn matches(&self, listing: &Listing) -> bool {
        match self {
            PlatformFilter::All => true,
            PlatformFilter::Only(platform) => listing.platform == *platform,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PlatformFilter::All => ALL_PLATFORMS,
            PlatformFilter::Only(platform) => platform,
        }
    }
}

impl From<&str> for PlatformFilter {
    fn from(value: &str) -> Self {
        if value == ALL_PLATFORMS {
            PlatformFilter::All
        } else {
            PlatformFilter::Only(value.to_string())
        }
    }
}

impl fmt::Display for PlatformFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three user-controlled inputs of a view, bundled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewQuery {
    pub platform: PlatformFilter,
    pub query: String,
    pub sort: SortKey,
}

impl ViewQuery {
    pub fn apply<'a>(&self, listings: &'a [Listing]) -> Vec<&'a Listing> {
        compute_view(listings, &self.platform, &self.query, self.sort)
    }
}

/// Filter, search, and sort `listings` into a new view.
///
/// An empty result is a normal outcome, never an error.
pub fn compute_view<'a>(
    listings: &'a [Listing],
    platform: &PlatformFilter,
    query: &str,
    sort: SortKey,
) -> Vec<&'a Listing> {
    let searching = !query.trim().is_empty();
    // Only emptiness is judged on the trimmed text; matching uses the query as typed.
    let needle = query.to_lowercase();

    let mut view: Vec<&Listing> = listings
        .iter()
        .filter(|listing| platform.matches(listing))
        .filter(|listing| !searching || matches_query(listing, &needle))
        .collect();
    sort_view(&mut view, sort);

    tracing::debug!(
        platform = %platform,
        query,
        sort = %sort,
        total = listings.len(),
        shown = view.len(),
        "computed view"
    );
    view
}

/// Case-insensitive containment against title, author, or any tag.
///
/// `needle` must already be lowercased.
fn matches_query(listing: &Listing, needle: &str) -> bool {
    listing.title.to_lowercase().contains(needle)
        || listing.author.to_lowercase().contains(needle)
        || listing
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

fn sort_view(view: &mut [&Listing], sort: SortKey) {
    match sort {
        SortKey::Sales => view.sort_by_key(|l| Reverse(l.sales)),
        SortKey::PriceAsc => view.sort_by_cached_key(|l| parse_price(&l.price)),
        SortKey::PriceDesc => view.sort_by_cached_key(|l| Reverse(parse_price(&l.price))),
        SortKey::Rating => view.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::Newest => view.sort_by_cached_key(|l| Reverse(recency_millis(l))),
    }
}

/// `scrapedAt` in milliseconds since the epoch; 0 when missing or unparsable.
fn recency_millis(listing: &Listing) -> i64 {
    listing
        .scraped_at
        .as_deref()
        .and_then(parse_timestamp)
        .map(|t| t.timestamp_millis())
        .unwrap_or(0)
}

/// Parse the date formats the scrapers write.
///
/// Accepts RFC 3339 (`2025-02-01T08:00:00.123+00:00`), offset-less datetimes
/// (read as UTC), and plain dates (`2025-02-01`, midnight UTC).
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(text) {
        return Some(t.with_timezone(&Utc));
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(t.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc())
}

/// Listing counts per platform over the unfiltered store.
///
/// Used to annotate platform filter controls (`Webflow 12`). Platforms that
/// never occur count as 0; the [`PlatformFilter::All`] entry is the store size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformTally {
    total: usize,
    per_platform: BTreeMap<String, usize>,
}

impl PlatformTally {
    pub fn from_listings(listings: &[Listing]) -> Self {
        let mut per_platform = BTreeMap::new();
        for listing in listings {
            *per_platform.entry(listing.platform.clone()).or_insert(0) += 1;
        }
        Self {
            total: listings.len(),
            per_platform,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count(&self, filter: &PlatformFilter) -> usize {
        match filter {
            PlatformFilter::All => self.total,
            PlatformFilter::Only(platform) => self.platform_count(platform),
        }
    }

    pub fn platform_count(&self, platform: &str) -> usize {
        self.per_platform.get(platform).copied().unwrap_or(0)
    }

    /// Platforms present in the store with their counts, alphabetically.
    pub fn platforms(&self) -> impl Iterator<Item = (&str, usize)> {
        self.per_platform.iter().map(|(p, n)| (p.as_str(), *n))
    }
}
