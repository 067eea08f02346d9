//! Shared test utilities for the template-market test suite.
//!
//! Provides listing builders, a small in-memory marketplace, and lookup
//! helpers that panic with the available ids on a miss.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let listings = vec![
//!     Listing { sales: 10, ..listing("a", "Framer", "Folio") },
//!     listing("b", "Webflow", "Starter"),
//! ];
//! let view = compute_view(&listings, &PlatformFilter::All, "", SortKey::Sales);
//! assert_eq!(ids(&view), vec!["a", "b"]);
//! ```

use std::path::{Path, PathBuf};

use crate::store::ListingStore;
use crate::types::Listing;

// =========================================================================
// Builders
// =========================================================================

/// Minimal listing: everything except id, platform, and title is defaulted.
/// Use struct update syntax to set more fields.
pub fn listing(id: &str, platform: &str, title: &str) -> Listing {
    Listing {
        id: id.to_string(),
        platform: platform.to_string(),
        title: title.to_string(),
        ..Default::default()
    }
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Seven listings over three platforms with mixed prices, ratings, sales, and
/// dates. Fixture order is deliberately not sorted by any key.
pub fn sample_listings() -> Vec<Listing> {
    vec![
        Listing {
            author: "ThemeFusion".to_string(),
            price: "$69".to_string(),
            rating: 4.8,
            sales: 950_000,
            tags: tags(&["Business", "Multipurpose", "Agency"]),
            scraped_at: Some("2025-01-10T09:00:00+00:00".to_string()),
            ..listing("tf-avada", "ThemeForest", "Avada")
        },
        Listing {
            author: "Nordic Studio".to_string(),
            price: "Free".to_string(),
            rating: 0.0,
            sales: 0,
            tags: tags(&["Portfolio", "Minimal"]),
            scraped_at: Some("2025-02-01T12:00:00+00:00".to_string()),
            ..listing("framer-nordic", "Framer", "Nordic Portfolio")
        },
        Listing {
            author: "Flowbase".to_string(),
            price: "$129".to_string(),
            rating: 4.5,
            sales: 1_200,
            tags: tags(&["SaaS", "Startup"]),
            scraped_at: Some("2025-01-20".to_string()),
            ..listing("wf-saas", "Webflow", "SaaS Launch")
        },
        Listing {
            author: "Pixel Union".to_string(),
            price: "$29".to_string(),
            rating: 4.9,
            sales: 310,
            tags: tags(&["Portfolio", "Photography"]),
            scraped_at: None,
            ..listing("framer-lens", "Framer", "Lens")
        },
        Listing {
            author: "Webber Co".to_string(),
            price: "$49".to_string(),
            rating: 4.1,
            sales: 8_400,
            tags: tags(&["Blog", "Magazine"]),
            scraped_at: Some("not a date".to_string()),
            ..listing("wf-journal", "Webflow", "Journal")
        },
        Listing {
            author: "ColorLib".to_string(),
            price: "$59".to_string(),
            rating: 4.6,
            sales: 52_000,
            tags: tags(&["Web3", "Crypto"]),
            scraped_at: Some("2024-12-01T00:00:00Z".to_string()),
            ..listing("tf-cryptox", "ThemeForest", "CryptoX")
        },
        Listing {
            author: "Studio Nine".to_string(),
            price: "$0".to_string(),
            rating: 3.9,
            sales: 40,
            tags: tags(&["Landing", "App"]),
            scraped_at: Some("2025-01-15T00:00:00Z".to_string()),
            ..listing("framer-apex", "Framer", "Apex App Landing")
        },
    ]
}

// =========================================================================
// Extractors and lookups
// =========================================================================

/// Ids of a view, in view order.
pub fn ids<'a>(view: &[&'a Listing]) -> Vec<&'a str> {
    view.iter().map(|l| l.id.as_str()).collect()
}

/// Find a listing by id. Panics if not found.
pub fn find_listing<'a>(store: &'a ListingStore, id: &str) -> &'a Listing {
    store.get(id).unwrap_or_else(|| {
        let ids: Vec<&str> = store.listings().iter().map(|l| l.id.as_str()).collect();
        panic!("listing '{id}' not found. Available: {ids:?}")
    })
}

// =========================================================================
// Fixture files
// =========================================================================

/// Write `json` as `templates.json` under `dir` and return its path.
pub fn write_fixture(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("templates.json");
    std::fs::write(&path, json).unwrap();
    path
}

/// Path of the checked-in sample fixture.
pub fn sample_fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/templates.json")
}
