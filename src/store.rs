//! The listing store: the fixture loaded once and held read-only.
//!
//! ## Loading
//!
//! ```text
//! templates.json ──read──▶ Fixture ──validate──▶ ListingStore { listings, tally }
//! ```
//!
//! The store keeps listings in fixture order. That order is what stable sorts
//! fall back to for ties, so it is never rearranged after load.
//!
//! ## Validation
//!
//! Listings are identified by `id`, so the loader rejects:
//! - listings with an empty `id`
//! - two listings sharing an `id`
//!
//! Everything else (missing prices, ratings, dates, media) is tolerated and
//! handled by default values further down.

use crate::types::{Fixture, Listing};
use crate::view::PlatformTally;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate listing id: {0}")]
    DuplicateId(String),
    #[error("Listing #{0} has an empty id")]
    EmptyId(usize),
}

/// Immutable, pre-loaded sequence of listings plus their platform tally.
#[derive(Debug, Clone, Default)]
pub struct ListingStore {
    listings: Vec<Listing>,
    last_updated: Option<String>,
    tally: PlatformTally,
}

impl ListingStore {
    /// Read and validate a fixture file.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_json(&content)?;
        tracing::info!(
            path = %path.display(),
            listings = store.len(),
            last_updated = store.last_updated().unwrap_or("unknown"),
            "loaded listing store"
        );
        Ok(store)
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let fixture: Fixture = serde_json::from_str(json)?;
        Self::from_fixture(fixture)
    }

    pub fn from_fixture(fixture: Fixture) -> Result<Self, StoreError> {
        validate(&fixture.templates)?;
        let tally = PlatformTally::from_listings(&fixture.templates);
        Ok(Self {
            listings: fixture.templates,
            last_updated: fixture.last_updated.filter(|s| !s.is_empty()),
            tally,
        })
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    pub fn last_updated(&self) -> Option<&str> {
        self.last_updated.as_deref()
    }

    pub fn tally(&self) -> &PlatformTally {
        &self.tally
    }
}

fn validate(listings: &[Listing]) -> Result<(), StoreError> {
    let mut seen = HashSet::new();
    for (i, listing) in listings.iter().enumerate() {
        if listing.id.is_empty() {
            return Err(StoreError::EmptyId(i));
        }
        if !seen.insert(listing.id.as_str()) {
            return Err(StoreError::DuplicateId(listing.id.clone()));
        }
    }
    Ok(())
}
