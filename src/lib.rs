//! # Template Market
//!
//! Browse a marketplace of website templates scraped from ThemeForest,
//! Webflow, and Framer. The scrapers write one JSON fixture; this crate loads
//! it once and answers every question about it with pure functions.
//!
//! # Architecture
//!
//! ```text
//! templates.json ──load──▶ ListingStore ──compute_view──▶ Vec<&Listing> ──▶ output
//!                                │
//!                                └── PlatformTally (filter chip counts)
//!
//! Listing ──open──▶ Gallery (next / prev / jump_to) ──▶ output
//! ```
//!
//! The store is immutable after load. A view is recomputed from scratch for
//! every change of platform filter, search text, or sort key, and borrows its
//! listings from the store. The preview gallery is a small state machine that
//! lives only while one listing is shown.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | `Listing` and the fixture envelope, with lenient decoding |
//! | [`store`] | Loads and validates the fixture, owns the platform tally |
//! | [`view`] | Platform filter, free-text search, stable multi-key sort |
//! | [`price`] | Numeric price extraction from display text |
//! | [`gallery`] | Image cursor for the preview dialog |
//! | [`roadmap`] | Landing-page module catalog and phase colors |
//! | [`config`] | `market.toml` loading, merging, and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Defaults Over Errors
//!
//! Marketplace data is scraped and messy. A price of `"contact us"` sorts as
//! 0, a garbled `scrapedAt` sorts as the epoch, and a search that matches
//! nothing is an empty view. The only hard failures are at load time: an
//! unreadable fixture, invalid JSON, or listings that cannot be told apart
//! (empty or duplicate `id`).
//!
//! ## Borrowed Views
//!
//! `compute_view` returns `Vec<&Listing>`. Filtering and sorting never clone
//! a listing, and the borrow checker guarantees nothing mutates the store
//! while a view is alive.

pub mod config;
pub mod gallery;
pub mod output;
pub mod price;
pub mod roadmap;
pub mod store;
pub mod types;
pub mod view;

#[cfg(test)]
pub(crate) mod test_helpers;
