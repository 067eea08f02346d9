//! CLI output formatting for every command.
//!
//! # Listing Display Contract
//!
//! Every listing follows the same two-level pattern wherever it appears:
//!
//! 1. **Header line**: positional index + title + author
//! 2. **Context lines**: indented platform/price/rating/sales summary, tags, link
//!
//! Stats that are unknown (rating 0, sales 0, no update date) are omitted
//! rather than printed as zeros.
//!
//! # Output Format
//!
//! ## Browse
//!
//! ```text
//! Template Marketplace: 5 templates from ThemeForest, Webflow & Framer
//! Updated Feb 1, 2025
//! Platforms: [All 5]  ThemeForest 2  Webflow 2  Framer 1
//! Sort: Most Popular
//!
//! 001 Avada by ThemeFusion
//!     ThemeForest · $69 · ★ 4.8 · 950.0k sales
//!     Tags: Business, Multipurpose, Agency
//!     Link: https://themeforest.net/item/avada
//!
//! Showing 5 of 5 templates
//! ```
//!
//! ## Preview
//!
//! ```text
//! Avada
//!     by ThemeFusion
//!     Platform: ThemeForest (#82B541)
//!     Price: $69
//!     Rating: 4.8 (24,000)
//!     Sales: 950,000 sales
//!     Updated Jan 4, 2025
//!
//! Gallery (image 2 of 3)
//!     1 https://img/a.png
//!   > 2 https://img/b.png
//!     3 https://img/c.png
//!
//! Buy $69 → https://themeforest.net/item/avada
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::config::MarketConfig;
use crate::gallery::Gallery;
use crate::price::{is_free, price_label};
use crate::roadmap::{self, Phase};
use crate::store::ListingStore;
use crate::types::Listing;
use crate::view::{PlatformFilter, PlatformTally, ViewQuery, parse_timestamp};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1234567` → `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Compact sales badge: `"1.2k sales"` from 1000 up, `"999 sales"` below.
/// `None` when sales are unknown (0).
pub fn format_sales(sales: u64) -> Option<String> {
    match sales {
        0 => None,
        n if n >= 1000 => Some(format!("{:.1}k sales", n as f64 / 1000.0)),
        n => Some(format!("{n} sales")),
    }
}

/// Rating with one decimal and an optional grouped review count:
/// `"4.8 (24,000)"`. `None` when the rating is unknown (0).
pub fn format_rating(rating: f64, count: Option<u64>) -> Option<String> {
    if rating <= 0.0 {
        return None;
    }
    Some(match count {
        Some(n) if n > 0 => format!("{rating:.1} ({})", group_thousands(n)),
        _ => format!("{rating:.1}"),
    })
}

/// `"Updated Jan 4, 2025"`, or `None` when the date is blank or unparsable.
pub fn format_updated(date: &str) -> Option<String> {
    parse_timestamp(date).map(|t| format!("Updated {}", t.format("%b %-d, %Y")))
}

/// Joins names the way headings read: `"A"`, `"A & B"`, `"A, B & C"`.
fn join_names(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} & {}", init.join(", "), last),
    }
}

/// Call to action on the preview dialog.
fn purchase_label(listing: &Listing) -> String {
    if is_free(&listing.price) {
        "Get Template".to_string()
    } else {
        format!("Buy {}", listing.price)
    }
}

// ============================================================================
// Listing card
// ============================================================================

/// Format one listing as a card in a list.
///
/// ```text
/// 001 Avada by ThemeFusion
///     ThemeForest · $69 · ★ 4.8 · 950.0k sales
///     Tags: Business, Multipurpose, Agency
///     Link: https://themeforest.net/item/avada
/// ```
pub fn format_card(index: usize, listing: &Listing, config: &MarketConfig) -> Vec<String> {
    let mut lines = Vec::new();
    let author = if listing.author.is_empty() {
        String::new()
    } else {
        format!(" by {}", listing.author)
    };
    lines.push(format!("{} {}{}", format_index(index), listing.title, author));

    let mut stats = vec![
        listing.platform.clone(),
        price_label(&listing.price).to_string(),
    ];
    if let Some(rating) = format_rating(listing.rating, None) {
        stats.push(format!("★ {rating}"));
    }
    if let Some(sales) = format_sales(listing.sales) {
        stats.push(sales);
    }
    lines.push(format!("{}{}", indent(1), stats.join(" · ")));

    let tags: Vec<&str> = listing
        .tags
        .iter()
        .take(config.browse.card_tags)
        .map(String::as_str)
        .collect();
    if !tags.is_empty() {
        lines.push(format!("{}Tags: {}", indent(1), tags.join(", ")));
    }
    if let Some(url) = listing.url.as_deref().filter(|u| !u.is_empty()) {
        lines.push(format!("{}Link: {}", indent(1), url));
    }
    lines
}

// ============================================================================
// Browse
// ============================================================================

/// Platform filter chips with counts; the active one is bracketed.
///
/// ```text
/// Platforms: [All 5]  ThemeForest 2  Webflow 2  Framer 1
/// ```
pub fn format_tally_line(
    config: &MarketConfig,
    tally: &PlatformTally,
    active: &PlatformFilter,
) -> String {
    let mut chips = vec![(PlatformFilter::All, "All".to_string())];
    chips.extend(
        config
            .platforms
            .iter()
            .map(|p| (PlatformFilter::from(p.value.as_str()), p.label.clone())),
    );
    let rendered: Vec<String> = chips
        .iter()
        .map(|(filter, label)| {
            let chip = format!("{} {}", label, tally.count(filter));
            if filter == active {
                format!("[{chip}]")
            } else {
                chip
            }
        })
        .collect();
    format!("Platforms: {}", rendered.join("  "))
}

/// Format the browse command: heading, filter chips, sort, and the view.
pub fn format_browse_output(
    store: &ListingStore,
    config: &MarketConfig,
    query: &ViewQuery,
) -> Vec<String> {
    let view = query.apply(store.listings());
    let mut lines = Vec::new();

    let platform_names: Vec<&str> = config.platforms.iter().map(|p| p.label.as_str()).collect();
    lines.push(format!(
        "Template Marketplace: {} templates from {}",
        store.len(),
        join_names(&platform_names)
    ));
    if let Some(updated) = store.last_updated().and_then(format_updated) {
        lines.push(updated);
    }
    lines.push(format_tally_line(config, store.tally(), &query.platform));
    if !query.query.trim().is_empty() {
        lines.push(format!("Search: {}", query.query));
    }
    lines.push(format!("Sort: {}", query.sort.label()));
    lines.push(String::new());

    if view.is_empty() {
        lines.push("No templates found".to_string());
        lines.push("Try adjusting your filters or search query.".to_string());
        return lines;
    }

    for (i, listing) in view.iter().enumerate() {
        lines.extend(format_card(i + 1, listing, config));
    }
    lines.push(String::new());
    lines.push(format!("Showing {} of {} templates", view.len(), store.len()));
    lines
}

pub fn print_browse_output(store: &ListingStore, config: &MarketConfig, query: &ViewQuery) {
    for line in format_browse_output(store, config, query) {
        println!("{}", line);
    }
}

// ============================================================================
// Tally
// ============================================================================

/// Per-platform counts: configured platforms first, in config order, then
/// any platform present in the store but missing from the config.
///
/// ```text
/// All          5
/// ThemeForest  2
/// Webflow      2
/// Framer       1
/// Notion       0
/// Other:
///     Gumroad  1
/// ```
pub fn format_tally_output(config: &MarketConfig, tally: &PlatformTally) -> Vec<String> {
    let width = config
        .platforms
        .iter()
        .map(|p| p.label.chars().count())
        .max()
        .unwrap_or(0)
        .max(3);
    let mut lines = vec![format!("{:<width$}  {}", "All", tally.total())];
    for p in &config.platforms {
        lines.push(format!("{:<width$}  {}", p.label, tally.platform_count(&p.value)));
    }

    let others: Vec<(&str, usize)> = tally
        .platforms()
        .filter(|(name, _)| !config.platforms.iter().any(|p| p.value == *name))
        .collect();
    if !others.is_empty() {
        lines.push("Other:".to_string());
        for (name, count) in others {
            let name = if name.is_empty() { "(none)" } else { name };
            lines.push(format!("{}{}  {}", indent(1), name, count));
        }
    }
    lines
}

pub fn print_tally_output(config: &MarketConfig, tally: &PlatformTally) {
    for line in format_tally_output(config, tally) {
        println!("{}", line);
    }
}

// ============================================================================
// Preview
// ============================================================================

/// Gallery section: active position plus the thumbnail strip with a cursor.
/// Nothing at all for listings without images.
pub fn format_gallery(gallery: &Gallery) -> Vec<String> {
    let mut lines = Vec::new();
    if gallery.is_empty() {
        return lines;
    }
    if !gallery.has_controls() {
        lines.push("Image".to_string());
        lines.push(format!("{}{}", indent(1), gallery.images()[0]));
        return lines;
    }
    lines.push(format!(
        "Gallery (image {} of {})",
        gallery.active_index() + 1,
        gallery.len()
    ));
    for (i, url) in gallery.images().iter().enumerate() {
        let cursor = if i == gallery.active_index() { "  > " } else { "    " };
        lines.push(format!("{}{} {}", cursor, i + 1, url));
    }
    lines
}

/// Format the preview dialog for one listing.
pub fn format_preview_output(
    listing: &Listing,
    gallery: &Gallery,
    config: &MarketConfig,
) -> Vec<String> {
    let mut lines = vec![listing.title.clone()];
    let ctx = indent(1);

    if !listing.author.is_empty() {
        lines.push(format!("{ctx}by {}", listing.author));
    }
    lines.push(format!(
        "{ctx}Platform: {} ({})",
        listing.platform,
        config.platform_color(&listing.platform)
    ));
    if !listing.category.is_empty() {
        lines.push(format!("{ctx}Category: {}", listing.category));
    }
    lines.push(format!("{ctx}Price: {}", price_label(&listing.price)));
    if let Some(rating) = format_rating(listing.rating, listing.rating_count) {
        lines.push(format!("{ctx}Rating: {rating}"));
    }
    if listing.sales > 0 {
        lines.push(format!("{ctx}Sales: {} sales", group_thousands(listing.sales)));
    }
    if let Some(compat) = listing.compatibility.as_deref().filter(|c| !c.is_empty()) {
        lines.push(format!("{ctx}Compatibility: {compat}"));
    }
    if let Some(updated) = listing.updated_at.as_deref().and_then(format_updated) {
        lines.push(format!("{ctx}{updated}"));
    }

    if let Some(description) = listing.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(String::new());
        lines.push(description.to_string());
    }
    if let Some(features) = listing.features.as_deref().filter(|f| !f.is_empty()) {
        lines.push(String::new());
        lines.push("Features".to_string());
        lines.push(format!("{ctx}{features}"));
    }
    if !listing.tags.is_empty() {
        lines.push(String::new());
        lines.push(format!("Tags: {}", listing.tags.join(", ")));
    }

    let gallery_lines = format_gallery(gallery);
    if !gallery_lines.is_empty() {
        lines.push(String::new());
        lines.extend(gallery_lines);
    }

    let preview = listing.preview_url.as_deref().filter(|u| !u.is_empty());
    let url = listing.url.as_deref().filter(|u| !u.is_empty());
    if preview.is_some() || url.is_some() {
        lines.push(String::new());
    }
    if let Some(preview) = preview {
        lines.push(format!("Live Preview → {preview}"));
    }
    if let Some(url) = url {
        lines.push(format!("{} → {url}", purchase_label(listing)));
    }
    lines
}

pub fn print_preview_output(listing: &Listing, gallery: &Gallery, config: &MarketConfig) {
    for line in format_preview_output(listing, gallery, config) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Summary printed after validating a fixture.
///
/// ```text
/// Listings: 5
/// Updated Feb 1, 2025
/// Without thumbnail: 1
/// Without price: 2
/// ```
pub fn format_check_output(store: &ListingStore) -> Vec<String> {
    let listings = store.listings();
    let mut lines = vec![format!("Listings: {}", listings.len())];
    match store.last_updated().and_then(format_updated) {
        Some(updated) => lines.push(updated),
        None => lines.push("Last update: unknown".to_string()),
    }
    let counts = [
        (
            "Without thumbnail",
            listings
                .iter()
                .filter(|l| l.thumbnail.as_deref().is_none_or(str::is_empty))
                .count(),
        ),
        (
            "Without price",
            listings.iter().filter(|l| l.price.is_empty()).count(),
        ),
        (
            "Unparsable scrape date",
            listings
                .iter()
                .filter(|l| l.scraped_at.as_deref().and_then(parse_timestamp).is_none())
                .count(),
        ),
    ];
    for (label, count) in counts {
        if count > 0 {
            lines.push(format!("{label}: {count}"));
        }
    }
    lines
}

pub fn print_check_output(store: &ListingStore) {
    for line in format_check_output(store) {
        println!("{}", line);
    }
}

// ============================================================================
// Roadmap
// ============================================================================

/// Landing-page module catalog grouped by phase.
///
/// ```text
/// Phase 1 (#22C55E)
/// 001 Creative Job Board
///     Remote jobs from ...
///     Tags: Design, Frontend, Web3
/// 002 Template Market → /templates
/// ```
pub fn format_roadmap_output() -> Vec<String> {
    let mut lines = Vec::new();
    for phase in Phase::ALL {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!("{} ({})", phase.label(), phase.color()));
        for (i, module) in roadmap::modules_in(phase).enumerate() {
            let live = module
                .href
                .map(|href| format!(" → {href}"))
                .unwrap_or_default();
            lines.push(format!("{} {}{}", format_index(i + 1), module.title, live));
            lines.push(format!("{}{}", indent(1), module.description));
            lines.push(format!("{}Tags: {}", indent(1), module.tags.join(", ")));
        }
    }
    lines
}

pub fn print_roadmap_output() {
    for line in format_roadmap_output() {
        println!("{}", line);
    }
}
