//! Listing records and the fixture envelope they are shipped in.
//!
//! The fixture is written by the marketplace scrapers and read here as-is.
//! Field names stay camelCase on the wire. Scrapers emit `null` or leave keys
//! out whenever a marketplace page lacks a value, so every field except `id`
//! decodes to an empty default rather than failing.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One marketplace item (a template) with descriptive, commercial, and media
/// metadata.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Unique key, e.g. `"framer-portfolio-x"`.
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub author: String,
    /// Marketplace the listing came from (`ThemeForest`, `Webflow`, `Framer`, ...).
    #[serde(default, deserialize_with = "lenient_string")]
    pub platform: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    /// Display text, not a number. See [`crate::price`].
    #[serde(default, deserialize_with = "lenient_string")]
    pub price: String,
    /// Average rating, 0 when unknown.
    #[serde(default, deserialize_with = "lenient_rating")]
    pub rating: f64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub rating_count: Option<u64>,
    /// Sales count, 0 when unknown.
    #[serde(default, deserialize_with = "lenient_sales")]
    pub sales: u64,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub screenshots: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub preview_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub features: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub compatibility: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub scraped_at: Option<String>,
}

/// Top-level shape of `templates.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub last_updated: Option<String>,
    /// Free-form provenance marker written by the scrapers (`"aggregated"`).
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub source: Option<String>,
    #[serde(default, alias = "listings")]
    pub templates: Vec<Listing>,
}

// =============================================================================
// Lenient field decoders
// =============================================================================
//
// Each decoder reads the raw JSON value and keeps what it can use. A value of
// the wrong type becomes the field's empty default, so one bad field never
// rejects the whole fixture.

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// A JSON number, or a string holding one (`"4.5"`). Non-finite values are 0.
fn lenient_rating<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let rating = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(rating.filter(|r| r.is_finite()).unwrap_or(0.0))
}

fn lenient_sales<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Ok(lenient_count(deserializer)?.unwrap_or(0))
}

/// A non-negative JSON number. Fractions are truncated.
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f as u64)
        }),
        _ => None,
    })
}

fn lenient_tags<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(lenient_strings(deserializer)?.unwrap_or_default())
}

/// An array of strings. Entries that are not strings are dropped.
fn lenient_strings<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}
