//! Price string parsing.
//!
//! Listing prices arrive as display text straight from the marketplaces:
//! `"$29"`, `"Free"`, `"$0"`, `"From $49 / year"`, or an empty string when the
//! source page had no price at all. Nothing upstream guarantees a structure,
//! so the numeric value used for sorting is *derived*:
//!
//! - `"$29"` → 29
//! - `"From $49 / year"` → 49 (first run of digits wins)
//! - `"$1,299"` → 1 (the comma ends the first run)
//! - `"Free"` → 0
//! - `""` → 0
//!
//! Malformed text never fails; it degrades to 0.

/// Extract the first run of ASCII digits in `price` as a number, or 0 if none.
///
/// Runs too long for a `u64` saturate at `u64::MAX` instead of wrapping.
pub fn parse_price(price: &str) -> u64 {
    let digits = price
        .bytes()
        .skip_while(|b| !b.is_ascii_digit())
        .take_while(|b| b.is_ascii_digit());
    digits.fold(0u64, |acc, b| {
        acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
    })
}

/// Whether a listing price means "no charge".
///
/// Empty strings count as free: the scrapers leave the price blank for
/// community templates.
pub fn is_free(price: &str) -> bool {
    price.is_empty() || price == "Free" || price == "$0"
}

/// Label shown on the price badge: `"Free"` for free listings, otherwise the
/// price text as published.
pub fn price_label(price: &str) -> &str {
    if is_free(price) { "Free" } else { price }
}
