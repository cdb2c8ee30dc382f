//! Normalization from raw [`SheetRow`]s to [`exmoon_core::Product`].
//!
//! Pure conversion; validity filtering happens later in
//! [`exmoon_core::assemble`].

use exmoon_core::{BadgeTier, Product};

use crate::types::SheetRow;

/// Lower-cased, trimmed spellings of the featured flag that count as "yes".
const TRUTHY_FLAGS: [&str; 4] = ["si", "sí", "true", "1"];

/// Converts one catalog row into a [`Product`].
///
/// Absent cells become empty strings (or `None` for `image` and `price`);
/// a short row never fails.
#[must_use]
pub fn normalize_row(row: &SheetRow) -> Product {
    let text = |cell: &Option<String>| cell.clone().unwrap_or_default();

    let featured = is_truthy_flag(row.featured.as_deref());
    let status = text(&row.status);
    let badge = BadgeTier::classify(&status, featured);

    Product {
        id: text(&row.id),
        brand: text(&row.brand),
        model: text(&row.model),
        price: coerce_price(row.price.as_deref()),
        size: text(&row.size),
        image: row.image.clone().filter(|url| !url.trim().is_empty()),
        stock: text(&row.stock),
        status,
        featured,
        badge,
    }
}

/// `true` for `si`, `sí`, `true` or `1`, ignoring case and surrounding
/// whitespace.
#[must_use]
pub fn is_truthy_flag(raw: Option<&str>) -> bool {
    raw.map(|s| s.trim().to_lowercase())
        .is_some_and(|flag| TRUTHY_FLAGS.contains(&flag.as_str()))
}

/// Coerces a price cell to a number.
///
/// A blank cell is `0`; an absent cell, or text that is not a finite number
/// (e.g. `"$45.000"`, `"consultar"`), yields `None`.
#[must_use]
pub fn coerce_price(raw: Option<&str>) -> Option<f64> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
