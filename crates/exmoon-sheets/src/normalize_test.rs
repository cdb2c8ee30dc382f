use serde_json::{json, Value};

use super::*;

fn row(cells: &[Value]) -> SheetRow {
    SheetRow::from_cells(cells)
}

fn full_row(status: &str, featured: &str) -> SheetRow {
    row(&[
        json!("1"),
        json!("Nike"),
        json!("Air Max"),
        json!("45000"),
        json!("9"),
        json!("img.jpg"),
        json!("5"),
        json!(status),
        json!(featured),
    ])
}

// -----------------------------------------------------------------------
// normalize_row
// -----------------------------------------------------------------------

#[test]
fn maps_columns_positionally() {
    let product = normalize_row(&full_row("Disponible", "si"));
    assert_eq!(product.id, "1");
    assert_eq!(product.brand, "Nike");
    assert_eq!(product.model, "Air Max");
    assert_eq!(product.price, Some(45_000.0));
    assert_eq!(product.size, "9");
    assert_eq!(product.image.as_deref(), Some("img.jpg"));
    assert_eq!(product.stock, "5");
    assert_eq!(product.status, "Disponible");
    assert!(product.featured);
    assert_eq!(product.badge, BadgeTier::Available);
}

#[test]
fn short_row_is_tolerated() {
    let product = normalize_row(&row(&[json!("9"), json!("Puma")]));
    assert_eq!(product.id, "9");
    assert_eq!(product.brand, "Puma");
    assert_eq!(product.model, "");
    assert!(product.price.is_none());
    assert!(product.image.is_none());
    assert_eq!(product.stock, "");
    assert!(!product.featured);
    assert_eq!(product.badge, BadgeTier::Neutral);
}

#[test]
fn empty_row_is_tolerated() {
    let product = normalize_row(&row(&[]));
    assert!(product.id.is_empty());
}

#[test]
fn blank_image_is_placeholder() {
    let mut r = full_row("Disponible", "no");
    r.image = Some("  ".to_string());
    assert!(normalize_row(&r).image.is_none());
}

#[test]
fn badge_is_cached_from_status() {
    let product = normalize_row(&full_row("Exclusivo Limitado", "no"));
    assert_eq!(product.badge, BadgeTier::Exclusive);
    assert_eq!(
        product.badge_color(),
        "text-purple-400 border-purple-400/20 bg-purple-400/10"
    );
}

#[test]
fn normalization_is_deterministic() {
    let r = full_row("Último par", "SÍ");
    assert_eq!(normalize_row(&r), normalize_row(&r));
}

// -----------------------------------------------------------------------
// featured flag
// -----------------------------------------------------------------------

#[test]
fn truthy_flags() {
    for flag in ["Si", "SÍ", "sí", "true", "TRUE", "1", " si "] {
        assert!(is_truthy_flag(Some(flag)), "{flag:?} should be truthy");
    }
}

#[test]
fn falsy_flags() {
    for flag in ["no", "", "0", "false", "yes", "s"] {
        assert!(!is_truthy_flag(Some(flag)), "{flag:?} should be falsy");
    }
    assert!(!is_truthy_flag(None));
}

#[test]
fn boolean_cell_true_is_featured() {
    let mut cells: Vec<Value> = vec![json!(""); 8];
    cells.push(json!(true));
    assert!(normalize_row(&row(&cells)).featured);
}

#[test]
fn numeric_cell_one_is_featured() {
    let mut cells: Vec<Value> = vec![json!(""); 8];
    cells.push(json!(1));
    assert!(normalize_row(&row(&cells)).featured);
}

// -----------------------------------------------------------------------
// price coercion
// -----------------------------------------------------------------------

#[test]
fn numeric_prices_parse() {
    assert_eq!(coerce_price(Some("45000")), Some(45_000.0));
    assert_eq!(coerce_price(Some(" 129990 ")), Some(129_990.0));
    assert_eq!(coerce_price(Some("99.5")), Some(99.5));
}

#[test]
fn numeric_json_cell_parses() {
    let mut cells: Vec<Value> = vec![json!("1"), json!("b"), json!("m")];
    cells.push(json!(45000));
    assert_eq!(normalize_row(&row(&cells)).price, Some(45_000.0));
}

#[test]
fn non_numeric_prices_are_sentinel() {
    assert!(coerce_price(Some("$45.000")).is_none());
    assert!(coerce_price(Some("consultar")).is_none());
    assert!(coerce_price(Some("NaN")).is_none());
    assert!(coerce_price(Some("inf")).is_none());
    assert!(coerce_price(None).is_none());
}

#[test]
fn blank_price_is_zero() {
    assert_eq!(coerce_price(Some("")), Some(0.0));
    assert_eq!(coerce_price(Some("   ")), Some(0.0));
}
