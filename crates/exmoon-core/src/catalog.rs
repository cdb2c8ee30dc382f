//! Assembly of normalized rows into the visible catalog.
//!
//! [`assemble`] is the single place invalid listings are removed. Everything
//! downstream (facets, filters, pagination) selects from an assembled
//! [`Catalog`] and never re-filters.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::products::Product;

/// Drops listings that must never be shown and deduplicates by id.
///
/// Applied in order:
/// 1. products with an empty `id` are dropped,
/// 2. products whose `stock` is exactly `"0"` are dropped,
/// 3. later products repeating an already kept `id` are dropped.
///
/// Relative order of the survivors is preserved. A zero-stock row is gone
/// before dedupe runs, so it never claims its id and a later in-stock row
/// with the same id is kept.
#[must_use]
pub fn assemble(raw: Vec<Product>) -> Vec<Product> {
    let mut seen: HashSet<String> = HashSet::with_capacity(raw.len());
    raw.into_iter()
        .filter(|p| !p.id.is_empty())
        .filter(|p| !p.is_zero_stock())
        .filter(|p| seen.insert(p.id.clone()))
        .collect()
}

/// An assembled product collection and the time it was fetched.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    fetched_at: DateTime<Utc>,
}

impl Catalog {
    /// Assembles `raw` and stamps the result with the current time.
    #[must_use]
    pub fn from_raw(raw: Vec<Product>) -> Self {
        Self::from_raw_at(raw, Utc::now())
    }

    #[must_use]
    pub fn from_raw_at(raw: Vec<Product>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            products: assemble(raw),
            fetched_at,
        }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::tests::make_product;

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn drops_empty_ids() {
        let raw = vec![
            make_product("", "Nike", "9", "Disponible"),
            make_product("2", "Nike", "9", "Disponible"),
        ];
        assert_eq!(ids(&assemble(raw)), vec!["2"]);
    }

    #[test]
    fn drops_zero_stock() {
        let mut sold_out = make_product("1", "Nike", "9", "Agotado");
        sold_out.stock = "0".to_string();
        let raw = vec![sold_out, make_product("2", "Adidas", "10", "Disponible")];
        assert_eq!(ids(&assemble(raw)), vec!["2"]);
    }

    #[test]
    fn keeps_blank_stock() {
        let mut product = make_product("1", "Nike", "9", "Disponible");
        product.stock = String::new();
        assert_eq!(assemble(vec![product]).len(), 1);
    }

    #[test]
    fn first_occurrence_wins_on_duplicate_id() {
        let first = make_product("7", "Nike", "9", "Disponible");
        let mut second = make_product("7", "Puma", "11", "Exclusivo");
        second.model = "Duplicate".to_string();
        let assembled = assemble(vec![first, second]);
        assert_eq!(assembled.len(), 1);
        assert_eq!(assembled[0].brand, "Nike");
    }

    #[test]
    fn zero_stock_row_does_not_claim_its_id() {
        let mut hidden = make_product("3", "Nike", "9", "Agotado");
        hidden.stock = "0".to_string();
        let visible = make_product("3", "Nike", "9", "Disponible");
        let assembled = assemble(vec![hidden, visible]);
        assert_eq!(assembled.len(), 1);
        assert_eq!(assembled[0].status, "Disponible");
    }

    #[test]
    fn preserves_input_order() {
        let raw = vec![
            make_product("c", "Nike", "9", "Disponible"),
            make_product("a", "Nike", "9", "Disponible"),
            make_product("c", "Nike", "9", "Disponible"),
            make_product("b", "Nike", "9", "Disponible"),
        ];
        assert_eq!(ids(&assemble(raw)), vec!["c", "a", "b"]);
    }

    #[test]
    fn invariants_hold_for_mixed_input() {
        let mut raw = Vec::new();
        for i in 0..40 {
            let mut p = make_product(&(i % 13).to_string(), "Nike", "9", "Disponible");
            if i % 5 == 0 {
                p.id = String::new();
            }
            if i % 7 == 0 {
                p.stock = "0".to_string();
            }
            raw.push(p);
        }

        let assembled = assemble(raw);
        let mut seen = HashSet::new();
        for p in &assembled {
            assert!(!p.id.is_empty());
            assert_ne!(p.stock, "0");
            assert!(seen.insert(p.id.clone()), "duplicate id {}", p.id);
        }
    }

    #[test]
    fn catalog_lookup_by_id() {
        let catalog = Catalog::from_raw(vec![
            make_product("1", "Nike", "9", "Disponible"),
            make_product("2", "Adidas", "10", "Agotado"),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("2").map(|p| p.brand.as_str()), Some("Adidas"));
        assert!(catalog.get("3").is_none());
    }
}
