use serde::{Deserialize, Serialize};

/// A sneaker listing as read from the catalog sheet.
///
/// Constructed once per fetch by the row normalizer and never mutated; a
/// refresh replaces the whole collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Sheet-assigned identifier. May be empty before assembly; the assembled
    /// catalog only contains non-empty, unique ids.
    pub id: String,
    pub brand: String,
    /// Display name, e.g. `"Air Jordan 1 Retro High"`.
    pub model: String,
    /// Price in Chilean pesos. `None` when the sheet cell is not numeric.
    pub price: Option<f64>,
    /// Free-text size label such as `"9.5"` or `"US 10"`.
    pub size: String,
    /// Image URL; `None` renders a placeholder.
    pub image: Option<String>,
    /// Stock exactly as written in the sheet. `"0"` hides the product.
    pub stock: String,
    /// Lifecycle label, e.g. `"Disponible"` or `"Exclusivo"`.
    pub status: String,
    pub featured: bool,
    /// Badge tier derived from `status` at normalization time.
    pub badge: BadgeTier,
}

impl Product {
    /// Colour token for the product's badge.
    #[must_use]
    pub fn badge_color(&self) -> &'static str {
        self.badge.color_token()
    }

    /// `true` when the sheet marks this product as out of stock.
    #[must_use]
    pub fn is_zero_stock(&self) -> bool {
        self.stock == "0"
    }
}

/// Presentation tier of a product badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTier {
    Available,
    Upcoming,
    SoldOut,
    Exclusive,
    LastUnits,
    Limited,
    OnDemand,
    Neutral,
}

impl BadgeTier {
    /// Classifies a status label. Rules are checked in order and the first
    /// match wins, so `"Exclusivo Limitado"` is [`BadgeTier::Exclusive`].
    ///
    /// `_featured` does not currently influence the tier.
    #[must_use]
    pub fn classify(status: &str, _featured: bool) -> Self {
        let status = status.to_lowercase();
        match status.as_str() {
            "disponible" => Self::Available,
            "proximamente" => Self::Upcoming,
            "agotado" => Self::SoldOut,
            s if s.contains("exclusivo") => Self::Exclusive,
            s if s.contains("último") => Self::LastUnits,
            s if s.contains("limitado") => Self::Limited,
            s if s.contains("bajo demanda") => Self::OnDemand,
            _ => Self::Neutral,
        }
    }

    /// Tailwind class triple the storefront applies to the badge.
    #[must_use]
    pub fn color_token(self) -> &'static str {
        match self {
            Self::Available | Self::OnDemand => {
                "text-emerald-500 border-emerald-500/20 bg-emerald-500/10"
            }
            Self::Upcoming | Self::Limited => "text-amber-500 border-amber-500/20 bg-amber-500/10",
            Self::SoldOut | Self::Neutral => "text-gray-400 border-gray-400/20 bg-gray-400/10",
            Self::Exclusive => "text-purple-400 border-purple-400/20 bg-purple-400/10",
            Self::LastUnits => "text-red-500 border-red-500/20 bg-red-500/10",
        }
    }
}

impl std::fmt::Display for BadgeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BadgeTier::Available => "available",
            BadgeTier::Upcoming => "upcoming",
            BadgeTier::SoldOut => "sold_out",
            BadgeTier::Exclusive => "exclusive",
            BadgeTier::LastUnits => "last_units",
            BadgeTier::Limited => "limited",
            BadgeTier::OnDemand => "on_demand",
            BadgeTier::Neutral => "neutral",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds a visible product; tests override the fields they care about.
    pub(crate) fn make_product(id: &str, brand: &str, size: &str, status: &str) -> Product {
        Product {
            id: id.to_string(),
            brand: brand.to_string(),
            model: format!("{brand} Model {id}"),
            price: Some(120_000.0),
            size: size.to_string(),
            image: Some(format!("https://cdn.example.com/{id}.jpg")),
            stock: "3".to_string(),
            status: status.to_string(),
            featured: false,
            badge: BadgeTier::classify(status, false),
        }
    }

    #[test]
    fn exact_matches_are_case_insensitive() {
        assert_eq!(BadgeTier::classify("Disponible", false), BadgeTier::Available);
        assert_eq!(BadgeTier::classify("PROXIMAMENTE", false), BadgeTier::Upcoming);
        assert_eq!(BadgeTier::classify("agotado", true), BadgeTier::SoldOut);
    }

    #[test]
    fn exact_rules_do_not_match_substrings() {
        assert_eq!(
            BadgeTier::classify("Disponible pronto", false),
            BadgeTier::Neutral
        );
    }

    #[test]
    fn accented_upcoming_label_is_not_an_exact_match() {
        assert_eq!(BadgeTier::classify("Próximamente", false), BadgeTier::Neutral);
    }

    #[test]
    fn contains_rules() {
        assert_eq!(
            BadgeTier::classify("Drop Exclusivo", false),
            BadgeTier::Exclusive
        );
        assert_eq!(
            BadgeTier::classify("ÚLTIMO PAR", false),
            BadgeTier::LastUnits
        );
        assert_eq!(
            BadgeTier::classify("Stock limitado", false),
            BadgeTier::Limited
        );
        assert_eq!(
            BadgeTier::classify("Bajo Demanda", false),
            BadgeTier::OnDemand
        );
    }

    #[test]
    fn earlier_rule_wins_when_several_match() {
        assert_eq!(
            BadgeTier::classify("Exclusivo Limitado", false),
            BadgeTier::Exclusive
        );
        assert_eq!(
            BadgeTier::classify("Último limitado bajo demanda", false),
            BadgeTier::LastUnits
        );
    }

    #[test]
    fn unknown_and_empty_status_are_neutral() {
        assert_eq!(BadgeTier::classify("", false), BadgeTier::Neutral);
        assert_eq!(BadgeTier::classify("Reservado", true), BadgeTier::Neutral);
    }

    #[test]
    fn classification_is_deterministic() {
        for status in ["Disponible", "Exclusivo", "foo", "Último"] {
            for featured in [true, false] {
                assert_eq!(
                    BadgeTier::classify(status, featured),
                    BadgeTier::classify(status, featured)
                );
            }
        }
    }

    #[test]
    fn color_tokens_follow_tiers() {
        assert_eq!(
            BadgeTier::Available.color_token(),
            BadgeTier::OnDemand.color_token()
        );
        assert_eq!(
            BadgeTier::Exclusive.color_token(),
            "text-purple-400 border-purple-400/20 bg-purple-400/10"
        );
        assert_eq!(
            BadgeTier::LastUnits.color_token(),
            "text-red-500 border-red-500/20 bg-red-500/10"
        );
    }

    #[test]
    fn badge_serializes_as_snake_case() {
        let json = serde_json::to_string(&BadgeTier::LastUnits).unwrap();
        assert_eq!(json, "\"last_units\"");
        assert_eq!(BadgeTier::SoldOut.to_string(), "sold_out");
    }

    #[test]
    fn zero_stock_is_literal_match() {
        let mut product = make_product("1", "Nike", "9", "Disponible");
        product.stock = "0".to_string();
        assert!(product.is_zero_stock());
        product.stock = "00".to_string();
        assert!(!product.is_zero_stock());
    }
}
