//! WhatsApp deep links and peso formatting for product inquiries.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::products::Product;

/// Characters left unescaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Label shown instead of a price when the sheet cell is not numeric.
pub const PRICE_ON_REQUEST: &str = "Consultar precio";

pub const ADVISOR_MESSAGE: &str = "Hola ExclusiveMoon, quiero saber más.";

pub const NOT_IN_CATALOG_MESSAGE: &str = "Hola, busco un modelo que no está en el catálogo.";

/// Formats a price as Chilean pesos: no decimals, `.` as thousands
/// separator, e.g. `45000.0` → `"$45.000"`.
#[must_use]
pub fn format_clp(price: Option<f64>) -> String {
    let Some(value) = price.filter(|v| v.is_finite()) else {
        return PRICE_ON_REQUEST.to_string();
    };

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Builds a `wa.me` deep link that opens a chat with `number` prefilled
/// with `message`.
#[must_use]
pub fn whatsapp_link(number: &str, message: &str) -> String {
    let text = utf8_percent_encode(message, URI_COMPONENT);
    format!("https://wa.me/{number}?text={text}")
}

/// Message asking whether `product` is still available.
#[must_use]
pub fn product_inquiry_message(product: &Product) -> String {
    format!(
        "Hola, me interesa el siguiente producto:\n\nMarca: {}\nModelo: {}\nPrecio: {}\nTalla: {}\n\n¿Sigue disponible?",
        product.brand,
        product.model,
        format_clp(product.price),
        product.size,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::tests::make_product;

    #[test]
    fn formats_thousands_with_dots() {
        assert_eq!(format_clp(Some(45_000.0)), "$45.000");
        assert_eq!(format_clp(Some(1_234_567.0)), "$1.234.567");
        assert_eq!(format_clp(Some(999.0)), "$999");
        assert_eq!(format_clp(Some(0.0)), "$0");
    }

    #[test]
    fn rounds_to_whole_pesos() {
        assert_eq!(format_clp(Some(1_499.5)), "$1.500");
        assert_eq!(format_clp(Some(1_499.4)), "$1.499");
    }

    #[test]
    fn negative_prices_keep_sign() {
        assert_eq!(format_clp(Some(-1_500.0)), "-$1.500");
    }

    #[test]
    fn non_numeric_price_renders_fallback() {
        assert_eq!(format_clp(None), PRICE_ON_REQUEST);
        assert_eq!(format_clp(Some(f64::NAN)), PRICE_ON_REQUEST);
        assert_eq!(format_clp(Some(f64::INFINITY)), PRICE_ON_REQUEST);
    }

    #[test]
    fn link_encodes_like_encode_uri_component() {
        let link = whatsapp_link("56912345678", "Hola, ¿está? (talla 9)!");
        assert_eq!(
            link,
            "https://wa.me/56912345678?text=Hola%2C%20%C2%BFest%C3%A1%3F%20(talla%209)!"
        );
    }

    #[test]
    fn advisor_link() {
        let link = whatsapp_link("569", ADVISOR_MESSAGE);
        assert!(link.starts_with("https://wa.me/569?text=Hola%20ExclusiveMoon"));
    }

    #[test]
    fn inquiry_message_includes_product_details() {
        let mut product = make_product("1", "Nike", "9.5", "Disponible");
        product.model = "Air Max 90".to_string();
        product.price = Some(45_000.0);
        let message = product_inquiry_message(&product);
        assert_eq!(
            message,
            "Hola, me interesa el siguiente producto:\n\nMarca: Nike\nModelo: Air Max 90\nPrecio: $45.000\nTalla: 9.5\n\n¿Sigue disponible?"
        );
    }

    #[test]
    fn inquiry_message_tolerates_missing_price() {
        let mut product = make_product("1", "Nike", "9", "Disponible");
        product.price = None;
        assert!(product_inquiry_message(&product).contains("Precio: Consultar precio"));
    }

    #[test]
    fn inquiry_link_escapes_newlines() {
        let product = make_product("1", "Nike", "9", "Disponible");
        let link = whatsapp_link("569", &product_inquiry_message(&product));
        assert!(link.contains("%0A%0AMarca%3A%20Nike"));
        assert!(!link.contains('\n'));
    }
}
