//! Wire types for the Google Sheets v4 `values` API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response body of `GET spreadsheets/{id}/values/{range}`.
///
/// The API omits `values` entirely when the range is empty.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    pub range: Option<String>,
    pub major_dimension: Option<String>,
    pub values: Option<Vec<Vec<Value>>>,
}

/// Request body of `POST spreadsheets/{id}/values/{range}:append`.
#[derive(Debug, Serialize)]
pub(crate) struct AppendBody<'a> {
    pub values: [[&'a str; 5]; 1],
}

/// One catalog row with its cells mapped by column.
///
/// Column order is id, brand, model, price, size, image, stock, status,
/// featured flag. Cells past the end of a short row are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRow {
    pub id: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub price: Option<String>,
    pub size: Option<String>,
    pub image: Option<String>,
    pub stock: Option<String>,
    pub status: Option<String>,
    pub featured: Option<String>,
}

impl SheetRow {
    /// Maps raw cells positionally. Extra trailing cells are ignored.
    #[must_use]
    pub fn from_cells(cells: &[Value]) -> Self {
        let cell = |idx: usize| cells.get(idx).and_then(cell_text);
        Self {
            id: cell(0),
            brand: cell(1),
            model: cell(2),
            price: cell(3),
            size: cell(4),
            image: cell(5),
            stock: cell(6),
            status: cell(7),
            featured: cell(8),
        }
    }
}

/// Text of a single cell. Numbers and booleans are rendered the way the
/// sheet would display them unformatted; `null` and nested values are absent.
fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
