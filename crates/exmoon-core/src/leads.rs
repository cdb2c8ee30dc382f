//! Club sign-ups ("leads") captured by the storefront form.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Country and mobile prefix prepended to the 8-digit local number.
pub const WHATSAPP_PREFIX: &str = "569";

const LOCAL_NUMBER_DIGITS: usize = 8;

/// Brand suggestions offered by the sign-up form. Shoppers may also type
/// brands outside this list.
pub const CLUB_BRANDS: [&str; 10] = [
    "Nike",
    "Adidas",
    "Puma",
    "New Balance",
    "Reebok",
    "Converse",
    "Vans",
    "ASICS",
    "Under Armour",
    "Skechers",
];

/// The sign-up form exactly as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadForm {
    pub name: String,
    /// Local mobile number without the `+569` prefix; formatting characters
    /// are ignored.
    pub whatsapp: String,
    /// US size, free text.
    pub size: String,
    pub brands: Vec<String>,
    pub models: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeadError {
    #[error("field '{field}' is required")]
    Required { field: &'static str },

    #[error("whatsapp number must have {expected} digits, got {actual}")]
    InvalidWhatsapp { expected: usize, actual: usize },
}

impl LeadError {
    /// Name of the form field the error refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            LeadError::Required { field } => field,
            LeadError::InvalidWhatsapp { .. } => "whatsapp",
        }
    }
}

/// A validated lead, ready to append to the `Clientes` sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lead {
    pub name: String,
    /// Full number including [`WHATSAPP_PREFIX`], digits only.
    pub whatsapp: String,
    pub size: String,
    /// Preferred brands joined with `", "`.
    pub brands: String,
    pub models: String,
}

impl Lead {
    /// Validates and normalizes a submitted form.
    ///
    /// # Errors
    ///
    /// - [`LeadError::Required`] if `name` or `size` is blank.
    /// - [`LeadError::InvalidWhatsapp`] if the number does not contain
    ///   exactly eight digits.
    pub fn from_form(form: &LeadForm) -> Result<Self, LeadError> {
        let name = required("name", &form.name)?;

        let digits: String = form.whatsapp.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(LeadError::Required { field: "whatsapp" });
        }
        if digits.len() != LOCAL_NUMBER_DIGITS {
            return Err(LeadError::InvalidWhatsapp {
                expected: LOCAL_NUMBER_DIGITS,
                actual: digits.len(),
            });
        }

        let size = required("size", &form.size)?;

        let brands = form
            .brands
            .iter()
            .map(|b| b.trim())
            .filter(|b| !b.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        let models = form
            .models
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            name,
            whatsapp: format!("{WHATSAPP_PREFIX}{digits}"),
            size,
            brands,
            models,
        })
    }

    /// Sheet row in column order: name, whatsapp, size, brands, models.
    #[must_use]
    pub fn to_row(&self) -> [&str; 5] {
        [
            &self.name,
            &self.whatsapp,
            &self.size,
            &self.brands,
            &self.models,
        ]
    }
}

fn required(field: &'static str, value: &str) -> Result<String, LeadError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LeadError::Required { field });
    }
    Ok(trimmed.to_string())
}
