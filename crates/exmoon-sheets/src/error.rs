use serde::Serialize;
use thiserror::Error;

/// Failure constructing a [`crate::SheetsClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Why a catalog fetch failed. Every variant is terminal for that attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The Sheets API answered with a non-2xx status.
    #[error("catalog request failed with HTTP {status} {status_text}")]
    Http { status: u16, status_text: String },

    /// The response was successful but carried no `values` field.
    #[error("catalog response contained no values")]
    EmptyResult,

    /// Network, TLS or timeout failure, or a body that is not valid JSON.
    #[error("could not reach the catalog source: {reason}")]
    Connectivity { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    HttpError,
    EmptyResult,
    ConnectivityError,
}

impl FetchError {
    #[must_use]
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Http { .. } => FetchErrorKind::HttpError,
            FetchError::EmptyResult => FetchErrorKind::EmptyResult,
            FetchError::Connectivity { .. } => FetchErrorKind::ConnectivityError,
        }
    }

    /// Message shown to shoppers in place of the catalog grid.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Http {
                status,
                status_text,
            } => format!("Error al cargar productos: {status} {status_text}")
                .trim_end()
                .to_string(),
            FetchError::EmptyResult => {
                "No se encontraron productos en la hoja de Google Sheets.".to_string()
            }
            FetchError::Connectivity { .. } => {
                "No se pudo conectar con Google Sheets. Revisa tu conexión o la API Key."
                    .to_string()
            }
        }
    }
}

/// Why a Club sign-up could not be stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("lead append failed with HTTP {status} {status_text}")]
    Http { status: u16, status_text: String },

    #[error("could not reach the lead sheet: {reason}")]
    Connectivity { reason: String },
}

impl SubmissionError {
    /// Generic retry prompt shown inside the sign-up form, whatever the cause.
    pub const RETRY_PROMPT: &'static str =
        "No pudimos registrar tus datos. Inténtalo nuevamente en unos minutos.";
}
