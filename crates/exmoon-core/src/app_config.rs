use std::net::SocketAddr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// The three settings the storefront cannot render without.
#[derive(Clone)]
pub struct StorefrontSettings {
    /// Spreadsheet holding the catalog (and the `Clientes` lead sheet).
    pub sheet_id: String,
    pub google_api_key: String,
    /// Contact number in international format without `+`, e.g. `"56912345678"`.
    pub whatsapp_number: String,
}

impl std::fmt::Debug for StorefrontSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontSettings")
            .field("sheet_id", &self.sheet_id)
            .field("google_api_key", &"[redacted]")
            .field("whatsapp_number", &self.whatsapp_number)
            .finish()
    }
}

/// Required storefront settings that were absent or empty, by env var name.
///
/// Every missing key is listed, not only the first one encountered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required settings: {}", .keys.join(", "))]
pub struct MissingSettings {
    pub keys: Vec<&'static str>,
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// `Err` renders the configuration-error state instead of the catalog.
    pub storefront: Result<StorefrontSettings, MissingSettings>,
    pub sheets_base_url: String,
    pub catalog_range: String,
    pub leads_range: String,
    pub sheets_request_timeout_secs: u64,
    pub sheets_user_agent: String,
    /// Six-field cron expression; `None` disables scheduled refreshes.
    pub catalog_refresh_cron: Option<String>,
    pub club_rate_limit_per_minute: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("storefront", &self.storefront)
            .field("sheets_base_url", &self.sheets_base_url)
            .field("catalog_range", &self.catalog_range)
            .field("leads_range", &self.leads_range)
            .field(
                "sheets_request_timeout_secs",
                &self.sheets_request_timeout_secs,
            )
            .field("sheets_user_agent", &self.sheets_user_agent)
            .field("catalog_refresh_cron", &self.catalog_refresh_cron)
            .field(
                "club_rate_limit_per_minute",
                &self.club_rate_limit_per_minute,
            )
            .finish()
    }
}
