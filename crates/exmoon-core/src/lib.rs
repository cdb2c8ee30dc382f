pub mod app_config;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod filter;
pub mod leads;
pub mod products;

pub use app_config::{AppConfig, Environment, MissingSettings, StorefrontSettings};
pub use catalog::{assemble, Catalog};
pub use config::{load_app_config, load_app_config_from_env};
pub use contact::{format_clp, product_inquiry_message, whatsapp_link};
pub use filter::{
    facet_options, view, BrowseState, CatalogFilters, CatalogPage, CatalogTab, Facets, PageSize,
};
pub use leads::{Lead, LeadError, LeadForm, CLUB_BRANDS};
pub use products::{BadgeTier, Product};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
