mod commands;

use clap::{Parser, Subcommand};
use exmoon_core::PageSize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "exmoon-cli")]
#[command(about = "Exclusive Moon storefront command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the catalog and print one page of it.
    Catalog {
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        size: Option<String>,
        #[arg(long)]
        status: Option<String>,
        /// Only products flagged as featured.
        #[arg(long)]
        featured: bool,
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// 10, 20 or 30.
        #[arg(long)]
        page_size: Option<PageSize>,
    },
    /// Print the distinct brands, sizes and statuses in the catalog.
    Facets,
    /// Register a Club sign-up in the leads sheet.
    Club {
        #[arg(long)]
        name: String,
        /// Eight-digit local mobile number, without the 569 prefix.
        #[arg(long)]
        whatsapp: String,
        #[arg(long)]
        size: String,
        /// Preferred brand; repeat for several.
        #[arg(long = "brand")]
        brands: Vec<String>,
        #[arg(long)]
        models: Option<String>,
    },
    /// Print a WhatsApp deep link.
    ContactLink {
        #[arg(long, conflicts_with = "product_id")]
        message: Option<String>,
        #[arg(long)]
        product_id: Option<String>,
        /// Ask for a model that is not in the catalog.
        #[arg(long, conflicts_with_all = ["message", "product_id"])]
        not_in_catalog: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = exmoon_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Catalog {
            brand,
            size,
            status,
            featured,
            page,
            page_size,
        } => {
            let filters = exmoon_core::CatalogFilters {
                brand,
                size,
                status,
                tab: if featured {
                    exmoon_core::CatalogTab::Featured
                } else {
                    exmoon_core::CatalogTab::All
                },
            };
            commands::run_catalog(&config, filters, page, page_size.unwrap_or_default()).await?;
        }
        Commands::Facets => commands::run_facets(&config).await?,
        Commands::Club {
            name,
            whatsapp,
            size,
            brands,
            models,
        } => {
            let form = exmoon_core::LeadForm {
                name,
                whatsapp,
                size,
                brands,
                models,
            };
            commands::run_club(&config, &form).await?;
        }
        Commands::ContactLink {
            message,
            product_id,
            not_in_catalog,
        } => {
            let message = message.or_else(|| {
                not_in_catalog.then(|| exmoon_core::contact::NOT_IN_CATALOG_MESSAGE.to_string())
            });
            commands::run_contact_link(&config, message, product_id.as_deref()).await?;
        }
    }

    Ok(())
}
