//! Subcommand handlers. Each one reads the storefront settings, talks to
//! Sheets once and prints plain text to stdout.

use anyhow::Context;
use exmoon_core::{
    contact::ADVISOR_MESSAGE, facet_options, format_clp, product_inquiry_message, whatsapp_link,
    AppConfig, BrowseState, Catalog, CatalogFilters, Lead, LeadForm, PageSize, StorefrontSettings,
};
use exmoon_sheets::{FetchError, SheetsClient};

/// Settings and client, or an error naming every missing setting.
fn storefront(config: &AppConfig) -> anyhow::Result<(&StorefrontSettings, SheetsClient)> {
    let settings = match &config.storefront {
        Ok(settings) => settings,
        Err(missing) => anyhow::bail!(
            "storefront is not configured; set these variables:\n  {}",
            missing.keys.join("\n  ")
        ),
    };

    let client = SheetsClient::with_base_url(
        &settings.google_api_key,
        config.sheets_request_timeout_secs,
        &config.sheets_user_agent,
        &config.sheets_base_url,
    )
    .context("failed to build Sheets client")?;

    Ok((settings, client))
}

async fn load_catalog(
    config: &AppConfig,
    settings: &StorefrontSettings,
    client: &SheetsClient,
) -> anyhow::Result<Catalog> {
    let raw = client
        .fetch_products(&settings.sheet_id, &config.catalog_range)
        .await
        .map_err(|e| fetch_failure(&e))?;
    Ok(Catalog::from_raw(raw))
}

fn fetch_failure(error: &FetchError) -> anyhow::Error {
    tracing::error!(error = %error, kind = ?error.kind(), "catalog fetch failed");
    anyhow::anyhow!("{}", error.user_message())
}

pub(crate) async fn run_catalog(
    config: &AppConfig,
    filters: CatalogFilters,
    page: usize,
    page_size: PageSize,
) -> anyhow::Result<()> {
    let (settings, client) = storefront(config)?;
    let catalog = load_catalog(config, settings, &client).await?;
    let all = catalog.products();

    let mut state = BrowseState::with_filters(filters, page_size);
    state.go_to_page(all, page);
    let view = state.view(all);

    if view.items.is_empty() {
        println!("no products match the selected filters");
    }
    for product in &view.items {
        println!(
            "{}\t{}\t{}\t{}\tUS {}\t{}{}",
            product.id,
            product.brand,
            product.model,
            format_clp(product.price),
            product.size,
            product.status,
            if product.featured { "\t*" } else { "" },
        );
    }
    println!(
        "page {}/{} ({} products, {} per page)",
        view.page,
        view.total_pages,
        view.total_items,
        page_size.get()
    );
    Ok(())
}

pub(crate) async fn run_facets(config: &AppConfig) -> anyhow::Result<()> {
    let (settings, client) = storefront(config)?;
    let catalog = load_catalog(config, settings, &client).await?;
    let facets = facet_options(catalog.products());

    println!("brands:   {}", facets.brands.join(", "));
    println!("sizes:    {}", facets.sizes.join(", "));
    println!("statuses: {}", facets.statuses.join(", "));
    Ok(())
}

pub(crate) async fn run_club(config: &AppConfig, form: &LeadForm) -> anyhow::Result<()> {
    let lead = Lead::from_form(form)?;
    let (settings, client) = storefront(config)?;

    client
        .append_lead(&settings.sheet_id, &config.leads_range, &lead)
        .await
        .context(exmoon_sheets::SubmissionError::RETRY_PROMPT)?;

    println!("registered {} ({})", lead.name, lead.whatsapp);
    Ok(())
}

pub(crate) async fn run_contact_link(
    config: &AppConfig,
    message: Option<String>,
    product_id: Option<&str>,
) -> anyhow::Result<()> {
    let (settings, client) = storefront(config)?;

    let message = match (message, product_id) {
        (Some(message), _) => message,
        (None, Some(id)) => {
            let catalog = load_catalog(config, settings, &client).await?;
            let product = catalog
                .get(id)
                .ok_or_else(|| anyhow::anyhow!("product '{id}' not found"))?;
            product_inquiry_message(product)
        }
        (None, None) => ADVISOR_MESSAGE.to_string(),
    };

    println!("{}", whatsapp_link(&settings.whatsapp_number, &message));
    Ok(())
}
