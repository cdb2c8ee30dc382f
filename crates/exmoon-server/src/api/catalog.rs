use std::{str::FromStr, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use exmoon_core::{
    facet_options, format_clp, product_inquiry_message, whatsapp_link, BrowseState, Catalog,
    CatalogFilters, CatalogTab, Facets, PageSize, Product,
};
use exmoon_sheets::{FetchError, FetchErrorKind};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;
use crate::store::{refresh_catalog, CatalogSnapshot, CatalogStatus};

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

/// A product as rendered on a catalog card.
#[derive(Debug, Serialize)]
pub(super) struct ProductItem {
    #[serde(flatten)]
    product: Product,
    price_label: String,
    badge_color: &'static str,
    inquiry_link: String,
}

impl ProductItem {
    fn new(product: &Product, whatsapp_number: &str) -> Self {
        Self {
            product: product.clone(),
            price_label: format_clp(product.price),
            badge_color: product.badge_color(),
            inquiry_link: whatsapp_link(whatsapp_number, &product_inquiry_message(product)),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct CatalogData {
    items: Vec<ProductItem>,
    page: usize,
    page_size: usize,
    total_pages: usize,
    total_items: usize,
    has_previous: bool,
    has_next: bool,
    facets: Facets,
    fetched_at: DateTime<Utc>,
    stale: bool,
    /// Shopper-facing message of the failed refresh when `stale` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct RefreshData {
    catalog: CatalogStatus,
    products: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<FetchErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct CatalogQuery {
    pub brand: Option<String>,
    pub size: Option<String>,
    pub status: Option<String>,
    pub tab: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl CatalogQuery {
    fn browse_state(self, all: &[Product], request_id: &str) -> Result<BrowseState, ApiError> {
        let tab = self
            .tab
            .as_deref()
            .map(CatalogTab::from_str)
            .transpose()
            .map_err(|e| validation_error(request_id, "tab", &e))?
            .unwrap_or_default();
        let page_size = self
            .page_size
            .as_deref()
            .map(PageSize::from_str)
            .transpose()
            .map_err(|e| validation_error(request_id, "page_size", &e))?
            .unwrap_or_default();
        let page = self
            .page
            .as_deref()
            .map(|raw| raw.trim().parse::<usize>())
            .transpose()
            .map_err(|_| {
                ApiError::new(request_id, "validation_error", "page must be a positive integer")
                    .with_field("page")
            })?
            .unwrap_or(1);

        let filters = CatalogFilters {
            brand: self.brand,
            size: self.size,
            status: self.status,
            tab,
        };
        let mut state = BrowseState::with_filters(filters, page_size);
        state.go_to_page(all, page);
        Ok(state)
    }
}

fn validation_error(request_id: &str, field: &str, err: &impl std::fmt::Display) -> ApiError {
    ApiError::new(request_id, "validation_error", err.to_string()).with_field(field)
}

/// Fetched catalog, or the error the shopper sees in place of the grid.
pub(super) fn ready_catalog(
    snapshot: &CatalogSnapshot,
    request_id: &str,
) -> Result<Arc<Catalog>, ApiError> {
    match (&snapshot.catalog, &snapshot.last_error) {
        (Some(catalog), _) => Ok(Arc::clone(catalog)),
        (None, Some(error)) => Err(ApiError::new(
            request_id,
            "catalog_unavailable",
            error.user_message(),
        )),
        (None, None) => Err(ApiError::new(
            request_id,
            "catalog_loading",
            "catalog is still loading",
        )),
    }
}

pub(super) async fn list_catalog(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<ApiResponse<CatalogData>>, ApiError> {
    let (settings, _) = state.storefront(&req_id.0)?;
    let snapshot = state.store.snapshot().await;
    let catalog = ready_catalog(&snapshot, &req_id.0)?;
    let all = catalog.products();

    let browse = query.browse_state(all, &req_id.0)?;
    let page = browse.view(all);

    let data = CatalogData {
        items: page
            .items
            .iter()
            .map(|p| ProductItem::new(p, &settings.whatsapp_number))
            .collect(),
        page: page.page,
        page_size: browse.page_size().get(),
        total_pages: page.total_pages,
        total_items: page.total_items,
        has_previous: page.has_previous,
        has_next: page.has_next,
        facets: facet_options(all),
        fetched_at: catalog.fetched_at(),
        stale: snapshot.is_stale(),
        notice: snapshot
            .last_error
            .as_ref()
            .map(FetchError::user_message),
    };

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_facets(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Facets>>, ApiError> {
    state.storefront(&req_id.0)?;
    let snapshot = state.store.snapshot().await;
    let catalog = ready_catalog(&snapshot, &req_id.0)?;

    Ok(Json(ApiResponse {
        data: facet_options(catalog.products()),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ProductItem>>, ApiError> {
    let (settings, _) = state.storefront(&req_id.0)?;
    let snapshot = state.store.snapshot().await;
    let catalog = ready_catalog(&snapshot, &req_id.0)?;

    let product = catalog.get(&id).ok_or_else(|| {
        ApiError::new(req_id.0.clone(), "not_found", format!("product '{id}' not found"))
    })?;

    Ok(Json(ApiResponse {
        data: ProductItem::new(product, &settings.whatsapp_number),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn refresh(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<RefreshData>>, ApiError> {
    let (settings, client) = state.storefront(&req_id.0)?;

    tracing::info!(request_id = %req_id.0, "manual catalog refresh requested");
    let snapshot = refresh_catalog(
        &state.store,
        client,
        &settings.sheet_id,
        &state.config.catalog_range,
    )
    .await;

    Ok(Json(ApiResponse {
        data: RefreshData {
            catalog: snapshot.status(),
            products: snapshot.catalog.as_ref().map_or(0, |c| c.len()),
            error_kind: snapshot.last_error.as_ref().map(FetchError::kind),
            message: snapshot
                .last_error
                .as_ref()
                .map(FetchError::user_message),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
