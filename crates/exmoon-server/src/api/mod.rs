mod catalog;
mod club;
mod contact;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use exmoon_core::{contact::ADVISOR_MESSAGE, whatsapp_link, AppConfig, PageSize, StorefrontSettings};
use exmoon_sheets::{ClientError, SheetsClient};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};
use crate::store::{CatalogStatus, CatalogStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// `None` when the storefront settings are incomplete.
    pub sheets: Option<Arc<SheetsClient>>,
    pub store: Arc<CatalogStore>,
}

impl AppState {
    /// Builds the shared state, constructing a Sheets client only when the
    /// storefront settings are complete.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the HTTP client cannot be built or the
    /// configured base URL is invalid.
    pub fn from_config(config: Arc<AppConfig>) -> Result<Self, ClientError> {
        let sheets = match &config.storefront {
            Ok(settings) => Some(Arc::new(SheetsClient::with_base_url(
                &settings.google_api_key,
                config.sheets_request_timeout_secs,
                &config.sheets_user_agent,
                &config.sheets_base_url,
            )?)),
            Err(missing) => {
                tracing::warn!(%missing, "storefront not configured; catalog and club are disabled");
                None
            }
        };

        Ok(Self {
            config,
            sheets,
            store: Arc::new(CatalogStore::new()),
        })
    }

    /// Storefront settings and client, or a `configuration_error` naming the
    /// missing keys.
    pub(super) fn storefront(
        &self,
        request_id: &str,
    ) -> Result<(&StorefrontSettings, &SheetsClient), ApiError> {
        match (&self.config.storefront, &self.sheets) {
            (Ok(settings), Some(client)) => Ok((settings, client.as_ref())),
            (Err(missing), _) => Err(ApiError::new(
                request_id,
                "configuration_error",
                missing.to_string(),
            )
            .with_missing(missing.keys.iter().map(ToString::to_string).collect())),
            (Ok(_), None) => Err(ApiError::new(
                request_id,
                "configuration_error",
                "catalog source is not available",
            )),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    /// Form field a `validation_error` refers to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Setting names a `configuration_error` is missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<String>>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    catalog: CatalogStatus,
}

#[derive(Debug, Serialize)]
struct ConfigData {
    whatsapp_number: String,
    advisor_link: String,
    page_sizes: Vec<usize>,
    default_page_size: usize,
    club_brands: &'static [&'static str],
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
                field: None,
                missing: None,
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.error.field = Some(field.into());
        self
    }

    #[must_use]
    pub fn with_missing(mut self, keys: Vec<String>) -> Self {
        self.error.missing = Some(keys);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "configuration_error" | "catalog_loading" => StatusCode::SERVICE_UNAVAILABLE,
            "catalog_unavailable" | "submission_failed" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState, club_rate_limit: RateLimitState) -> Router {
    let club_routes = Router::new()
        .route("/api/v1/club", post(club::submit_lead))
        .layer(axum::middleware::from_fn_with_state(
            club_rate_limit,
            enforce_rate_limit,
        ));

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/config", get(storefront_config))
        .route("/api/v1/catalog", get(catalog::list_catalog))
        .route("/api/v1/catalog/facets", get(catalog::list_facets))
        .route("/api/v1/catalog/refresh", post(catalog::refresh))
        .route("/api/v1/catalog/{id}", get(catalog::get_product))
        .route("/api/v1/contact-link", get(contact::contact_link))
        .merge(club_routes)
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let catalog = if state.sheets.is_some() {
        state.store.snapshot().await.status()
    } else {
        CatalogStatus::Unconfigured
    };

    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            catalog,
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

async fn storefront_config(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<impl IntoResponse, ApiError> {
    let (settings, _) = state.storefront(&req_id.0)?;

    Ok(Json(ApiResponse {
        data: ConfigData {
            whatsapp_number: settings.whatsapp_number.clone(),
            advisor_link: whatsapp_link(&settings.whatsapp_number, ADVISOR_MESSAGE),
            page_sizes: PageSize::ALL.iter().map(|s| s.get()).collect(),
            default_page_size: PageSize::default().get(),
            club_brands: &exmoon_core::CLUB_BRANDS,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
