use axum::{
    extract::{Query, State},
    Extension, Json,
};
use exmoon_core::{
    contact::{ADVISOR_MESSAGE, NOT_IN_CATALOG_MESSAGE},
    product_inquiry_message, whatsapp_link,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::catalog::ready_catalog;
use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ContactQuery {
    pub message: Option<String>,
    pub product_id: Option<String>,
    /// `advisor` or `not_in_catalog`.
    pub preset: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct ContactLink {
    url: String,
    message: String,
}

/// Deep link for a free-text message, a catalog product, a canned preset,
/// or the advisor greeting when none is given.
pub(super) async fn contact_link(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ContactQuery>,
) -> Result<Json<ApiResponse<ContactLink>>, ApiError> {
    let (settings, _) = state.storefront(&req_id.0)?;

    let given = [
        query.message.is_some(),
        query.product_id.is_some(),
        query.preset.is_some(),
    ];
    if given.into_iter().filter(|g| *g).count() > 1 {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "pass only one of message, product_id or preset",
        ));
    }

    let message = if let Some(message) = query.message {
        message
    } else if let Some(id) = query.product_id {
        let snapshot = state.store.snapshot().await;
        let catalog = ready_catalog(&snapshot, &req_id.0)?;
        let product = catalog.get(&id).ok_or_else(|| {
            ApiError::new(req_id.0.clone(), "not_found", format!("product '{id}' not found"))
        })?;
        product_inquiry_message(product)
    } else {
        match query.preset.as_deref() {
            None | Some("advisor") => ADVISOR_MESSAGE.to_string(),
            Some("not_in_catalog") => NOT_IN_CATALOG_MESSAGE.to_string(),
            Some(other) => {
                return Err(ApiError::new(
                    req_id.0,
                    "validation_error",
                    format!("unknown preset '{other}'; expected advisor or not_in_catalog"),
                )
                .with_field("preset"));
            }
        }
    };

    Ok(Json(ApiResponse {
        data: ContactLink {
            url: whatsapp_link(&settings.whatsapp_number, &message),
            message,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
