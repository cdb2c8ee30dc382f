use axum::{extract::State, Extension, Json};
use exmoon_core::{Lead, LeadForm};
use exmoon_sheets::SubmissionError;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct SubmitData {
    success: bool,
}

/// Validates a Club sign-up and appends it to the leads sheet.
///
/// Nothing is sent upstream when validation fails.
pub(super) async fn submit_lead(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(form): Json<LeadForm>,
) -> Result<Json<ApiResponse<SubmitData>>, ApiError> {
    let (settings, client) = state.storefront(&req_id.0)?;

    let lead = Lead::from_form(&form).map_err(|e| {
        ApiError::new(req_id.0.clone(), "validation_error", e.to_string()).with_field(e.field())
    })?;

    client
        .append_lead(&settings.sheet_id, &state.config.leads_range, &lead)
        .await
        .map_err(|e| {
            tracing::error!(request_id = %req_id.0, error = %e, "club sign-up failed");
            ApiError::new(
                req_id.0.clone(),
                "submission_failed",
                SubmissionError::RETRY_PROMPT,
            )
        })?;

    tracing::info!(request_id = %req_id.0, size = %lead.size, "club sign-up stored");

    Ok(Json(ApiResponse {
        data: SubmitData { success: true },
        meta: ResponseMeta::new(req_id.0),
    }))
}
