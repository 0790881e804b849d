//! Question report handler.

use actix_web::{HttpResponse, web};

use cyberprep_core::domain::{ReportedQuestion, Stamped};
use cyberprep_shared::CreatedResponse;

use super::parse_payload;
use crate::middleware::{AppError, AppResult};
use crate::observability::RequestId;
use crate::state::AppState;

/// POST /api/report-question
pub async fn report_question(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let payload = parse_payload(&body)?;
    let report = ReportedQuestion::from_payload(&payload)?;
    let reason = report.reason.clone();

    let entry = serde_json::to_value(Stamped::now(report))
        .map_err(|e| AppError::Internal(e.to_string()))?;
    state.reports.append(entry).await?;

    tracing::info!(
        request_id = %request_id.as_str(),
        collection = state.reports.name(),
        reason = %reason,
        "Question reported"
    );

    Ok(HttpResponse::Created().json(CreatedResponse::ok()))
}
