//! Question proposal handler.

use actix_web::{HttpResponse, web};

use cyberprep_core::domain::{ProposedQuestion, Stamped};
use cyberprep_core::ports::RateDecision;
use cyberprep_shared::CreatedResponse;

use super::parse_payload;
use crate::middleware::{AppError, AppResult, ClientKey};
use crate::observability::RequestId;
use crate::state::AppState;

/// POST /api/propose-question
///
/// Gated twice: by the rate limit middleware and by the durable per-client
/// cooldown. The cooldown check, the append and the cooldown record run as
/// one step, so concurrent proposals from one client store at most one entry.
pub async fn propose_question(
    state: web::Data<AppState>,
    client: ClientKey,
    request_id: RequestId,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let payload = parse_payload(&body)?;
    let proposal = ProposedQuestion::from_payload(&payload)?;

    let entry = serde_json::to_value(Stamped::now(proposal))
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let proposals = state.proposals.clone();
    let decision = state
        .propose_cooldown
        .gate(
            client.as_str(),
            Box::pin(async move { proposals.append(entry).await }),
        )
        .await?;

    if let RateDecision::Rejected { retry_after_secs } = decision {
        tracing::info!(client = %client.as_str(), retry_after_secs, "Proposal still cooling down");
        return Err(AppError::TooManyRequests {
            retry_after: retry_after_secs,
        });
    }

    tracing::info!(
        request_id = %request_id.as_str(),
        collection = state.proposals.name(),
        "Question proposed"
    );

    Ok(HttpResponse::Created().json(CreatedResponse::ok()))
}
