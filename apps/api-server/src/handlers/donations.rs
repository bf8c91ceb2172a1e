//! Donation recording.

use actix_web::{HttpResponse, web};

use kindred_core::DomainError;
use kindred_core::domain::Donation;
use kindred_core::error::RepoError;
use kindred_core::payment::validate_amount;
use kindred_shared::dto::RecordDonationRequest;

use super::charities::find_charity;
use super::convert::donation_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/donations
///
/// Called by the app once the payment sheet reports success. Each payment
/// intent can be recorded once; repeats get 409.
pub async fn record(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<RecordDonationRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    validate_amount(req.amount_cents)?;
    let payment_intent_id = req.payment_intent_id.trim();
    if payment_intent_id.is_empty() {
        return Err(AppError::BadRequest(
            "payment_intent_id is required".to_string(),
        ));
    }

    let charity = find_charity(&state, &req.charity_id).await?;

    let donation = Donation::new(
        identity.user_id,
        charity.id,
        req.amount_cents,
        payment_intent_id,
    );
    let saved = match state.donations.record(donation).await {
        Ok(saved) => saved,
        Err(RepoError::Constraint(_)) => {
            tracing::warn!(payment_intent_id, "Donation already recorded");
            return Err(DomainError::Duplicate(format!(
                "payment intent {payment_intent_id} has already been recorded"
            ))
            .into());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        donation_id = %saved.id,
        charity_id = %saved.charity_id,
        amount_cents = saved.amount_cents,
        "Donation recorded"
    );

    Ok(HttpResponse::Created().json(donation_response(&saved)))
}
