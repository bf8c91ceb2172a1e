//! Payment intent relay.
//!
//! Errors here use the processor's `{"error": {"message", "type"}}` shape
//! rather than problem details, since the mobile payment flow reads it directly.

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};

use kindred_core::DomainError;
use kindred_core::payment::PaymentIntentRequest;
use kindred_core::ports::PaymentError;
use kindred_shared::PaymentErrorResponse;
use kindred_shared::dto::{CreatePaymentIntentRequest, CreatePaymentIntentResponse};

use crate::state::AppState;

#[derive(Debug)]
pub enum RelayError {
    InvalidRequest(String),
    Gateway(PaymentError),
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::InvalidRequest(msg) => write!(f, "{}", msg),
            RelayError::Gateway(err) => write!(f, "{}", err),
        }
    }
}

impl From<DomainError> for RelayError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => RelayError::InvalidRequest(msg),
            other => RelayError::InvalidRequest(other.to_string()),
        }
    }
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RelayError::Gateway(PaymentError::Processor { error_type, .. })
                if error_type == "card_error" =>
            {
                StatusCode::PAYMENT_REQUIRED
            }
            RelayError::Gateway(PaymentError::Processor { .. }) => StatusCode::BAD_REQUEST,
            RelayError::Gateway(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            RelayError::InvalidRequest(msg) => {
                PaymentErrorResponse::new("invalid_request_error", msg.clone())
            }
            RelayError::Gateway(err) => PaymentErrorResponse::new(err.error_type(), err.to_string()),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Body parse failures in the relay keep the relay's error shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| RelayError::InvalidRequest(err.to_string()).into())
}

/// POST /api/payments/create-payment-intent
pub async fn create_payment_intent(
    state: web::Data<AppState>,
    body: web::Json<CreatePaymentIntentRequest>,
) -> Result<HttpResponse, RelayError> {
    let req = body.into_inner();

    let request = PaymentIntentRequest::new(
        req.amount,
        req.payment_method_types,
        req.destination,
        req.platform_fee_percent
            .or(state.settings.platform_fee_percent),
    )?;

    let intent = state
        .payments
        .create_payment_intent(&request)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, error_type = err.error_type(), "Payment intent failed");
            RelayError::Gateway(err)
        })?;

    Ok(HttpResponse::Ok().json(CreatePaymentIntentResponse {
        client_secret: intent.client_secret,
        payment_intent_id: intent.payment_intent_id,
    }))
}
