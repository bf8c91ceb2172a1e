//! Stripe payment intent relay.
//!
//! The server never touches card data: it opens a payment intent with the
//! secret key and hands the intent's client secret back to the app.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use kindred_core::payment::{PaymentIntent, PaymentIntentRequest};
use kindred_core::ports::{PaymentError, PaymentGateway};

pub const STRIPE_API_BASE: &str = "https://api.stripe.com";

/// Stripe gateway configuration.
#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    pub api_base: String,
}

impl StripeConfig {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            api_base: STRIPE_API_BASE.to_string(),
        }
    }

    /// Read `STRIPE_SECRET_KEY` (required) and `STRIPE_API_BASE`.
    pub fn from_env() -> Option<Self> {
        let secret_key = std::env::var("STRIPE_SECRET_KEY").ok()?;
        Some(Self {
            secret_key,
            api_base: std::env::var("STRIPE_API_BASE")
                .unwrap_or_else(|_| STRIPE_API_BASE.to_string()),
        })
    }
}

#[derive(Debug, Deserialize)]
struct StripePaymentIntent {
    id: String,
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    #[serde(rename = "type")]
    error_type: String,
    message: Option<String>,
}

/// Stripe-backed [`PaymentGateway`].
pub struct StripePaymentGateway {
    client: reqwest::Client,
    config: StripeConfig,
}

impl StripePaymentGateway {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/payment_intents",
            self.config.api_base.trim_end_matches('/')
        )
    }
}

/// Form fields for `POST /v1/payment_intents`.
pub(crate) fn form_params(request: &PaymentIntentRequest) -> Vec<(String, String)> {
    let mut params = vec![
        ("amount".to_string(), request.amount.to_string()),
        ("currency".to_string(), request.currency.clone()),
    ];

    for (i, method) in request.payment_method_types.iter().enumerate() {
        params.push((format!("payment_method_types[{i}]"), method.clone()));
    }

    if let Some(destination) = &request.destination {
        params.push(("transfer_data[destination]".to_string(), destination.clone()));
    }

    if let Some(fee) = request.application_fee_amount() {
        params.push(("application_fee_amount".to_string(), fee.to_string()));
    }

    params
}

fn parse_error(status: StatusCode, body: &str) -> PaymentError {
    match serde_json::from_str::<StripeErrorEnvelope>(body) {
        Ok(envelope) => PaymentError::Processor {
            message: envelope
                .error
                .message
                .unwrap_or_else(|| format!("Payment processor returned {status}")),
            error_type: envelope.error.error_type,
        },
        Err(_) => PaymentError::InvalidResponse(format!("status {status}: {body}")),
    }
}

fn parse_intent(body: &str) -> Result<PaymentIntent, PaymentError> {
    let intent: StripePaymentIntent =
        serde_json::from_str(body).map_err(|e| PaymentError::InvalidResponse(e.to_string()))?;

    let client_secret = intent.client_secret.ok_or_else(|| {
        PaymentError::InvalidResponse("payment intent has no client_secret".to_string())
    })?;

    Ok(PaymentIntent {
        client_secret,
        payment_intent_id: intent.id,
    })
}

#[async_trait]
impl PaymentGateway for StripePaymentGateway {
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        tracing::debug!(
            amount = request.amount,
            has_destination = request.destination.is_some(),
            "Creating payment intent"
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.secret_key)
            .form(&form_params(request))
            .send()
            .await
            .map_err(|e| PaymentError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::Transport(e.to_string()))?;

        if !status.is_success() {
            let err = parse_error(status, &body);
            tracing::warn!(%status, error_type = err.error_type(), "Payment intent rejected");
            return Err(err);
        }

        let intent = parse_intent(&body)?;
        tracing::info!(payment_intent_id = %intent.payment_intent_id, "Payment intent created");
        Ok(intent)
    }
}
