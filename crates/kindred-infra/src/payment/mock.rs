//! Mock payment gateway - used when no processor key is configured and in tests.

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use kindred_core::payment::{PaymentIntent, PaymentIntentRequest};
use kindred_core::ports::{PaymentError, PaymentGateway};

/// Gateway that fabricates intents locally and remembers every request.
#[derive(Default)]
pub struct MockPaymentGateway {
    requests: Mutex<Vec<PaymentIntentRequest>>,
    decline_with: Option<String>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway that rejects every request as a card error with `message`.
    pub fn declining(message: impl Into<String>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            decline_with: Some(message.into()),
        }
    }

    pub async fn requests(&self) -> Vec<PaymentIntentRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        self.requests.lock().await.push(request.clone());

        if let Some(message) = &self.decline_with {
            return Err(PaymentError::Processor {
                error_type: "card_error".to_string(),
                message: message.clone(),
            });
        }

        let payment_intent_id = format!("pi_mock_{}", Uuid::new_v4().simple());
        tracing::debug!(%payment_intent_id, amount = request.amount, "Mock payment intent created");

        Ok(PaymentIntent {
            client_secret: format!("{payment_intent_id}_secret_mock"),
            payment_intent_id,
        })
    }
}
