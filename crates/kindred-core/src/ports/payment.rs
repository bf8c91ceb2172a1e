//! Payment processor port.

use async_trait::async_trait;

use crate::payment::{PaymentIntent, PaymentIntentRequest};

/// Opens payment intents with the payment processor.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError>;
}

/// Payment relay errors.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// The processor rejected the request and said why.
    #[error("{message}")]
    Processor { error_type: String, message: String },

    #[error("Payment processor unreachable: {0}")]
    Transport(String),

    #[error("Unexpected processor response: {0}")]
    InvalidResponse(String),
}

impl PaymentError {
    /// The `type` reported back to clients.
    pub fn error_type(&self) -> &str {
        match self {
            PaymentError::Processor { error_type, .. } => error_type,
            PaymentError::Transport(_) => "api_connection_error",
            PaymentError::InvalidResponse(_) => "api_error",
        }
    }
}
