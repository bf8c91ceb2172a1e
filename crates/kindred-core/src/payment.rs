//! Payment intent requests as relayed to the payment processor.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Payment method used when the client does not ask for any.
pub const DEFAULT_PAYMENT_METHOD: &str = "card";

/// Largest single charge the processor accepts, in cents.
pub const MAX_AMOUNT_CENTS: i64 = 99_999_999;

/// Check a charge or donation amount: positive and within the processor limit.
pub fn validate_amount(amount_cents: i64) -> Result<(), DomainError> {
    if amount_cents <= 0 {
        return Err(DomainError::Validation(
            "amount must be a positive number of cents".to_string(),
        ));
    }
    if amount_cents > MAX_AMOUNT_CENTS {
        return Err(DomainError::Validation(format!(
            "amount must not exceed {MAX_AMOUNT_CENTS} cents"
        )));
    }
    Ok(())
}

/// A validated request to open a payment intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntentRequest {
    /// Amount in cents.
    pub amount: i64,
    pub currency: String,
    pub payment_method_types: Vec<String>,
    /// Connected account receiving the funds.
    pub destination: Option<String>,
    /// Share of the amount kept by the platform, in percent.
    pub platform_fee_percent: Option<f64>,
}

impl PaymentIntentRequest {
    /// Validate raw relay input.
    ///
    /// Empty method lists fall back to card payments and blank destinations
    /// are treated as absent.
    pub fn new(
        amount: i64,
        payment_method_types: Vec<String>,
        destination: Option<String>,
        platform_fee_percent: Option<f64>,
    ) -> Result<Self, DomainError> {
        validate_amount(amount)?;

        if let Some(pct) = platform_fee_percent.filter(|p| !(0.0..=100.0).contains(p)) {
            return Err(DomainError::Validation(format!(
                "platformFeePercent must be between 0 and 100, got {pct}"
            )));
        }

        let payment_method_types = if payment_method_types.is_empty() {
            vec![DEFAULT_PAYMENT_METHOD.to_string()]
        } else {
            payment_method_types
        };

        Ok(Self {
            amount,
            currency: "usd".to_string(),
            payment_method_types,
            destination: destination.filter(|d| !d.trim().is_empty()),
            platform_fee_percent,
        })
    }

    /// Platform fee in cents. Only charged when the funds go to a connected account.
    pub fn application_fee_amount(&self) -> Option<i64> {
        self.destination.as_ref()?;
        let pct = self.platform_fee_percent?;
        Some((self.amount as f64 * pct / 100.0).round() as i64)
    }
}

/// What the processor hands back: the secret drives the on-device payment sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub client_secret: String,
    pub payment_intent_id: String,
}
