//! # Payments
//!
//! The payment provider is opaque: it creates an intent for an amount and
//! later confirms it with card details. [`SimulatedGateway`] stands in for a
//! real provider in the demo and in tests.

use crate::model::to_cents;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PaymentError {
    #[error("amount must be a positive number, got {0}")]
    InvalidAmount(f64),
    #[error("unknown payment intent")]
    UnknownIntent,
    #[error("payment provider error: {0}")]
    Gateway(String),
}

/// Converts a currency amount to whole cents, rejecting non-finite and
/// non-positive amounts.
pub fn amount_in_cents(amount: f64) -> Result<i64, PaymentError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(PaymentError::InvalidAmount(amount));
    }
    let cents = to_cents(amount);
    if cents <= 0 {
        return Err(PaymentError::InvalidAmount(amount));
    }
    Ok(cents)
}

/// Handle returned by [`PaymentGateway::create_intent`].
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientSecret(String);

impl ClientSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ClientSecret(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// Tokenized card reference from the provider's client SDK.
    pub card_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PaymentOutcome {
    Succeeded,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub amount_cents: i64,
    pub outcome: PaymentOutcome,
}

impl PaymentConfirmation {
    pub fn succeeded(amount_cents: i64) -> Self {
        Self {
            amount_cents,
            outcome: PaymentOutcome::Succeeded,
        }
    }

    pub fn failed(amount_cents: i64, reason: impl Into<String>) -> Self {
        Self {
            amount_cents,
            outcome: PaymentOutcome::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == PaymentOutcome::Succeeded
    }
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_intent(&self, amount: f64) -> Result<ClientSecret, PaymentError>;

    /// A declined card is an `Ok` confirmation with a failed outcome; `Err`
    /// is reserved for requests the provider could not process.
    async fn confirm(
        &self,
        secret: &ClientSecret,
        details: &PaymentDetails,
    ) -> Result<PaymentConfirmation, PaymentError>;
}

/// In-memory gateway that approves every card except `decline_token`.
#[derive(Debug)]
pub struct SimulatedGateway {
    decline_token: String,
    next_intent: AtomicU64,
    intents: Mutex<HashMap<String, i64>>,
}

impl SimulatedGateway {
    pub fn new(decline_token: impl Into<String>) -> Self {
        Self {
            decline_token: decline_token.into(),
            next_intent: AtomicU64::new(1),
            intents: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new("tok_decline")
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    #[instrument(skip(self))]
    async fn create_intent(&self, amount: f64) -> Result<ClientSecret, PaymentError> {
        let cents = amount_in_cents(amount)?;
        let n = self.next_intent.fetch_add(1, Ordering::SeqCst);
        let secret = format!("pi_{n}_secret");
        self.intents
            .lock()
            .map_err(|e| PaymentError::Gateway(e.to_string()))?
            .insert(secret.clone(), cents);
        info!(cents, "Payment intent created");
        Ok(ClientSecret(secret))
    }

    #[instrument(skip(self, details))]
    async fn confirm(
        &self,
        secret: &ClientSecret,
        details: &PaymentDetails,
    ) -> Result<PaymentConfirmation, PaymentError> {
        // An intent can be confirmed once.
        let cents = self
            .intents
            .lock()
            .map_err(|e| PaymentError::Gateway(e.to_string()))?
            .remove(&secret.0)
            .ok_or(PaymentError::UnknownIntent)?;
        if details.card_token == self.decline_token {
            warn!(cents, "Card declined");
            return Ok(PaymentConfirmation::failed(cents, "card declined"));
        }
        info!(cents, "Payment confirmed");
        Ok(PaymentConfirmation::succeeded(cents))
    }
}
