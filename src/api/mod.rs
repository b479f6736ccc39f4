//! External payment providers
//!
//! The sponsorship page never talks to a provider directly; it hands a
//! `PaymentRequest` to a `PaymentWidget` and waits for one `PaymentOutcome`.

use std::time::Duration;

use serenity::async_trait;
use thiserror::Error;
use tokio::sync::oneshot;

pub mod paystack;

pub use paystack::{PaystackCheckout, PaystackClient};

/// What the widget is asked to charge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub payer_email: String,
    /// Amount in the provider's minor unit (kobo for NGN)
    pub amount_minor_units: u64,
    pub currency_code: String,
    /// Our donation id, echoed back by the provider
    pub reference: String,
}

/// How an opened checkout ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Success { reference: String },
    Closed,
}

/// An opened checkout overlay.
///
/// `outcome` resolves exactly once. A dropped sender means the overlay went
/// away without reporting success, and is read as `Closed`.
#[derive(Debug)]
pub struct PaymentSession {
    pub checkout_url: String,
    pub outcome: oneshot::Receiver<PaymentOutcome>,
    /// How long we keep watching `checkout_url`. A payment made after that
    /// is not counted.
    pub expires_in: Option<Duration>,
}

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Payment provider error: {0}")]
    Api(#[from] paystack::ApiError),
    #[error("Payment provider rejected the request: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait PaymentWidget: Send + Sync {
    /// Open a hosted checkout for `request`. Returns as soon as the overlay
    /// is available; the result arrives later through the session.
    async fn open(&self, request: PaymentRequest) -> Result<PaymentSession, PaymentError>;
}

/// Convert a major-unit amount to minor units (100 kobo per naira)
pub fn to_minor_units(amount: f64) -> u64 {
    (amount * 100.0).round() as u64
}
