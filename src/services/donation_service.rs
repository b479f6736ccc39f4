use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::api::{to_minor_units, PaymentError, PaymentOutcome, PaymentRequest, PaymentSession, PaymentWidget};
use crate::db::{DonationStore, StoreError};
use crate::models::{Notification, CURRENCY_CODE};
use crate::services::notify_service::Notifier;
use crate::services::progress_service::ProgressAggregator;

#[derive(Debug, Error)]
pub enum DonationError {
    #[error("Invalid donation amount '{0}'")]
    InvalidAmount(String),
    #[error(transparent)]
    Persistence(#[from] StoreError),
    #[error(transparent)]
    Payment(#[from] PaymentError),
    #[error("A donation is already being processed")]
    Busy,
}

/// A pending donation whose checkout is open
#[derive(Debug)]
pub struct Checkout {
    pub donation_id: String,
    pub amount: f64,
    pub session: PaymentSession,
}

/// How a checkout ended, after the record has been updated
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    Completed { donation_id: String, reference: String },
    Failed { donation_id: String },
}

/// Parse the free-text amount field. Empty, non-numeric, non-finite and
/// non-positive input is rejected, as is anything under one kobo.
pub fn parse_amount(input: &str) -> Result<f64, DonationError> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 && to_minor_units(amount) > 0 => Ok(amount),
        _ => Err(DonationError::InvalidAmount(trimmed.to_string())),
    }
}

/// Record-then-pay orchestration for one page session
pub struct DonationFlow {
    store: Arc<dyn DonationStore>,
    widget: Arc<dyn PaymentWidget>,
    notifier: Arc<dyn Notifier>,
    progress: Arc<ProgressAggregator>,
}

impl DonationFlow {
    pub fn new(
        store: Arc<dyn DonationStore>,
        widget: Arc<dyn PaymentWidget>,
        notifier: Arc<dyn Notifier>,
        progress: Arc<ProgressAggregator>,
    ) -> Self {
        Self {
            store,
            widget,
            notifier,
            progress,
        }
    }

    /// Validate, write a pending record, then open the checkout for it.
    ///
    /// Every failure has already been shown to the donor when this returns.
    pub async fn submit(&self, input: &str, email: &str) -> Result<Checkout, DonationError> {
        let amount = match parse_amount(input) {
            Ok(amount) => amount,
            Err(e) => {
                self.notifier.notify(Notification::invalid_amount()).await;
                return Err(e);
            }
        };

        let donation = match self.store.create_pending(amount, email).await {
            Ok(donation) => donation,
            Err(e) => {
                error!("Failed to record donation of {:.2}: {}", amount, e);
                self.notifier.notify(Notification::donation_failed()).await;
                return Err(e.into());
            }
        };

        let request = PaymentRequest {
            payer_email: email.to_string(),
            amount_minor_units: to_minor_units(amount),
            currency_code: CURRENCY_CODE.to_string(),
            reference: donation.id.clone(),
        };

        match self.widget.open(request).await {
            Ok(session) => {
                info!("Donation {} of {:.2} awaiting payment", donation.id, amount);
                Ok(Checkout {
                    donation_id: donation.id,
                    amount,
                    session,
                })
            }
            Err(e) => {
                error!("Failed to open checkout for donation {}: {}", donation.id, e);
                if let Err(e) = self.store.mark_failed(&donation.id).await {
                    warn!("Could not mark donation {} failed: {}", donation.id, e);
                }
                self.notifier.notify(Notification::donation_failed()).await;
                Err(e.into())
            }
        }
    }

    /// Apply the widget's verdict to the record and refresh the total
    pub async fn settle(&self, donation_id: &str, outcome: PaymentOutcome) -> Settlement {
        let settlement = match outcome {
            PaymentOutcome::Success { reference } => {
                if let Err(e) = self.store.mark_completed(donation_id, &reference).await {
                    error!("Payment {} succeeded but donation {} was not updated: {}", reference, donation_id, e);
                }
                self.notifier.notify(Notification::donation_succeeded()).await;
                Settlement::Completed {
                    donation_id: donation_id.to_string(),
                    reference,
                }
            }
            PaymentOutcome::Closed => {
                // The donor is never told about this update either way.
                if let Err(e) = self.store.mark_failed(donation_id).await {
                    warn!("Could not mark donation {} failed: {}", donation_id, e);
                }
                info!("Checkout for donation {} closed without payment", donation_id);
                Settlement::Failed {
                    donation_id: donation_id.to_string(),
                }
            }
        };

        self.progress.refresh().await;
        settlement
    }
}
