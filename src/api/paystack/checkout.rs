use std::sync::Arc;
use std::time::Duration;

use serenity::async_trait;
use tokio::sync::oneshot;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use super::client::PaystackClient;
use super::models::{InitializeRequest, TransactionState, VerifyData};
use crate::api::{PaymentError, PaymentOutcome, PaymentRequest, PaymentSession, PaymentWidget};

/// Paystack standard checkout as a `PaymentWidget`.
///
/// Opening initializes a transaction and hands back the hosted checkout URL.
/// A background task then watches the transaction until it is paid, dies, or
/// the payer has left it alone for longer than `checkout_timeout`.
pub struct PaystackCheckout {
    client: Arc<PaystackClient>,
    poll_interval: Duration,
    checkout_timeout: Duration,
}

impl PaystackCheckout {
    pub fn new(client: Arc<PaystackClient>, poll_interval: Duration, checkout_timeout: Duration) -> Self {
        Self {
            client,
            poll_interval,
            checkout_timeout,
        }
    }

    async fn watch(
        client: Arc<PaystackClient>,
        reference: String,
        checkout_url: String,
        poll_interval: Duration,
        checkout_timeout: Duration,
        outcome: oneshot::Sender<PaymentOutcome>,
    ) {
        let deadline = Instant::now() + checkout_timeout;

        let result = loop {
            sleep(poll_interval).await;

            if outcome.is_closed() {
                debug!("Nobody is waiting on checkout {} any more", reference);
                return;
            }

            match client.verify_transaction(&reference).await {
                Ok(data) => {
                    if let Some(result) = settled_outcome(&data) {
                        break result;
                    }
                }
                Err(e) => warn!("Could not verify checkout {}: {}", reference, e),
            }

            if Instant::now() >= deadline {
                warn!("Checkout {} timed out without payment; {} is no longer watched", reference, checkout_url);
                break PaymentOutcome::Closed;
            }
        };

        let _ = outcome.send(result);
    }
}

/// The outcome a verify response settles on, or `None` while still open
fn settled_outcome(data: &VerifyData) -> Option<PaymentOutcome> {
    match data.state() {
        TransactionState::Paid => Some(PaymentOutcome::Success {
            reference: data.reference.clone(),
        }),
        TransactionState::Dead => Some(PaymentOutcome::Closed),
        TransactionState::Open => None,
    }
}

#[async_trait]
impl PaymentWidget for PaystackCheckout {
    async fn open(&self, request: PaymentRequest) -> Result<PaymentSession, PaymentError> {
        if request.amount_minor_units == 0 {
            return Err(PaymentError::Rejected("amount is below the smallest chargeable unit".to_string()));
        }

        let init = InitializeRequest {
            email: request.payer_email.clone(),
            amount: request.amount_minor_units.to_string(),
            currency: request.currency_code.clone(),
            reference: request.reference.clone(),
        };
        let data = self.client.initialize_transaction(&init).await?;

        info!("Opened Paystack checkout for {} ({} {} minor units)",
            data.reference, request.amount_minor_units, request.currency_code);

        let (tx, rx) = oneshot::channel();
        tokio::spawn(Self::watch(
            self.client.clone(),
            data.reference,
            data.authorization_url.clone(),
            self.poll_interval,
            self.checkout_timeout,
            tx,
        ));

        Ok(PaymentSession {
            checkout_url: data.authorization_url,
            outcome: rx,
            expires_in: Some(self.checkout_timeout),
        })
    }
}
