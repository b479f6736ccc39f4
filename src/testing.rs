//! In-memory stand-ins for the page's collaborators

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serenity::async_trait;
use tokio::sync::oneshot;

use crate::api::{PaymentError, PaymentOutcome, PaymentRequest, PaymentSession, PaymentWidget};
use crate::db::{DonationStore, StoreError};
use crate::models::{Donation, DonationStatus, Notification};
use crate::services::notify_service::Notifier;

fn unavailable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[derive(Default)]
pub struct InMemoryDonationStore {
    rows: Mutex<Vec<Donation>>,
    fail_reads: AtomicBool,
    fail_creates: AtomicBool,
    fail_updates: AtomicBool,
}

impl InMemoryDonationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, amount: f64, status: DonationStatus) -> String {
        let mut donation = Donation::pending(amount, "seed@example.com", chrono::Utc::now().naive_utc());
        donation.status = status;
        if status == DonationStatus::Completed {
            donation.payment_reference = Some(format!("seed-{}", donation.id));
        }
        let id = donation.id.clone();
        self.rows.lock().unwrap().push(donation);
        id
    }

    pub fn rows(&self) -> Vec<Donation> {
        self.rows.lock().unwrap().clone()
    }

    pub fn get(&self, id: &str) -> Option<Donation> {
        self.rows.lock().unwrap().iter().find(|d| d.id == id).cloned()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    fn transition(&self, id: &str, next: DonationStatus, reference: Option<&str>) -> Result<(), StoreError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if !row.status.can_transition_to(next) {
            return Err(StoreError::InvalidTransition {
                id: id.to_string(),
                from: row.status,
                to: next,
            });
        }
        row.status = next;
        if let Some(reference) = reference {
            row.payment_reference = Some(reference.to_string());
        }
        Ok(())
    }
}

#[async_trait]
impl DonationStore for InMemoryDonationStore {
    async fn completed_amounts(&self) -> Result<Vec<f64>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.status == DonationStatus::Completed)
            .map(|d| d.amount)
            .collect())
    }

    async fn create_pending(&self, amount: f64, email: &str) -> Result<Donation, StoreError> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let donation = Donation::pending(amount, email, chrono::Utc::now().naive_utc());
        self.rows.lock().unwrap().push(donation.clone());
        Ok(donation)
    }

    async fn mark_completed(&self, id: &str, payment_reference: &str) -> Result<(), StoreError> {
        self.transition(id, DonationStatus::Completed, Some(payment_reference))
    }

    async fn mark_failed(&self, id: &str) -> Result<(), StoreError> {
        self.transition(id, DonationStatus::Failed, None)
    }

    async fn find(&self, id: &str) -> Result<Option<Donation>, StoreError> {
        Ok(self.get(id))
    }
}

/// Records what it was asked to charge and lets the test decide the outcome
#[derive(Default)]
pub struct FakeWidget {
    store: Option<Arc<InMemoryDonationStore>>,
    requests: Mutex<Vec<PaymentRequest>>,
    /// For each open: how many pending rows carried the requested reference
    pending_at_open: Mutex<Vec<usize>>,
    senders: Mutex<Vec<oneshot::Sender<PaymentOutcome>>>,
    fail: AtomicBool,
}

impl FakeWidget {
    pub fn watching(store: Arc<InMemoryDonationStore>) -> Self {
        Self {
            store: Some(store),
            ..Self::default()
        }
    }

    pub fn fail_opens(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn requests(&self) -> Vec<PaymentRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn pending_at_open(&self) -> Vec<usize> {
        self.pending_at_open.lock().unwrap().clone()
    }

    /// Deliver `outcome` to the most recently opened checkout
    pub fn resolve(&self, outcome: PaymentOutcome) {
        let sender = self.senders.lock().unwrap().pop().expect("no open checkout");
        let _ = sender.send(outcome);
    }

    /// Drop the most recent checkout without reporting anything
    pub fn abandon(&self) {
        self.senders.lock().unwrap().pop().expect("no open checkout");
    }
}

#[async_trait]
impl PaymentWidget for FakeWidget {
    async fn open(&self, request: PaymentRequest) -> Result<PaymentSession, PaymentError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PaymentError::Rejected("checkout unavailable".to_string()));
        }

        if let Some(store) = &self.store {
            let pending = store
                .rows()
                .iter()
                .filter(|d| d.id == request.reference && d.status == DonationStatus::Pending)
                .count();
            self.pending_at_open.lock().unwrap().push(pending);
        }

        let checkout_url = format!("https://checkout.test/{}", request.reference);
        self.requests.lock().unwrap().push(request);

        let (tx, rx) = oneshot::channel();
        self.senders.lock().unwrap().push(tx);

        Ok(PaymentSession {
            checkout_url,
            outcome: rx,
            expires_in: None,
        })
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.notifications().into_iter().map(|n| n.title).collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}
