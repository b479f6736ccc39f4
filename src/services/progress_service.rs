use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, error};

use crate::db::DonationStore;
use crate::models::Progress;

/// Keeps the running total of completed donations.
///
/// `refresh` never fails: a store error is logged and the last known total
/// stays in place (zero until the first successful read).
pub struct ProgressAggregator {
    store: Arc<dyn DonationStore>,
    total: RwLock<f64>,
}

impl ProgressAggregator {
    pub fn new(store: Arc<dyn DonationStore>) -> Self {
        Self {
            store,
            total: RwLock::new(0.0),
        }
    }

    /// Re-read completed donations and return the total now cached
    pub async fn refresh(&self) -> f64 {
        match self.store.completed_amounts().await {
            Ok(amounts) => {
                let sum: f64 = amounts.iter().sum();
                debug!("Completed donations: {} totalling {:.2}", amounts.len(), sum);
                *self.total.write().await = sum;
                sum
            }
            Err(e) => {
                error!("Error fetching donations: {}", e);
                *self.total.read().await
            }
        }
    }

    pub async fn total(&self) -> f64 {
        *self.total.read().await
    }

    pub async fn progress(&self) -> Progress {
        Progress::new(self.total().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DonationStatus;
    use crate::testing::InMemoryDonationStore;

    #[tokio::test]
    async fn test_starts_at_zero() {
        let store = Arc::new(InMemoryDonationStore::new());
        let aggregator = ProgressAggregator::new(store);
        assert_eq!(aggregator.total().await, 0.0);
    }

    #[tokio::test]
    async fn test_only_completed_counted() {
        let store = Arc::new(InMemoryDonationStore::new());
        store.seed(1_000_000.0, DonationStatus::Pending).await;
        store.seed(2_000_000.0, DonationStatus::Completed).await;
        store.seed(700_000.0, DonationStatus::Failed).await;
        store.seed(500_000.0, DonationStatus::Completed).await;

        let aggregator = ProgressAggregator::new(store);
        assert_eq!(aggregator.refresh().await, 2_500_000.0);
        assert_eq!(aggregator.progress().await.percentage(), 50.0);
    }

    #[tokio::test]
    async fn test_insertion_order_irrelevant() {
        let forward = Arc::new(InMemoryDonationStore::new());
        let backward = Arc::new(InMemoryDonationStore::new());
        let rows = [
            (1_500.0, DonationStatus::Completed),
            (250.0, DonationStatus::Failed),
            (3_000.0, DonationStatus::Completed),
            (90.0, DonationStatus::Pending),
        ];
        for (amount, status) in rows {
            forward.seed(amount, status).await;
        }
        for (amount, status) in rows.iter().rev() {
            backward.seed(*amount, *status).await;
        }

        let a = ProgressAggregator::new(forward).refresh().await;
        let b = ProgressAggregator::new(backward).refresh().await;
        assert_eq!(a, 4_500.0);
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_failure_keeps_last_total() {
        let store = Arc::new(InMemoryDonationStore::new());
        store.seed(6_000_000.0, DonationStatus::Completed).await;
        let aggregator = ProgressAggregator::new(store.clone());
        aggregator.refresh().await;

        store.fail_reads(true);
        assert_eq!(aggregator.refresh().await, 6_000_000.0);
        assert_eq!(aggregator.progress().await.percentage(), 100.0);
    }

    #[tokio::test]
    async fn test_refresh_is_repeatable() {
        let store = Arc::new(InMemoryDonationStore::new());
        store.seed(10_000.0, DonationStatus::Completed).await;
        let aggregator = ProgressAggregator::new(store);

        assert_eq!(aggregator.refresh().await, 10_000.0);
        assert_eq!(aggregator.refresh().await, 10_000.0);
    }
}
