use chrono::{NaiveDateTime, Utc};
use serenity::async_trait;
use sqlx::mysql::{MySqlPool, MySqlRow};
use sqlx::Row;
use tracing::debug;

use super::{DonationStore, StoreError};
use crate::models::{Donation, DonationStatus};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `DonationStore` over the MySQL `donations` table
#[derive(Clone)]
pub struct MySqlDonationStore {
    pool: MySqlPool,
}

impl MySqlDonationStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_donation(row: &MySqlRow) -> Result<Donation, StoreError> {
        let status: String = row.get("status");
        let status = status.parse::<DonationStatus>().map_err(StoreError::CorruptRow)?;
        let date_created: String = row.get("date_created");
        let created_at = NaiveDateTime::parse_from_str(&date_created, DATE_FORMAT)
            .map_err(|e| StoreError::CorruptRow(format!("bad date_created '{}': {}", date_created, e)))?;

        Ok(Donation {
            id: row.get("id"),
            amount: row.get("amount"),
            email: row.get("email"),
            status,
            payment_reference: row.get("payment_reference"),
            created_at,
        })
    }

    /// Move a pending donation to `next`; anything not pending is left untouched
    async fn transition(
        &self,
        id: &str,
        next: DonationStatus,
        payment_reference: Option<&str>,
    ) -> Result<(), StoreError> {
        let current = self
            .find(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if !current.status.can_transition_to(next) {
            debug!("Donation {} is already {} (reference {:?}), not moving to {}",
                id, current.status, current.payment_reference, next);
            return Err(StoreError::InvalidTransition {
                id: id.to_string(),
                from: current.status,
                to: next,
            });
        }

        // Guarded again in SQL; a concurrent settle may have won since the read
        let result = sqlx::query(
            "UPDATE donations SET status = ?, payment_reference = COALESCE(?, payment_reference) \
             WHERE id = ? AND status = 'pending'",
        )
        .bind(next.as_str())
        .bind(payment_reference)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 1 {
            debug!("Donation {} is now {}", id, next);
            return Ok(());
        }

        let from = match self.find(id).await? {
            Some(latest) => latest.status,
            None => return Err(StoreError::NotFound(id.to_string())),
        };
        Err(StoreError::InvalidTransition {
            id: id.to_string(),
            from,
            to: next,
        })
    }
}

#[async_trait]
impl DonationStore for MySqlDonationStore {
    async fn completed_amounts(&self) -> Result<Vec<f64>, StoreError> {
        let rows = sqlx::query_as::<_, (f64,)>(
            "SELECT CAST(amount AS DOUBLE) FROM donations WHERE status = 'completed'",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(amount,)| amount).collect())
    }

    async fn create_pending(&self, amount: f64, email: &str) -> Result<Donation, StoreError> {
        let donation = Donation::pending(amount, email, Utc::now().naive_utc());

        sqlx::query(
            "INSERT INTO donations (id, amount, email, status, date_created) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&donation.id)
        .bind(donation.amount)
        .bind(&donation.email)
        .bind(donation.status.as_str())
        .bind(donation.created_at.format(DATE_FORMAT).to_string())
        .execute(&self.pool)
        .await?;

        debug!("Created pending donation {} for {:.2}", donation.id, donation.amount);
        Ok(donation)
    }

    async fn mark_completed(&self, id: &str, payment_reference: &str) -> Result<(), StoreError> {
        self.transition(id, DonationStatus::Completed, Some(payment_reference)).await
    }

    async fn mark_failed(&self, id: &str) -> Result<(), StoreError> {
        self.transition(id, DonationStatus::Failed, None).await
    }

    async fn find(&self, id: &str) -> Result<Option<Donation>, StoreError> {
        let row = sqlx::query(
            "SELECT id, CAST(amount AS DOUBLE) AS amount, email, CAST(status AS CHAR) AS status, \
             payment_reference, DATE_FORMAT(date_created, '%Y-%m-%d %H:%i:%s') AS date_created \
             FROM donations WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_donation).transpose()
    }
}
