use serenity::async_trait;
use sqlx::mysql::MySqlPool;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{Donation, DonationStatus};

pub mod donation;

pub use donation::MySqlDonationStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Donation '{0}' not found")]
    NotFound(String),
    #[error("Donation '{id}' cannot move from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: DonationStatus,
        to: DonationStatus,
    },
    #[error("Corrupt donation row: {0}")]
    CorruptRow(String),
}

/// The `donations` table, as far as the sponsorship page needs it
#[async_trait]
pub trait DonationStore: Send + Sync {
    /// Amounts of every donation with status `completed`
    async fn completed_amounts(&self) -> Result<Vec<f64>, StoreError>;

    /// Insert a new `pending` donation and return it with its generated id
    async fn create_pending(&self, amount: f64, email: &str) -> Result<Donation, StoreError>;

    async fn mark_completed(&self, id: &str, payment_reference: &str) -> Result<(), StoreError>;

    async fn mark_failed(&self, id: &str) -> Result<(), StoreError>;

    async fn find(&self, id: &str) -> Result<Option<Donation>, StoreError>;
}

/// Initialize the MySQL connection pool and create tables
pub async fn init_db(database_url: &str) -> Result<MySqlPool, sqlx::Error> {
    let pool = MySqlPool::connect(database_url).await?;

    create_tables(&pool).await;

    Ok(pool)
}

/// Run every statement in the migration file; existing tables are left alone
async fn create_tables(pool: &MySqlPool) {
    let path = "migrations/create_tables.sql";
    let sql_content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read {}: {}", path, e);
            return;
        }
    };

    for statement in sql_content.split(';') {
        let trimmed = statement.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Err(e) = sqlx::raw_sql(trimmed).execute(pool).await {
            warn!("Migration statement failed: {}", e);
        }
    }

    info!("Donation tables ready");
}
