//! Donation record models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of a donation record.
///
/// Records start `Pending`; the only legal moves are to `Completed` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    Pending,
    Completed,
    Failed,
}

impl DonationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Pending => "pending",
            DonationStatus::Completed => "completed",
            DonationStatus::Failed => "failed",
        }
    }

    pub fn can_transition_to(&self, next: DonationStatus) -> bool {
        matches!(
            (self, next),
            (DonationStatus::Pending, DonationStatus::Completed)
                | (DonationStatus::Pending, DonationStatus::Failed)
        )
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DonationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(DonationStatus::Pending),
            "completed" => Ok(DonationStatus::Completed),
            "failed" => Ok(DonationStatus::Failed),
            other => Err(format!("Unknown donation status '{}'", other)),
        }
    }
}

/// A pledge as stored in the `donations` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub id: String,
    pub amount: f64,
    pub email: String,
    pub status: DonationStatus,
    pub payment_reference: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Donation {
    /// Build a fresh pending record with a newly generated id
    pub fn pending(amount: f64, email: &str, created_at: NaiveDateTime) -> Self {
        Donation {
            id: uuid::Uuid::new_v4().to_string(),
            amount,
            email: email.to_string(),
            status: DonationStatus::Pending,
            payment_reference: None,
            created_at,
        }
    }
}
