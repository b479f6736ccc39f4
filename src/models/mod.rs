//! Data models for the sponsorship page
//!
//! Donation records as the store holds them, the progress figures derived
//! from them, user-facing notifications, and the page's static copy.

pub mod content;
pub mod donation;
pub mod notification;
pub mod progress;

pub use donation::{Donation, DonationStatus};
pub use notification::{Notification, Severity};
pub use progress::{Progress, CURRENCY_CODE};
