//! User-facing notification models

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Default,
    Destructive,
}

/// A toast shown to the donor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(title: &str, description: &str) -> Self {
        Notification {
            title: title.to_string(),
            description: description.to_string(),
            severity: Severity::Default,
        }
    }

    pub fn error(title: &str, description: &str) -> Self {
        Notification {
            title: title.to_string(),
            description: description.to_string(),
            severity: Severity::Destructive,
        }
    }

    pub fn invalid_amount() -> Self {
        Self::error("Invalid amount", "Please enter a valid donation amount.")
    }

    pub fn donation_failed() -> Self {
        Self::error("Error", "Failed to process donation. Please try again.")
    }

    pub fn donation_succeeded() -> Self {
        Self::info(
            "Thank you!",
            "Your donation was successful. Thank you for supporting our mission!",
        )
    }

    pub fn pitch_deck_started() -> Self {
        Self::info("Download started", "The pitch deck is being prepared for download.")
    }
}
