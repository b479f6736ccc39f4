//! Campaign progress models

/// Fundraising goal, in naira
pub const PROGRESS_TARGET: f64 = 5_000_000.0;

/// The only currency the payment provider is asked to charge in
pub const CURRENCY_CODE: &str = "NGN";

pub const CURRENCY_SYMBOL: &str = "₦";

/// Sum of completed donations measured against the target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub total: f64,
    pub target: f64,
}

impl Progress {
    pub fn new(total: f64) -> Self {
        Progress {
            total,
            target: PROGRESS_TARGET,
        }
    }

    /// Share of the target reached, clamped to `[0, 100]`
    pub fn percentage(&self) -> f64 {
        if self.target <= 0.0 {
            return 100.0;
        }
        ((self.total / self.target) * 100.0).clamp(0.0, 100.0)
    }
}
