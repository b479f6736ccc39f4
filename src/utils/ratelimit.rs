use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};
use lazy_static::lazy_static;
use serenity::model::id::UserId;
use tokio::sync::Mutex;

const COOLDOWN: Duration = Duration::from_secs(5);
const GLOBAL_RATE_LIMIT: usize = 50;  // requests per window
const RATE_WINDOW: Duration = Duration::from_secs(1);

lazy_static! {
    static ref COMMAND_COOLDOWNS: Mutex<Cooldowns> = Mutex::new(Cooldowns::new(COOLDOWN));
    static ref GLOBAL_REQUESTS: Mutex<SlidingWindow> =
        Mutex::new(SlidingWindow::new(GLOBAL_RATE_LIMIT, RATE_WINDOW));
}

/// Per-user, per-command cooldown tracker
pub struct Cooldowns {
    period: Duration,
    last_used: HashMap<(UserId, String), Instant>,
}

impl Cooldowns {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last_used: HashMap::new(),
        }
    }

    /// Record a use at `now`, or return how long the caller still has to wait
    pub fn check(&mut self, user_id: UserId, command: &str, now: Instant) -> Result<(), Duration> {
        let key = (user_id, command.to_string());
        if let Some(&last) = self.last_used.get(&key) {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.period {
                return Err(self.period - elapsed);
            }
        }
        self.last_used.insert(key, now);
        Ok(())
    }
}

/// Fixed-size sliding window over request timestamps
pub struct SlidingWindow {
    limit: usize,
    window: Duration,
    requests: VecDeque<Instant>,
}

impl SlidingWindow {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            limit,
            window,
            requests: VecDeque::new(),
        }
    }

    pub fn check(&mut self, now: Instant) -> Result<(), Duration> {
        while let Some(&front) = self.requests.front() {
            if now.saturating_duration_since(front) >= self.window {
                self.requests.pop_front();
            } else {
                break;
            }
        }

        if self.requests.len() >= self.limit {
            let oldest = self.requests.front().copied().unwrap_or(now);
            return Err(self.window.saturating_sub(now.saturating_duration_since(oldest)));
        }

        self.requests.push_back(now);
        Ok(())
    }
}

/// Check (and start) the cooldown for `command` issued by `user_id`
pub async fn check_cooldown(user_id: UserId, command: &str) -> Result<(), Duration> {
    COMMAND_COOLDOWNS.lock().await.check(user_id, command, Instant::now())
}

/// Check the bot-wide request budget
pub async fn check_global_rate_limit() -> Result<(), Duration> {
    GLOBAL_REQUESTS.lock().await.check(Instant::now())
}
