use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serenity::model::id::{ChannelId, UserId};
use serenity::prelude::{Context, TypeMapKey};
use tokio::sync::Mutex;
use tracing::debug;

use crate::api::PaymentWidget;
use crate::config::Config;
use crate::db::DonationStore;
use crate::services::notify_service::DiscordNotifier;
use crate::services::sponsorship_service::SponsorshipPage;

type SessionKey = (UserId, ChannelId);

struct Session {
    page: SponsorshipPage,
    last_used: Instant,
}

/// Page sessions keyed by (user, channel), dropped once idle
pub struct SessionCache {
    idle_timeout: Duration,
    sessions: HashMap<SessionKey, Session>,
}

impl SessionCache {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            idle_timeout,
            sessions: HashMap::new(),
        }
    }

    /// Drop sessions idle for longer than the timeout. A page that is still
    /// submitting is kept. Checkouts already opened keep their own handle on
    /// the page, so they still settle after eviction.
    pub async fn evict_idle(&mut self, now: Instant) -> usize {
        let stale: Vec<SessionKey> = self
            .sessions
            .iter()
            .filter(|(_, s)| now.saturating_duration_since(s.last_used) > self.idle_timeout)
            .map(|(key, _)| *key)
            .collect();

        let mut evicted = 0;
        for key in stale {
            let busy = match self.sessions.get(&key) {
                Some(session) => session.page.is_loading().await,
                None => continue,
            };
            if !busy {
                self.sessions.remove(&key);
                evicted += 1;
            }
        }
        evicted
    }

    /// The page for `key`, built with `make` if there is none. The flag is
    /// true for a freshly built page.
    pub fn touch_or_insert_with<F>(&mut self, key: SessionKey, now: Instant, make: F) -> (SponsorshipPage, bool)
    where
        F: FnOnce() -> SponsorshipPage,
    {
        match self.sessions.get_mut(&key) {
            Some(session) => {
                session.last_used = now;
                (session.page.clone(), false)
            }
            None => {
                let page = make();
                self.sessions.insert(key, Session { page: page.clone(), last_used: now });
                (page, true)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

/// Shared collaborators plus one page session per (user, channel)
pub struct AppState {
    pub store: Arc<dyn DonationStore>,
    pub widget: Arc<dyn PaymentWidget>,
    pub config: Arc<Config>,
    sessions: Mutex<SessionCache>,
}

impl TypeMapKey for AppState {
    type Value = Arc<AppState>;
}

impl AppState {
    pub fn new(store: Arc<dyn DonationStore>, widget: Arc<dyn PaymentWidget>, config: Arc<Config>) -> Self {
        let sessions = Mutex::new(SessionCache::new(config.session_idle_timeout));
        Self {
            store,
            widget,
            config,
            sessions,
        }
    }
}

pub async fn get_state(ctx: &Context) -> Result<Arc<AppState>, String> {
    let data = ctx.data.read().await;
    data.get::<AppState>()
        .cloned()
        .ok_or_else(|| "Application state not initialized".to_string())
}

/// The caller's page in this channel, mounted on first use
pub async fn get_page(
    ctx: &Context,
    user_id: UserId,
    channel_id: ChannelId,
) -> Result<(Arc<AppState>, SponsorshipPage), String> {
    let state = get_state(ctx).await?;

    let (page, fresh) = {
        let mut sessions = state.sessions.lock().await;
        let now = Instant::now();

        let evicted = sessions.evict_idle(now).await;
        if evicted > 0 {
            debug!("Evicted {} idle page sessions, {} left", evicted, sessions.len());
        }

        sessions.touch_or_insert_with((user_id, channel_id), now, || {
            let notifier = Arc::new(DiscordNotifier::new(ctx.http.clone(), channel_id));
            SponsorshipPage::new(state.store.clone(), state.widget.clone(), notifier)
        })
    };

    if fresh {
        debug!("Mounted sponsorship page for {} in {}", user_id, channel_id);
        page.mount().await;
    }

    Ok((state, page))
}
