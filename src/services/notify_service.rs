use std::sync::Arc;

use serenity::async_trait;
use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::http::Http;
use serenity::model::id::ChannelId;
use tracing::warn;

use crate::models::{Notification, Severity};

/// Fire-and-forget toast surface
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification);
}

/// Posts notifications as embeds into the channel a page session lives in
pub struct DiscordNotifier {
    http: Arc<Http>,
    channel_id: ChannelId,
}

impl DiscordNotifier {
    pub fn new(http: Arc<Http>, channel_id: ChannelId) -> Self {
        Self { http, channel_id }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn notify(&self, notification: Notification) {
        let message = CreateMessage::default().embed(create_notification_embed(&notification));
        if let Err(e) = self.channel_id.send_message(&*self.http, message).await {
            warn!("Failed to deliver notification '{}' to {}: {}", notification.title, self.channel_id, e);
        }
    }
}

pub fn severity_color(severity: Severity) -> u32 {
    match severity {
        Severity::Default => 0x00ff00,
        Severity::Destructive => 0xff0000,
    }
}

pub fn create_notification_embed(notification: &Notification) -> CreateEmbed {
    CreateEmbed::default()
        .title(&notification.title)
        .description(&notification.description)
        .color(severity_color(notification.severity))
}
