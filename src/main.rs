use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn, error};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod db;
mod models;
mod services;
#[cfg(test)]
mod testing;
mod utils;

use api::{PaystackCheckout, PaystackClient};
use config::Config;
use db::MySqlDonationStore;
use services::session_service::AppState;

struct Handler;

struct BotData;

impl TypeMapKey for BotData {
    type Value = Instant;
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        commands::handle_message(&ctx, &msg).await;
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);

        if let Err(e) = ctx.http.get_current_user().await {
            warn!("Failed to check rate limit status: {}", e);
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive("sponsorship_bot=debug".parse().unwrap())
            .add_directive("serenity=warn".parse().unwrap()))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("🌱 Starting sponsorship bot...");

    let config = match Config::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    info!("Initializing database...");
    let pool = match db::init_db(&config.database_url).await {
        Ok(p) => {
            info!("Database initialized successfully");
            p
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return;
        }
    };

    let paystack = Arc::new(PaystackClient::with_base_url(
        config.paystack.secret_key.clone(),
        config.paystack.base_url.clone(),
    ));
    let checkout = PaystackCheckout::new(
        paystack,
        config.paystack.poll_interval,
        config.paystack.checkout_timeout,
    );
    let state = AppState::new(
        Arc::new(MySqlDonationStore::new(pool)),
        Arc::new(checkout),
        config.clone(),
    );

    let intents = GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MESSAGES;

    let mut client = match Client::builder(&config.discord_token, intents)
        .event_handler(Handler)
        .await
    {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create client: {}", e);
            return;
        }
    };

    {
        let mut data = client.data.write().await;
        data.insert::<BotData>(Instant::now());
        data.insert::<AppState>(Arc::new(state));
    }

    if let Err(e) = client.start().await {
        error!("Client error: {}", e);
    }
}
