pub mod donate;
pub mod help;
pub mod ping;
pub mod pitch_deck;
pub mod progress;
pub mod sponsor;

use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use tracing::{debug, error};

use crate::utils::{check_cooldown, check_global_rate_limit, extract_clean_error};

pub async fn handle_message(ctx: &Context, msg: &Message) {
    if msg.author.bot {
        return;
    }

    // Parse command and arguments
    let parts: Vec<&str> = msg.content.split_whitespace().collect();
    let Some((&command, args)) = parts.split_first() else {
        return;
    };

    if !is_known_command(command) {
        return;
    }

    if let Err(wait) = check_global_rate_limit().await {
        debug!("Global rate limit hit, dropping {} ({}ms left)", command, wait.as_millis());
        return;
    }

    if let Err(remaining) = check_cooldown(msg.author.id, command).await {
        let embed = CreateEmbed::default()
            .title("Command Cooldown")
            .description(format!(
                "⏳ Please wait {} seconds before using this command again.",
                remaining.as_secs().max(1)
            ))
            .color(0xffa500);
        let _ = msg.channel_id
            .send_message(ctx, CreateMessage::default().embed(embed))
            .await;
        return;
    }

    let result = match command {
        "$ping" => ping::execute(ctx, msg).await,
        "$help" => help::execute(ctx, msg).await,
        "$sponsor" | "$sponsorship" => sponsor::execute(ctx, msg).await,
        "$progress" => progress::execute(ctx, msg).await,
        "$donate" => donate::execute(ctx, msg, args).await,
        "$pitchdeck" | "$deck" => pitch_deck::execute(ctx, msg).await,
        _ => return,
    };

    if let Err(e) = result {
        error!("Error executing command {}: {}", command, e);

        let clean_error = extract_clean_error(&e);
        let user_message = if e.contains("429") || e.contains("rate limit") {
            "⚠️ **Rate Limited**: Discord is rate limiting us. Please try again in a moment.".to_string()
        } else if e.contains("HTTP request") {
            "⚠️ **Network Error**: Having trouble connecting to Discord. Please try again.".to_string()
        } else if !clean_error.is_empty() {
            format!("❌ {}", clean_error)
        } else {
            "❌ An error occurred while executing the command.".to_string()
        };

        let embed = CreateEmbed::default()
            .title("Command Error")
            .description(user_message)
            .color(0xff0000);

        let _ = msg.channel_id
            .send_message(ctx, CreateMessage::default().embed(embed))
            .await;
    }
}

fn is_known_command(command: &str) -> bool {
    matches!(
        command,
        "$ping" | "$help" | "$sponsor" | "$sponsorship" | "$progress" | "$donate"
            | "$pitchdeck" | "$deck"
    )
}
