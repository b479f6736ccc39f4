use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;

pub async fn execute(ctx: &Context, msg: &Message) -> Result<(), String> {
    let embed = CreateEmbed::default()
        .title("📖 Sponsorship Bot Help")
        .description("**NextGen Breeders Alliance** - sponsorship and donations")
        .color(0x00b0f4)
        .field(
            "🎯 General",
            "`$ping` - Check bot latency\n`$help` - Show this help message",
            false,
        )
        .field(
            "🌱 Sponsorship",
            "`$sponsor` - Show the sponsorship page\n`$progress` - Show fundraising progress\n`$pitchdeck` - Download the pitch deck",
            false,
        )
        .field(
            "💚 Donations",
            "`$donate <amount> [email]` - Donate in naira via Paystack",
            false,
        )
        .field(
            "⚡ Rate Limiting",
            "5-second cooldown per command per user\nGlobal 50 requests/second limit",
            false,
        );

    msg.channel_id
        .send_message(ctx, CreateMessage::default().embed(embed))
        .await
        .map_err(|e| format!("Failed to send help message: {}", e))?;

    Ok(())
}
