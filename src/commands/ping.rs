use std::time::Instant;

use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;

pub async fn execute(ctx: &Context, msg: &Message) -> Result<(), String> {
    let start_time = Instant::now();

    // Send initial message to measure roundtrip
    let response = msg
        .channel_id
        .send_message(ctx, CreateMessage::default().content("📊 Calculating metrics..."))
        .await
        .map_err(|e| e.to_string())?;
    let roundtrip = start_time.elapsed().as_millis();

    let uptime = {
        let data = ctx.data.read().await;
        data.get::<crate::BotData>()
            .map(|started| format_uptime(started.elapsed().as_secs()))
            .unwrap_or_else(|| "Unknown".to_string())
    };

    response.delete(ctx).await.map_err(|e| e.to_string())?;

    let embed = CreateEmbed::default()
        .title("Pong! 🏓")
        .field("Response Roundtrip", format!("{}ms", roundtrip), true)
        .field("Uptime", uptime, false)
        .color(0x00b0f4);

    msg.channel_id
        .send_message(ctx, CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}

fn format_uptime(secs: u64) -> String {
    format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "0h 0m 0s");
        assert_eq!(format_uptime(3_725), "1h 2m 5s");
    }
}
