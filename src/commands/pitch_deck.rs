use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::services::session_service;

pub async fn execute(ctx: &Context, msg: &Message) -> Result<(), String> {
    let (_, page) = session_service::get_page(ctx, msg.author.id, msg.channel_id).await?;
    page.download_pitch_deck().await;
    Ok(())
}
