use serenity::builder::CreateMessage;
use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::services::session_service;
use crate::services::sponsorship_service;

pub async fn execute(ctx: &Context, msg: &Message) -> Result<(), String> {
    let (state, page) = session_service::get_page(ctx, msg.author.id, msg.channel_id).await?;
    page.refresh().await;

    let view = page.view().await;
    let embeds = sponsorship_service::create_page_embeds(&view, state.config.asset_base_url.as_deref());

    msg.channel_id
        .send_message(ctx, CreateMessage::default().embeds(embeds))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
