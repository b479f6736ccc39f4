use serenity::builder::CreateMessage;
use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::services::session_service;
use crate::services::sponsorship_service;

pub async fn execute(ctx: &Context, msg: &Message) -> Result<(), String> {
    let (_, page) = session_service::get_page(ctx, msg.author.id, msg.channel_id).await?;
    page.refresh().await;

    let embed = sponsorship_service::create_donation_card_embed(&page.view().await);
    msg.channel_id
        .send_message(ctx, CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
