use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use tracing::{debug, error, info};

use crate::services::donation_service::DonationError;
use crate::services::session_service;
use crate::services::sponsorship_service;

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    if args.is_empty() {
        let help_embed = CreateEmbed::default()
            .title("💚 Donate Command")
            .description("Support the NextGen Breeders Alliance with a donation in naira")
            .field("Usage", "`$donate <amount> [email]`", false)
            .field("Examples",
                "`$donate 5000`\n\
                 `$donate 25000 ada@example.com`",
                false)
            .field("Notes",
                "• Amount must be positive\n\
                 • You will receive a secure Paystack checkout link\n\
                 • The email receives your payment receipt",
                false)
            .color(0x00ff00);

        msg.channel_id
            .send_message(ctx, CreateMessage::default().embed(help_embed))
            .await
            .map_err(|e| e.to_string())?;
        return Ok(());
    }

    let (state, page) = session_service::get_page(ctx, msg.author.id, msg.channel_id).await?;

    let email = match args.get(1) {
        Some(email) if is_plausible_email(email) => email.to_string(),
        Some(email) => return Err(format!("'{}' does not look like an email address", email)),
        None => state.config.donor_email.clone(),
    };

    page.set_amount(args[0]).await;

    match page.donate(&email).await {
        Ok(checkout) => {
            let embed = sponsorship_service::create_checkout_embed(&checkout);
            let donor = msg.author.id;
            tokio::spawn(async move {
                match checkout.settled.await {
                    Ok(settlement) => info!("Donation by {} finished: {:?}", donor, settlement),
                    Err(e) => error!("Settling donation {} for {} failed: {}", checkout.donation_id, donor, e),
                }
            });

            msg.channel_id
                .send_message(ctx, CreateMessage::default().embed(embed))
                .await
                .map_err(|e| e.to_string())?;
        }
        Err(DonationError::Busy) => {
            let embed = CreateEmbed::default()
                .title("⏳ Processing...")
                .description("Your previous donation is still being set up.")
                .color(0xffa500);
            msg.channel_id
                .send_message(ctx, CreateMessage::default().embed(embed))
                .await
                .map_err(|e| e.to_string())?;
        }
        // The donor has already been notified
        Err(e) => debug!("Donation by {} not opened: {}", msg.author.id, e),
    }

    Ok(())
}

fn is_plausible_email(input: &str) -> bool {
    match input.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.'),
        None => false,
    }
}
