use crate::{
    data::PoiseContext,
    inspect::{image_attachments, inspect_attachment, send_dm},
};
use color_eyre::eyre::Result;
use poise::serenity_prelude::{CreateMessage, Message};

/// DMs the generation metadata of every image on a message.
#[poise::command(context_menu_command = "Inspect image metadata", ephemeral = true)]
pub async fn inspect_image(ctx: PoiseContext<'_>, message: Message) -> Result<()> {
    ctx.defer_ephemeral().await?;

    let images = image_attachments(&message).collect::<Vec<_>>();
    if images.is_empty() {
        ctx.say("❌ This message has no image attachments.").await?;
        return Ok(());
    }

    let mut delivered = 0;

    // One at a time so the DMs arrive in attachment order.
    for attachment in &images {
        let embed = inspect_attachment(ctx.data(), attachment, &message.author).await;

        if send_dm(ctx, ctx.author(), CreateMessage::new().embed(embed)).await {
            delivered += 1;
        }
    }

    let summary = if delivered == images.len() {
        "✅ I've sent you the metadata for every image.".to_owned()
    } else {
        format!(
            "⚠️ Only {delivered} of {} results reached you. Check that your DMs are open.",
            images.len()
        )
    };

    ctx.say(summary).await?;

    Ok(())
}
