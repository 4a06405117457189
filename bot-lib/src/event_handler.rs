use crate::{
    data::State,
    inspect::{image_attachments, inspect_attachment, send_dm},
};
use color_eyre::eyre::{Result, WrapErr};
use mizuki_traits::ForwardRefToTracing;
use poise::serenity_prelude::{self as serenity, CreateMessage, Message, Reaction, ReactionType};

pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    data: State,
) -> Result<()> {
    match event {
        serenity::FullEvent::Message { new_message } => {
            mark_monitored_images(ctx, &data, new_message)
                .await
                .trace_err_ok();
        }
        serenity::FullEvent::ReactionAdd {
            add_reaction: reaction,
        } => {
            inspect_on_reaction(ctx, &data, reaction)
                .await
                .trace_err_ok();
        }
        serenity::FullEvent::Ratelimit { data } => {
            tracing::warn!("Ratelimited: {:?}", data);
        }
        _ => {}
    };

    Ok(())
}

/// Puts the inspect reaction on image posts in monitored channels.
async fn mark_monitored_images(
    ctx: &serenity::Context,
    data: &State,
    message: &Message,
) -> Result<()> {
    if message.author.bot || !data.monitored_channels.contains(message.channel_id)? {
        return Ok(());
    }

    if image_attachments(message).next().is_none() {
        return Ok(());
    }

    let emoji = data.config.read().await.inspect_emoji.clone();

    message
        .react(ctx, ReactionType::Unicode(emoji))
        .await
        .wrap_err_with(|| format!("Failed to react to {}", message.link()))?;

    Ok(())
}

async fn inspect_on_reaction(
    ctx: &serenity::Context,
    data: &State,
    reaction: &Reaction,
) -> Result<()> {
    {
        let config = data.config.read().await;
        if !reaction.emoji.unicode_eq(&config.inspect_emoji) {
            return Ok(());
        }
    }

    let user = reaction.user(ctx).await.wrap_err("Failed to get reacting user")?;
    if user.bot {
        return Ok(());
    }

    let Ok(message) = reaction.message(ctx).await else {
        let message_link = format!(
            "https://discord.com/channels/{}/{}/{}",
            reaction.guild_id.map(|id| id.get()).unwrap_or(0),
            reaction.channel_id,
            reaction.message_id
        );

        tracing::warn!("Failed to get message! {:?}", message_link);
        return Ok(());
    };

    let Some(attachment) = image_attachments(&message).next() else {
        send_dm(
            ctx,
            &user,
            CreateMessage::new()
                .content("That message has no image attachment, so there is nothing for me to read."),
        )
        .await;
        return Ok(());
    };

    tracing::info!("{} asked for metadata of {}", user.name, message.link());

    send_dm(
        ctx,
        &user,
        CreateMessage::new().content("Reading the image's metadata, one moment!"),
    )
    .await;

    let embed = inspect_attachment(data, attachment, &message.author).await;

    if send_dm(ctx, &user, CreateMessage::new().embed(embed)).await {
        send_dm(
            ctx,
            &user,
            CreateMessage::new().content(format!("[Source message]({})", message.link())),
        )
        .await;
    }

    Ok(())
}
