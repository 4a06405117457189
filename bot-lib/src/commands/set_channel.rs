use crate::data::PoiseContext;
use color_eyre::eyre::Result;
use itertools::Itertools;
use poise::{
    CreateReply,
    serenity_prelude::{CreateEmbed, GuildChannel, Mentionable},
};

/// Manage which channels get the inspect reaction on new images
#[poise::command(
    slash_command,
    rename = "setchannel",
    subcommands("add", "remove", "list", "clear"),
    guild_only,
    default_member_permissions = "MANAGE_CHANNELS"
)]
pub async fn set_channel(_ctx: PoiseContext<'_>) -> Result<()> {
    Ok(())
}

/// Start watching a channel for images
#[poise::command(slash_command, ephemeral = true)]
pub async fn add(
    ctx: PoiseContext<'_>,
    #[description = "Channel to watch (defaults to this one)"]
    #[channel_types("Text")]
    channel: Option<GuildChannel>,
) -> Result<()> {
    let channel = channel.map_or_else(|| ctx.channel_id(), |channel| channel.id);

    let added = ctx
        .data()
        .monitored_channels
        .add(channel, ctx.author().id)?;

    if added {
        tracing::info!("{} started monitoring {}", ctx.author().name, channel);
        ctx.say(format!("✅ Now watching {} for images.", channel.mention()))
            .await?;
    } else {
        ctx.say(format!("{} is already being watched.", channel.mention()))
            .await?;
    }

    Ok(())
}

/// Stop watching a channel
#[poise::command(slash_command, ephemeral = true)]
pub async fn remove(
    ctx: PoiseContext<'_>,
    #[description = "Channel to stop watching (defaults to this one)"]
    #[channel_types("Text")]
    channel: Option<GuildChannel>,
) -> Result<()> {
    let channel = channel.map_or_else(|| ctx.channel_id(), |channel| channel.id);

    if ctx.data().monitored_channels.remove(channel)? {
        tracing::info!("{} stopped monitoring {}", ctx.author().name, channel);
        ctx.say(format!("✅ No longer watching {}.", channel.mention()))
            .await?;
    } else {
        ctx.say(format!("{} wasn't being watched.", channel.mention()))
            .await?;
    }

    Ok(())
}

/// List the watched channels
#[poise::command(slash_command, ephemeral = true)]
pub async fn list(ctx: PoiseContext<'_>) -> Result<()> {
    let description = ctx
        .data()
        .monitored_channels
        .iter()
        .map(|(channel, entry)| {
            format!(
                "{} (added by {})",
                channel.mention(),
                entry.added_by().mention()
            )
        })
        .join("\n");

    if description.is_empty() {
        ctx.say("No channels are being watched.").await?;
        return Ok(());
    }

    let color = ctx.data().config.read().await.embed_colors.info;
    let embed = CreateEmbed::new()
        .title("Watched channels")
        .description(description)
        .colour(color);

    ctx.send(CreateReply::default().embed(embed)).await?;

    Ok(())
}

/// Stop watching every channel
#[poise::command(slash_command, ephemeral = true)]
pub async fn clear(ctx: PoiseContext<'_>) -> Result<()> {
    let cleared = ctx.data().monitored_channels.clear()?;

    tracing::info!("{} cleared {} monitored channels", ctx.author().name, cleared);
    ctx.say(format!("✅ Stopped watching {cleared} channel(s)."))
        .await?;

    Ok(())
}
