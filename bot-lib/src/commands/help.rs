use crate::data::PoiseContext;
use color_eyre::eyre::Result;

const FALLBACK_HELP: &str = "React to an image with the inspect emoji, or use the \
    \"Inspect image metadata\" app command, and I'll DM you its generation info.";

/// Shows how to use the bot
#[poise::command(slash_command, prefix_command, ephemeral = true)]
pub async fn help(ctx: PoiseContext<'_>) -> Result<()> {
    let help_text = ctx.data().config.read().await.help_text.clone();

    match help_text {
        Some(help_text) => ctx.say(&*help_text).await?,
        None => ctx.say(FALLBACK_HELP).await?,
    };

    Ok(())
}
