use crate::{data::AppState, embed::metadata_embed};
use color_eyre::eyre::WrapErr;
use mizuki_metadata::MetadataPayload;
use mizuki_traits::ForwardRefToTracing;
use poise::serenity_prelude::{Attachment, CacheHttp, CreateEmbed, CreateMessage, Message, User};

pub fn is_image(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|content_type| content_type.starts_with("image/"))
}

/// Image attachments in the order Discord lists them.
pub fn image_attachments(message: &Message) -> impl Iterator<Item = &Attachment> {
    message
        .attachments
        .iter()
        .filter(|attachment| is_image(attachment.content_type.as_deref()))
}

/// Downloads one attachment and renders whatever metadata it carries.
pub async fn inspect_attachment(
    data: &AppState,
    attachment: &Attachment,
    poster: &User,
) -> CreateEmbed {
    let content_type = attachment.content_type.as_deref().unwrap_or_default();

    let payload = data.metadata.get_metadata(&attachment.url, content_type).await;
    if let Some(payload) = &payload {
        tracing::debug!("{} read as {:?}", attachment.url, payload.tag());
    }

    let record = payload.as_ref().map(MetadataPayload::parse);
    let colors = data.config.read().await.embed_colors;

    metadata_embed(record.as_ref(), &attachment.url, poster, colors)
}

/// Sends a DM, logging instead of failing when the user has them closed.
/// Returns whether the message went through.
pub async fn send_dm(cache_http: impl CacheHttp, user: &User, message: CreateMessage) -> bool {
    user.direct_message(cache_http, message)
        .await
        .wrap_err_with(|| format!("Could not DM {}", user.name))
        .trace_warn_ok()
        .is_some()
}
