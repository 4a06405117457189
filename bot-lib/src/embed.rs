use crate::config::EmbedColors;
use mizuki_metadata::{NOT_AVAILABLE, ParameterRecord};
use poise::serenity_prelude::{CreateEmbed, CreateEmbedFooter, User};

/// Discord rejects embed field values longer than this many characters.
pub const FIELD_VALUE_LIMIT: usize = 1024;

/// Discord rejects embeds whose text adds up to more than this many characters.
pub const EMBED_TOTAL_LIMIT: usize = 6000;

/// What the fields may use once the title and footer are accounted for.
const FIELDS_BUDGET: usize = EMBED_TOTAL_LIMIT - 100;

const FENCES: usize = "```\n\n```".len();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    fn new(name: impl Into<String>, value: String, inline: bool) -> Self {
        EmbedField {
            name: name.into(),
            value,
            inline,
        }
    }

    fn size(&self) -> usize {
        self.name.chars().count() + self.value.chars().count()
    }
}

/// Wraps `text` in a code block, cutting it short so the whole block fits in one field.
pub fn code_block(text: &str) -> String {
    code_block_within(text, FIELD_VALUE_LIMIT)
}

/// Like [`code_block`], but the block is at most `limit` characters long.
/// `limit` must leave room for the fences and one character.
fn code_block_within(text: &str, limit: usize) -> String {
    let budget = limit - FENCES;

    if text.chars().count() <= budget {
        return format!("```\n{text}\n```");
    }

    let cut = text.chars().take(budget - 1).collect::<String>();
    format!("```\n{cut}…\n```")
}

fn field_value(text: &str, limit: usize) -> String {
    match text {
        NOT_AVAILABLE => NOT_AVAILABLE.to_owned(),
        text => code_block_within(text, limit),
    }
}

fn total_size(fields: &[EmbedField]) -> usize {
    fields.iter().map(EmbedField::size).sum()
}

/// The fields shown for a record, in the order they appear in the embed.
///
/// When everything together would go over [`EMBED_TOTAL_LIMIT`], Extra is dropped
/// first and then fields are shortened from the bottom of the embed upwards.
pub fn metadata_fields(record: &ParameterRecord) -> Vec<EmbedField> {
    let mut sources = vec![
        ("Prompt", record.positive_prompt(), false),
        ("Negative Prompt", record.negative_prompt(), false),
    ];
    sources.extend(
        record
            .present()
            .map(|(key, value)| (key.label(), value, true)),
    );
    if record.extra() != NOT_AVAILABLE {
        sources.push(("Extra", record.extra(), false));
    }

    let mut fields = sources
        .iter()
        .map(|&(name, text, inline)| {
            EmbedField::new(name, field_value(text, FIELD_VALUE_LIMIT), inline)
        })
        .collect::<Vec<_>>();

    for (index, &(name, text, _)) in sources.iter().enumerate().rev() {
        let over = total_size(&fields).saturating_sub(FIELDS_BUDGET);
        if over == 0 {
            break;
        }

        if name == "Extra" {
            fields.remove(index);
            continue;
        }

        let allowed = fields[index].value.chars().count().saturating_sub(over);
        fields[index].value = if allowed > FENCES + 1 {
            field_value(text, allowed)
        } else {
            "…".to_owned()
        };
    }

    fields
}

pub fn metadata_embed(
    record: Option<&ParameterRecord>,
    image_url: &str,
    poster: &User,
    colors: EmbedColors,
) -> CreateEmbed {
    let embed = match record {
        Some(record) => CreateEmbed::new()
            .title("✨ Image Metadata ✨")
            .colour(colors.success)
            .fields(
                metadata_fields(record)
                    .into_iter()
                    .map(|field| (field.name, field.value, field.inline)),
            ),
        None => CreateEmbed::new()
            .title("Check Metadata")
            .description(
                "Sorry, I couldn't find any generation info in this image.\n\
                 It may have been stripped, or it isn't in a format I can read.",
            )
            .colour(colors.error),
    };

    let poster_name = poster.global_name.as_deref().unwrap_or(&poster.name);

    embed.image(image_url).footer(
        CreateEmbedFooter::new(format!("Posted by {poster_name}")).icon_url(poster.face()),
    )
}
