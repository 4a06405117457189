use crate::record::{ParameterKey, ParameterRecord, RecordBuilder};
use regex::Regex;
use std::sync::LazyLock;

const NEGATIVE_PROMPT_MARKER: &str = "Negative prompt:";

const PARAMETER_MARKERS: [&str; 10] = [
    "Steps:",
    "Sampler:",
    "CFG scale:",
    "Seed:",
    "Size:",
    "Model:",
    "Model hash:",
    "Denoising strength:",
    "Clip skip:",
    "Schedule Type:",
];

static PARAMETER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(Steps|Sampler|Schedule Type|CFG scale|Seed|Size|Model hash|Model|Denoising strength|Clip skip):\s*([^\n,]+)",
    )
    .unwrap()
});

fn first_parameter_index(text: &str) -> Option<usize> {
    PARAMETER_MARKERS
        .iter()
        .filter_map(|marker| text.find(marker))
        .min()
}

fn starts_with_marker(line: &str) -> bool {
    PARAMETER_MARKERS
        .iter()
        .any(|marker| line.starts_with(marker))
}

/// Parses the `prompt / Negative prompt: / Steps: ...` text block.
///
/// The split is positional: the prompts are whatever sits before the first
/// parameter marker, so a prompt that happens to contain `Seed:` is cut short.
pub fn parse_stable_diffusion_metadata(raw: &str) -> ParameterRecord {
    let mut record = RecordBuilder::default();
    let first_parameter = first_parameter_index(raw);

    let working = match (raw.find(NEGATIVE_PROMPT_MARKER), first_parameter) {
        (Some(negative), first_parameter) => {
            record.set_positive_prompt(raw[..negative].trim());

            let start = negative + NEGATIVE_PROMPT_MARKER.len();
            let end = first_parameter
                .filter(|&index| index > negative)
                .map_or(raw.len(), |index| index.max(start));
            record.set_negative_prompt(raw[start..end].trim());

            first_parameter.map_or("", |index| &raw[index..])
        }
        (None, Some(index)) => {
            record.set_positive_prompt(raw[..index].trim());
            &raw[index..]
        }
        (None, None) => {
            record.set_positive_prompt(raw.trim());
            ""
        }
    };

    let mut last_match_end = None;

    for captures in PARAMETER_RE.captures_iter(working) {
        let (Some(whole), Some(key), Some(value)) = (captures.get(0), captures.get(1), captures.get(2))
        else {
            continue;
        };

        last_match_end = Some(whole.end());

        let value = value.as_str().trim();
        if value.is_empty() {
            continue;
        }

        if let Some(key) = ParameterKey::from_label(key.as_str()) {
            record.set(key, value);
        }
    }

    if let Some(end) = last_match_end {
        let extra = working[end..]
            .split('\n')
            // The rest of the line the last parameter sat on.
            .skip(1)
            .map(str::trim)
            .filter(|line| !line.is_empty() && !starts_with_marker(line))
            .collect::<Vec<_>>()
            .join("\n");

        if !extra.is_empty() {
            record.set_extra(extra);
        }
    }

    record.finish()
}
