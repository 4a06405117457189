use crate::{container::RawMetadataPayload, value::is_truthy};
use serde_json::Value;

/// Which generator family wrote a payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DialectTag {
    /// Flat `key: value` text, or anything that is not JSON.
    LegacyText,
    ComfyUi,
    SwarmUi,
    /// JSON that no known generator writes. Read as legacy text.
    Unknown,
}

/// Never fails: text that does not parse as JSON is legacy text.
pub fn classify(text: &str) -> DialectTag {
    match serde_json::from_str::<Value>(text) {
        Ok(json) => classify_json(&json),
        Err(_) => DialectTag::LegacyText,
    }
}

pub(crate) fn classify_json(json: &Value) -> DialectTag {
    let Some(object) = json.as_object() else {
        return DialectTag::Unknown;
    };

    let has = |key: &str| object.get(key).is_some_and(is_truthy);

    if has("sui_image_params") || has("sui_extra_data") {
        return DialectTag::SwarmUi;
    }

    let comfy_version = object
        .get("version")
        .and_then(Value::as_str)
        .is_some_and(|version| version.contains("ComfyUI"));

    let comfy_key = object
        .keys()
        .any(|key| key.contains("workflow") || key.contains("comfy") || key.contains("node"));

    if has("workflow") || has("prompt") || has("nodes") || comfy_version || comfy_key {
        return DialectTag::ComfyUi;
    }

    DialectTag::Unknown
}

/// A payload paired with the parser that understands it.
#[derive(Clone, Debug, PartialEq)]
pub enum MetadataPayload {
    LegacyText(String),
    ComfyUi(Value),
    SwarmUi(Value),
}

impl MetadataPayload {
    pub fn from_text(text: String) -> MetadataPayload {
        let Ok(json) = serde_json::from_str::<Value>(&text) else {
            return MetadataPayload::LegacyText(text);
        };

        match classify_json(&json) {
            DialectTag::SwarmUi => MetadataPayload::SwarmUi(json),
            DialectTag::ComfyUi => MetadataPayload::ComfyUi(json),
            DialectTag::LegacyText | DialectTag::Unknown => MetadataPayload::LegacyText(text),
        }
    }

    pub fn tag(&self) -> DialectTag {
        match self {
            MetadataPayload::LegacyText(_) => DialectTag::LegacyText,
            MetadataPayload::ComfyUi(_) => DialectTag::ComfyUi,
            MetadataPayload::SwarmUi(_) => DialectTag::SwarmUi,
        }
    }
}

impl From<RawMetadataPayload> for MetadataPayload {
    fn from(raw: RawMetadataPayload) -> Self {
        MetadataPayload::from_text(raw.text)
    }
}
