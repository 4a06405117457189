use crate::{
    record::{ParameterKey, ParameterRecord, RecordBuilder},
    value::{present, truthy},
};
use serde_json::Value;

/// Reads the flat `sui_image_params` object SwarmUI writes.
pub fn parse_swarmui_metadata(metadata: &Value) -> ParameterRecord {
    let mut record = RecordBuilder::default();

    let Some(params) = metadata.get("sui_image_params").and_then(Value::as_object) else {
        return record.finish();
    };

    if let Some(prompt) = truthy(params, "prompt") {
        record.set_positive_prompt(prompt);
    }
    if let Some(prompt) = truthy(params, "negativeprompt") {
        record.set_negative_prompt(prompt);
    }

    if let Some(model) = truthy(params, "model") {
        record.set(ParameterKey::Model, model);
    }
    if let Some(seed) = present(params, "seed") {
        record.set(ParameterKey::Seed, seed);
    }
    if let Some(steps) = present(params, "steps") {
        record.set(ParameterKey::Steps, steps);
    }
    if let Some(cfg) = present(params, "cfgscale") {
        record.set(ParameterKey::CfgScale, cfg);
    }
    if let Some(sampler) = truthy(params, "sampler") {
        record.set(ParameterKey::Sampler, sampler);
    }
    if let Some(scheduler) = truthy(params, "scheduler") {
        record.set(ParameterKey::ScheduleType, scheduler);
    }
    if let (Some(width), Some(height)) = (truthy(params, "width"), truthy(params, "height")) {
        record.set(ParameterKey::Size, format!("{width}x{height}"));
    }
    if let Some(creativity) = present(params, "initimagecreativity") {
        record.set(ParameterKey::DenoisingStrength, creativity);
    }

    // Appended even when no model was named, matching what SwarmUI users already see.
    if let Some(vae) = truthy(params, "vae") {
        let model = format!("{} (VAE: {vae})", record.get(ParameterKey::Model));
        record.set(ParameterKey::Model, model);
    }

    record.finish()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::record::NOT_AVAILABLE;
    use serde_json::json;

    #[test]
    fn prompt_and_size() {
        let record = parse_swarmui_metadata(&json!({
            "sui_image_params": {"prompt": "a cat", "width": 512, "height": 768}
        }));

        assert_eq!(record.positive_prompt(), "a cat");
        assert_eq!(record.get(ParameterKey::Size), "512x768");
        assert_eq!(record.negative_prompt(), NOT_AVAILABLE);
    }

    #[test]
    fn every_field() {
        let record = parse_swarmui_metadata(&json!({
            "sui_image_params": {
                "prompt": "forest",
                "negativeprompt": "people",
                "model": "flux1-dev",
                "seed": 1234567890,
                "steps": 25,
                "cfgscale": 3.5,
                "sampler": "euler",
                "scheduler": "simple",
                "width": 1024,
                "height": 1024,
                "initimagecreativity": 0.6,
                "vae": "ae.safetensors"
            },
            "sui_extra_data": {"date": "2024-01-01"}
        }));

        assert_eq!(record.negative_prompt(), "people");
        assert_eq!(record.get(ParameterKey::Model), "flux1-dev (VAE: ae.safetensors)");
        assert_eq!(record.get(ParameterKey::Seed), "1234567890");
        assert_eq!(record.get(ParameterKey::Steps), "25");
        assert_eq!(record.get(ParameterKey::CfgScale), "3.5");
        assert_eq!(record.get(ParameterKey::Sampler), "euler");
        assert_eq!(record.get(ParameterKey::ScheduleType), "simple");
        assert_eq!(record.get(ParameterKey::Size), "1024x1024");
        assert_eq!(record.get(ParameterKey::DenoisingStrength), "0.6");
        assert_eq!(record.get(ParameterKey::ModelHash), NOT_AVAILABLE);
    }

    #[test]
    fn zero_seed_is_still_reported() {
        let record = parse_swarmui_metadata(&json!({"sui_image_params": {"seed": 0, "steps": 0}}));

        assert_eq!(record.get(ParameterKey::Seed), "0");
        assert_eq!(record.get(ParameterKey::Steps), "0");
    }

    #[test]
    fn whitespace_prompt_is_sentinel() {
        let record = parse_swarmui_metadata(&json!({"sui_image_params": {"prompt": "   "}}));
        assert_eq!(record.positive_prompt(), NOT_AVAILABLE);
    }

    #[test]
    fn missing_params_is_all_sentinel() {
        assert_eq!(
            parse_swarmui_metadata(&json!({"sui_extra_data": {}})),
            ParameterRecord::default()
        );
    }
}
