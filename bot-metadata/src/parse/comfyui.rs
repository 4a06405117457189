use crate::{
    record::{NOT_AVAILABLE, ParameterKey, ParameterRecord, RecordBuilder},
    value::{is_truthy, present, truthy},
};
use serde_json::{Map, Value};

/// Turns a ComfyUI metadata object into a record.
///
/// Kept behind a trait so a resolver that follows node links can replace the
/// literal scan without touching callers.
pub trait WorkflowInterpreter {
    fn interpret(&self, metadata: &Value) -> ParameterRecord;
}

/// Reads literal inputs off well-known node types under `workflow.nodes`.
///
/// Links between nodes are never followed. The first two `CLIPTextEncode`
/// nodes become the positive and negative prompt in node order, whatever the
/// sampler actually wires them to.
#[derive(Clone, Copy, Debug, Default)]
pub struct LiteralNodeScan;

const SAMPLER_INPUTS: [(&str, ParameterKey); 5] = [
    ("seed", ParameterKey::Seed),
    ("steps", ParameterKey::Steps),
    ("cfg", ParameterKey::CfgScale),
    ("sampler_name", ParameterKey::Sampler),
    ("denoise", ParameterKey::DenoisingStrength),
];

impl WorkflowInterpreter for LiteralNodeScan {
    fn interpret(&self, metadata: &Value) -> ParameterRecord {
        let mut record = RecordBuilder::default();

        let Some(nodes) = metadata
            .get("workflow")
            .filter(|workflow| is_truthy(workflow))
            .and_then(|workflow| workflow.get("nodes"))
        else {
            return record.finish();
        };

        for node in ordered_nodes(nodes) {
            let Some(class_type) = node.get("class_type").and_then(Value::as_str) else {
                continue;
            };
            let Some(inputs) = node.get("inputs").and_then(Value::as_object) else {
                continue;
            };

            read_node(&mut record, class_type, inputs);
        }

        record.finish()
    }
}

fn read_node(record: &mut RecordBuilder, class_type: &str, inputs: &Map<String, Value>) {
    match class_type {
        "KSampler" | "KSamplerAdvanced" => {
            for (input, key) in SAMPLER_INPUTS {
                if let Some(value) = present(inputs, input) {
                    record.set(key, value);
                }
            }

            if let Some(schedule) = present(inputs, "schedule") {
                record.set(ParameterKey::ScheduleType, schedule);
            }
        }
        "CheckpointLoaderSimple" => {
            if let Some(checkpoint) = present(inputs, "ckpt_name") {
                record.set(ParameterKey::Model, checkpoint);
            }
        }
        "CLIPTextEncode" => {
            let Some(text) = inputs
                .get("text")
                .and_then(Value::as_str)
                .filter(|text| !text.is_empty())
            else {
                return;
            };

            if record.positive_prompt() == NOT_AVAILABLE {
                record.set_positive_prompt(text);
            } else if record.negative_prompt() == NOT_AVAILABLE {
                record.set_negative_prompt(text);
            }
        }
        "LoraLoader" => {
            if let Some(lora) = truthy(inputs, "lora_name") {
                let model = match record.get(ParameterKey::Model) {
                    NOT_AVAILABLE => format!("Lora: {lora}"),
                    model => format!("{model} + Lora: {lora}"),
                };
                record.set(ParameterKey::Model, model);
            }
        }
        "ImageScale" => {
            if let (Some(width), Some(height)) = (truthy(inputs, "width"), truthy(inputs, "height"))
            {
                record.set(ParameterKey::Size, format!("{width}x{height}"));
            }
        }
        _ => {}
    }
}

/// Node order as the generator's own runtime would walk it: integer ids
/// ascending, then any other ids in document order.
fn ordered_nodes(nodes: &Value) -> Vec<&Value> {
    match nodes {
        Value::Object(map) => {
            let mut entries = map.iter().collect::<Vec<_>>();
            entries.sort_by_key(|(id, _)| array_index(id).map_or((1, 0), |index| (0, index)));
            entries.into_iter().map(|(_, node)| node).collect()
        }
        Value::Array(nodes) => nodes.iter().collect(),
        _ => vec![],
    }
}

fn array_index(id: &str) -> Option<u32> {
    id.parse::<u32>()
        .ok()
        .filter(|index| *index != u32::MAX && index.to_string() == id)
}

pub fn parse_comfyui_metadata(metadata: &Value) -> ParameterRecord {
    LiteralNodeScan.interpret(metadata)
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn nodes(nodes: Value) -> Value {
        json!({ "workflow": { "nodes": nodes } })
    }

    #[test]
    fn checkpoint_and_sampler() {
        let record = parse_comfyui_metadata(&nodes(json!({
            "4": {"class_type": "CheckpointLoaderSimple", "inputs": {"ckpt_name": "modelA.safetensors"}},
            "3": {"class_type": "KSampler", "inputs": {
                "seed": 42, "steps": 30, "cfg": 7, "sampler_name": "euler_a",
                "model": ["4", 0], "positive": ["6", 0]
            }},
        })));

        assert_eq!(record.get(ParameterKey::Model), "modelA.safetensors");
        assert_eq!(record.get(ParameterKey::Seed), "42");
        assert_eq!(record.get(ParameterKey::Steps), "30");
        assert_eq!(record.get(ParameterKey::CfgScale), "7");
        assert_eq!(record.get(ParameterKey::Sampler), "euler_a");
        assert_eq!(record.get(ParameterKey::DenoisingStrength), NOT_AVAILABLE);
        assert_eq!(record.positive_prompt(), NOT_AVAILABLE);
    }

    #[test]
    fn float_inputs_print_without_trailing_zero() {
        let record = parse_comfyui_metadata(&nodes(json!({
            "3": {"class_type": "KSamplerAdvanced", "inputs": {"cfg": 7.0, "denoise": 0.55}},
        })));

        assert_eq!(record.get(ParameterKey::CfgScale), "7");
        assert_eq!(record.get(ParameterKey::DenoisingStrength), "0.55");
    }

    #[test]
    fn schedule_comes_from_the_schedule_input_only() {
        let record = parse_comfyui_metadata(&nodes(json!({
            "3": {"class_type": "KSampler", "inputs": {"schedule": "karras", "scheduler": "normal"}},
        })));
        assert_eq!(record.get(ParameterKey::ScheduleType), "karras");

        let record = parse_comfyui_metadata(&nodes(json!({
            "3": {"class_type": "KSampler", "inputs": {"scheduler": "karras"}},
        })));
        assert_eq!(record.get(ParameterKey::ScheduleType), NOT_AVAILABLE);

        let record = parse_comfyui_metadata(&nodes(json!({
            "3": {"class_type": "KSampler", "inputs": {"schedule": null}},
        })));
        assert_eq!(record.get(ParameterKey::ScheduleType), "null");
    }

    #[test]
    fn text_encoders_in_numeric_id_order() {
        let record = parse_comfyui_metadata(&nodes(json!({
            "10": {"class_type": "CLIPTextEncode", "inputs": {"text": "third"}},
            "7": {"class_type": "CLIPTextEncode", "inputs": {"text": "blurry"}},
            "6": {"class_type": "CLIPTextEncode", "inputs": {"text": "a cute cat"}},
        })));

        assert_eq!(record.positive_prompt(), "a cute cat");
        assert_eq!(record.negative_prompt(), "blurry");
    }

    #[test]
    fn linked_text_is_not_a_prompt() {
        let record = parse_comfyui_metadata(&nodes(json!({
            "6": {"class_type": "CLIPTextEncode", "inputs": {"text": ["12", 0]}},
            "7": {"class_type": "CLIPTextEncode", "inputs": {"text": ""}},
            "8": {"class_type": "CLIPTextEncode", "inputs": {"text": "sunset"}},
        })));

        assert_eq!(record.positive_prompt(), "sunset");
        assert_eq!(record.negative_prompt(), NOT_AVAILABLE);
    }

    #[test]
    fn loras_accumulate_onto_model() {
        let record = parse_comfyui_metadata(&nodes(json!([
            {"class_type": "LoraLoader", "inputs": {"lora_name": "first.safetensors"}},
            {"class_type": "LoraLoader", "inputs": {"lora_name": "second.safetensors"}},
            {"class_type": "LoraLoader", "inputs": {"lora_name": ""}},
        ])));

        assert_eq!(
            record.get(ParameterKey::Model),
            "Lora: first.safetensors + Lora: second.safetensors"
        );
    }

    #[test]
    fn image_scale_needs_both_sides() {
        let record = parse_comfyui_metadata(&nodes(json!({
            "1": {"class_type": "ImageScale", "inputs": {"width": 1024, "height": 1536}},
            "2": {"class_type": "ImageScale", "inputs": {"width": 0, "height": 64}},
        })));

        assert_eq!(record.get(ParameterKey::Size), "1024x1536");
    }

    #[test]
    fn unknown_nodes_are_ignored() {
        let record = parse_comfyui_metadata(&nodes(json!({
            "1": {"class_type": "VAEDecode", "inputs": {"samples": ["3", 0]}},
            "2": {"class_type": "SaveImage"},
            "3": "not even a node",
        })));

        assert_eq!(record, ParameterRecord::default());
    }

    #[test]
    fn missing_workflow_is_all_sentinel() {
        let api_format = json!({
            "prompt": {"3": {"class_type": "KSampler", "inputs": {"seed": 1}}}
        });

        assert_eq!(parse_comfyui_metadata(&api_format), ParameterRecord::default());
        assert_eq!(
            parse_comfyui_metadata(&json!({"workflow": "v1"})),
            ParameterRecord::default()
        );
    }

    #[test]
    fn numeric_ids_sort_before_named_ones() {
        let ids = json!({"b": 1, "10": 2, "a": 3, "2": 4});
        let order = ordered_nodes(&ids)
            .into_iter()
            .filter_map(Value::as_i64)
            .collect::<Vec<_>>();

        assert_eq!(order, [4, 2, 1, 3]);
        assert_eq!(array_index("02"), None);
        assert_eq!(array_index("0"), Some(0));
    }
}
