mod comfyui;
mod legacy;
mod swarmui;

pub use comfyui::{LiteralNodeScan, WorkflowInterpreter, parse_comfyui_metadata};
pub use legacy::parse_stable_diffusion_metadata;
pub use swarmui::parse_swarmui_metadata;

use crate::{classify::MetadataPayload, record::ParameterRecord};

impl MetadataPayload {
    /// Runs the one parser that understands this dialect.
    pub fn parse(&self) -> ParameterRecord {
        match self {
            MetadataPayload::LegacyText(text) => parse_stable_diffusion_metadata(text),
            MetadataPayload::ComfyUi(json) => parse_comfyui_metadata(json),
            MetadataPayload::SwarmUi(json) => parse_swarmui_metadata(json),
        }
    }
}
