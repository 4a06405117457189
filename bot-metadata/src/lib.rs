//! Reads image-generation parameters out of PNG and JPEG files.
//!
//! The pipeline is fetch, then container decoding, then dialect
//! classification, then one of three parsers:
//!
//! ```text
//! MetadataClient::get_metadata ─► container::decode ─► MetadataPayload ─► parse() ─► ParameterRecord
//! ```
//!
//! Nothing here returns an error past [`MetadataClient::get_metadata`]: failures
//! are logged and read as "no metadata".

mod classify;
pub mod container;
mod error;
mod fetch;
mod parse;
mod record;
mod value;

pub use classify::{DialectTag, MetadataPayload, classify};
pub use container::{RawMetadataPayload, SourceFormat};
pub use error::{ChunkError, ContainerError, FetchError};
pub use fetch::{MetadataClient, get_metadata};
pub use parse::{
    LiteralNodeScan, WorkflowInterpreter, parse_comfyui_metadata, parse_stable_diffusion_metadata,
    parse_swarmui_metadata,
};
pub use record::{NOT_AVAILABLE, ParameterKey, ParameterRecord};
