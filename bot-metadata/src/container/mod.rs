//! Pulls the embedded text payload out of an image file without interpreting it.

pub mod jpeg;
pub mod png;

use mizuki_traits::ForwardRefToTracing;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFormat {
    /// `tEXt`/`zTXt` chunks of a PNG.
    Png,
    /// The EXIF `UserComment` of a JPEG.
    Jpeg,
}

impl SourceFormat {
    /// Only PNG and JPEG carry metadata we know how to read.
    pub fn from_content_type(content_type: &str) -> Option<SourceFormat> {
        if content_type.starts_with("image/png") {
            Some(SourceFormat::Png)
        } else if content_type.starts_with("image/jpeg") {
            Some(SourceFormat::Jpeg)
        } else {
            None
        }
    }
}

/// Text found in an image, before any dialect is picked for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawMetadataPayload {
    pub source: SourceFormat,
    pub text: String,
}

/// Extracts the raw payload, or `None` when there is nothing to read.
///
/// Unsupported content types and corrupt containers are not errors to the caller,
/// they are logged and read as "no metadata".
pub fn decode(bytes: &[u8], content_type: &str) -> Option<RawMetadataPayload> {
    let source = SourceFormat::from_content_type(content_type)?;

    let text = match source {
        SourceFormat::Png => png::read_text(bytes),
        SourceFormat::Jpeg => jpeg::read_user_comment(bytes),
    }
    .trace_warn_ok()
    .flatten()?;

    Some(RawMetadataPayload { source, text })
}
