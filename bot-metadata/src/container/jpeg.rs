use crate::error::ContainerError;
use exif::{In, Reader, Tag, Value};
use std::io::Cursor;

const ASCII_HEADER: &[u8] = b"ASCII\0\0\0";
const UNICODE_HEADER: &[u8] = b"UNICODE\0";
const JIS_HEADER: &[u8] = b"JIS\0\0\0\0\0";
const UNDEFINED_HEADER: &[u8] = &[0; 8];

/// Reads the EXIF `UserComment` tag as text.
///
/// A JPEG without EXIF, or with EXIF but no usable comment, is `Ok(None)`.
pub fn read_user_comment(bytes: &[u8]) -> Result<Option<String>, ContainerError> {
    let exif = match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_)) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let Some(field) = exif.get_field(Tag::UserComment, In::PRIMARY) else {
        return Ok(None);
    };

    let comment = match &field.value {
        Value::Undefined(raw, _) => decode_user_comment(raw),
        Value::Ascii(lines) => lines
            .iter()
            .map(|line| decode_utf8(line))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => field.display_value().to_string(),
    };

    let comment = comment.trim_end_matches('\0');

    Ok((!comment.is_empty()).then(|| comment.to_owned()))
}

fn decode_user_comment(raw: &[u8]) -> String {
    if raw.len() < 8 {
        return decode_utf8(raw);
    }

    let (header, payload) = raw.split_at(8);

    if header == UNICODE_HEADER {
        decode_utf16(payload)
    } else if header == ASCII_HEADER || header == JIS_HEADER || header == UNDEFINED_HEADER {
        decode_utf8(payload)
    } else {
        decode_utf8(raw)
    }
}

fn decode_utf8(bytes: &[u8]) -> String {
    match String::from_utf8(bytes.to_vec()) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("UserComment is not valid UTF-8, using it lossily: {e}");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

fn decode_utf16(bytes: &[u8]) -> String {
    let (big_endian, body) = match bytes {
        [0xfe, 0xff, rest @ ..] => (true, rest),
        [0xff, 0xfe, rest @ ..] => (false, rest),
        _ => (looks_big_endian(bytes), bytes),
    };

    let units = body.chunks_exact(2).map(|pair| {
        let pair = [pair[0], pair[1]];
        if big_endian {
            u16::from_be_bytes(pair)
        } else {
            u16::from_le_bytes(pair)
        }
    });

    char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Mostly-ASCII text has its zero bytes first in each pair when big-endian.
fn looks_big_endian(bytes: &[u8]) -> bool {
    let zeros_at = |offset: usize| {
        bytes
            .iter()
            .skip(offset)
            .step_by(2)
            .filter(|&&b| b == 0)
            .count()
    };

    zeros_at(0) >= zeros_at(1)
}

#[cfg(test)]
pub(crate) mod fixture {
    /// A minimal big-endian JPEG whose Exif IFD holds one UserComment entry.
    pub fn jpeg_with_user_comment(comment: &[u8]) -> Vec<u8> {
        let mut tiff = b"MM\0\x2a\0\0\0\x08".to_vec();

        // IFD0: a single pointer to the Exif IFD at offset 26.
        tiff.extend_from_slice(&1u16.to_be_bytes());
        tiff.extend_from_slice(&0x8769u16.to_be_bytes());
        tiff.extend_from_slice(&4u16.to_be_bytes());
        tiff.extend_from_slice(&1u32.to_be_bytes());
        tiff.extend_from_slice(&26u32.to_be_bytes());
        tiff.extend_from_slice(&0u32.to_be_bytes());

        // Exif IFD: UserComment stored out of line at offset 44.
        tiff.extend_from_slice(&1u16.to_be_bytes());
        tiff.extend_from_slice(&0x9286u16.to_be_bytes());
        tiff.extend_from_slice(&7u16.to_be_bytes());
        tiff.extend_from_slice(&(comment.len() as u32).to_be_bytes());
        tiff.extend_from_slice(&44u32.to_be_bytes());
        tiff.extend_from_slice(&0u32.to_be_bytes());
        tiff.extend_from_slice(comment);

        jpeg_with_tiff(&tiff)
    }

    pub fn jpeg_with_tiff(tiff: &[u8]) -> Vec<u8> {
        let mut app1 = b"Exif\0\0".to_vec();
        app1.extend_from_slice(tiff);

        let mut out = vec![0xff, 0xd8, 0xff, 0xe1];
        out.extend_from_slice(&((app1.len() + 2) as u16).to_be_bytes());
        out.extend(app1);
        out.extend_from_slice(&[0xff, 0xd9]);
        out
    }

    pub fn ascii_comment(text: &str) -> Vec<u8> {
        let mut comment = b"ASCII\0\0\0".to_vec();
        comment.extend_from_slice(text.as_bytes());
        comment
    }
}
