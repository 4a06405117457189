use crate::error::{ChunkError, ContainerError};
use flate2::{Crc, read::ZlibDecoder};
use mizuki_traits::ForwardRefToTracing;
use nom::{
    IResult,
    bytes::complete::{tag, take},
    number::complete::be_u32,
};
use std::io::Read;

const SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

struct Chunk<'a> {
    kind: &'a [u8],
    data: &'a [u8],
    crc: u32,
}

impl Chunk<'_> {
    fn name(&self) -> String {
        String::from_utf8_lossy(self.kind).into_owned()
    }

    fn crc_matches(&self) -> bool {
        let mut crc = Crc::new();
        crc.update(self.kind);
        crc.update(self.data);
        crc.sum() == self.crc
    }
}

fn signature(input: &[u8]) -> IResult<&[u8], &[u8]> {
    tag(SIGNATURE)(input)
}

fn chunk(input: &[u8]) -> IResult<&[u8], Chunk<'_>> {
    let (input, length) = be_u32(input)?;
    let (input, kind) = take(4usize)(input)?;
    let (input, data) = take(length as usize)(input)?;
    let (input, crc) = be_u32(input)?;
    Ok((input, Chunk { kind, data, crc }))
}

/// Reads every `tEXt` and `zTXt` chunk in file order and joins their text with newlines.
///
/// `Ok(None)` means the file is a valid PNG without any such chunk.
pub fn read_text(bytes: &[u8]) -> Result<Option<String>, ContainerError> {
    let (mut input, _) = signature(bytes).map_err(|_| ContainerError::NotPng)?;
    let mut texts = vec![];

    loop {
        if input.is_empty() {
            return Err(ContainerError::MissingEnd);
        }

        let (rest, chunk) = chunk(input).map_err(|_| ContainerError::TruncatedChunk {
            offset: bytes.len() - input.len(),
        })?;

        if !chunk.crc_matches() {
            return Err(ContainerError::CrcMismatch {
                chunk: chunk.name(),
            });
        }

        match chunk.kind {
            b"tEXt" => texts.extend(decode_text(chunk.data).trace_warn_ok()),
            b"zTXt" => texts.extend(decode_compressed_text(chunk.data).trace_warn_ok()),
            b"IEND" => break,
            _ => {}
        }

        input = rest;
    }

    if texts.is_empty() {
        return Ok(None);
    }

    Ok(Some(texts.join("\n")))
}

fn split_keyword<'a>(data: &'a [u8], chunk: &'static str) -> Result<&'a [u8], ChunkError> {
    data.iter()
        .position(|&b| b == 0)
        .map(|separator| &data[separator + 1..])
        .ok_or(ChunkError::MissingSeparator { chunk })
}

fn decode_text(data: &[u8]) -> Result<String, ChunkError> {
    split_keyword(data, "tEXt").map(bytes_to_string)
}

fn decode_compressed_text(data: &[u8]) -> Result<String, ChunkError> {
    let rest = split_keyword(data, "zTXt")?;
    let (&method, compressed) = rest
        .split_first()
        .ok_or(ChunkError::Truncated { chunk: "zTXt" })?;

    if method != 0 {
        return Err(ChunkError::UnknownCompression(method));
    }

    let mut inflated = vec![];
    ZlibDecoder::new(compressed).read_to_end(&mut inflated)?;

    Ok(bytes_to_string(&inflated))
}

/// PNG text is Latin-1 on paper, but plenty of generators write UTF-8 into it.
fn bytes_to_string(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_owned(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
