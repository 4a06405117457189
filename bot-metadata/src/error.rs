use thiserror::Error;

/// Failure to retrieve an image over HTTP.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to fetch image: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Image request failed with status {0}")]
    Status(reqwest::StatusCode),
}

/// The image container itself could not be read.
#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("Missing PNG signature")]
    NotPng,
    #[error("Truncated PNG chunk after {offset} bytes")]
    TruncatedChunk { offset: usize },
    #[error("CRC mismatch in {chunk} chunk")]
    CrcMismatch { chunk: String },
    #[error("PNG ended without an IEND chunk")]
    MissingEnd,
    #[error("Failed to read EXIF: {0}")]
    Exif(#[from] exif::Error),
}

/// A single text chunk that could not be decoded. The rest of the image is still read.
#[derive(Error, Debug)]
pub enum ChunkError {
    #[error("{chunk} chunk has no keyword separator")]
    MissingSeparator { chunk: &'static str },
    #[error("{chunk} chunk ends before its compression method")]
    Truncated { chunk: &'static str },
    #[error("Unknown compression method {0} in zTXt chunk")]
    UnknownCompression(u8),
    #[error("Failed to inflate zTXt chunk: {0}")]
    Inflate(#[from] std::io::Error),
}
