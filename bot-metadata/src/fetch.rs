use crate::{
    classify::MetadataPayload,
    container::{self, SourceFormat},
    error::FetchError,
};
use mizuki_traits::ForwardRefToTracing;

/// Downloads images and pulls their generation metadata.
///
/// One request per call, no retries. Timeouts are whatever the wrapped
/// `reqwest::Client` was built with.
#[derive(Clone, Debug, Default)]
pub struct MetadataClient {
    http: reqwest::Client,
}

impl MetadataClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// `None` covers every way of not finding metadata: an unsupported content
    /// type, a failed download, a corrupt container or an image without text.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get_metadata(&self, url: &str, content_type: &str) -> Option<MetadataPayload> {
        if SourceFormat::from_content_type(content_type).is_none() {
            tracing::debug!("Skipping unsupported content type");
            return None;
        }

        let bytes = self.fetch(url).await.trace_warn_ok()?;
        let payload = MetadataPayload::from(container::decode(&bytes, content_type)?);

        tracing::debug!("Found {:?} metadata", payload.tag());

        Some(payload)
    }
}

/// Shorthand for a one-off lookup with a default client.
pub async fn get_metadata(url: &str, content_type: &str) -> Option<MetadataPayload> {
    MetadataClient::default()
        .get_metadata(url, content_type)
        .await
}
