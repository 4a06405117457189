//! End to end lookups against a local HTTP server.

use flate2::Crc;
use mizuki_metadata::{DialectTag, MetadataClient, ParameterKey, get_metadata};
use std::sync::Once;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT: Once = Once::new();

fn setup_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}

fn chunk(kind: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut crc = Crc::new();
    crc.update(kind);
    crc.update(data);

    let mut out = (data.len() as u32).to_be_bytes().to_vec();
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    out.extend_from_slice(&crc.sum().to_be_bytes());
    out
}

fn png_with_text(text: &str) -> Vec<u8> {
    let mut data = b"parameters\0".to_vec();
    data.extend_from_slice(text.as_bytes());

    let mut out = b"\x89PNG\r\n\x1a\n".to_vec();
    out.extend(chunk(b"IHDR", &[0, 0, 0, 1, 0, 0, 0, 1, 8, 0, 0, 0, 0]));
    out.extend(chunk(b"tEXt", &data));
    out.extend(chunk(b"IEND", &[]));
    out
}

async fn serve(route: &str, response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn reads_legacy_text_from_served_png() {
    setup_tracing();
    let png = png_with_text("a cat\nNegative prompt: dog\nSteps: 20, Sampler: Euler, Seed: 123");
    let server = serve("/cat.png", ResponseTemplate::new(200).set_body_bytes(png)).await;

    let payload = MetadataClient::default()
        .get_metadata(&format!("{}/cat.png", server.uri()), "image/png")
        .await
        .expect("metadata should be found");

    assert_eq!(payload.tag(), DialectTag::LegacyText);

    let record = payload.parse();
    assert_eq!(record.positive_prompt(), "a cat");
    assert_eq!(record.negative_prompt(), "dog");
    assert_eq!(record.get(ParameterKey::Seed), "123");
}

#[tokio::test]
async fn reads_swarm_json_from_served_png() {
    setup_tracing();
    let png = png_with_text(r#"{"sui_image_params": {"prompt": "a cat", "width": 512, "height": 768}}"#);
    let server = serve("/swarm.png", ResponseTemplate::new(200).set_body_bytes(png)).await;

    let payload = get_metadata(&format!("{}/swarm.png", server.uri()), "image/png")
        .await
        .expect("metadata should be found");

    assert_eq!(payload.tag(), DialectTag::SwarmUi);
    assert_eq!(payload.parse().get(ParameterKey::Size), "512x768");
}

#[tokio::test]
async fn not_found_is_no_metadata() {
    setup_tracing();
    let server = serve("/gone.png", ResponseTemplate::new(404)).await;
    let client = MetadataClient::default();
    let url = format!("{}/gone.png", server.uri());

    assert!(client.get_metadata(&url, "image/png").await.is_none());
    assert!(client.fetch(&url).await.is_err());
}

#[tokio::test]
async fn unreachable_host_is_no_metadata() {
    setup_tracing();
    // Port 9 (discard) is not listening on test machines.
    let result = get_metadata("http://127.0.0.1:9/image.png", "image/png").await;

    assert!(result.is_none());
}

#[tokio::test]
async fn unsupported_type_is_not_fetched() {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = get_metadata(&format!("{}/anim.gif", server.uri()), "image/gif").await;

    assert!(result.is_none());
}

#[tokio::test]
async fn image_without_text_is_no_metadata() {
    setup_tracing();
    let mut png = b"\x89PNG\r\n\x1a\n".to_vec();
    png.extend(chunk(b"IHDR", &[0, 0, 0, 1, 0, 0, 0, 1, 8, 0, 0, 0, 0]));
    png.extend(chunk(b"IEND", &[]));
    let server = serve("/plain.png", ResponseTemplate::new(200).set_body_bytes(png)).await;

    let result = get_metadata(&format!("{}/plain.png", server.uri()), "image/png").await;

    assert!(result.is_none());
}
