mod common;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PREDICT_PATH: &str = "/v1/projects/demo-project/locations/us-central1/publishers/google/models/imagen-3.0-generate-002:predict";
const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-image";

fn vertex_env(server: &MockServer) -> Vec<(&'static str, String)> {
    vec![
        ("GOOGLE_CLOUD_PROJECT", "demo-project".to_string()),
        ("VERTEX_ACCESS_TOKEN", "vertex-token".to_string()),
        ("VERTEX_API_BASE", server.uri()),
    ]
}

async fn mount_prediction(server: &MockServer, aspect_ratio: &str) {
    Mock::given(method("POST"))
        .and(path(PREDICT_PATH))
        .and(header("Authorization", "Bearer vertex-token"))
        .and(body_partial_json(json!({
            "instances": [{"prompt": "A lighthouse at dusk"}],
            "parameters": {"sampleCount": 1, "aspectRatio": aspect_ratio}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [{
                "bytesBase64Encoded": STANDARD.encode(PNG_BYTES),
                "mimeType": "image/png"
            }]
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn returns_base64_without_output_path() -> Result<(), Box<dyn std::error::Error>> {
    let vertex = MockServer::start().await;
    mount_prediction(&vertex, "1:1").await;

    let dir = tempdir()?;
    let mut server = common::spawn_server(dir.path(), &vertex_env(&vertex))?;
    let result = server.call_tool(
        "vertex.generate_image",
        json!({"prompt": "A lighthouse at dusk"}),
    )?;

    assert!(!common::is_error(&result), "unexpected error: {result}");
    let encoded = result["structuredContent"]["image_data"]
        .as_str()
        .expect("image_data");
    assert_eq!(STANDARD.decode(encoded)?, PNG_BYTES);
    assert_eq!(result["structuredContent"]["mime_type"], "image/png");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn saves_image_when_path_given() -> Result<(), Box<dyn std::error::Error>> {
    let vertex = MockServer::start().await;
    mount_prediction(&vertex, "16:9").await;

    let dir = tempdir()?;
    let target = dir.path().join("generated_images").join("lighthouse.png");
    let mut server = common::spawn_server(dir.path(), &vertex_env(&vertex))?;
    let result = server.call_tool(
        "vertex.generate_image",
        json!({
            "prompt": "A lighthouse at dusk",
            "aspect_ratio": "16:9",
            "save_to_file": target.to_string_lossy()
        }),
    )?;

    assert!(!common::is_error(&result), "unexpected error: {result}");
    assert_eq!(std::fs::read(&target)?, PNG_BYTES);
    assert_eq!(
        result["structuredContent"]["file_path"].as_str(),
        Some(target.to_string_lossy().as_ref())
    );
    assert_eq!(result["content"][1]["mimeType"], "image/png");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_predictions_are_missing_artifact() -> Result<(), Box<dyn std::error::Error>> {
    let vertex = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PREDICT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"predictions": []})))
        .expect(1)
        .mount(&vertex)
        .await;

    let dir = tempdir()?;
    let mut server = common::spawn_server(dir.path(), &vertex_env(&vertex))?;
    let result = server.call_tool(
        "vertex.generate_image",
        json!({"prompt": "Something filtered"}),
    )?;

    assert_eq!(common::error_kind(&result), Some("missing_artifact"));
    Ok(())
}

#[test]
fn unsupported_aspect_ratio_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let env = vec![
        ("GOOGLE_CLOUD_PROJECT", "demo-project".to_string()),
        ("VERTEX_ACCESS_TOKEN", "vertex-token".to_string()),
    ];
    let mut server = common::spawn_server(dir.path(), &env)?;
    let result = server.call_tool(
        "vertex.generate_image",
        json!({"prompt": "A lighthouse", "aspect_ratio": "2:1"}),
    )?;
    assert_eq!(common::error_kind(&result), Some("invalid_input"));
    Ok(())
}
