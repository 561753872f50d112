//! Imagen text-to-image predictions on Vertex AI.

use crate::config::VertexSettings;
use crate::remote::{self, RemoteError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_ASPECT_RATIO: &str = "1:1";
pub const ASPECT_RATIOS: [&str; 5] = ["1:1", "3:4", "4:3", "9:16", "16:9"];

#[derive(Debug, Error)]
pub enum VertexError {
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error("model returned no image")]
    NoImage,
    #[error("image payload is not valid base64: {0}")]
    InvalidPayload(String),
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    instances: [Instance<'a>; 1],
    parameters: Parameters<'a>,
}

#[derive(Serialize)]
struct Instance<'a> {
    prompt: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Parameters<'a> {
    sample_count: u32,
    language: &'static str,
    aspect_ratio: &'a str,
    safety_setting: &'static str,
    person_generation: &'static str,
}

#[derive(Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    #[serde(default)]
    bytes_base64_encoded: Option<String>,
    #[serde(default)]
    mime_type: Option<String>,
}

#[derive(Debug)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

pub struct VertexClient<'a> {
    http: &'a Client,
    endpoint: String,
    access_token: &'a str,
}

impl<'a> VertexClient<'a> {
    pub fn new(
        http: &'a Client,
        settings: &VertexSettings,
        project: &str,
        access_token: &'a str,
    ) -> Self {
        let endpoint = format!(
            "{}/v1/projects/{project}/locations/{}/publishers/google/models/{}:predict",
            settings.api_base(),
            settings.location,
            settings.model
        );
        Self {
            http,
            endpoint,
            access_token,
        }
    }

    pub fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: &str,
    ) -> Result<GeneratedImage, VertexError> {
        let body = PredictRequest {
            instances: [Instance { prompt }],
            parameters: Parameters {
                sample_count: 1,
                language: "en",
                aspect_ratio,
                safety_setting: "block_some",
                person_generation: "allow_adult",
            },
        };
        debug!(endpoint = %self.endpoint, aspect_ratio, "requesting image prediction");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(self.access_token)
            .json(&body)
            .send()
            .map_err(RemoteError::from)?;
        let parsed: PredictResponse = remote::read_json(response)?;

        let prediction = parsed
            .predictions
            .into_iter()
            .find(|prediction| prediction.bytes_base64_encoded.is_some())
            .ok_or(VertexError::NoImage)?;
        let encoded = prediction.bytes_base64_encoded.unwrap_or_default();
        let bytes = STANDARD
            .decode(encoded.as_bytes())
            .map_err(|err| VertexError::InvalidPayload(err.to_string()))?;
        info!(bytes = bytes.len(), "image generated");

        Ok(GeneratedImage {
            bytes,
            mime_type: prediction
                .mime_type
                .unwrap_or_else(|| "image/png".to_string()),
        })
    }
}
