use crate::poller::{JobBackend, JobSnapshot, JobStatus};
use crate::remote::{self, RemoteError};
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

pub mod types;

use types::{
    AvatarList, Character, Dimension, Envelope, GenerateVideoRequest, GeneratedVideo, VideoInput,
    VideoPage, VideoStatus, Voice, VoiceList,
};

pub const DEFAULT_AVATAR_ID: &str = "Abigail_expressive_2024112501";
pub const DEFAULT_VOICE_ID: &str = "26b2064088674c80b1e5fc5ab1a068eb";
pub const DEFAULT_DIMENSION: Dimension = Dimension {
    width: 720,
    height: 1280,
};

#[derive(Debug, Clone)]
pub struct VideoSpec<'a> {
    pub script: &'a str,
    pub avatar_id: &'a str,
    pub voice_id: &'a str,
    pub dimension: Dimension,
}

pub struct HeyGenClient<'a> {
    http: &'a Client,
    api_base: String,
    api_key: &'a str,
}

impl<'a> HeyGenClient<'a> {
    pub fn new(http: &'a Client, api_base: &str, api_key: &'a str) -> Self {
        Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.api_base);
        debug!(%url, "heygen GET");
        self.http
            .get(url)
            .header("X-Api-Key", self.api_key)
            .header("Accept", "application/json")
    }

    fn data<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, RemoteError> {
        let envelope: Envelope<T> = remote::read_json(request.send()?)?;
        envelope
            .data
            .ok_or_else(|| RemoteError::Decode("response has no data field".to_string()))
    }

    pub fn generate_video(&self, spec: &VideoSpec<'_>) -> Result<String, RemoteError> {
        let body = GenerateVideoRequest {
            video_inputs: vec![VideoInput {
                character: Character {
                    kind: "avatar",
                    avatar_id: spec.avatar_id,
                },
                voice: Voice {
                    kind: "text",
                    voice_id: spec.voice_id,
                    input_text: spec.script,
                },
            }],
            dimension: spec.dimension,
        };
        let url = format!("{}/v2/video/generate", self.api_base);
        debug!(%url, avatar_id = spec.avatar_id, "heygen POST");
        let request = self
            .http
            .post(url)
            .header("X-Api-Key", self.api_key)
            .header("Accept", "application/json")
            .json(&body);
        let generated: GeneratedVideo = Self::data(request)?;
        Ok(generated.video_id)
    }

    pub fn voices(&self) -> Result<VoiceList, RemoteError> {
        Self::data(self.get("/v2/voices"))
    }

    pub fn avatars(&self) -> Result<AvatarList, RemoteError> {
        Self::data(self.get("/v2/avatars"))
    }

    pub fn list_videos(
        &self,
        limit: Option<u64>,
        token: Option<&str>,
    ) -> Result<Envelope<VideoPage>, RemoteError> {
        let mut request = self.get("/v1/video.list");
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit.to_string())]);
        }
        if let Some(token) = token {
            request = request.query(&[("token", token)]);
        }
        remote::read_json(request.send()?)
    }
}

impl JobBackend for HeyGenClient<'_> {
    fn job_status(&self, job_id: &str) -> Result<JobSnapshot, RemoteError> {
        let request = self
            .get("/v1/video_status.get")
            .query(&[("video_id", job_id)]);
        let status: VideoStatus = Self::data(request)?;
        let failure_reason = status.failure_reason();
        Ok(JobSnapshot {
            status: JobStatus::from_remote(&status.status),
            artifact_url: status.video_url,
            failure_reason,
        })
    }

    // Video URLs are pre-signed; the api key is not sent to the CDN.
    fn fetch_artifact(&self, url: &str) -> Result<Vec<u8>, RemoteError> {
        remote::read_bytes(self.http.get(url).send()?)
    }
}
