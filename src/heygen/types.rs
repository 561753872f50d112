use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

#[derive(Debug, Serialize)]
pub struct GenerateVideoRequest<'a> {
    pub video_inputs: Vec<VideoInput<'a>>,
    pub dimension: Dimension,
}

#[derive(Debug, Serialize)]
pub struct VideoInput<'a> {
    pub character: Character<'a>,
    pub voice: Voice<'a>,
}

#[derive(Debug, Serialize)]
pub struct Character<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub avatar_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct Voice<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub voice_id: &'a str,
    pub input_text: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimension {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize)]
pub struct GeneratedVideo {
    pub video_id: String,
}

#[derive(Debug, Deserialize)]
pub struct VideoStatus {
    pub status: String,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub error: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct VoiceList {
    #[serde(default)]
    pub voices: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct AvatarList {
    #[serde(default)]
    pub avatars: Vec<Value>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VideoPage {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub videos: Vec<VideoSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoSummary {
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<Value>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl VideoStatus {
    /// Failure detail as reported by the status endpoint, if any.
    pub fn failure_reason(&self) -> Option<String> {
        match &self.error {
            None | Some(Value::Null) => None,
            Some(Value::String(message)) => Some(message.clone()),
            Some(Value::Object(fields)) => fields
                .get("message")
                .and_then(|value| value.as_str())
                .map(str::to_string)
                .or_else(|| Some(Value::Object(fields.clone()).to_string())),
            Some(other) => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn generate_request_shape() {
        let request = GenerateVideoRequest {
            video_inputs: vec![VideoInput {
                character: Character {
                    kind: "avatar",
                    avatar_id: "avatar-1",
                },
                voice: Voice {
                    kind: "text",
                    voice_id: "voice-1",
                    input_text: "Hello there",
                },
            }],
            dimension: Dimension {
                width: 720,
                height: 1280,
            },
        };
        assert_eq!(
            serde_json::to_value(&request).expect("json"),
            json!({
                "video_inputs": [{
                    "character": {"type": "avatar", "avatar_id": "avatar-1"},
                    "voice": {"type": "text", "voice_id": "voice-1", "input_text": "Hello there"}
                }],
                "dimension": {"width": 720, "height": 1280}
            })
        );
    }

    #[test]
    fn status_failure_reason() {
        let status: Envelope<VideoStatus> = serde_json::from_value(json!({
            "code": 100,
            "data": {
                "status": "failed",
                "video_url": null,
                "error": {"code": 40001, "message": "avatar not found"}
            }
        }))
        .expect("status");
        let data = status.data.expect("data");
        assert_eq!(data.failure_reason().as_deref(), Some("avatar not found"));
        assert!(data.video_url.is_none());
    }

    #[test]
    fn video_page_renames_type() {
        let page: VideoPage = serde_json::from_value(json!({
            "token": "next",
            "videos": [{"video_id": "v1", "status": "completed", "created_at": 1700000000, "type": "GENERATED"}]
        }))
        .expect("page");
        assert_eq!(page.videos[0].kind.as_deref(), Some("GENERATED"));
        let round = serde_json::to_value(&page.videos[0]).expect("json");
        assert_eq!(round["type"], "GENERATED");
    }
}
