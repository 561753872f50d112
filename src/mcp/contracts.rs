use serde_json::json;

pub const TOOL_CREATE_POST: &str = "ghost.create_post";
pub const TOOL_GENERATE_VIDEO: &str = "heygen.generate_video";
pub const TOOL_DOWNLOAD_VIDEO: &str = "heygen.download_video";
pub const TOOL_RETRIEVE_VOICES: &str = "heygen.retrieve_voices";
pub const TOOL_RETRIEVE_AVATARS: &str = "heygen.retrieve_avatars";
pub const TOOL_LIST_VIDEOS: &str = "heygen.list_videos";
pub const TOOL_GENERATE_IMAGE: &str = "vertex.generate_image";

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 10_000;
pub const MAX_POLL_INTERVAL_MS: u64 = 10 * 60 * 1000;
pub const DEFAULT_MAX_RETRIES: u64 = 30;
pub const MAX_RETRIES: u64 = 1_000;
pub const MAX_LIST_LIMIT: u64 = 100;
pub const MAX_VIDEO_DIMENSION: u64 = 4096;

pub fn create_post_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string" },
            "html_content": { "type": "string" },
            "status": { "type": "string", "enum": ["draft", "published", "scheduled"] }
        },
        "required": ["title", "html_content"],
        "additionalProperties": false
    })
}

pub fn generate_video_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "script": { "type": "string" },
            "avatar_id": { "type": "string" },
            "voice_id": { "type": "string" },
            "width": { "type": "integer", "minimum": 1, "maximum": MAX_VIDEO_DIMENSION },
            "height": { "type": "integer", "minimum": 1, "maximum": MAX_VIDEO_DIMENSION }
        },
        "required": ["script"],
        "additionalProperties": false
    })
}

pub fn download_video_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "video_id": { "type": "string" },
            "poll_interval": {
                "type": "integer",
                "minimum": 1,
                "maximum": MAX_POLL_INTERVAL_MS,
                "default": DEFAULT_POLL_INTERVAL_MS,
                "description": "Polling interval in milliseconds"
            },
            "max_retries": {
                "type": "integer",
                "minimum": 1,
                "maximum": MAX_RETRIES,
                "default": DEFAULT_MAX_RETRIES
            },
            "output_path": { "type": "string" }
        },
        "required": ["video_id"],
        "additionalProperties": false
    })
}

pub fn empty_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {},
        "additionalProperties": false
    })
}

pub fn list_videos_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "limit": { "type": "integer", "minimum": 0, "maximum": MAX_LIST_LIMIT },
            "token": { "type": "string", "description": "Pagination token for the next page" }
        },
        "additionalProperties": false
    })
}

pub fn generate_image_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "prompt": { "type": "string" },
            "save_to_file": { "type": "string" },
            "aspect_ratio": { "type": "string", "enum": crate::vertex::ASPECT_RATIOS }
        },
        "required": ["prompt"],
        "additionalProperties": false
    })
}
