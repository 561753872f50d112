use serde_json::json;

pub mod contracts;
pub mod errors;

pub fn tool_definitions() -> Vec<serde_json::Value> {
    vec![
        json!({
            "name": contracts::TOOL_CREATE_POST,
            "description": "Create a new post through the Ghost Admin API.",
            "inputSchema": contracts::create_post_schema()
        }),
        json!({
            "name": contracts::TOOL_GENERATE_VIDEO,
            "description": "Start rendering an avatar video from a script with HeyGen.",
            "inputSchema": contracts::generate_video_schema()
        }),
        json!({
            "name": contracts::TOOL_DOWNLOAD_VIDEO,
            "description": "Wait for a HeyGen video to finish rendering and save it locally.",
            "inputSchema": contracts::download_video_schema()
        }),
        json!({
            "name": contracts::TOOL_RETRIEVE_VOICES,
            "description": "List the voices available to HeyGen videos.",
            "inputSchema": contracts::empty_schema()
        }),
        json!({
            "name": contracts::TOOL_RETRIEVE_AVATARS,
            "description": "List the avatars available to HeyGen videos.",
            "inputSchema": contracts::empty_schema()
        }),
        json!({
            "name": contracts::TOOL_LIST_VIDEOS,
            "description": "List previously generated HeyGen videos.",
            "inputSchema": contracts::list_videos_schema()
        }),
        json!({
            "name": contracts::TOOL_GENERATE_IMAGE,
            "description": "Generate an image from a text prompt with Vertex AI Imagen.",
            "inputSchema": contracts::generate_image_schema()
        }),
    ]
}
