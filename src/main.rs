use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value, json};
use std::io::{self, BufRead, Write};
use std::process;
use tracing::{debug, info, warn};

mod config;
mod context;
mod ghost;
mod heygen;
mod input;
mod logging;
mod mcp;
mod poller;
mod remote;
mod tools;
mod vertex;

use config::{Config, require};
use context::ServerContext;

pub const PROTOCOL_VERSION: &str = "2025-11-25";

#[derive(Parser)]
#[command(name = "mcp-studio")]
#[command(
    version,
    about = "MCP tools for publishing to Ghost and generating media with HeyGen and Vertex AI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct CreatePostArgs {
    /// Post title
    #[arg(long)]
    title: String,
    /// HTML body of the post
    #[arg(long)]
    html: String,
    /// draft, published, or scheduled
    #[arg(long)]
    status: Option<String>,
    /// Output JSON structuredContent
    #[arg(long)]
    json: bool,
}

#[derive(Args, Clone)]
struct GenerateVideoArgs {
    /// Script the avatar reads
    #[arg(long)]
    script: String,
    #[arg(long)]
    avatar_id: Option<String>,
    #[arg(long)]
    voice_id: Option<String>,
    /// Output JSON structuredContent
    #[arg(long)]
    json: bool,
}

#[derive(Args, Clone)]
struct DownloadVideoArgs {
    /// Video id returned by generate-video
    #[arg(long)]
    video_id: String,
    /// Polling interval in milliseconds
    #[arg(long)]
    poll_interval: Option<u64>,
    /// Maximum number of status checks
    #[arg(long)]
    max_retries: Option<u64>,
    /// Where to save the video
    #[arg(long)]
    output_path: Option<String>,
    /// Output JSON structuredContent
    #[arg(long)]
    json: bool,
}

#[derive(Args, Clone)]
struct GenerateImageArgs {
    /// Text description of the image
    #[arg(long)]
    prompt: String,
    /// Save the image to this path instead of returning base64
    #[arg(long)]
    save_to_file: Option<String>,
    #[arg(long)]
    aspect_ratio: Option<String>,
    /// Output JSON structuredContent
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP stdio server
    Serve {
        /// Serve MCP over stdio (NDJSON)
        #[arg(long)]
        stdio: bool,
    },
    /// Print a fresh Ghost Admin API token
    GhostToken,
    /// Create a Ghost post
    CreatePost(CreatePostArgs),
    /// Start a HeyGen video render
    GenerateVideo(GenerateVideoArgs),
    /// Wait for a HeyGen video and download it
    DownloadVideo(DownloadVideoArgs),
    /// Generate an image with Vertex AI
    GenerateImage(GenerateImageArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _ = dotenvy::dotenv();
    logging::init();

    let ctx = ServerContext::new(Config::from_env())?;

    match cli.command {
        Commands::Serve { stdio } => {
            if stdio {
                run_stdio_server(&ctx)
            } else {
                anyhow::bail!("only --stdio transport is supported")
            }
        }
        Commands::GhostToken => run_ghost_token(&ctx),
        Commands::CreatePost(args) => run_create_post(&ctx, args),
        Commands::GenerateVideo(args) => run_generate_video(&ctx, args),
        Commands::DownloadVideo(args) => run_download_video(&ctx, args),
        Commands::GenerateImage(args) => run_generate_image(&ctx, args),
    }
}

fn run_ghost_token(ctx: &ServerContext) -> Result<()> {
    let key = require(&ctx.config.ghost.admin_key, "GHOST_ADMIN_API_KEY")?;
    let token = ghost::token::build_token(key)?;
    println!("{token}");
    Ok(())
}

fn run_create_post(ctx: &ServerContext, args: CreatePostArgs) -> Result<()> {
    let mut map = Map::new();
    map.insert("title".to_string(), json!(args.title));
    map.insert("html_content".to_string(), json!(args.html));
    if let Some(status) = args.status {
        map.insert("status".to_string(), json!(status));
    }
    let result = tools::create_post::call(ctx, &Value::Object(map));
    print_tool_result(result, args.json)
}

fn run_generate_video(ctx: &ServerContext, args: GenerateVideoArgs) -> Result<()> {
    let mut map = Map::new();
    map.insert("script".to_string(), json!(args.script));
    if let Some(avatar_id) = args.avatar_id {
        map.insert("avatar_id".to_string(), json!(avatar_id));
    }
    if let Some(voice_id) = args.voice_id {
        map.insert("voice_id".to_string(), json!(voice_id));
    }
    let result = tools::generate_video::call(ctx, &Value::Object(map));
    print_tool_result(result, args.json)
}

fn run_download_video(ctx: &ServerContext, args: DownloadVideoArgs) -> Result<()> {
    let mut map = Map::new();
    map.insert("video_id".to_string(), json!(args.video_id));
    if let Some(poll_interval) = args.poll_interval {
        map.insert("poll_interval".to_string(), json!(poll_interval));
    }
    if let Some(max_retries) = args.max_retries {
        map.insert("max_retries".to_string(), json!(max_retries));
    }
    if let Some(output_path) = args.output_path {
        map.insert("output_path".to_string(), json!(output_path));
    }
    let result = tools::download_video::call(ctx, &Value::Object(map));
    print_tool_result(result, args.json)
}

fn run_generate_image(ctx: &ServerContext, args: GenerateImageArgs) -> Result<()> {
    let mut map = Map::new();
    map.insert("prompt".to_string(), json!(args.prompt));
    if let Some(save_to_file) = args.save_to_file {
        map.insert("save_to_file".to_string(), json!(save_to_file));
    }
    if let Some(aspect_ratio) = args.aspect_ratio {
        map.insert("aspect_ratio".to_string(), json!(aspect_ratio));
    }
    let result = tools::generate_image::call(ctx, &Value::Object(map));
    print_tool_result(result, args.json)
}

fn print_tool_result(result: Value, json_output: bool) -> Result<()> {
    let is_error = result
        .get("isError")
        .and_then(|value| value.as_bool())
        .unwrap_or(false);

    if is_error {
        let message = result
            .get("structuredContent")
            .and_then(|value| value.get("error"))
            .and_then(|value| value.get("message"))
            .and_then(|value| value.as_str())
            .unwrap_or("tool error");
        eprintln!("{message}");
        process::exit(1);
    }

    if json_output {
        let structured = result
            .get("structuredContent")
            .cloned()
            .unwrap_or_else(|| json!({}));
        let output = serde_json::to_string_pretty(&structured)?;
        println!("{output}");
        return Ok(());
    }

    let text = result
        .get("content")
        .and_then(|value| value.as_array())
        .and_then(|arr| arr.first())
        .and_then(|value| value.get("text"))
        .and_then(|value| value.as_str())
        .unwrap_or("");
    println!("{text}");
    Ok(())
}

fn run_stdio_server(ctx: &ServerContext) -> Result<()> {
    info!(version = env!("CARGO_PKG_VERSION"), "starting stdio server");
    let stdin = io::stdin();
    let stdout = io::stdout();
    let reader = stdin.lock().lines();
    let mut writer = io::BufWriter::new(stdout.lock());

    for line in reader {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let request: serde_json::Value = match serde_json::from_str(&line) {
            Ok(value) => value,
            Err(err) => {
                warn!(%err, "skipping unparsable request line");
                continue;
            }
        };

        if let Some(response) = handle_request(ctx, &request) {
            let serialized =
                serde_json::to_string(&response).context("failed to serialize response")?;
            writeln!(writer, "{serialized}").context("failed to write response")?;
            writer.flush().context("failed to flush response")?;
        }
    }

    info!("stdin closed, shutting down");
    Ok(())
}

fn handle_request(ctx: &ServerContext, request: &Value) -> Option<Value> {
    let method = request.get("method").and_then(|value| value.as_str());
    let id = request.get("id").cloned();
    debug!(?method, "request received");

    let result = match (method, id.as_ref()) {
        (Some("initialize"), Some(_)) => json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": { "listChanged": true }
            },
            "serverInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION")
            }
        }),
        (Some("ping"), Some(_)) => json!({}),
        (Some("tools/list"), Some(_)) => json!({
            "tools": mcp::tool_definitions()
        }),
        (Some("tools/call"), Some(_)) => handle_tool_call(ctx, request),
        _ => return None,
    };

    Some(json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result
    }))
}

fn handle_tool_call(ctx: &ServerContext, request: &Value) -> Value {
    let params = request.get("params");
    let Some(params) = params.and_then(|value| value.as_object()) else {
        return tools::error_result(mcp::errors::INVALID_INPUT, "params must be an object", None);
    };

    let name = params.get("name").and_then(|value| value.as_str());
    let Some(name) = name else {
        return tools::error_result(
            mcp::errors::INVALID_INPUT,
            "params.name must be a string",
            None,
        );
    };

    let args = params
        .get("arguments")
        .cloned()
        .unwrap_or_else(|| json!({}));

    info!(tool = name, "tool call");
    match name {
        mcp::contracts::TOOL_CREATE_POST => tools::create_post::call(ctx, &args),
        mcp::contracts::TOOL_GENERATE_VIDEO => tools::generate_video::call(ctx, &args),
        mcp::contracts::TOOL_DOWNLOAD_VIDEO => tools::download_video::call(ctx, &args),
        mcp::contracts::TOOL_RETRIEVE_VOICES => tools::retrieve_catalog::call_voices(ctx, &args),
        mcp::contracts::TOOL_RETRIEVE_AVATARS => {
            tools::retrieve_catalog::call_avatars(ctx, &args)
        }
        mcp::contracts::TOOL_LIST_VIDEOS => tools::list_videos::call(ctx, &args),
        mcp::contracts::TOOL_GENERATE_IMAGE => tools::generate_image::call(ctx, &args),
        _ => tools::error_result(
            mcp::errors::INVALID_INPUT,
            format!("tool not implemented: {name}"),
            Some(name),
        ),
    }
}
