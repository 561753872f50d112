#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

const CONFIG_VARS: [&str; 10] = [
    "GHOST_ADMIN_API_URL",
    "GHOST_ADMIN_API_KEY",
    "HEYGEN_API_KEY",
    "HEYGEN_API_BASE",
    "VIDEO_OUTPUT_DIR",
    "GOOGLE_CLOUD_PROJECT",
    "VERTEX_LOCATION",
    "VERTEX_MODEL",
    "VERTEX_ACCESS_TOKEN",
    "VERTEX_API_BASE",
];

pub const ADMIN_KEY: &str =
    "6489ee1fc2a3b40001a5e8c2:0b1c2d3e4f5a6b7c8d9e0f1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c";

pub struct Server {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    next_id: u64,
}

/// Starts `serve --stdio` in `dir` with only the given configuration set.
pub fn spawn_server(
    dir: &Path,
    envs: &[(&str, String)],
) -> Result<Server, Box<dyn std::error::Error>> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_mcp-studio"));
    command
        .args(["serve", "--stdio"])
        .current_dir(dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null());
    for name in CONFIG_VARS {
        command.env_remove(name);
    }
    for (name, value) in envs {
        command.env(name, value);
    }

    let mut child = command.spawn()?;
    let stdin = child.stdin.take().expect("stdin available");
    let stdout = BufReader::new(child.stdout.take().expect("stdout available"));
    Ok(Server {
        child,
        stdin,
        stdout,
        next_id: 1,
    })
}

impl Server {
    pub fn send(
        &mut self,
        request: serde_json::Value,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
        let serialized = serde_json::to_string(&request)?;
        writeln!(self.stdin, "{serialized}")?;
        self.stdin.flush()?;

        let mut line = String::new();
        self.stdout.read_line(&mut line)?;
        let response: serde_json::Value = serde_json::from_str(line.trim())?;
        Ok(response)
    }

    pub fn notify(&mut self, request: serde_json::Value) -> Result<(), Box<dyn std::error::Error>> {
        let serialized = serde_json::to_string(&request)?;
        writeln!(self.stdin, "{serialized}")?;
        self.stdin.flush()?;
        Ok(())
    }

    /// Calls a tool and returns the `result` envelope.
    pub fn call_tool(
        &mut self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
        let id = self.next_id;
        self.next_id += 1;
        let response = self.send(serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tools/call",
            "params": {
                "name": name,
                "arguments": arguments
            }
        }))?;
        assert_eq!(response.get("id").and_then(|v| v.as_u64()), Some(id));
        Ok(response.get("result").cloned().expect("result present"))
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub fn is_error(result: &serde_json::Value) -> bool {
    result
        .get("isError")
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

pub fn error_kind(result: &serde_json::Value) -> Option<&str> {
    result
        .get("structuredContent")
        .and_then(|v| v.get("error"))
        .and_then(|v| v.get("kind"))
        .and_then(|v| v.as_str())
}

pub fn first_text(result: &serde_json::Value) -> &str {
    result
        .get("content")
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .and_then(|v| v.get("text"))
        .and_then(|v| v.as_str())
        .unwrap_or("")
}
