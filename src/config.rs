use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_HEYGEN_API_BASE: &str = "https://api.heygen.com";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_VERTEX_LOCATION: &str = "us-central1";
pub const DEFAULT_VERTEX_MODEL: &str = "imagen-3.0-generate-002";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing configuration: {0} is not set")]
pub struct MissingConfig(pub &'static str);

/// Settings read from the process environment.
///
/// Nothing is required at load time. Each tool asks for the values it needs
/// and reports the missing variable by name.
#[derive(Clone)]
pub struct Config {
    pub ghost: GhostSettings,
    pub heygen: HeyGenSettings,
    pub vertex: VertexSettings,
}

#[derive(Clone)]
pub struct GhostSettings {
    pub admin_url: Option<String>,
    pub admin_key: Option<String>,
}

#[derive(Clone)]
pub struct HeyGenSettings {
    pub api_key: Option<String>,
    pub api_base: String,
    pub output_dir: PathBuf,
}

#[derive(Clone)]
pub struct VertexSettings {
    pub project: Option<String>,
    pub location: String,
    pub model: String,
    pub access_token: Option<String>,
    pub api_base: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            ghost: GhostSettings {
                admin_url: get("GHOST_ADMIN_API_URL"),
                admin_key: get("GHOST_ADMIN_API_KEY"),
            },
            heygen: HeyGenSettings {
                api_key: get("HEYGEN_API_KEY"),
                api_base: get("HEYGEN_API_BASE")
                    .unwrap_or_else(|| DEFAULT_HEYGEN_API_BASE.to_string()),
                output_dir: get("VIDEO_OUTPUT_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            },
            vertex: VertexSettings {
                project: get("GOOGLE_CLOUD_PROJECT"),
                location: get("VERTEX_LOCATION")
                    .unwrap_or_else(|| DEFAULT_VERTEX_LOCATION.to_string()),
                model: get("VERTEX_MODEL").unwrap_or_else(|| DEFAULT_VERTEX_MODEL.to_string()),
                access_token: get("VERTEX_ACCESS_TOKEN"),
                api_base: get("VERTEX_API_BASE"),
            },
        }
    }
}

impl VertexSettings {
    pub fn api_base(&self) -> String {
        match &self.api_base {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://{}-aiplatform.googleapis.com", self.location),
        }
    }
}

pub fn require<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, MissingConfig> {
    value.as_deref().ok_or(MissingConfig(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]);
        assert!(config.ghost.admin_url.is_none());
        assert!(config.heygen.api_key.is_none());
        assert_eq!(config.heygen.api_base, DEFAULT_HEYGEN_API_BASE);
        assert_eq!(config.heygen.output_dir, PathBuf::from("output"));
        assert_eq!(config.vertex.location, "us-central1");
        assert_eq!(config.vertex.model, "imagen-3.0-generate-002");
        assert_eq!(
            config.vertex.api_base(),
            "https://us-central1-aiplatform.googleapis.com"
        );
    }

    #[test]
    fn blank_values_count_as_missing() {
        let config = config_from(&[("HEYGEN_API_KEY", "   "), ("GHOST_ADMIN_API_URL", "")]);
        assert!(config.heygen.api_key.is_none());
        let err = require(&config.ghost.admin_url, "GHOST_ADMIN_API_URL").expect_err("missing");
        assert_eq!(
            err.to_string(),
            "missing configuration: GHOST_ADMIN_API_URL is not set"
        );
    }

    #[test]
    fn overrides_are_read() {
        let config = config_from(&[
            ("HEYGEN_API_BASE", "http://127.0.0.1:9000"),
            ("VIDEO_OUTPUT_DIR", "/tmp/videos"),
            ("VERTEX_LOCATION", "europe-west4"),
            ("VERTEX_API_BASE", "http://127.0.0.1:9001/"),
        ]);
        assert_eq!(config.heygen.api_base, "http://127.0.0.1:9000");
        assert_eq!(config.heygen.output_dir, PathBuf::from("/tmp/videos"));
        assert_eq!(config.vertex.location, "europe-west4");
        assert_eq!(config.vertex.api_base(), "http://127.0.0.1:9001");
    }
}
