use crate::config::{Config, MissingConfig, require};
use crate::ghost::GhostClient;
use crate::heygen::HeyGenClient;
use crate::remote;
use crate::vertex::VertexClient;
use anyhow::{Context, Result};
use reqwest::blocking::Client;

/// Dependencies shared by every tool call: configuration and one HTTP client.
pub struct ServerContext {
    pub config: Config,
    pub http: Client,
}

impl ServerContext {
    pub fn new(config: Config) -> Result<Self> {
        let http = remote::build_client().context("failed to build http client")?;
        Ok(Self { config, http })
    }

    pub fn ghost(&self) -> Result<GhostClient<'_>, MissingConfig> {
        let settings = &self.config.ghost;
        let admin_url = require(&settings.admin_url, "GHOST_ADMIN_API_URL")?;
        let admin_key = require(&settings.admin_key, "GHOST_ADMIN_API_KEY")?;
        Ok(GhostClient::new(&self.http, admin_url, admin_key))
    }

    pub fn heygen(&self) -> Result<HeyGenClient<'_>, MissingConfig> {
        let settings = &self.config.heygen;
        let api_key = require(&settings.api_key, "HEYGEN_API_KEY")?;
        Ok(HeyGenClient::new(&self.http, &settings.api_base, api_key))
    }

    pub fn vertex(&self) -> Result<VertexClient<'_>, MissingConfig> {
        let settings = &self.config.vertex;
        let project = require(&settings.project, "GOOGLE_CLOUD_PROJECT")?;
        let access_token = require(&settings.access_token, "VERTEX_ACCESS_TOKEN")?;
        Ok(VertexClient::new(&self.http, settings, project, access_token))
    }
}
