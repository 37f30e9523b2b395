// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Configuration management for Factlens

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    /// Run mode; demo skips the database requirement
    #[serde(default)]
    pub mode: RunMode,

    /// Web server settings
    #[serde(default)]
    pub web: WebConfig,

    /// Database settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Media upload limits
    #[serde(default)]
    pub upload: UploadConfig,

    /// AI engine used for content analysis
    #[serde(default)]
    pub ai_engine: EngineConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Production,
    Development,
    Demo,
}

impl RunMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Some(Self::Production),
            "development" | "dev" => Some(Self::Development),
            "demo" => Some(Self::Demo),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WebConfig {
    #[serde(default = "default_web_host")]
    pub host: String,
    #[serde(default = "default_web_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    /// SQLite file; `None` is only allowed in demo mode
    #[serde(default = "default_db_path")]
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UploadConfig {
    #[serde(default = "default_max_size_mb")]
    pub max_size_mb: u64,
    /// Accepted MIME types; `image/*` style wildcards allowed
    #[serde(default = "default_accept")]
    pub accept: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EngineConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_engine_url")]
    pub url: String,
    #[serde(default = "default_engine_model")]
    pub model: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_retries")]
    pub retries: u32,
}

// Default value functions
fn default_web_host() -> String { "127.0.0.1".to_string() }
fn default_web_port() -> u16 { 5000 }
fn default_db_path() -> Option<String> { Some("factlens.db".to_string()) }
fn default_max_size_mb() -> u64 { 10 }
fn default_engine_url() -> String { "http://localhost:11434".to_string() }
fn default_engine_model() -> String { "llama3.2:3b".to_string() }
fn default_timeout() -> u64 { 60 }
fn default_retries() -> u32 { 2 }

fn default_accept() -> Vec<String> {
    vec![
        "image/jpeg", "image/png", "image/gif", "image/webp",
        "video/mp4", "video/webm", "video/quicktime",
        "audio/mpeg", "audio/wav", "audio/ogg",
    ].into_iter().map(String::from).collect()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_size_mb: default_max_size_mb(),
            accept: default_accept(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: default_engine_url(),
            model: default_engine_model(),
            timeout_secs: default_timeout(),
            retries: default_retries(),
        }
    }
}

impl UploadConfig {
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_mb.saturating_mul(1024 * 1024)
    }
}

impl AppConfig {
    /// Load configuration from a JSON file, then apply environment overrides
    pub fn load(path: &Path) -> crate::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)
                .map_err(|e| crate::FactlensError::Config(format!("Failed to parse config: {}", e)))?
        } else {
            tracing::info!("Config file not found at {:?}, using defaults", path);
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `FACTLENS_*` overrides from the given variable lookup
    ///
    /// `NODE_ENV` is honoured for the run mode when `FACTLENS_MODE` is unset.
    /// Demo mode chosen from the environment drops the default database
    /// file; an explicit `FACTLENS_DATABASE_PATH` still wins.
    pub fn apply_env<F>(&mut self, lookup: F) -> crate::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup("FACTLENS_MODE") {
            self.mode = RunMode::parse(&mode).ok_or_else(|| {
                crate::FactlensError::Config(format!("Unknown FACTLENS_MODE: {}", mode))
            })?;
        } else if let Some(node_env) = lookup("NODE_ENV") {
            match RunMode::parse(&node_env) {
                Some(mode) => self.mode = mode,
                None => tracing::warn!("Ignoring unrecognised NODE_ENV: {}", node_env),
            }
        }
        if self.is_demo() && self.database.path == default_db_path() {
            self.database.path = None;
        }
        if let Some(path) = lookup("FACTLENS_DATABASE_PATH") {
            self.database.path = if path.is_empty() { None } else { Some(path) };
        }
        if let Some(host) = lookup("FACTLENS_HOST") {
            self.web.host = host;
        }
        if let Some(port) = lookup("FACTLENS_PORT") {
            self.web.port = port.parse().map_err(|_| {
                crate::FactlensError::Config(format!("Invalid FACTLENS_PORT: {}", port))
            })?;
        }
        if let Some(url) = lookup("FACTLENS_AI_URL") {
            self.ai_engine.url = url;
            self.ai_engine.enabled = true;
        }
        Ok(())
    }

    pub fn is_demo(&self) -> bool {
        self.mode == RunMode::Demo
    }
}
