//! Configuration file management for platter.
//!
//! Provides a TOML-based config file at `~/.config/platter/config.toml`
//! and a resolution chain: env var > config file > default. The API
//! key is the one value with no default; `serve` and `plan` refuse to
//! start without it.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use platter_core::backend::BackendConfig;
use platter_core::backend::types::{
    DEFAULT_API_URL, DEFAULT_IMAGE_MODEL, DEFAULT_SPEECH_MODEL, DEFAULT_TEXT_MODEL, DEFAULT_VOICE,
};

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub backend: BackendSection,
    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BackendSection {
    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// API key; prefer the PLATTER_API_KEY env var over storing it here.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_text_model")]
    pub text_model: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
    #[serde(default = "default_speech_model")]
    pub speech_model: String,
    #[serde(default = "default_voice")]
    pub voice: String,
}

impl Default for BackendSection {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            text_model: default_text_model(),
            image_model: default_image_model(),
            speech_model: default_speech_model(),
            voice: default_voice(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Root directory for generated assets (images/, audio/, recipes/).
    #[serde(default = "default_asset_root")]
    pub asset_root: PathBuf,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            asset_root: default_asset_root(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_text_model() -> String {
    DEFAULT_TEXT_MODEL.to_string()
}

fn default_image_model() -> String {
    DEFAULT_IMAGE_MODEL.to_string()
}

fn default_speech_model() -> String {
    DEFAULT_SPEECH_MODEL.to_string()
}

fn default_voice() -> String {
    DEFAULT_VOICE.to_string()
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_asset_root() -> PathBuf {
    PathBuf::from("static")
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the platter config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/platter` or
/// `~/.config/platter`. We intentionally ignore the platform-specific
/// `dirs::config_dir()` (which returns `~/Library/Application Support`
/// on macOS).
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("platter");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("platter")
}

/// Return the path to the platter config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix since it may hold an API key.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct PlatterConfig {
    pub backend: BackendConfig,
    pub server: ServerSection,
}

impl PlatterConfig {
    /// Resolve configuration using the chain: env var > config file > default.
    ///
    /// - API URL: `PLATTER_API_URL` env > `config_file.backend.api_url` > built-in default
    /// - API key: `PLATTER_API_KEY` env > `config_file.backend.api_key` > error
    /// - models, voice, server settings: config file > built-in defaults
    pub fn resolve() -> Result<Self> {
        let file_config = load_config().ok();

        let (backend_section, server) = match file_config {
            Some(cfg) => (cfg.backend, cfg.server),
            None => (BackendSection::default(), ServerSection::default()),
        };

        let api_url = std::env::var("PLATTER_API_URL").unwrap_or(backend_section.api_url);

        let api_key = if let Ok(key) = std::env::var("PLATTER_API_KEY") {
            key
        } else if let Some(key) = backend_section.api_key.filter(|k| !k.is_empty()) {
            key
        } else {
            bail!(
                "API key not found; set PLATTER_API_KEY or run `platter init` and add it to the config file"
            );
        };

        Ok(Self {
            backend: BackendConfig {
                api_url,
                api_key,
                text_model: backend_section.text_model,
                image_model: backend_section.image_model,
                speech_model: backend_section.speech_model,
                voice: backend_section.voice,
            },
            server,
        })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
