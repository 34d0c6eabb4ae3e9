//! Configuration management for the Tasks Generator service.
//!
//! All configurable parameters in one place with environment variable
//! overrides. Sensible defaults, configurable in production.

use std::env;
use tracing::info;

/// CORS configuration
///
/// Empty origin list means allow all (the service is consumed by React dev
/// servers on arbitrary localhost ports).
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    /// Allowed origins (empty = allow all)
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Load from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(origins) = env::var("TASKGEN_CORS_ORIGINS") {
            config.allowed_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        config
    }

    /// Convert to a tower-http CorsLayer.
    pub fn to_layer(&self) -> tower_http::cors::CorsLayer {
        use tower_http::cors::{AllowOrigin, Any, CorsLayer};

        let mut layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

        if self.allowed_origins.is_empty() {
            layer = layer.allow_origin(Any);
        } else {
            let mut valid_origins = Vec::new();
            for origin_str in &self.allowed_origins {
                match origin_str.parse::<axum::http::HeaderValue>() {
                    Ok(origin) => valid_origins.push(origin),
                    Err(_) => tracing::warn!("CORS: invalid origin '{}' - skipping", origin_str),
                }
            }
            layer = layer.allow_origin(AllowOrigin::list(valid_origins));
        }

        layer
    }
}

/// Completion API configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API key; `None` means the generate endpoint fails fast with a
    /// configuration error and `/api/status` reports `llm: "error"`.
    pub api_key: Option<String>,

    /// Model identifier sent to the chat-completions endpoint.
    pub model: String,

    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,

    /// Output token budget per completion.
    pub max_tokens: u32,

    /// HTTP client timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "llama-3.3-70b-versatile".to_string(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            max_tokens: 2000,
            timeout_secs: 60,
        }
    }
}

impl LlmConfig {
    #[allow(clippy::field_reassign_with_default)] // Environment overrides require mutable config
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.api_key = env::var("GROQ_API_KEY").ok().filter(|k| !k.is_empty());

        if let Ok(val) = env::var("GROQ_MODEL") {
            config.model = val;
        }

        if let Ok(val) = env::var("GROQ_BASE_URL") {
            config.base_url = val;
        }

        if let Ok(val) = env::var("GROQ_TIMEOUT_SECS") {
            if let Ok(n) = val.parse() {
                config.timeout_secs = n;
            }
        }

        config
    }
}

/// Server configuration loaded from environment with defaults.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server host address (default: 127.0.0.1)
    /// Set to 0.0.0.0 for Docker or network-accessible deployments
    pub host: String,

    /// Server port (default: 8000)
    pub port: u16,

    /// Relational storage connection string. Presence selects the durable
    /// backend at startup; absence selects the in-memory map.
    pub database_url: Option<String>,

    /// Completion API settings.
    pub llm: LlmConfig,

    /// CORS configuration
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            database_url: None,
            llm: LlmConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    #[allow(clippy::field_reassign_with_default)] // Environment overrides require mutable config
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = env::var("TASKGEN_HOST") {
            config.host = val;
        }

        if let Ok(val) = env::var("TASKGEN_PORT") {
            if let Ok(port) = val.parse() {
                config.port = port;
            }
        }

        config.database_url = env::var("DATABASE_URL").ok().filter(|u| !u.is_empty());
        config.llm = LlmConfig::from_env();
        config.cors = CorsConfig::from_env();

        config
    }

    /// Log the effective configuration at startup (secrets elided).
    pub fn log(&self) {
        info!("Listen address: {}:{}", self.host, self.port);
        info!(
            "Storage backend: {}",
            if self.database_url.is_some() {
                "database"
            } else {
                "in-memory"
            }
        );
        info!(
            "Completion API: model={} configured={}",
            self.llm.model,
            self.llm.api_key.is_some()
        );
    }
}
