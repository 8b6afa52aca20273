//! Configuration system (layered: explicit > env > .env file).

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Layered configuration for Abacus.
///
/// API keys and base URLs are keyed by upstream name ("groq", "wikipedia").
/// Explicit values set in code take precedence over environment variables;
/// `from_env` also loads a `.env` file when one is present.
#[derive(Debug, Clone, Default)]
pub struct AbacusConfig {
    api_keys: Arc<RwLock<HashMap<String, String>>>,
    base_urls: Arc<RwLock<HashMap<String, String>>>,
}

impl AbacusConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from environment variables (GROQ_API_KEY, GROQ_BASE_URL, ...).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let config = Self::new();

        if let Ok(key) = std::env::var("GROQ_API_KEY") {
            config.set_api_key("groq", key);
        }

        let url_mappings = [
            ("GROQ_BASE_URL", "groq"),
            ("WIKIPEDIA_BASE_URL", "wikipedia"),
        ];
        for (env_var, upstream) in &url_mappings {
            if let Ok(url) = std::env::var(env_var) {
                config.set_base_url(upstream, url);
            }
        }

        config
    }

    pub fn set_api_key(&self, upstream: &str, key: String) {
        self.api_keys
            .write()
            .unwrap()
            .insert(upstream.to_string(), key);
    }

    pub fn get_api_key(&self, upstream: &str) -> Option<String> {
        self.api_keys.read().unwrap().get(upstream).cloned()
    }

    pub fn set_base_url(&self, upstream: &str, url: String) {
        self.base_urls
            .write()
            .unwrap()
            .insert(upstream.to_string(), url);
    }

    pub fn get_base_url(&self, upstream: &str) -> Option<String> {
        self.base_urls.read().unwrap().get(upstream).cloned()
    }

    /// Check if an upstream has a credential configured.
    pub fn has_credentials(&self, upstream: &str) -> bool {
        self.get_api_key(upstream).is_some()
    }
}
