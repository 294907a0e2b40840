//! Service configuration loaded from environment variables.
//!
//! `MESSAGE_API_KEY` is required. Everything else has a default:
//! `DATABASE_URL` (`sqlite:./messages.db`, or `memory` for the in-memory
//! store), `BIND_ADDRESS` (`127.0.0.1:8000`), `LOG_FILE` (unset),
//! `MESSAGE_API_FORBIDDEN_WORDS` (comma list replacing the defaults),
//! `MESSAGE_API_MASK` (`***`), `MESSAGE_API_SEARCH_MIN_CHARS` (`1`).

use std::env;
use std::fmt;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use handlers::{CensorshipConfig, QueryConfig, DEFAULT_MASK};
use middleware::AccessConfig;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:./messages.db";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8000";
/// `DATABASE_URL` value selecting the non-durable in-memory store.
pub const MEMORY_DATABASE_URL: &str = "memory";

#[derive(Clone)]
pub struct ApiConfig {
    /// MESSAGE_API_KEY
    pub api_key: String,
    pub database_url: String,
    pub bind_address: String,
    pub log_file: Option<String>,
    /// `None` keeps the built-in wordlist.
    pub forbidden_words: Option<Vec<String>>,
    pub mask: String,
    pub search_min_chars: usize,
}

impl ApiConfig {
    /// Load from environment variables. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn load() -> Result<Self> {
        let api_key = env::var("MESSAGE_API_KEY").context("MESSAGE_API_KEY not set")?;
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let bind_address =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());
        let log_file = env::var("LOG_FILE").ok().filter(|s| !s.trim().is_empty());
        let forbidden_words = env::var("MESSAGE_API_FORBIDDEN_WORDS")
            .ok()
            .map(|raw| parse_word_list(&raw));
        let mask = env::var("MESSAGE_API_MASK").unwrap_or_else(|_| DEFAULT_MASK.to_string());
        let search_min_chars = match env::var("MESSAGE_API_SEARCH_MIN_CHARS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("MESSAGE_API_SEARCH_MIN_CHARS is not a number: {}", raw))?,
            Err(_) => QueryConfig::default().search_min_chars,
        };

        Ok(Self {
            api_key,
            database_url,
            bind_address,
            log_file,
            forbidden_words,
            mask,
            search_min_chars,
        })
    }

    /// Applies command-line overrides on top of the environment.
    pub fn with_overrides(mut self, bind_address: Option<String>, database_url: Option<String>) -> Self {
        if let Some(bind) = bind_address {
            self.bind_address = bind;
        }
        if let Some(url) = database_url {
            self.database_url = url;
        }
        self
    }

    /// Rejects an empty key, an unparsable bind address and an invalid mask.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!("MESSAGE_API_KEY must not be empty");
        }
        self.socket_addr()?;
        handlers::CensorshipFilter::new(&self.censorship_config())
            .context("MESSAGE_API_MASK / MESSAGE_API_FORBIDDEN_WORDS are invalid")?;
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address
            .parse()
            .with_context(|| format!("BIND_ADDRESS is not a valid socket address: {}", self.bind_address))
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }

    pub fn access_config(&self) -> AccessConfig {
        AccessConfig::new(self.api_key.clone())
    }

    pub fn censorship_config(&self) -> CensorshipConfig {
        let defaults = CensorshipConfig::default();
        CensorshipConfig {
            forbidden_words: self
                .forbidden_words
                .clone()
                .unwrap_or(defaults.forbidden_words),
            mask: self.mask.clone(),
        }
    }

    pub fn query_config(&self) -> QueryConfig {
        QueryConfig {
            search_min_chars: self.search_min_chars,
        }
    }

    /// Config for tests and embedding: defaults plus the given key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            log_file: None,
            forbidden_words: None,
            mask: DEFAULT_MASK.to_string(),
            search_min_chars: QueryConfig::default().search_min_chars,
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &"<redacted>")
            .field("database_url", &self.database_url)
            .field("bind_address", &self.bind_address)
            .field("log_file", &self.log_file)
            .field("forbidden_words", &self.forbidden_words)
            .field("mask", &self.mask)
            .field("search_min_chars", &self.search_min_chars)
            .finish()
    }
}

fn parse_word_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .collect()
}
