use std::sync::Arc;

use anyhow::{Context, Result};
use handlers::{CensorshipFilter, MessageService, QueryService};
use message_core::{Clock, SystemClock};
use middleware::AccessGate;
use storage::{InMemoryMessageStore, MessageRepository, MessageStore};
use tracing::info;

use crate::config::ApiConfig;

/// Shared application state, wrapped in `Arc` and handed to every route.
#[derive(Clone)]
pub struct AppState {
    pub gate: AccessGate,
    pub messages: MessageService,
    pub queries: QueryService,
}

impl AppState {
    /// Wires the gate and services around an already-open store.
    pub fn new(config: &ApiConfig, store: Arc<dyn MessageStore>, clock: Arc<dyn Clock>) -> Result<Self> {
        let filter = CensorshipFilter::new(&config.censorship_config())
            .context("failed to build censorship filter")?;
        Ok(Self {
            gate: AccessGate::new(&config.access_config()),
            messages: MessageService::new(Arc::clone(&store), Arc::new(filter), clock),
            queries: QueryService::new(store, config.query_config()),
        })
    }

    /// Opens the store named by `DATABASE_URL` and builds the state with the system clock.
    pub async fn from_config(config: &ApiConfig) -> Result<Self> {
        let store = open_store(config).await?;
        Self::new(config, store, Arc::new(SystemClock::new()))
    }
}

/// `memory` selects the in-memory store; anything else is a SQLite URL.
pub async fn open_store(config: &ApiConfig) -> Result<Arc<dyn MessageStore>> {
    if config.uses_memory_store() {
        info!("using in-memory message store");
        return Ok(Arc::new(InMemoryMessageStore::new()));
    }

    let repo = MessageRepository::new(&config.database_url)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;
    info!(database_url = %config.database_url, "message repository ready");
    Ok(Arc::new(repo))
}
