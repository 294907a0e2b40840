//! Storage crate: message persistence behind the [`MessageStore`] trait.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – MessageRecord, MessageQuery, SearchQuery
//! - [`store`] – MessageStore trait
//! - [`message_repo`] – MessageRepository (SQLite)
//! - [`inmemory_store`] – InMemoryMessageStore
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod inmemory_store;
mod message_repo;
mod models;
mod sqlite_pool;
mod store;


pub use error::StorageError;
pub use inmemory_store::InMemoryMessageStore;
pub use message_repo::MessageRepository;
pub use models::{MessageQuery, MessageRecord, SearchQuery};
pub use sqlite_pool::SqlitePoolManager;
pub use store::MessageStore;
