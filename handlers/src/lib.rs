//! # Handlers for the message API
//!
//! The message pipeline: censorship, validation, the create path
//! ([`MessageService`]) and the read path ([`QueryService`]).

mod censorship;
mod message_service;
mod query_service;
mod validation;

#[cfg(test)]
mod test;

pub use censorship::{
    CensorshipConfig, CensorshipError, CensorshipFilter, FilterReport, DEFAULT_FORBIDDEN_WORDS,
    DEFAULT_MASK,
};
pub use message_service::MessageService;
pub use query_service::{QueryConfig, QueryService, DEFAULT_LIMIT, DEFAULT_OFFSET};
pub use validation::{validate_input, ValidatedInput};
