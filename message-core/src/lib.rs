//! # message-core
//!
//! Core types shared by every crate in the workspace: [`Message`], [`Sender`],
//! [`MessageInput`], the error taxonomy, the [`Clock`] time source and
//! tracing initialization.

pub mod clock;
pub mod error;
pub mod logger;
pub mod types;

pub use clock::{Clock, FixedClock, StepClock, SystemClock};
pub use error::{AuthError, FieldError, Result, ServiceError, ValidationErrors};
pub use logger::init_tracing;
pub use types::{Message, MessageInput, Sender, UnknownSender};
