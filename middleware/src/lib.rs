//! # Middleware for the message API
//!
//! Checks that run before any business logic: the shared API key gate.

mod access_gate;


pub use access_gate::{AccessConfig, AccessGate};
