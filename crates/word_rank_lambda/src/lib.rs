//! AWS-oriented adapters and handlers for the top-words Lambda.
//!
//! This crate owns runtime integration details (the Lambda handler, storage
//! adapters, and structured logging) and exposes a single runtime module
//! boundary for the contract, frequency, and storage primitives.

pub mod adapters;
pub mod handlers;
pub mod logging;
pub mod runtime;
