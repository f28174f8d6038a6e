//! Gateway Services Layer
//!
//! Handlers are thin HTTP adapters; the work happens in the engine.

pub mod engine;

pub use engine::{GatewayEngine, ResourceRequest, build_call};
