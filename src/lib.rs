//! ERP Gateway - REST front door for a finance back office
//!
//! Accepts snake_case or camelCase REST requests, forwards each one to the
//! finance, CRM or supply-chain RPC backend that owns the resource, and
//! reshapes the answer into a stable public contract.
//!
//! # Modules
//!
//! - [`normalize`] - Field Normalizer (aliases, required fields, coercion)
//! - [`backend`] - Backend Router, RPC client trait, HTTP transport, mock
//! - [`shape`] - Response Shaper (defaults, numeric money, wrapper probing)
//! - [`resources`] - declarative descriptor per resource family
//! - [`gateway`] - axum routes, generic engine, Error Translator
//! - [`config`] - YAML configuration
//! - [`logging`] - tracing setup with rolling files

pub mod backend;
pub mod config;
pub mod gateway;
pub mod logging;
pub mod normalize;
pub mod resources;
pub mod shape;

// Convenient re-exports at crate root
pub use backend::{BackendKind, BackendRouter, CallDescriptor, MockRpcClient, RpcClient};
pub use config::AppConfig;
pub use gateway::GatewayError;
pub use gateway::services::{GatewayEngine, ResourceRequest};
pub use resources::{Operation, ResourceDescriptor, ResourceRegistry};
