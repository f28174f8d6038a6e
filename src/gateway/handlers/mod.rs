//! HTTP handlers
//!
//! - [`health`]: liveness and backend initialization report
//! - [`catalog`]: resource family catalog
//! - [`resource`]: generic CRUD and action handlers
//! - [`helpers`]: header extraction and envelopes

pub mod catalog;
pub mod health;
pub mod helpers;
pub mod resource;

pub use catalog::*;
pub use health::*;
pub use helpers::{ApiResult, RequestId};
pub use resource::*;
