//! Gateway types module
//!
//! - [`response`]: unified response envelope and error codes

pub mod response;

pub use response::{ApiResponse, error_codes};
