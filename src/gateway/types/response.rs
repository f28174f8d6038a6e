//! API response envelope and error codes
//!
//! - `ApiResponse<T>`: unified response wrapper
//! - `error_codes`: stable gateway error code constants

use serde::Serialize;
use utoipa::ToSchema;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// All API responses follow this structure:
/// - code: 0 = success, non-zero = gateway error code
/// - msg: short message description
/// - data: actual data (success only)
/// - detail: backend-supplied detail (errors only, when the backend sent one)
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Backend detail for rejected calls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: "ok".to_string(),
            data: Some(data),
            detail: None,
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
            detail: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn with_detail(mut self, detail: Option<String>) -> Self {
        self.detail = detail;
        self
    }
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client input errors (1xxx)
    pub const MISSING_FIELD: i32 = 1001;
    pub const INVALID_FIELD: i32 = 1002;
    pub const INVALID_IDENTIFIER: i32 = 1003;
    pub const INVALID_BODY: i32 = 1004;

    // Backend rejections (3xxx)
    pub const INVALID_ARGUMENT: i32 = 3001;
    pub const ALREADY_EXISTS: i32 = 3002;
    pub const BACKEND_REJECTED: i32 = 3003;

    // Routing / resource errors (4xxx)
    pub const UNKNOWN_RESOURCE: i32 = 4001;
    pub const NOT_FOUND: i32 = 4004;
    pub const UNSUPPORTED_OPERATION: i32 = 4005;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
}
