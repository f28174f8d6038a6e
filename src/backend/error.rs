//! Backend error types.
//!
//! Backends report failures with gRPC-style numeric status codes. A failure
//! without a code comes from the transport (connection refused, timeout,
//! undecodable body) and is kept apart from backend rejections.

use std::fmt;

use thiserror::Error;

use super::BackendKind;

/// Numeric backend status code.
///
/// Kept as a newtype rather than an enum: backends may send codes the
/// gateway has never seen and those must still be carried through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RpcCode(pub i32);

impl RpcCode {
    pub const OK: RpcCode = RpcCode(0);
    pub const CANCELLED: RpcCode = RpcCode(1);
    pub const UNKNOWN: RpcCode = RpcCode(2);
    pub const INVALID_ARGUMENT: RpcCode = RpcCode(3);
    pub const DEADLINE_EXCEEDED: RpcCode = RpcCode(4);
    pub const NOT_FOUND: RpcCode = RpcCode(5);
    pub const ALREADY_EXISTS: RpcCode = RpcCode(6);
    pub const PERMISSION_DENIED: RpcCode = RpcCode(7);
    pub const RESOURCE_EXHAUSTED: RpcCode = RpcCode(8);
    pub const FAILED_PRECONDITION: RpcCode = RpcCode(9);
    pub const ABORTED: RpcCode = RpcCode(10);
    pub const OUT_OF_RANGE: RpcCode = RpcCode(11);
    pub const UNIMPLEMENTED: RpcCode = RpcCode(12);
    pub const INTERNAL: RpcCode = RpcCode(13);
    pub const UNAVAILABLE: RpcCode = RpcCode(14);
    pub const DATA_LOSS: RpcCode = RpcCode(15);
    pub const UNAUTHENTICATED: RpcCode = RpcCode(16);

    /// Every code the backends define.
    pub const DEFINED: [RpcCode; 17] = [
        Self::OK,
        Self::CANCELLED,
        Self::UNKNOWN,
        Self::INVALID_ARGUMENT,
        Self::DEADLINE_EXCEEDED,
        Self::NOT_FOUND,
        Self::ALREADY_EXISTS,
        Self::PERMISSION_DENIED,
        Self::RESOURCE_EXHAUSTED,
        Self::FAILED_PRECONDITION,
        Self::ABORTED,
        Self::OUT_OF_RANGE,
        Self::UNIMPLEMENTED,
        Self::INTERNAL,
        Self::UNAVAILABLE,
        Self::DATA_LOSS,
        Self::UNAUTHENTICATED,
    ];

    pub fn name(self) -> &'static str {
        match self.0 {
            0 => "OK",
            1 => "CANCELLED",
            2 => "UNKNOWN",
            3 => "INVALID_ARGUMENT",
            4 => "DEADLINE_EXCEEDED",
            5 => "NOT_FOUND",
            6 => "ALREADY_EXISTS",
            7 => "PERMISSION_DENIED",
            8 => "RESOURCE_EXHAUSTED",
            9 => "FAILED_PRECONDITION",
            10 => "ABORTED",
            11 => "OUT_OF_RANGE",
            12 => "UNIMPLEMENTED",
            13 => "INTERNAL",
            14 => "UNAVAILABLE",
            15 => "DATA_LOSS",
            16 => "UNAUTHENTICATED",
            _ => "UNRECOGNIZED",
        }
    }
}

impl fmt::Display for RpcCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.0)
    }
}

/// Failure reported by (or on the way to) a backend.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct BackendError {
    /// `None` for transport-level failures
    pub code: Option<RpcCode>,
    pub message: String,
    pub details: Option<String>,
}

impl BackendError {
    /// Rejection carrying a backend status code.
    pub fn with_code(code: RpcCode, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
            details: None,
        }
    }

    /// Transport or otherwise unclassified failure (no code).
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Router-level failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    #[error("{0} backend is not available")]
    Unavailable(BackendKind),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_names() {
        assert_eq!(RpcCode::NOT_FOUND.name(), "NOT_FOUND");
        assert_eq!(RpcCode(42).name(), "UNRECOGNIZED");
        assert_eq!(RpcCode::ALREADY_EXISTS.to_string(), "ALREADY_EXISTS (6)");
    }

    #[test]
    fn test_defined_codes_are_contiguous() {
        for (i, code) in RpcCode::DEFINED.iter().enumerate() {
            assert_eq!(code.0, i as i32);
        }
    }

    #[test]
    fn test_transport_error_has_no_code() {
        let err = BackendError::transport("connection refused");
        assert!(err.code.is_none());
        assert_eq!(err.to_string(), "connection refused");
    }
}
