//! Backend Call Descriptor
//!
//! Everything the router needs to place one RPC call. Built after
//! normalization and never mutated once dispatched.

use serde_json::{Map, Value};

use super::BackendKind;

/// Page/size cursor for list calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub page: u32,
    pub page_size: u32,
}

impl PageCursor {
    pub const DEFAULT_PAGE_SIZE: u32 = 50;
    pub const MAX_PAGE_SIZE: u32 = 500;

    /// Build a cursor from optional client values.
    ///
    /// Page is at least 1, page size is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn new(page: Option<u32>, page_size: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size
                .unwrap_or(Self::DEFAULT_PAGE_SIZE)
                .clamp(1, Self::MAX_PAGE_SIZE),
        }
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One RPC call, fully resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct CallDescriptor {
    /// Resource family the call serves (e.g. `ChartOfAccounts`)
    pub resource: &'static str,
    pub backend: BackendKind,
    /// RPC method name (e.g. `CreateAccount`)
    pub method: String,
    /// camelCase payload produced by the normalizer
    pub payload: Map<String, Value>,
    pub cursor: Option<PageCursor>,
    pub correlation_id: Option<String>,
}

impl CallDescriptor {
    pub fn new(
        resource: &'static str,
        backend: BackendKind,
        method: impl Into<String>,
        payload: Map<String, Value>,
    ) -> Self {
        Self {
            resource,
            backend,
            method: method.into(),
            payload,
            cursor: None,
            correlation_id: None,
        }
    }

    pub fn with_cursor(mut self, cursor: PageCursor) -> Self {
        self.cursor = Some(cursor);
        self
    }

    pub fn with_correlation_id(mut self, correlation_id: Option<String>) -> Self {
        self.correlation_id = correlation_id;
        self
    }

    /// Payload as sent on the wire: the normalized fields plus `page`/`pageSize`.
    pub fn wire_payload(&self) -> Value {
        let mut payload = self.payload.clone();
        if let Some(cursor) = self.cursor {
            payload.insert("page".to_string(), Value::from(cursor.page));
            payload.insert("pageSize".to_string(), Value::from(cursor.page_size));
        }
        Value::Object(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cursor_defaults_and_clamping() {
        assert_eq!(PageCursor::default(), PageCursor { page: 1, page_size: 50 });
        assert_eq!(PageCursor::new(Some(0), Some(0)), PageCursor { page: 1, page_size: 1 });
        assert_eq!(PageCursor::new(Some(3), Some(10_000)).page_size, 500);
    }

    #[test]
    fn test_wire_payload_adds_cursor() {
        let mut payload = Map::new();
        payload.insert("status".into(), json!("open"));
        let call = CallDescriptor::new("Invoice", BackendKind::Finance, "GetInvoices", payload)
            .with_cursor(PageCursor::new(Some(2), Some(25)));

        assert_eq!(
            call.wire_payload(),
            json!({"status": "open", "page": 2, "pageSize": 25})
        );
    }

    #[test]
    fn test_wire_payload_without_cursor_is_payload() {
        let call = CallDescriptor::new("Invoice", BackendKind::Finance, "GetInvoice", Map::new());
        assert_eq!(call.wire_payload(), json!({}));
    }
}
