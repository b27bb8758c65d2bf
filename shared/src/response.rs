//! API Response types
//!
//! Every endpoint answers with the same envelope:
//! ```json
//! {
//!     "success": true,
//!     "message": "Order created successfully",
//!     "data": { ... }
//! }
//! ```
//! List endpoints additionally carry `count` (items in this page) and
//! `total` (items matching the filter before pagination).

use serde::{Deserialize, Serialize};

/// Unified API response envelope
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Human-readable message (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Number of items in `data` (list endpoints)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Total matching items before pagination (list endpoints)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            count: None,
            total: None,
        }
    }

    /// Create a successful response with a custom message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            count: None,
            total: None,
        }
    }

    /// Create a successful message-only response (no data payload)
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            count: None,
            total: None,
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            count: None,
            total: None,
        }
    }

    /// Attach list counts to the response
    pub fn with_counts(mut self, count: usize, total: usize) -> Self {
        self.count = Some(count);
        self.total = Some(total);
        self
    }
}
