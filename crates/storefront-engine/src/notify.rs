//! User-visible notifications.
//!
//! Every policy decision the shopper should hear about (duplicate item,
//! stock limit, added to cart, checkout result) goes through a
//! [`NotificationSink`].

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Notice emitted when the product already has a cart line.
pub const ITEM_ALREADY_IN_CART: &str = "Item already in cart!";
/// Notice emitted when stock cannot cover the request.
pub const PRODUCT_STOCK_LIMITED: &str = "Product stock limited!";
/// Notice emitted after a line was inserted.
pub const ITEM_ADDED_TO_CART: &str = "Item added to cart successfully!";
/// Notice emitted after an order was accepted.
pub const ORDER_SUCCESSFUL: &str = "Order successful!";

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

/// A user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Receiver for user-visible notifications.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Sink that keeps every notification in memory.
///
/// Used by the CLI to render notices after a command and by tests to assert
/// on exact messages.
#[derive(Debug, Default)]
pub struct RecordingSink {
    notices: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications received so far, oldest first.
    pub fn notices(&self) -> Vec<Notification> {
        self.notices
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Drain the recorded notifications.
    pub fn take(&self) -> Vec<Notification> {
        self.notices
            .lock()
            .map(|mut guard| std::mem::take(&mut *guard))
            .unwrap_or_default()
    }

    /// Most recent notification, if any.
    pub fn last(&self) -> Option<Notification> {
        self.notices
            .lock()
            .ok()
            .and_then(|guard| guard.last().cloned())
    }

    pub fn is_empty(&self) -> bool {
        self.notices
            .lock()
            .map(|guard| guard.is_empty())
            .unwrap_or(true)
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        if let Ok(mut guard) = self.notices.lock() {
            guard.push(notification);
        }
    }
}

impl<S: NotificationSink + ?Sized> NotificationSink for &S {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

impl<S: NotificationSink + ?Sized> NotificationSink for std::sync::Arc<S> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.notify(Notification::error(ITEM_ALREADY_IN_CART));
        sink.notify(Notification::success(ITEM_ADDED_TO_CART));

        let notices = sink.notices();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].message, "Item already in cart!");
        assert_eq!(sink.last().unwrap().kind, NoticeKind::Success);
    }

    #[test]
    fn test_take_drains() {
        let sink = RecordingSink::new();
        sink.notify(Notification::error(PRODUCT_STOCK_LIMITED));
        assert_eq!(sink.take().len(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_notice_kind_serializes_lowercase() {
        let json = serde_json::to_string(&Notification::success("ok")).unwrap();
        assert_eq!(json, r#"{"kind":"success","message":"ok"}"#);
    }
}
