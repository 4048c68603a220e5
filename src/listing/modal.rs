use serde::Serialize;
use serde_json::Value;

use crate::resources::{record_id, Resource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    Delete,
    UpdateStatus(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Failure,
}

/// Transient toast
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Success, message: message.into() }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Failure, message: message.into() }
    }
}

/// Confirmation dialog holding the record a row action targets
#[derive(Debug, Default)]
pub struct ConfirmModal {
    target: Option<(Value, RowAction)>,
}

impl ConfirmModal {
    pub fn open(&mut self, record: Value, action: RowAction) {
        self.target = Some((record, action));
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&(Value, RowAction)> {
        self.target.as_ref()
    }

    /// Close without any network call
    pub fn cancel(&mut self) {
        self.target = None;
    }

    /// Run the held action, close the modal and report the outcome.
    /// Returns `None` when nothing was open.
    pub async fn confirm(&mut self, resource: &Resource) -> Option<Notification> {
        let (record, action) = self.target.take()?;
        let label = resource.kind().label();

        let Some(id) = record_id(&record) else {
            return Some(Notification::failure(format!("{} has no id", label)));
        };

        let outcome = match &action {
            RowAction::Delete => resource
                .delete(&id)
                .await
                .map(|_| format!("{} deleted successfully", label)),
            RowAction::UpdateStatus(status) => resource
                .update_status(&id, status)
                .await
                .map(|_| format!("{} status updated to {}", label, status)),
        };

        Some(match outcome {
            Ok(message) => Notification::success(message),
            Err(err) => Notification::failure(err.message),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::MemoryCredentialStore;
    use crate::http::HttpClient;
    use crate::resources::{ConsoleApi, ResourceKind};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    fn coupons() -> Resource {
        let client = HttpClient::new(
            "http://127.0.0.1:9",
            Duration::from_secs(1),
            Arc::new(MemoryCredentialStore::default()),
        )
        .unwrap();
        ConsoleApi::new(client).resource(ResourceKind::Coupon)
    }

    #[test]
    fn cancel_discards_target() {
        let mut modal = ConfirmModal::default();
        modal.open(json!({"id": "c1"}), RowAction::Delete);
        assert!(modal.is_open());
        modal.cancel();
        assert!(!modal.is_open());
        assert!(modal.target().is_none());
    }

    #[tokio::test]
    async fn confirm_with_nothing_open_is_a_no_op() {
        let mut modal = ConfirmModal::default();
        assert_eq!(modal.confirm(&coupons()).await, None);
    }

    #[tokio::test]
    async fn record_without_id_fails_locally() {
        let mut modal = ConfirmModal::default();
        modal.open(json!({"code": "SPRING"}), RowAction::Delete);
        let note = modal.confirm(&coupons()).await.unwrap();
        assert_eq!(note.kind, NotificationKind::Failure);
        assert!(!modal.is_open());
    }
}
