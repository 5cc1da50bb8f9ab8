//! Notifications (toasts).

use std::{fmt, time::Duration};

use tokio::time::Instant;

use crate::domain::result::{ActionFailure, FailureKind};

/// How long a notification stays up unless dismissed.
pub const DEFAULT_TTL: Duration = Duration::from_millis(3000);

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// An action went through.
    Success,
    /// Neutral information.
    Info,
    /// The user should fix something.
    Warning,
    /// An action failed.
    Error,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "ok",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// A message shown to the user until it expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Handle for [`Notifications::dismiss`]
    pub id: u64,
    /// Severity
    pub kind: NotificationKind,
    /// Text shown
    pub message: String,
    /// When prune drops it
    pub expires_at: Instant,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// Notifications of one view. Expired ones are dropped by [`Notifications::prune`].
#[derive(Debug)]
pub struct Notifications {
    items: Vec<Notification>,
    next_id: u64,
    ttl: Duration,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl Notifications {
    /// Notifications that expire `ttl` after being pushed.
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            ttl,
        }
    }

    /// Show a message; returns its id.
    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.items.push(Notification {
            id,
            kind,
            message: message.into(),
            expires_at: Instant::now() + self.ttl,
        });

        id
    }

    /// Show a success message.
    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(NotificationKind::Success, message)
    }

    /// Turn a failed action into a notification. Transport failures get a
    /// generic transient message; everything else is shown as received.
    pub fn failure(&mut self, failure: &ActionFailure) -> u64 {
        match failure.kind {
            FailureKind::Validation => self.push(NotificationKind::Warning, failure.message.clone()),
            FailureKind::Transport => self.push(
                NotificationKind::Error,
                "No se pudo conectar con el servidor. Intente nuevamente.",
            ),
            FailureKind::Unauthorized => self.push(
                NotificationKind::Warning,
                "La sesión expiró. Inicie sesión nuevamente.",
            ),
            FailureKind::Rejected | FailureKind::Unexpected | FailureKind::Unconfirmed => {
                self.push(NotificationKind::Error, failure.message.clone())
            }
        }
    }

    /// Drop a notification before it expires.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|notification| notification.id != id);
    }

    /// Drop notifications whose deadline has passed.
    pub fn prune(&mut self) {
        let now = Instant::now();

        self.items.retain(|notification| notification.expires_at > now);
    }

    /// Notifications still up, oldest first.
    pub fn active(&self) -> &[Notification] {
        &self.items
    }

    /// Everything pending, oldest first, leaving the list empty.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::result::ActionFailure,
        gateway::{ApiError, TransportError},
    };

    #[tokio::test(start_paused = true)]
    async fn notifications_expire_after_ttl() {
        let mut notifications = Notifications::default();
        notifications.success("Producto creado");

        tokio::time::advance(Duration::from_millis(2999)).await;
        notifications.prune();
        assert_eq!(notifications.active().len(), 1);

        tokio::time::advance(Duration::from_millis(1)).await;
        notifications.prune();
        assert!(notifications.active().is_empty());
    }

    #[tokio::test]
    async fn transport_failures_get_generic_text() {
        let mut notifications = Notifications::default();
        notifications.failure(&ActionFailure::from(ApiError::Transport(TransportError::Timeout)));
        notifications.failure(&ActionFailure::from(ApiError::Rejected {
            status: 409,
            message: "El código de barras ya existe".to_string(),
        }));

        let messages: Vec<_> = notifications
            .active()
            .iter()
            .map(|notification| notification.message.as_str())
            .collect();

        assert_eq!(
            messages,
            [
                "No se pudo conectar con el servidor. Intente nuevamente.",
                "El código de barras ya existe"
            ]
        );
    }

    #[tokio::test]
    async fn dismiss_removes_one() {
        let mut notifications = Notifications::default();
        let first = notifications.success("uno");
        notifications.success("dos");

        notifications.dismiss(first);

        assert_eq!(notifications.drain().len(), 1);
        assert!(notifications.active().is_empty());
    }
}
