use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use web_time::Instant;

use astar_gateway_core::{Notice, NoticeLevel, NotifierPort};

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
    pub created_at: Instant,
}

#[derive(Debug, Default)]
struct ToastState {
    next_id: u64,
    toasts: Vec<Toast>,
}

/// Stacked, auto-dismissing notifications. Oldest first.
///
/// `Info` notices mark an operation still in flight: they stay up past the TTL until the
/// next success or error notice replaces the oldest of them.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    ttl: Duration,
    state: Arc<Mutex<ToastState>>,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(Duration::from_millis(1_000))
    }
}

impl ToastQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: Arc::new(Mutex::new(ToastState::default())),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Drops expired toasts and returns the ones still on screen.
    pub fn visible(&self, now: Instant) -> Vec<Toast> {
        let Some(mut g) = self.lock() else {
            return Vec::new();
        };
        let ttl = self.ttl;
        g.toasts.retain(|t| {
            t.notice.level == NoticeLevel::Info
                || now.saturating_duration_since(t.created_at) < ttl
        });
        g.toasts.clone()
    }

    /// All toasts not yet dismissed or pruned, regardless of age.
    pub fn pending(&self) -> Vec<Toast> {
        self.lock().map(|g| g.toasts.clone()).unwrap_or_default()
    }

    pub fn dismiss(&self, id: u64) {
        if let Some(mut g) = self.lock() {
            g.toasts.retain(|t| t.id != id);
        }
    }

    fn lock(&self) -> Option<MutexGuard<'_, ToastState>> {
        match self.state.lock() {
            Ok(g) => Some(g),
            Err(e) => {
                tracing::error!("toast queue lock poisoned: {e}");
                None
            }
        }
    }
}

impl NotifierPort for ToastQueue {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => tracing::info!(message = %notice.message, "toast"),
            NoticeLevel::Success => tracing::info!(message = %notice.message, "toast success"),
            NoticeLevel::Warning => tracing::warn!(message = %notice.message, "toast"),
            NoticeLevel::Error => tracing::error!(message = %notice.message, "toast"),
        }
        if let Some(mut g) = self.lock() {
            if matches!(notice.level, NoticeLevel::Success | NoticeLevel::Error) {
                if let Some(pos) = g
                    .toasts
                    .iter()
                    .position(|t| t.notice.level == NoticeLevel::Info)
                {
                    g.toasts.remove(pos);
                }
            }
            g.next_id = g.next_id.saturating_add(1);
            let id = g.next_id;
            g.toasts.push(Toast {
                id,
                notice,
                created_at: Instant::now(),
            });
        }
    }
}
