//! User-facing notification capability.
//!
//! Orchestration code takes a [`Notifier`] instead of reaching for a global
//! toast facility, so it can run headless and be observed in tests.

use parking_lot::Mutex;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A recorded notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Sink for non-fatal, user-visible notices.
pub trait Notifier: Send + Sync {
    /// Show a notice.
    fn notify(&self, level: NoticeLevel, message: &str);

    fn success(&self, message: &str) {
        self.notify(NoticeLevel::Success, message);
    }

    fn info(&self, message: &str) {
        self.notify(NoticeLevel::Info, message);
    }

    fn warning(&self, message: &str) {
        self.notify(NoticeLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.notify(NoticeLevel::Error, message);
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, level: NoticeLevel, message: &str) {
        (**self).notify(level, message);
    }
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn notify(&self, level: NoticeLevel, message: &str) {
        (**self).notify(level, message);
    }
}

/// Forwards notices to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Success | NoticeLevel::Info => tracing::info!(?level, "{}", message),
            NoticeLevel::Warning => tracing::warn!("{}", message),
            NoticeLevel::Error => tracing::error!("{}", message),
        }
    }
}

/// Collects notices in memory.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    /// The most recent notice.
    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().last().cloned()
    }

    /// Drop all recorded notices.
    pub fn clear(&self) {
        self.notices.lock().clear();
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        self.notices.lock().push(Notice {
            level,
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_notifier_records() {
        let notifier = MemoryNotifier::new();
        notifier.warning("empty");
        notifier.success("done");

        let notices = notifier.notices();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].level, NoticeLevel::Warning);
        assert_eq!(notifier.last().map(|n| n.message), Some("done".to_string()));

        notifier.clear();
        assert!(notifier.last().is_none());
    }

    #[test]
    fn test_reference_forwarding() {
        let notifier = MemoryNotifier::new();
        let shared = std::sync::Arc::new(MemoryNotifier::new());
        (&notifier).error("boom");
        shared.clone().info("hi");
        assert_eq!(notifier.last().map(|n| n.level), Some(NoticeLevel::Error));
        assert_eq!(shared.notices().len(), 1);
    }
}
