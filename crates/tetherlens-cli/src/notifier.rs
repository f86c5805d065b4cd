//! Terminal notices.

use std::io::Write;

use tetherlens_proto::{NoticeLevel, Notifier};

/// Writes notices to stderr, keeping stdout for command output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier {
    quiet: bool,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress success and info notices.
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        tracing::debug!(?level, "{}", message);

        if self.quiet && matches!(level, NoticeLevel::Success | NoticeLevel::Info) {
            return;
        }
        let _ = writeln!(std::io::stderr(), "{} {}", tag(level), message);
    }
}

fn tag(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "[ok]",
        NoticeLevel::Info => "[info]",
        NoticeLevel::Warning => "[warn]",
        NoticeLevel::Error => "[error]",
    }
}
