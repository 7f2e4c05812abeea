//! Notification dispatch.
//!
//! ```text
//! message → sanitize → desktop sink
//!                    → email sink (only when enabled)
//! ```
//!
//! Sinks are independent: a failing sink is logged and never stops the
//! others or the poll loop.

pub mod desktop;
pub mod email;

pub use desktop::{platform_sink, DesktopSink, LogSink};
pub use email::EmailSink;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::app::Result;

/// Characters stripped from every outgoing message.
pub const UNSAFE_CHARS: [char; 10] = ['\\', '\'', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Trait for notification backends, allowing for mocking in tests.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Deliver an already sanitized message.
    async fn send(&self, message: &str) -> Result<()>;
}

/// Remove characters that could break a shell or AppleScript invocation.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| !UNSAFE_CHARS.contains(c)).collect()
}

pub struct Notifier {
    desktop: Box<dyn NotificationSink>,
    email: Option<Box<dyn NotificationSink>>,
}

impl Notifier {
    pub fn new(desktop: Box<dyn NotificationSink>) -> Self {
        Self {
            desktop,
            email: None,
        }
    }

    pub fn with_email(mut self, email: Box<dyn NotificationSink>) -> Self {
        self.email = Some(email);
        self
    }

    pub fn has_email(&self) -> bool {
        self.email.is_some()
    }

    /// Send `message` to the desktop sink. Returns whether it was delivered.
    pub async fn notify_desktop(&self, message: &str) -> bool {
        dispatch(self.desktop.as_ref(), &sanitize(message)).await
    }

    /// Send `message` to the email sink, if one is configured.
    pub async fn notify_email(&self, message: &str) -> bool {
        match &self.email {
            Some(sink) => dispatch(sink.as_ref(), &sanitize(message)).await,
            None => {
                warn!("Email requested but no email sink is configured");
                false
            }
        }
    }
}

async fn dispatch(sink: &dyn NotificationSink, message: &str) -> bool {
    match sink.send(message).await {
        Ok(()) => {
            info!("Notification sent! ({})", sink.name());
            true
        }
        Err(e) => {
            warn!("Error sending {} notification: {}", sink.name(), e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::WatchError;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingSink {
        sent: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl RecordingSink {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NotificationSink for RecordingSink {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn send(&self, message: &str) -> Result<()> {
            self.sent.lock().unwrap().push(message.to_string());
            if self.fail {
                return Err(WatchError::Notification("sink down".into()));
            }
            Ok(())
        }
    }

    #[test]
    fn test_sanitize_removes_unsafe_chars() {
        assert_eq!(
            sanitize(r#"a\b'c/d*e?f:g"h<i>j|k"#),
            "abcdefghijk"
        );
    }

    #[test]
    fn test_sanitize_keeps_everything_else() {
        let text = "Matchweek 12: Arsenal v Spurs (moved) - 17.30 BST & more! #PL 🚀";
        let expected = "Matchweek 12 Arsenal v Spurs (moved) - 17.30 BST & more! #PL 🚀";
        assert_eq!(sanitize(text), expected);
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("plain text"), "plain text");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let samples = [
            r#"It's "official": <b>fixtures</b> 1/2 | done?"#,
            "\\\\server\\share",
            "nothing to strip",
            "***",
        ];
        for sample in samples {
            let once = sanitize(sample);
            assert_eq!(sanitize(&once), once);
            assert!(!once.chars().any(|c| UNSAFE_CHARS.contains(&c)));
        }
    }

    #[tokio::test]
    async fn test_desktop_receives_sanitized_message() {
        let desktop = RecordingSink::default();
        let notifier = Notifier::new(Box::new(desktop.clone()));

        assert!(notifier.notify_desktop("Kick-off: 3pm <confirmed>").await);
        assert_eq!(desktop.sent(), vec!["Kick-off 3pm confirmed"]);
    }

    #[tokio::test]
    async fn test_email_without_sink_is_not_delivered() {
        let desktop = RecordingSink::default();
        let notifier = Notifier::new(Box::new(desktop.clone()));

        assert!(!notifier.has_email());
        assert!(!notifier.notify_email("hello").await);
        assert!(desktop.sent().is_empty());
    }

    #[tokio::test]
    async fn test_failing_desktop_does_not_block_email() {
        let desktop = RecordingSink::failing();
        let email = RecordingSink::default();
        let notifier =
            Notifier::new(Box::new(desktop.clone())).with_email(Box::new(email.clone()));

        assert!(!notifier.notify_desktop("News").await);
        assert!(notifier.notify_email("News").await);
        assert_eq!(desktop.sent(), vec!["News"]);
        assert_eq!(email.sent(), vec!["News"]);
    }

    #[tokio::test]
    async fn test_failing_email_is_contained() {
        let email = RecordingSink::failing();
        let notifier =
            Notifier::new(Box::new(RecordingSink::default())).with_email(Box::new(email.clone()));

        assert!(!notifier.notify_email("News").await);
        assert_eq!(email.sent().len(), 1);
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[tokio::test]
    async fn test_delivery_log_lines_are_plain_messages() {
        let buffer = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_timer(crate::logging::LocalTimestamp)
            .with_target(false)
            .with_level(false)
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let notifier = Notifier::new(Box::new(RecordingSink::default()))
            .with_email(Box::new(RecordingSink::failing()));
        notifier.notify_desktop("News").await;
        notifier.notify_email("News").await;

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("] Notification sent! (recording)"));
        assert!(lines[1].ends_with("] Error sending recording notification: Notification error: sink down"));
        assert!(lines.iter().all(|line| !line.contains("sink=")));
    }
}
