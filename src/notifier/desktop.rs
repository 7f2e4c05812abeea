//! Desktop notification sinks.

use async_trait::async_trait;
use notify_rust::{Notification, Timeout};
use tracing::{debug, info, warn};

use crate::app::{Result, WatchError};
use crate::config::DesktopSettings;
use crate::notifier::NotificationSink;

/// Native notifications via `notify-rust`: Notification Center on macOS,
/// D-Bus on Linux and the BSDs, toasts on Windows.
#[derive(Debug, Clone)]
pub struct DesktopSink {
    app_name: String,
}

impl DesktopSink {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

#[async_trait]
impl NotificationSink for DesktopSink {
    fn name(&self) -> &'static str {
        "desktop"
    }

    async fn send(&self, message: &str) -> Result<()> {
        let app_name = self.app_name.clone();
        let body = message.to_string();

        // The platform calls block; keep them off the poll loop's thread.
        tokio::task::spawn_blocking(move || show(&app_name, &body))
            .await
            .map_err(|e| WatchError::Notification(format!("notification task failed: {}", e)))?
    }
}

fn show(app_name: &str, body: &str) -> Result<()> {
    debug!("Sending desktop notification: {}", body);

    Notification::new()
        .appname(app_name)
        .summary(app_name)
        .body(body)
        .timeout(Timeout::Milliseconds(5000))
        .show()
        .map(|_| ())
        .map_err(|e| WatchError::Notification(e.to_string()))
}

/// Stand-in for hosts without a notification service: writes the message
/// to the log instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, message: &str) -> Result<()> {
        info!("Desktop notification: {}", message);
        Ok(())
    }
}

/// Pick the desktop sink for this host.
pub fn platform_sink(settings: &DesktopSettings) -> Box<dyn NotificationSink> {
    if is_available() {
        Box::new(DesktopSink::new(settings.app_name.clone()))
    } else {
        warn!("No desktop notification service found; notifications will only be logged");
        Box::new(LogSink)
    }
}

/// Check if desktop notifications are available on this system.
pub fn is_available() -> bool {
    #[cfg(any(target_os = "macos", target_os = "windows"))]
    {
        true
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        notify_rust::get_server_information().is_ok()
    }

    #[cfg(not(any(unix, target_os = "windows")))]
    {
        false
    }
}
