use notify_rust::{Notification, Timeout};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, warn};
use visualizer_core::Notifier;

const SUMMARY: &str = "Invalid file format!";

/// Shows error notifications through the desktop notification service.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    app_name: String,
    timeout: Duration,
}

impl DesktopNotifier {
    pub fn new(app_name: impl Into<String>, timeout: Duration) -> Self {
        Self {
            app_name: app_name.into(),
            timeout,
        }
    }

    /// Shows `message` from a helper thread. Talking to the notification
    /// daemon can block, and callers run on the UI thread.
    pub fn dispatch(&self, message: &str) -> JoinHandle<()> {
        let millis = u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX);
        let mut notification = Notification::new();
        notification
            .appname(&self.app_name)
            .summary(SUMMARY)
            .body(message)
            .timeout(Timeout::Milliseconds(millis));

        std::thread::spawn(move || match notification.show() {
            Ok(_) => debug!("Desktop notification shown"),
            Err(e) => warn!("Desktop notification failed: {}", e),
        })
    }
}

impl Notifier for DesktopNotifier {
    fn report_error(&self, message: &str) {
        // detached; failures are logged on the helper thread
        let _ = self.dispatch(message);
    }
}
