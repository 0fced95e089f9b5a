//! Authorization window supervision

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use creatorlink_domain::{CreatorLinkError, PopupSize, Result};
use tracing::{debug, warn};

use super::ports::{AuthWindow, PopupLauncher};

/// Opens authorization URLs in fixed-size windows.
#[derive(Clone)]
pub struct PopupDriver {
    launcher: Arc<dyn PopupLauncher>,
    size: PopupSize,
}

impl PopupDriver {
    pub fn new(launcher: Arc<dyn PopupLauncher>, size: PopupSize) -> Self {
        Self { launcher, size }
    }

    /// Open `url`. A window that cannot be created is reported as
    /// `PopupBlocked`; the user has to allow popups and start again.
    pub fn open(&self, url: &str) -> Result<PopupHandle> {
        match self.launcher.open(url, self.size) {
            Ok(window) => {
                debug!(width = self.size.width, height = self.size.height, "authorization window opened");
                Ok(PopupHandle::new(window))
            }
            Err(err) => {
                warn!(error = %err, "authorization window could not be opened");
                Err(match err {
                    CreatorLinkError::PopupBlocked(_) => err,
                    other => CreatorLinkError::PopupBlocked(other.to_string()),
                })
            }
        }
    }
}

/// Owned authorization window.
///
/// `close` forwards to the window at most once and skips windows the user
/// already closed. Dropping the handle closes the window.
pub struct PopupHandle {
    window: Box<dyn AuthWindow>,
    closed: AtomicBool,
}

impl PopupHandle {
    pub fn new(window: Box<dyn AuthWindow>) -> Self {
        Self { window, closed: AtomicBool::new(false) }
    }

    /// Whether the window is gone, either closed by the user or by us.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst) || self.window.is_closed()
    }

    pub fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        if !self.window.is_closed() {
            self.window.close();
        }
    }
}

impl Drop for PopupHandle {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[derive(Default)]
    struct CountingWindow {
        user_closed: Arc<AtomicBool>,
        closes: Arc<AtomicUsize>,
    }

    impl AuthWindow for CountingWindow {
        fn is_closed(&self) -> bool {
            self.user_closed.load(Ordering::SeqCst)
        }

        fn close(&self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct FailingLauncher;

    impl PopupLauncher for FailingLauncher {
        fn open(&self, _url: &str, _size: PopupSize) -> Result<Box<dyn AuthWindow>> {
            Err(CreatorLinkError::Internal("no display".into()))
        }
    }

    #[test]
    fn close_is_forwarded_once() {
        let window = CountingWindow::default();
        let closes = window.closes.clone();
        let handle = PopupHandle::new(Box::new(window));

        handle.close();
        handle.close();
        drop(handle);

        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn user_closed_window_is_not_closed_again() {
        let window = CountingWindow::default();
        window.user_closed.store(true, Ordering::SeqCst);
        let closes = window.closes.clone();
        let handle = PopupHandle::new(Box::new(window));

        assert!(handle.is_closed());
        handle.close();

        assert_eq!(closes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn launcher_failure_maps_to_popup_blocked() {
        let driver = PopupDriver::new(Arc::new(FailingLauncher), PopupSize::default());
        let result = driver.open("https://auth.example.test");
        assert!(matches!(result, Err(CreatorLinkError::PopupBlocked(_))));
    }
}
