use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use creatorlink_core::{AuthWindow, PopupHandle, PopupLauncher};
use creatorlink_domain::{CreatorLinkError, PopupSize, Result};

/// Shared view of a mock window for assertions.
#[derive(Clone, Default)]
pub struct WindowProbe {
    pub user_closed: Arc<AtomicBool>,
    pub close_calls: Arc<AtomicUsize>,
}

impl WindowProbe {
    pub fn closes(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }

    pub fn handle(&self) -> PopupHandle {
        PopupHandle::new(Box::new(MockWindow { probe: self.clone() }))
    }
}

pub struct MockWindow {
    probe: WindowProbe,
}

impl AuthWindow for MockWindow {
    fn is_closed(&self) -> bool {
        self.probe.user_closed.load(Ordering::SeqCst)
    }

    fn close(&self) {
        self.probe.close_calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Launcher handing out probe-backed windows, or refusing like a blocker.
#[derive(Default)]
pub struct MockLauncher {
    pub blocked: AtomicBool,
    pub probe: WindowProbe,
    opened: Mutex<Vec<(String, PopupSize)>>,
}

impl MockLauncher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn opened(&self) -> Vec<(String, PopupSize)> {
        self.opened.lock().unwrap().clone()
    }
}

impl PopupLauncher for MockLauncher {
    fn open(&self, url: &str, size: PopupSize) -> Result<Box<dyn AuthWindow>> {
        if self.blocked.load(Ordering::SeqCst) {
            return Err(CreatorLinkError::PopupBlocked("window could not be created".into()));
        }
        self.opened.lock().unwrap().push((url.to_string(), size));
        Ok(Box::new(MockWindow { probe: self.probe.clone() }))
    }
}
