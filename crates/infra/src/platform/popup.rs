//! Browser-process authorization window
//!
//! Opens the authorization URL in a Chromium-family browser running in app
//! mode with its own throwaway profile. The window counts as closed once the
//! browser process exits, which is how a user closing the window is detected.

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use creatorlink_core::{AuthWindow, PopupLauncher};
use creatorlink_domain::{CreatorLinkError, PopupSize, Result};
use parking_lot::Mutex;
use tempfile::TempDir;
use tracing::{debug, warn};

/// Executables tried in order when no browser is configured.
const BROWSER_CANDIDATES: &[&str] =
    &["chromium", "chromium-browser", "google-chrome", "google-chrome-stable", "microsoft-edge"];

/// Launches one browser process per authorization window.
#[derive(Debug, Clone, Default)]
pub struct BrowserProcessLauncher {
    browser: Option<String>,
}

impl BrowserProcessLauncher {
    /// `browser` overrides the probed executable names.
    pub fn new(browser: Option<String>) -> Self {
        Self { browser: browser.filter(|b| !b.trim().is_empty()) }
    }

    fn candidates(&self) -> Vec<String> {
        match &self.browser {
            Some(browser) => vec![browser.clone()],
            None => BROWSER_CANDIDATES.iter().map(|name| (*name).to_string()).collect(),
        }
    }

    fn spawn(program: &str, url: &str, size: PopupSize, profile: &TempDir) -> std::io::Result<Child> {
        Command::new(program)
            .arg(format!("--app={url}"))
            .arg(format!("--window-size={},{}", size.width, size.height))
            .arg(format!("--user-data-dir={}", profile.path().display()))
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
    }
}

impl PopupLauncher for BrowserProcessLauncher {
    fn open(&self, url: &str, size: PopupSize) -> Result<Box<dyn AuthWindow>> {
        let profile = tempfile::Builder::new().prefix("creatorlink-oauth-").tempdir().map_err(|e| {
            CreatorLinkError::PopupBlocked(format!("cannot create browser profile: {e}"))
        })?;

        let mut last_error = None;
        for program in self.candidates() {
            match Self::spawn(&program, url, size, &profile) {
                Ok(child) => {
                    debug!(browser = %program, pid = child.id(), "authorization window launched");
                    return Ok(Box::new(BrowserWindow {
                        child: Mutex::new(child),
                        profile_dir: profile.path().to_path_buf(),
                        _profile: profile,
                    }));
                }
                Err(err) => {
                    debug!(browser = %program, error = %err, "browser not available");
                    last_error = Some(format!("{program}: {err}"));
                }
            }
        }

        Err(CreatorLinkError::PopupBlocked(format!(
            "no browser could be started ({})",
            last_error.unwrap_or_else(|| "no candidates".into())
        )))
    }
}

/// A running browser process showing the authorization page.
struct BrowserWindow {
    child: Mutex<Child>,
    profile_dir: PathBuf,
    _profile: TempDir,
}

impl AuthWindow for BrowserWindow {
    fn is_closed(&self) -> bool {
        match self.child.lock().try_wait() {
            Ok(Some(_)) => true,
            Ok(None) => false,
            Err(err) => {
                warn!(error = %err, "cannot query browser process, treating window as closed");
                true
            }
        }
    }

    fn close(&self) {
        let mut child = self.child.lock();
        if matches!(child.try_wait(), Ok(Some(_))) {
            return;
        }
        if let Err(err) = child.kill() {
            warn!(error = %err, profile = %self.profile_dir.display(), "failed to close browser window");
            return;
        }
        // Reap so the profile directory can be removed.
        let _ = child.wait();
    }
}
