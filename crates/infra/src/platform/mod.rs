//! Platform-specific implementations
//!
//! The authorization window is a native browser process; see [`popup`].

pub mod popup;

pub use popup::BrowserProcessLauncher;
