//! Adapters binding core ports to the terminal.

pub mod confirm;

pub use confirm::{AssumeYes, TerminalConfirmation};
