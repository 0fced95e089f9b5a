//! Shared helpers for commands and routes

pub mod logging;
