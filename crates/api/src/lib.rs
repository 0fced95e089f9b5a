//! # CreatorLink App
//!
//! Application layer - CLI commands, HTTP routes and the main entry point.
//!
//! This crate contains:
//! - Commands driving the connection lifecycle and OAuth flows
//! - The `/api/v0/platforms` passthrough router
//! - Application context (dependency injection)
//! - Logging bootstrap
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod adapters;
pub mod commands;
pub mod context;
pub mod routes;
pub mod utils;

pub use context::AppContext;
