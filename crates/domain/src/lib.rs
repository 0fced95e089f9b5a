//! # CreatorLink Domain
//!
//! Business domain types and models for CreatorLink.
//!
//! This crate contains:
//! - Platform catalog and social connection types
//! - OAuth session, status and outcome types
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other CreatorLink crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
