//! Social connections: cached store, ports and lifecycle operations

pub mod ports;
pub mod service;
pub mod store;

pub use service::ConnectionService;
pub use store::{ConnectionStore, InFlightGuard};
