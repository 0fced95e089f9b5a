//! Platform catalog access and static platform configuration

pub mod ports;
pub mod resolver;
