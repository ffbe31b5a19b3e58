//! Infrastructure concerns shared by every layer: configuration read once at
//! startup and the global logger.

pub mod config;
pub mod logging;
