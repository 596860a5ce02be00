pub mod config;
pub mod config_processors;
pub mod error;
pub mod io;
pub mod logging;
pub mod metrics;
pub mod sessions;
pub mod validation;
