//! Configuration management for flatfinder
//!
//! Provides:
//! - [`Settings`]: layered defaults → file → environment
//! - [`constants`]: default values in one place
//! - [`init_tracing`]: global log subscriber from [`LoggingSettings`]

pub mod constants;
mod error;
pub mod settings;
pub mod telemetry;

pub use error::ConfigError;
pub use settings::{LogFormat, LoggingSettings, ScreeningSettings, Settings};
pub use telemetry::init_tracing;
