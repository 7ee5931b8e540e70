//! CLI library components for the ad composer.

pub mod app;
pub mod escape;
pub mod logging;
pub mod ports;
pub mod settings;
