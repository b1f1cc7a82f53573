//! Application setup for the measurement viewer.
//!
//! Builds the Bevy app, configures the window for native and WASM targets and
//! wires the measure tool to its camera and scene root.

/// App construction, startup scene and system scheduling.
pub mod app_setup;

/// Platform-specific window configuration.
pub mod window_config;
