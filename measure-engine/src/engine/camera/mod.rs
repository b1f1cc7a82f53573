//! Viewport camera for navigating the working plane.
//!
//! Orbit around a focus point with right drag, zoom with the wheel and pan
//! with WASD.

/// Viewport camera resource and controller system.
pub mod viewport_camera;
