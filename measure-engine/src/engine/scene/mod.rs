//! Static scene content around the measure tool.

/// Reference grid on the working plane.
pub mod grid;
