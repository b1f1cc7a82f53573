//! Shared tuning constants for the dimension measurement engine.

/// Default geometry, snapping and label settings for dimension annotations.
pub mod measure_settings;

/// Line widths, marker sizes and colours used when drawing annotations.
pub mod render_settings;
