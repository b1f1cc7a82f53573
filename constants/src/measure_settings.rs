/// Gap between a measured point and the far end of its extension line (world units).
pub const EXTENSION_OFFSET: f32 = 0.15;

/// Distance an extension line runs past the dimension line (world units).
pub const EXTENSION_OVERSHOOT: f32 = 0.25;

/// Arrowhead length from apex to base (world units).
pub const ARROWHEAD_SIZE: f32 = 0.2;

/// Full apex angle of an arrowhead triangle.
pub const ARROWHEAD_ANGLE_DEGREES: f32 = 30.0;

/// Label box padding in logical pixels.
pub const LABEL_PADDING: f32 = 6.0;
pub const LABEL_CORNER_RADIUS: f32 = 4.0;
pub const LABEL_FONT_SIZE: f32 = 16.0;

/// Distance the label is pushed off the dimension line (world units).
pub const LABEL_OFFSET: f32 = 0.3;

/// Suffix appended to every distance label. Only one linear unit is supported.
pub const LABEL_UNIT_SUFFIX: &str = "m";

/// Snap step used while the coarse modifier (Shift) is held.
pub const COARSE_SNAP_STEP: f32 = 0.5;

/// Snap step used while the fine modifier (Ctrl) is held.
pub const FINE_SNAP_STEP: f32 = 0.1;

/// Options asset path, relative to the asset root.
pub const MEASURE_OPTIONS_PATH: &str = "config/measure.options.json";
