use bevy::color::Color;

pub const DRAW_LINE_WIDTH: f32 = 0.03;
pub const PREVIEW_LINE_WIDTH: f32 = 0.02;

/// Segments shorter than this are not oriented; the rotation stays identity.
pub const MIN_SEGMENT_LENGTH: f32 = 1e-4;

pub const DIMENSION_LINE_COLOUR: Color = Color::srgb(1.0, 0.27, 0.0);
pub const EXTENSION_LINE_COLOUR: Color = Color::srgb(0.85, 0.85, 0.85);
pub const ARROWHEAD_COLOUR: Color = Color::srgb(1.0, 0.27, 0.0);
pub const PREVIEW_LINE_COLOUR: Color = Color::srgb(1.0, 1.0, 0.2);

pub const LABEL_TEXT_COLOUR: Color = Color::srgb(0.08, 0.08, 0.08);
pub const LABEL_BACKGROUND_COLOUR: Color = Color::srgba(1.0, 1.0, 1.0, 0.9);

/// Half extent of the reference grid on the working plane (metres).
pub const WORK_PLANE_GRID_EXTENT: f32 = 20.0;
pub const WORK_PLANE_GRID_CELL: f32 = 1.0;
pub const WORK_PLANE_GRID_COLOUR: Color = Color::srgba(1.0, 1.0, 1.0, 0.15);
