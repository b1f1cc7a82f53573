//! Distance label content and placement.
//!
//! Placement is an ordered table keyed on the line angle. The first rule
//! whose range contains `angle % 360` wins; anything else gets a level label
//! with no offset. The remainder keeps the sign of the angle, so lines that
//! point below the X axis (negative `atan2`) always use the fallback.

use bevy::prelude::*;
use constants::measure_settings::LABEL_UNIT_SUFFIX;
use std::ops::Range;

/// How the label is turned relative to the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRotation {
    Level,
    AlignWithLine,
}

/// Direction the label is pushed off its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelOffsetAxis {
    None,
    Up,
    Sideways,
}

impl LabelOffsetAxis {
    fn direction(self) -> Vec3 {
        match self {
            Self::None => Vec3::ZERO,
            Self::Up => Vec3::Y,
            Self::Sideways => Vec3::X,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacementRule {
    pub angle_range: Range<f32>,
    pub rotation: LabelRotation,
    pub offset_axis: LabelOffsetAxis,
}

pub const LABEL_PLACEMENT_RULES: [LabelPlacementRule; 3] = [
    LabelPlacementRule {
        angle_range: 0.0..30.0,
        rotation: LabelRotation::Level,
        offset_axis: LabelOffsetAxis::Up,
    },
    LabelPlacementRule {
        angle_range: 30.0..60.0,
        rotation: LabelRotation::AlignWithLine,
        offset_axis: LabelOffsetAxis::Up,
    },
    LabelPlacementRule {
        angle_range: 60.0..90.0,
        rotation: LabelRotation::Level,
        offset_axis: LabelOffsetAxis::Sideways,
    },
];

/// Rotation and offset axis for a line at `angle_degrees`.
pub fn select_label_placement(angle_degrees: f32) -> (LabelRotation, LabelOffsetAxis) {
    let wrapped = angle_degrees % 360.0;
    LABEL_PLACEMENT_RULES
        .iter()
        .find(|rule| rule.angle_range.contains(&wrapped))
        .map(|rule| (rule.rotation, rule.offset_axis))
        .unwrap_or((LabelRotation::Level, LabelOffsetAxis::None))
}

/// Label text for a distance: two decimals and the unit suffix.
pub fn format_distance(distance: f32) -> String {
    format!("{:.2} {}", distance, LABEL_UNIT_SUFFIX)
}

/// Box styling handed to the renderer along with the text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStyle {
    pub font_size: f32,
    pub padding: f32,
    pub corner_radius: f32,
}

/// Content and pose of one distance label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    pub text: String,
    /// Segment midpoint.
    pub anchor: Vec3,
    /// World-space displacement from the anchor.
    pub offset: Vec3,
    /// Roll in radians, counter-clockwise on the working plane.
    pub rotation: f32,
    pub style: LabelStyle,
}

impl LabelPlacement {
    pub fn new(
        distance: f32,
        anchor: Vec3,
        angle_degrees: f32,
        offset_distance: f32,
        style: LabelStyle,
    ) -> Self {
        let (rotation, axis) = select_label_placement(angle_degrees);
        let rotation = match rotation {
            LabelRotation::Level => 0.0,
            LabelRotation::AlignWithLine => angle_degrees.to_radians(),
        };

        Self {
            text: format_distance(distance),
            anchor,
            offset: axis.direction() * offset_distance,
            rotation,
            style,
        }
    }

    /// Where the label is drawn.
    pub fn position(&self) -> Vec3 {
        self.anchor + self.offset
    }
}
