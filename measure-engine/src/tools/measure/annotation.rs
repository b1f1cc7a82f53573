//! Synthesis of the primitive set for one completed measurement.

use super::geometry::{angle_degrees, distance, midpoint, perpendicular};
use super::label::{LabelPlacement, LabelStyle};
use super::options::MeasureOptions;
use super::registry::Measurement;
use super::scene::AnnotationScene;
use bevy::prelude::*;
use constants::render_settings::MIN_SEGMENT_LENGTH;

/// Straight segment between two world points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec3,
    pub end: Vec3,
}

impl Segment {
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f32 {
        distance(self.start, self.end)
    }

    /// Pose for a unit cube stretched along X into a bar of the given width.
    pub fn transform(&self, width: f32) -> Transform {
        let delta = self.end - self.start;
        let length = delta.length();
        let rotation = if length > MIN_SEGMENT_LENGTH {
            Quat::from_rotation_arc(Vec3::X, delta / length)
        } else {
            Quat::IDENTITY
        };

        Transform {
            translation: midpoint(self.start, self.end),
            rotation,
            scale: Vec3::new(length.max(MIN_SEGMENT_LENGTH), width, width),
        }
    }
}

/// Triangular end marker. The apex sits on the measured point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowheadPlacement {
    pub apex: Vec3,
    /// Unit direction the apex points to.
    pub facing: Vec3,
    /// Extra roll about `facing`, radians.
    pub roll: f32,
    pub size: f32,
    pub apex_angle_degrees: f32,
}

impl ArrowheadPlacement {
    /// Triangle in local space: apex at the origin, base behind it along +Z.
    pub fn local_triangle(&self) -> Triangle3d {
        let half_width = self.size * (self.apex_angle_degrees.to_radians() * 0.5).tan();
        Triangle3d::new(
            Vec3::ZERO,
            Vec3::new(-half_width, 0.0, self.size),
            Vec3::new(half_width, 0.0, self.size),
        )
    }

    /// Face the marker along `facing`, then roll it by the line angle.
    pub fn transform(&self) -> Transform {
        let mut transform = Transform::from_translation(self.apex).looking_to(self.facing, Vec3::Z);
        transform.rotate_local_z(self.roll);
        transform
    }
}

/// Everything a renderer needs to draw one dimension line.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionAnnotation {
    pub start: Vec3,
    pub end: Vec3,
    pub distance: f32,
    pub angle_degrees: f32,
    pub main_line: Segment,
    pub extension_lines: [Segment; 2],
    pub arrowheads: [ArrowheadPlacement; 2],
    pub label: LabelPlacement,
}

impl DimensionAnnotation {
    /// Lay out the annotation for `start -> end`. Callers guarantee `start != end`.
    pub fn layout(start: Vec3, end: Vec3, options: &MeasureOptions) -> Self {
        let distance = distance(start, end);
        let angle = angle_degrees(start, end);
        let direction = (end - start).normalize_or_zero();
        let normal = perpendicular(direction);

        let extension = |point: Vec3| {
            Segment::new(
                point - normal * options.extension_offset,
                point + normal * options.extension_overshoot,
            )
        };

        let arrowhead = |apex: Vec3, facing: Vec3| ArrowheadPlacement {
            apex,
            facing,
            roll: angle.to_radians(),
            size: options.arrowhead_size,
            apex_angle_degrees: options.arrowhead_angle_degrees,
        };

        let label = LabelPlacement::new(
            distance,
            midpoint(start, end),
            angle,
            options.label_offset,
            LabelStyle {
                font_size: options.label_font_size,
                padding: options.label_padding,
                corner_radius: options.label_corner_radius,
            },
        );

        Self {
            start,
            end,
            distance,
            angle_degrees: angle,
            main_line: Segment::new(start, end),
            extension_lines: [extension(start), extension(end)],
            arrowheads: [arrowhead(start, -direction), arrowhead(end, direction)],
            label,
        }
    }
}

/// Lay out a dimension line, hand it to the scene and wrap the result.
pub fn build<S: AnnotationScene>(
    start: Vec3,
    end: Vec3,
    options: &MeasureOptions,
    scene: &mut S,
) -> Measurement {
    let annotation = DimensionAnnotation::layout(start, end, options);
    let primitives = scene.add_dimension(&annotation);
    Measurement::new(annotation.start, annotation.end, annotation.distance, primitives)
}
