//! Two-point distance measurement with CAD-style dimension lines.
//!
//! The core (geometry, annotation layout, state machine, registry) only talks
//! to the renderer through [`scene::AnnotationScene`]. The plugin below
//! adapts it to Bevy: hosts send [`MeasureInput`] events carrying world-space
//! points and modifier flags, and observe [`MeasureNotification`] events.

pub mod annotation;
pub mod geometry;
pub mod input;
pub mod label;
pub mod options;
pub mod registry;
pub mod scene;
pub mod session;

pub use options::{MeasureOptions, OptionsError};
pub use registry::{Measurement, MeasurementRegistry};
pub use session::{ClickOutcome, MeasureTool};

use bevy::prelude::*;
use scene::{BevyAnnotationScene, DimensionStyle, position_dimension_labels, setup_dimension_style};

/// Host requests, already translated to world space.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum MeasureInput {
    Activate,
    Deactivate,
    Toggle,
    PointerMoved(Vec3),
    Clicked {
        point: Vec3,
        coarse_snap: bool,
        fine_snap: bool,
    },
    Cancel,
    RemoveAt(usize),
    RemoveLast,
    ClearAll,
}

/// State changes reported back to the host.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum MeasureNotification {
    Activated,
    Deactivated,
    Started {
        start: Vec3,
    },
    Updated {
        start: Vec3,
        end: Vec3,
        distance: f32,
    },
    Completed {
        index: usize,
        start: Vec3,
        end: Vec3,
        distance: f32,
    },
    Cancelled,
    Removed {
        index: usize,
    },
    Cleared {
        count: usize,
    },
}

pub struct MeasureToolPlugin;

impl Plugin for MeasureToolPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MeasureTool>()
            .add_event::<MeasureInput>()
            .add_event::<MeasureNotification>()
            .add_systems(Startup, setup_dimension_style)
            .add_systems(
                Update,
                (apply_measure_input, position_dimension_labels).chain(),
            )
            .add_systems(Last, dispose_on_exit);
    }
}

/// Feed host input into the measure tool, in delivery order.
pub fn apply_measure_input(
    mut inputs: EventReader<MeasureInput>,
    mut notifications: EventWriter<MeasureNotification>,
    mut tool: ResMut<MeasureTool>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    style: Option<Res<DimensionStyle>>,
) {
    let Some(style) = style else {
        inputs.clear();
        return;
    };
    let mut scene = BevyAnnotationScene {
        commands: &mut commands,
        meshes: &mut meshes,
        materials: &mut materials,
        style: &style,
        scene_root: tool.scene_root(),
    };

    for input in inputs.read() {
        match *input {
            MeasureInput::Activate => {
                if tool.activate() {
                    notifications.write(MeasureNotification::Activated);
                }
            }
            MeasureInput::Deactivate => {
                if tool.deactivate(&mut scene) {
                    notifications.write(MeasureNotification::Deactivated);
                }
            }
            MeasureInput::Toggle => {
                if tool.is_active() {
                    if tool.deactivate(&mut scene) {
                        notifications.write(MeasureNotification::Deactivated);
                    }
                } else if tool.activate() {
                    notifications.write(MeasureNotification::Activated);
                }
            }
            MeasureInput::PointerMoved(point) => {
                if let Some(distance) = tool.handle_pointer_move(point, &mut scene) {
                    trace!("Measurement preview at {}: {:.2}", point, distance);
                    if let Some(start) = tool.start_point() {
                        notifications.write(MeasureNotification::Updated {
                            start,
                            end: point,
                            distance,
                        });
                    }
                }
            }
            MeasureInput::Clicked {
                point,
                coarse_snap,
                fine_snap,
            } => match tool.handle_click(point, coarse_snap, fine_snap, &mut scene) {
                ClickOutcome::Ignored => {}
                ClickOutcome::Started { start } => {
                    notifications.write(MeasureNotification::Started { start });
                }
                ClickOutcome::Completed {
                    index,
                    start,
                    end,
                    distance,
                } => {
                    notifications.write(MeasureNotification::Completed {
                        index,
                        start,
                        end,
                        distance,
                    });
                }
                ClickOutcome::Discarded => {
                    notifications.write(MeasureNotification::Cancelled);
                }
            },
            MeasureInput::Cancel => {
                if tool.cancel_measurement(&mut scene) {
                    notifications.write(MeasureNotification::Cancelled);
                }
            }
            MeasureInput::RemoveAt(index) => {
                if tool.remove_at(index, &mut scene) {
                    notifications.write(MeasureNotification::Removed { index });
                }
            }
            MeasureInput::RemoveLast => {
                let Some(index) = tool.measurements().len().checked_sub(1) else {
                    continue;
                };
                if tool.remove_at(index, &mut scene) {
                    notifications.write(MeasureNotification::Removed { index });
                }
            }
            MeasureInput::ClearAll => {
                let count = tool.measurements().len();
                tool.clear_all(&mut scene);
                notifications.write(MeasureNotification::Cleared { count });
            }
        }
    }
}

/// Release every measurement and the shared style when the app exits.
pub fn dispose_on_exit(
    mut exits: EventReader<AppExit>,
    mut tool: ResMut<MeasureTool>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    style: Option<Res<DimensionStyle>>,
) {
    if exits.read().next().is_none() {
        return;
    }
    let Some(style) = style else {
        return;
    };

    let mut scene = BevyAnnotationScene {
        commands: &mut commands,
        meshes: &mut meshes,
        materials: &mut materials,
        style: &style,
        scene_root: tool.scene_root(),
    };
    tool.dispose(&mut scene);
    commands.remove_resource::<DimensionStyle>();
}
