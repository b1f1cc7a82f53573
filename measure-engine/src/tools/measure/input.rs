//! Mouse and keyboard translation for the measure tool.
//!
//! Cursor positions are cast from the tool's camera onto the working plane
//! (world XY, `z = 0`). Shift requests coarse snapping, Ctrl fine snapping.
//! `M` toggles the tool, `Escape` cancels the pending measurement, `Delete`
//! removes the latest measurement and `C` clears them all.

use super::{MeasureInput, MeasureTool};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Intersect a viewport position with the working plane.
pub fn cursor_to_work_plane(
    cursor: Vec2,
    camera: &Camera,
    camera_transform: &GlobalTransform,
) -> Option<Vec3> {
    let ray = camera.viewport_to_world(camera_transform, cursor).ok()?;
    let t = ray.intersect_plane(Vec3::ZERO, InfinitePlane3d::new(Vec3::Z))?;
    Some(ray.get_point(t))
}

/// Last pointer position sent to the tool, to avoid repeating moves.
#[derive(Resource, Default)]
pub struct PointerState {
    last_point: Option<Vec3>,
}

pub fn measure_pointer_input(
    mut inputs: EventWriter<MeasureInput>,
    mut pointer: ResMut<PointerState>,
    tool: Res<MeasureTool>,
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
) {
    if !tool.is_active() {
        pointer.last_point = None;
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Some((camera, camera_transform)) = tool.camera().and_then(|e| cameras.get(e).ok()) else {
        return;
    };
    let Some(point) = cursor_to_work_plane(cursor, camera, camera_transform) else {
        return;
    };

    if pointer.last_point != Some(point) {
        pointer.last_point = Some(point);
        inputs.write(MeasureInput::PointerMoved(point));
    }

    if mouse.just_pressed(MouseButton::Left) {
        inputs.write(MeasureInput::Clicked {
            point,
            coarse_snap: keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]),
            fine_snap: keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]),
        });
    }
}

/// Tool shortcuts. The web build receives the same keys through the canvas.
pub fn measure_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut inputs: EventWriter<MeasureInput>,
) {
    if keyboard.just_pressed(KeyCode::KeyM) {
        inputs.write(MeasureInput::Toggle);
    }
    if keyboard.just_pressed(KeyCode::Escape) {
        inputs.write(MeasureInput::Cancel);
    }
    if keyboard.just_pressed(KeyCode::Delete) {
        inputs.write(MeasureInput::RemoveLast);
    }
    if keyboard.just_pressed(KeyCode::KeyC) {
        inputs.write(MeasureInput::ClearAll);
    }
}

