use bevy::input::mouse::MouseScrollUnit;
use bevy::math::EulerRot;
use bevy::{
    input::mouse::{MouseMotion, MouseWheel},
    prelude::*,
};

/// Orbit camera looking down at the working plane (world XY, Z up).
#[derive(Resource)]
pub struct ViewportCamera {
    pub focus_point: Vec3,
    pub distance: f32,
    /// Rotation about world Z.
    pub yaw: f32,
    /// Tilt away from straight down; zero is a top view.
    pub pitch: f32,
}

impl ViewportCamera {
    pub fn new(focus_point: Vec3, distance: f32) -> Self {
        Self {
            focus_point,
            distance,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::ZXY, self.yaw, self.pitch, 0.0)
    }

    /// Camera pose for the current focus, distance and angles.
    pub fn transform(&self) -> Transform {
        let rotation = self.rotation();
        Transform {
            translation: self.focus_point + rotation * Vec3::Z * self.distance,
            rotation,
            ..default()
        }
    }
}

impl Default for ViewportCamera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 15.0)
    }
}

pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut viewport: ResMut<ViewportCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    // Right drag orbits around the focus point
    if mouse_button.pressed(MouseButton::Right) && mouse_delta != Vec2::ZERO {
        let yaw_sens = 0.0035;
        let pitch_sens = 0.0030;
        viewport.yaw += -mouse_delta.x * yaw_sens;
        viewport.pitch = (viewport.pitch - mouse_delta.y * pitch_sens).clamp(0.0, 1.3);
    }

    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }
    if scroll_accum.abs() > f32::EPSILON {
        let zoom_speed = (viewport.distance * 0.1).clamp(0.2, 50.0);
        viewport.distance = (viewport.distance - scroll_accum * zoom_speed).clamp(1.0, 500.0);
    }

    // WASD pans on the plane relative to the current yaw
    let mut move_input = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        move_input.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        move_input.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        move_input.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        move_input.x -= 1.0;
    }
    if move_input != Vec2::ZERO {
        let heading = Quat::from_rotation_z(viewport.yaw);
        let world_delta = heading * move_input.normalize().extend(0.0);
        let speed = (viewport.distance * 0.8).clamp(1.0, 100.0);
        viewport.focus_point += world_delta * speed * time.delta_secs();
    }

    let target = viewport.transform();
    let lerp_speed = (12.0 * time.delta_secs()).min(1.0);
    camera_transform.translation = camera_transform.translation.lerp(target.translation, lerp_speed);
    camera_transform.rotation = camera_transform.rotation.slerp(target.rotation, lerp_speed);
}
