use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::camera::viewport_camera::{ViewportCamera, camera_controller};
use crate::engine::core::window_config::create_window_config;
use crate::engine::scene::grid::create_work_plane_grid;
use crate::tools::measure::input::{PointerState, measure_keyboard_shortcuts, measure_pointer_input};
use crate::tools::measure::options::{
    MeasureOptions, MeasureOptionsLoader, apply_loaded_options, start_options_loading,
};
use crate::tools::measure::{MeasureInput, MeasureTool, MeasureToolPlugin, apply_measure_input};

/// Root entity every dimension line is parented to.
#[derive(Component)]
pub struct MeasurementSceneRoot;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        // Registers MeasureOptions as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<MeasureOptions>::new(&["options.json"]))
        .add_plugins(MeasureToolPlugin)
        .init_resource::<ViewportCamera>()
        .init_resource::<PointerState>()
        .init_resource::<MeasureOptionsLoader>();

    app.add_systems(Startup, (setup, start_options_loading))
        .add_systems(
            Update,
            (
                camera_controller,
                apply_loaded_options,
                // Host input is translated before the tool consumes it.
                (measure_keyboard_shortcuts, measure_pointer_input).before(apply_measure_input),
            ),
        );

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight::default(),
        Transform::from_xyz(4.0, -6.0, 10.0).looking_at(Vec3::ZERO, Vec3::Z),
    ));
}

fn spawn_camera(commands: &mut Commands, viewport: &ViewportCamera) -> Entity {
    commands
        .spawn((Camera3d::default(), viewport.transform()))
        .id()
}

// Wire the measure tool to a scene root and the camera, then start it.
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut tool: ResMut<MeasureTool>,
    mut inputs: EventWriter<MeasureInput>,
    viewport: Res<ViewportCamera>,
) {
    spawn_lighting(&mut commands);
    let camera = spawn_camera(&mut commands, &viewport);
    create_work_plane_grid(&mut commands, &mut meshes, &mut materials);

    let scene_root = commands
        .spawn((
            MeasurementSceneRoot,
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    tool.init(scene_root, camera);
    inputs.write(MeasureInput::Activate);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    use constants::measure_settings::{COARSE_SNAP_STEP, FINE_SNAP_STEP};

    commands.spawn((
        Text::new(format!(
            "Click twice to measure | Shift: {COARSE_SNAP_STEP} m snap | Ctrl: {FINE_SNAP_STEP} m snap\n\
             M: toggle tool | Esc: cancel | Delete: remove last | C: clear all"
        )),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(0.9, 0.9, 0.9)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));
}
