//! Headless tests for the measure tool plugin.
//!
//! Input events go in, entities, assets and notifications are checked
//! after each `App::update`.

use bevy::prelude::*;
use measure_engine::tools::measure::input::measure_keyboard_shortcuts;
use measure_engine::tools::measure::options::{MeasureOptionsLoader, apply_loaded_options};
use measure_engine::tools::measure::scene::{
    DimensionLabel, DimensionPart, DimensionStyle, MeasurePreview,
};
use measure_engine::tools::measure::{
    MeasureInput, MeasureNotification, MeasureOptions, MeasureTool, MeasureToolPlugin,
    apply_measure_input,
};

/// Create a minimal Bevy app for testing (no rendering).
fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    // Asset plugin is required for mesh/material handling
    app.add_plugins(bevy::asset::AssetPlugin::default());
    app.init_resource::<Assets<Mesh>>();
    app.init_resource::<Assets<StandardMaterial>>();
    app.add_plugins(MeasureToolPlugin);
    app
}

/// App with the tool wired to a scene root and activated.
fn active_app() -> App {
    let mut app = test_app();
    let scene = app
        .world_mut()
        .spawn((Transform::default(), Visibility::default()))
        .id();
    let camera = app.world_mut().spawn_empty().id();
    app.world_mut()
        .resource_mut::<MeasureTool>()
        .init(scene, camera);
    send(&mut app, &[MeasureInput::Activate]);
    app
}

fn send(app: &mut App, inputs: &[MeasureInput]) {
    for input in inputs {
        app.world_mut().send_event(*input);
    }
    app.update();
}

fn click(x: f32, y: f32) -> MeasureInput {
    MeasureInput::Clicked {
        point: Vec3::new(x, y, 0.0),
        coarse_snap: false,
        fine_snap: false,
    }
}

fn count<C: Component>(app: &mut App) -> usize {
    app.world_mut().query::<&C>().iter(app.world()).count()
}

fn notifications(app: &App) -> Vec<MeasureNotification> {
    let events = app.world().resource::<Events<MeasureNotification>>();
    let mut cursor = events.get_cursor();
    cursor.read(events).copied().collect()
}

fn measurement_count(app: &App) -> usize {
    app.world().resource::<MeasureTool>().measurements().len()
}

#[test]
fn activation_is_reported() {
    let app = active_app();
    assert!(app.world().resource::<MeasureTool>().is_active());
    assert!(notifications(&app).contains(&MeasureNotification::Activated));
}

#[test]
fn two_clicks_spawn_a_labelled_dimension_line() {
    let mut app = active_app();

    send(&mut app, &[click(0.0, 0.0)]);
    assert_eq!(count::<MeasurePreview>(&mut app), 1);
    assert_eq!(measurement_count(&app), 0);

    send(&mut app, &[click(3.0, 4.0)]);
    assert_eq!(count::<MeasurePreview>(&mut app), 0);
    assert_eq!(measurement_count(&app), 1);
    assert_eq!(count::<DimensionPart>(&mut app), 6);

    let labels: Vec<String> = app
        .world_mut()
        .query::<(&Text, &DimensionPart)>()
        .iter(app.world())
        .filter(|(_, part)| **part == DimensionPart::Label)
        .map(|(text, _)| text.0.clone())
        .collect();
    assert_eq!(labels, vec!["5.00 m".to_string()]);

    assert!(notifications(&app).contains(&MeasureNotification::Completed {
        index: 0,
        start: Vec3::ZERO,
        end: Vec3::new(3.0, 4.0, 0.0),
        distance: 5.0,
    }));
}

#[test]
fn coarse_snap_is_applied_on_completion() {
    let mut app = active_app();
    app.world_mut()
        .resource_mut::<MeasureTool>()
        .set_options(MeasureOptions {
            coarse_snap_step: 0.5,
            ..default()
        });

    send(
        &mut app,
        &[
            click(0.0, 0.0),
            MeasureInput::Clicked {
                point: Vec3::new(1.23, 0.0, 0.0),
                coarse_snap: true,
                fine_snap: false,
            },
        ],
    );

    let tool = app.world().resource::<MeasureTool>();
    let measurement = tool.measurements().get(0).expect("one measurement");
    assert!((measurement.distance() - 1.0).abs() < 1e-6);
}

#[test]
fn cancel_after_preview_leaves_nothing_behind() {
    let mut app = active_app();

    send(
        &mut app,
        &[
            click(0.0, 0.0),
            MeasureInput::PointerMoved(Vec3::new(2.0, 0.0, 0.0)),
        ],
    );
    assert_eq!(count::<MeasurePreview>(&mut app), 1);
    assert!(notifications(&app).contains(&MeasureNotification::Updated {
        start: Vec3::ZERO,
        end: Vec3::new(2.0, 0.0, 0.0),
        distance: 2.0,
    }));

    send(&mut app, &[MeasureInput::Cancel]);
    assert_eq!(count::<MeasurePreview>(&mut app), 0);
    assert_eq!(count::<DimensionPart>(&mut app), 0);
    assert_eq!(measurement_count(&app), 0);
    assert!(!app.world().resource::<MeasureTool>().is_pending());
}

#[test]
fn remove_at_releases_entities_and_meshes() {
    let mut app = active_app();
    send(
        &mut app,
        &[click(0.0, 0.0), click(1.0, 0.0), click(0.0, 0.0), click(0.0, 2.0)],
    );
    assert_eq!(measurement_count(&app), 2);
    // Shared unit line plus two arrowheads per measurement.
    assert_eq!(app.world().resource::<Assets<Mesh>>().len(), 5);

    send(&mut app, &[MeasureInput::RemoveAt(2)]);
    assert_eq!(measurement_count(&app), 2);

    send(&mut app, &[MeasureInput::RemoveAt(0)]);
    assert_eq!(measurement_count(&app), 1);
    assert_eq!(count::<DimensionPart>(&mut app), 6);
    assert_eq!(app.world().resource::<Assets<Mesh>>().len(), 3);

    let remaining = app.world().resource::<MeasureTool>().measurements().get(0).map(|m| m.distance());
    assert_eq!(remaining, Some(2.0));
}

#[test]
fn clear_all_twice_stays_empty() {
    let mut app = active_app();
    send(
        &mut app,
        &[click(0.0, 0.0), click(1.0, 1.0), click(2.0, 0.0), click(5.0, 0.0)],
    );

    send(&mut app, &[MeasureInput::ClearAll]);
    assert_eq!(measurement_count(&app), 0);
    assert_eq!(count::<DimensionPart>(&mut app), 0);

    send(&mut app, &[MeasureInput::ClearAll]);
    assert_eq!(measurement_count(&app), 0);
}

#[test]
fn deactivate_cancels_and_blocks_input() {
    let mut app = active_app();
    send(&mut app, &[click(0.0, 0.0), MeasureInput::Deactivate]);
    assert_eq!(count::<MeasurePreview>(&mut app), 0);

    send(&mut app, &[click(0.0, 0.0), click(1.0, 0.0)]);
    assert_eq!(measurement_count(&app), 0);
    assert!(!app.world().resource::<MeasureTool>().is_active());
}

#[test]
fn app_exit_disposes_everything() {
    let mut app = active_app();
    send(&mut app, &[click(0.0, 0.0), click(1.0, 0.0), click(3.0, 3.0)]);

    app.world_mut().send_event(AppExit::Success);
    app.update();

    let tool = app.world().resource::<MeasureTool>();
    assert!(tool.is_disposed());
    assert!(tool.measurements().is_empty());
    assert!(app.world().get_resource::<DimensionStyle>().is_none());
    assert_eq!(app.world().resource::<Assets<Mesh>>().len(), 0);
    assert_eq!(app.world().resource::<Assets<StandardMaterial>>().len(), 0);
    assert_eq!(count::<DimensionPart>(&mut app), 0);
    assert_eq!(count::<MeasurePreview>(&mut app), 0);
}

/// App whose options loader already holds `options` as a loaded asset.
fn app_with_options_asset(options: MeasureOptions) -> (App, Handle<MeasureOptions>) {
    let mut app = test_app();
    app.init_asset::<MeasureOptions>();
    let handle = app
        .world_mut()
        .resource_mut::<Assets<MeasureOptions>>()
        .add(options);
    app.insert_resource(MeasureOptionsLoader::new(handle.clone()));
    app.add_systems(Update, apply_loaded_options);
    (app, handle)
}

#[test]
fn invalid_options_asset_keeps_previous_options() {
    let (mut app, _handle) = app_with_options_asset(MeasureOptions {
        coarse_snap_step: 0.0,
        ..default()
    });
    app.update();

    assert!(app.world().resource::<MeasureOptionsLoader>().is_applied());
    assert_eq!(
        app.world().resource::<MeasureTool>().options(),
        &MeasureOptions::default()
    );
}

#[test]
fn valid_options_asset_is_applied_once() {
    let loaded = MeasureOptions {
        coarse_snap_step: 2.0,
        label_font_size: 24.0,
        ..default()
    };
    let (mut app, handle) = app_with_options_asset(loaded.clone());
    app.update();

    assert!(app.world().resource::<MeasureOptionsLoader>().is_applied());
    assert_eq!(app.world().resource::<MeasureTool>().options(), &loaded);

    // Later edits to the asset are not picked up again.
    if let Some(options) = app
        .world_mut()
        .resource_mut::<Assets<MeasureOptions>>()
        .get_mut(&handle)
    {
        options.coarse_snap_step = 3.0;
    }
    app.update();
    assert_eq!(app.world().resource::<MeasureTool>().options(), &loaded);
}

#[test]
fn labels_hide_when_the_camera_cannot_project() {
    let mut app = test_app();
    let scene = app
        .world_mut()
        .spawn((Transform::default(), Visibility::default()))
        .id();
    // No render target is ever computed headless, so projection fails.
    let camera = app
        .world_mut()
        .spawn((
            Camera::default(),
            GlobalTransform::from(Transform::from_xyz(0.0, 0.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y)),
        ))
        .id();
    app.world_mut()
        .resource_mut::<MeasureTool>()
        .init(scene, camera);
    send(&mut app, &[MeasureInput::Activate, click(0.0, 0.0), click(1.0, 1.0)]);
    assert_eq!(measurement_count(&app), 1);

    let mut labels = app
        .world_mut()
        .query_filtered::<&mut Visibility, With<DimensionLabel>>();
    for mut visibility in labels.iter_mut(app.world_mut()) {
        *visibility = Visibility::Inherited;
    }
    app.update();

    let visibilities: Vec<Visibility> = labels.iter(app.world()).copied().collect();
    assert_eq!(visibilities, vec![Visibility::Hidden]);
}

#[test]
fn keyboard_shortcuts_remove_and_clear() {
    let mut app = active_app();
    app.init_resource::<ButtonInput<KeyCode>>();
    app.add_systems(Update, measure_keyboard_shortcuts.before(apply_measure_input));
    send(
        &mut app,
        &[click(0.0, 0.0), click(1.0, 0.0), click(0.0, 0.0), click(0.0, 2.0)],
    );
    assert_eq!(measurement_count(&app), 2);

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::Delete);
    app.update();
    let remaining = app.world().resource::<MeasureTool>().measurements().get(0).map(|m| m.distance());
    assert_eq!(measurement_count(&app), 1);
    assert_eq!(remaining, Some(1.0));

    let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    keyboard.reset_all();
    keyboard.press(KeyCode::KeyC);
    app.update();
    assert_eq!(measurement_count(&app), 0);
}
