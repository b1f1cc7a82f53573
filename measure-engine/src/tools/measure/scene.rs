//! Boundary between the measure core and the renderer.
//!
//! The core never touches meshes or entities directly. It asks an
//! [`AnnotationScene`] to create, move and release primitives, and keeps the
//! returned records. Release methods take records by value, so a record can
//! only ever be released once.

use super::annotation::{DimensionAnnotation, Segment};
use bevy::prelude::*;
use constants::render_settings::{
    ARROWHEAD_COLOUR, DIMENSION_LINE_COLOUR, DRAW_LINE_WIDTH, EXTENSION_LINE_COLOUR,
    LABEL_BACKGROUND_COLOUR, LABEL_TEXT_COLOUR, PREVIEW_LINE_COLOUR, PREVIEW_LINE_WIDTH,
};

/// Renderer operations the measure core depends on.
pub trait AnnotationScene {
    /// Create the live segment shown between the first and second click.
    fn spawn_preview(&mut self, segment: Segment) -> PreviewSegment;

    /// Move an existing preview to `preview.segment`.
    fn move_preview(&mut self, preview: &PreviewSegment);

    fn release_preview(&mut self, preview: PreviewSegment);

    /// Create and show every part of a dimension line.
    fn add_dimension(&mut self, annotation: &DimensionAnnotation) -> DimensionPrimitives;

    /// Hide a dimension line and free its per-measurement resources.
    fn release_dimension(&mut self, primitives: DimensionPrimitives);

    /// Free resources shared by all dimension lines. Called once at teardown.
    fn release_shared(&mut self);
}

/// Live preview owned by a pending measurement.
#[derive(Debug)]
pub struct PreviewSegment {
    pub line: Entity,
    pub segment: Segment,
}

/// The parts making up one dimension line.
#[derive(Debug)]
pub struct DimensionPrimitives {
    pub main_line: Entity,
    pub extension_lines: [Entity; 2],
    pub arrowheads: [Entity; 2],
    pub label: Entity,
    /// Meshes created for this measurement only.
    pub meshes: Vec<Handle<Mesh>>,
}

impl DimensionPrimitives {
    pub fn entities(&self) -> [Entity; 6] {
        [
            self.main_line,
            self.extension_lines[0],
            self.extension_lines[1],
            self.arrowheads[0],
            self.arrowheads[1],
            self.label,
        ]
    }
}

#[derive(Component)]
pub struct MeasurePreview;

/// Tag on every entity belonging to a completed dimension line.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionPart {
    MainLine,
    ExtensionLine,
    Arrowhead,
    Label,
}

/// World pose of a label node; the screen position follows the camera.
#[derive(Component, Debug, Clone, Copy)]
pub struct DimensionLabel {
    pub world_position: Vec3,
    pub rotation: f32,
}

/// Meshes and materials shared by all dimension lines.
#[derive(Resource, Clone)]
pub struct DimensionStyle {
    pub unit_line: Handle<Mesh>,
    pub dimension_material: Handle<StandardMaterial>,
    pub extension_material: Handle<StandardMaterial>,
    pub arrowhead_material: Handle<StandardMaterial>,
    pub preview_material: Handle<StandardMaterial>,
}

impl DimensionStyle {
    pub fn new(meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>) -> Self {
        let mut unlit = |colour: Color| {
            materials.add(StandardMaterial {
                base_color: colour,
                emissive: colour.to_linear(),
                unlit: true,
                double_sided: true,
                cull_mode: None,
                ..default()
            })
        };

        Self {
            dimension_material: unlit(DIMENSION_LINE_COLOUR),
            extension_material: unlit(EXTENSION_LINE_COLOUR),
            arrowhead_material: unlit(ARROWHEAD_COLOUR),
            preview_material: unlit(PREVIEW_LINE_COLOUR),
            unit_line: meshes.add(Cuboid::new(1.0, 1.0, 1.0)),
        }
    }
}

/// Create the shared style once the asset stores exist.
pub fn setup_dimension_style(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(DimensionStyle::new(&mut meshes, &mut materials));
}

/// [`AnnotationScene`] backed by Bevy entities and asset stores.
///
/// Built per system run from the system's parameters.
pub struct BevyAnnotationScene<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub meshes: &'a mut Assets<Mesh>,
    pub materials: &'a mut Assets<StandardMaterial>,
    pub style: &'a DimensionStyle,
    pub scene_root: Option<Entity>,
}

impl BevyAnnotationScene<'_, '_, '_> {
    fn spawn_part(&mut self, bundle: impl Bundle) -> Entity {
        let mut entity = self.commands.spawn(bundle);
        if let Some(root) = self.scene_root {
            entity.insert(ChildOf(root));
        }
        entity.id()
    }

    fn spawn_line(
        &mut self,
        segment: Segment,
        material: Handle<StandardMaterial>,
        part: DimensionPart,
    ) -> Entity {
        let bundle = (
            Mesh3d(self.style.unit_line.clone()),
            MeshMaterial3d(material),
            segment.transform(DRAW_LINE_WIDTH),
            part,
        );
        self.spawn_part(bundle)
    }
}

impl AnnotationScene for BevyAnnotationScene<'_, '_, '_> {
    fn spawn_preview(&mut self, segment: Segment) -> PreviewSegment {
        let bundle = (
            Mesh3d(self.style.unit_line.clone()),
            MeshMaterial3d(self.style.preview_material.clone()),
            segment.transform(PREVIEW_LINE_WIDTH),
            MeasurePreview,
        );
        let line = self.spawn_part(bundle);
        PreviewSegment { line, segment }
    }

    fn move_preview(&mut self, preview: &PreviewSegment) {
        self.commands
            .entity(preview.line)
            .insert(preview.segment.transform(PREVIEW_LINE_WIDTH));
    }

    fn release_preview(&mut self, preview: PreviewSegment) {
        self.commands.entity(preview.line).despawn();
    }

    fn add_dimension(&mut self, annotation: &DimensionAnnotation) -> DimensionPrimitives {
        let main_line = self.spawn_line(
            annotation.main_line,
            self.style.dimension_material.clone(),
            DimensionPart::MainLine,
        );
        let extension_lines = annotation.extension_lines.map(|segment| {
            self.spawn_line(
                segment,
                self.style.extension_material.clone(),
                DimensionPart::ExtensionLine,
            )
        });

        let mut meshes = Vec::with_capacity(2);
        let arrowheads = annotation.arrowheads.map(|arrowhead| {
            let mesh = self.meshes.add(arrowhead.local_triangle());
            meshes.push(mesh.clone());
            let bundle = (
                Mesh3d(mesh),
                MeshMaterial3d(self.style.arrowhead_material.clone()),
                arrowhead.transform(),
                DimensionPart::Arrowhead,
            );
            self.spawn_part(bundle)
        });

        let label = &annotation.label;
        let label = self
            .commands
            .spawn((
                Text::new(label.text.clone()),
                TextFont {
                    font_size: label.style.font_size,
                    ..default()
                },
                TextColor(LABEL_TEXT_COLOUR),
                Node {
                    position_type: PositionType::Absolute,
                    padding: UiRect::all(Val::Px(label.style.padding)),
                    ..default()
                },
                BackgroundColor(LABEL_BACKGROUND_COLOUR),
                BorderRadius::all(Val::Px(label.style.corner_radius)),
                Visibility::Hidden,
                DimensionLabel {
                    world_position: label.position(),
                    rotation: label.rotation,
                },
                DimensionPart::Label,
            ))
            .id();

        DimensionPrimitives {
            main_line,
            extension_lines,
            arrowheads,
            label,
            meshes,
        }
    }

    fn release_dimension(&mut self, primitives: DimensionPrimitives) {
        for entity in primitives.entities() {
            self.commands.entity(entity).despawn();
        }
        for mesh in &primitives.meshes {
            self.meshes.remove(mesh);
        }
    }

    fn release_shared(&mut self) {
        self.meshes.remove(&self.style.unit_line);
        for material in [
            &self.style.dimension_material,
            &self.style.extension_material,
            &self.style.arrowhead_material,
            &self.style.preview_material,
        ] {
            self.materials.remove(material);
        }
    }
}

/// Keep label nodes centred over their world anchors.
pub fn position_dimension_labels(
    tool: Res<super::MeasureTool>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut labels: Query<(
        &DimensionLabel,
        &ComputedNode,
        &mut Node,
        &mut Transform,
        &mut Visibility,
    )>,
) {
    let Some(camera_entity) = tool.camera() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.get(camera_entity) else {
        return;
    };

    for (label, computed, mut node, mut transform, mut visibility) in &mut labels {
        let screen = camera
            .world_to_viewport(camera_transform, label.world_position)
            .ok();
        place_label(
            screen,
            label,
            computed,
            &mut node,
            &mut transform,
            &mut visibility,
        );
    }
}

/// Centre a label node on its projected anchor, or hide it when the anchor
/// is off screen.
pub fn place_label(
    screen: Option<Vec2>,
    label: &DimensionLabel,
    computed: &ComputedNode,
    node: &mut Node,
    transform: &mut Transform,
    visibility: &mut Visibility,
) {
    let Some(screen) = screen else {
        *visibility = Visibility::Hidden;
        return;
    };

    // Layout sizes are physical pixels, node offsets logical ones.
    let half_size = computed.size() * computed.inverse_scale_factor() * 0.5;
    let top_left = screen - half_size;
    node.left = Val::Px(top_left.x);
    node.top = Val::Px(top_left.y);
    // Screen Y grows downwards, so the roll flips.
    transform.rotation = Quat::from_rotation_z(-label.rotation);
    *visibility = Visibility::Inherited;
}


#[cfg(test)]
mod tests {
    use super::*;

    fn label(rotation_degrees: f32) -> DimensionLabel {
        DimensionLabel {
            world_position: Vec3::ZERO,
            rotation: rotation_degrees.to_radians(),
        }
    }

    #[test]
    fn projected_label_is_centred_and_rolled() {
        let computed = ComputedNode {
            size: Vec2::new(80.0, 40.0),
            inverse_scale_factor: 0.5,
            ..default()
        };
        let mut node = Node::default();
        let mut transform = Transform::default();
        let mut visibility = Visibility::Hidden;

        place_label(
            Some(Vec2::new(200.0, 100.0)),
            &label(45.0),
            &computed,
            &mut node,
            &mut transform,
            &mut visibility,
        );

        assert_eq!(node.left, Val::Px(180.0));
        assert_eq!(node.top, Val::Px(90.0));
        assert!(
            transform
                .rotation
                .abs_diff_eq(Quat::from_rotation_z(-45f32.to_radians()), 1e-6)
        );
        assert_eq!(visibility, Visibility::Inherited);
    }

    #[test]
    fn unsized_label_sits_on_its_anchor() {
        let mut node = Node::default();
        let mut transform = Transform::default();
        let mut visibility = Visibility::Hidden;

        place_label(
            Some(Vec2::new(12.0, 34.0)),
            &label(0.0),
            &ComputedNode::default(),
            &mut node,
            &mut transform,
            &mut visibility,
        );

        assert_eq!(node.left, Val::Px(12.0));
        assert_eq!(node.top, Val::Px(34.0));
        assert_eq!(transform.rotation, Quat::IDENTITY);
    }

    #[test]
    fn label_without_projection_is_hidden() {
        let mut node = Node {
            left: Val::Px(5.0),
            ..default()
        };
        let mut transform = Transform::default();
        let mut visibility = Visibility::Inherited;

        place_label(
            None,
            &label(45.0),
            &ComputedNode::default(),
            &mut node,
            &mut transform,
            &mut visibility,
        );

        assert_eq!(visibility, Visibility::Hidden);
        assert_eq!(node.left, Val::Px(5.0));
    }
}
