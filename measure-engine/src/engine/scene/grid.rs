/// Reference grid drawn on the working plane (world XY)
use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use constants::render_settings::{
    WORK_PLANE_GRID_CELL, WORK_PLANE_GRID_COLOUR, WORK_PLANE_GRID_EXTENT,
};

#[derive(Component)]
pub struct WorkPlaneGrid;

/// Line endpoints for a square grid centred on the origin.
pub fn grid_line_positions(half_extent: f32, cell: f32) -> Vec<[f32; 3]> {
    let lines_per_side = (half_extent / cell).floor() as i32;
    let mut positions = Vec::with_capacity(((lines_per_side * 2 + 1) * 4) as usize);

    for i in -lines_per_side..=lines_per_side {
        let offset = i as f32 * cell;
        // Parallel to Y
        positions.push([offset, -half_extent, 0.0]);
        positions.push([offset, half_extent, 0.0]);
        // Parallel to X
        positions.push([-half_extent, offset, 0.0]);
        positions.push([half_extent, offset, 0.0]);
    }

    positions
}

/// Spawn the working plane grid as a single line-list mesh.
pub fn create_work_plane_grid(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let grid_material = materials.add(StandardMaterial {
        base_color: WORK_PLANE_GRID_COLOUR,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    let mesh = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(
            Mesh::ATTRIBUTE_POSITION,
            grid_line_positions(WORK_PLANE_GRID_EXTENT, WORK_PLANE_GRID_CELL),
        );

    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(grid_material),
        Transform::default(),
        WorkPlaneGrid,
    ));
}
