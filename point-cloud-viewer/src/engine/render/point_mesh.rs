use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};

use crate::engine::loading::point_cloud_model::PointCloudModel;

/// Quad corner offsets in sprite units, counter-clockwise from bottom-left.
const CORNERS: [[f32; 2]; 4] = [[-0.5, -0.5], [0.5, -0.5], [0.5, 0.5], [-0.5, 0.5]];

/// Four vertices per point, all at the point's position, with the corner
/// offset carried in UV_0 for the vertex shader to expand.
pub fn build_point_sprite_mesh(model: &PointCloudModel) -> Mesh {
    let count = model.len();
    let mut positions = Vec::with_capacity(count * 4);
    let mut corners = Vec::with_capacity(count * 4);
    let mut colors = Vec::with_capacity(count * 4);
    let mut indices = Vec::with_capacity(count * 6);

    for (point, (position, color)) in model.positions().iter().zip(model.colors()).enumerate() {
        let base = (point * 4) as u32;
        for corner in CORNERS {
            positions.push(*position);
            corners.push(corner);
            colors.push(*color);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    // Only the GPU needs the expanded buffers.
    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, corners)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
        .with_inserted_indices(Indices::U32(indices))
}
