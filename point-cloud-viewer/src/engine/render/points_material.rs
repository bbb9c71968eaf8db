use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::prelude::*;
use bevy::render::mesh::MeshVertexBufferLayoutRef;
use bevy::render::render_resource::{
    AsBindGroup, RenderPipelineDescriptor, ShaderRef, SpecializedMeshPipelineError,
};

const POINTS_SHADER_PATH: &str = "shaders/points.wgsl";

/// Unlit point sprites coloured per vertex. Each quad is expanded around its
/// point in view space so sprites keep a fixed world size and shrink with
/// distance.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct PointsMaterial {
    /// x: sprite edge length in world units.
    #[uniform(0)]
    pub params: Vec4,
}

impl PointsMaterial {
    pub fn new(size: f32) -> Self {
        Self {
            params: Vec4::new(size, 0.0, 0.0, 0.0),
        }
    }

    pub fn size(&self) -> f32 {
        self.params.x
    }
}

impl Material for PointsMaterial {
    fn vertex_shader() -> ShaderRef {
        POINTS_SHADER_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        POINTS_SHADER_PATH.into()
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            Mesh::ATTRIBUTE_UV_0.at_shader_location(1),
            Mesh::ATTRIBUTE_COLOR.at_shader_location(2),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];
        descriptor.primitive.cull_mode = None;
        Ok(())
    }
}
