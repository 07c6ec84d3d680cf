use crate::geometry::alias::Matrix;
use bytemuck::{Pod, Zeroable};
use palette::Srgb;

/// Per-object uniform block, rewritten every frame: model matrix, combined
/// projection×view×model matrix and the material's ambient reflectance.
/// Layout matches `ObjectUniforms` in the WGSL source (two mat4x4 plus one
/// vec4).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub(crate) struct ObjectUniforms {
    model: [[f32; 4]; 4],
    model_view_projection: [[f32; 4]; 4],
    ambient_reflectance: [f32; 4],
}

impl ObjectUniforms {
    #[must_use]
    pub(crate) fn new(model: Matrix, model_view_projection: Matrix, ambient_reflectance: Srgb) -> Self {
        Self {
            model: model.into(),
            model_view_projection: model_view_projection.into(),
            ambient_reflectance: [ambient_reflectance.red, ambient_reflectance.green, ambient_reflectance.blue, 1.0],
        }
    }
}

/// Session-wide uniform block, written exactly once when the pipeline is
/// built: the light's ambient emission.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub(crate) struct SessionUniforms {
    light_ambient: [f32; 4],
}

impl SessionUniforms {
    #[must_use]
    pub(crate) fn new(light_ambient: Srgb) -> Self {
        Self { light_ambient: [light_ambient.red, light_ambient.green, light_ambient.blue, 1.0] }
    }
}
