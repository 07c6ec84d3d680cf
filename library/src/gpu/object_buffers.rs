use crate::gpu::resources::Resources;
use crate::gpu::uniforms::ObjectUniforms;
use crate::scene::container::SceneSlot;
use crate::scene::gpu_ready_geometry::GpuReadyGeometry;
use bytemuck::Zeroable;
use palette::Srgb;
use std::collections::HashMap;
use std::rc::Rc;

/// GPU-side footprint of one scene object: its write-once vertex and index
/// buffers, the per-frame uniform buffer, and draw metadata. Created at load,
/// never mutated or freed before session teardown.
pub(crate) struct GpuObjectBuffers {
    slot: SceneSlot,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    uniforms_buffer: wgpu::Buffer,
    bind_group: Option<wgpu::BindGroup>,
    index_count: u32,
    triangle_count: u32,
    ambient: Srgb,
}

impl GpuObjectBuffers {
    #[must_use]
    pub(crate) fn slot(&self) -> SceneSlot {
        self.slot
    }

    #[must_use]
    pub(crate) fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    #[must_use]
    pub(crate) fn index_buffer(&self) -> &wgpu::Buffer {
        &self.index_buffer
    }

    #[must_use]
    pub(crate) fn uniforms_buffer(&self) -> &wgpu::Buffer {
        &self.uniforms_buffer
    }

    /// Resolved by the shader pipeline once both compile and link succeeded.
    #[must_use]
    pub(crate) fn bind_group(&self) -> &wgpu::BindGroup {
        self.bind_group.as_ref().expect("draw attempted before the shader pipeline bound this object")
    }

    pub(crate) fn set_bind_group(&mut self, bind_group: wgpu::BindGroup) {
        assert!(self.bind_group.is_none(), "object is already bound");
        self.bind_group = Some(bind_group);
    }

    #[must_use]
    pub(crate) fn index_count(&self) -> u32 {
        self.index_count
    }

    #[must_use]
    pub(crate) fn triangle_count(&self) -> u32 {
        self.triangle_count
    }

    #[must_use]
    pub(crate) fn ambient(&self) -> Srgb {
        self.ambient
    }
}

/// Ordered collection of every uploaded object. Draw order is registration
/// order; individual objects are addressed through their `SceneSlot`, never
/// through positional arithmetic.
pub(crate) struct ObjectRegistry {
    resources: Rc<Resources>,
    entries: Vec<GpuObjectBuffers>,
    positions: HashMap<SceneSlot, usize>,
}

impl ObjectRegistry {
    #[must_use]
    pub(crate) fn new(resources: Rc<Resources>) -> Self {
        Self { resources, entries: Vec::new(), positions: HashMap::new() }
    }

    pub(crate) fn upload(&mut self, slot: SceneSlot, geometry: &GpuReadyGeometry, ambient: Srgb) {
        assert!(!self.positions.contains_key(&slot), "{slot:?} is already uploaded");

        let vertex_buffer = self.resources.create_vertex_buffer(
            &format!("vertex buffer of {slot:?}"),
            bytemuck::cast_slice(geometry.positions()),
        );
        let index_buffer = self.resources.create_index_buffer(
            &format!("index buffer of {slot:?}"),
            bytemuck::cast_slice(geometry.indices()),
        );
        let uniforms_buffer = self.resources.create_uniform_buffer(
            &format!("uniforms of {slot:?}"),
            bytemuck::bytes_of(&ObjectUniforms::zeroed()),
        );

        self.positions.insert(slot, self.entries.len());
        self.entries.push(GpuObjectBuffers {
            slot,
            vertex_buffer,
            index_buffer,
            uniforms_buffer,
            bind_group: None,
            index_count: geometry.indices().len() as u32,
            triangle_count: geometry.triangle_count() as u32,
            ambient,
        });
    }

    #[must_use]
    pub(crate) fn entries(&self) -> &[GpuObjectBuffers] {
        &self.entries
    }

    #[must_use]
    pub(crate) fn entries_mut(&mut self) -> &mut [GpuObjectBuffers] {
        &mut self.entries
    }

    #[must_use]
    pub(crate) fn entry(&self, slot: SceneSlot) -> Option<&GpuObjectBuffers> {
        self.positions.get(&slot).map(|position| &self.entries[*position])
    }

    #[must_use]
    pub(crate) fn position_of(&self, slot: SceneSlot) -> Option<usize> {
        self.positions.get(&slot).copied()
    }

    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
