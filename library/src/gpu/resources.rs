use crate::gpu::context::Context;
use std::rc::Rc;
use wgpu::BufferUsages;
use wgpu::util::DeviceExt;

pub(crate) struct Resources {
    context: Rc<Context>,
}

impl Resources {
    #[must_use]
    pub(crate) fn new(context: Rc<Context>) -> Self {
        Self { context }
    }

    #[must_use]
    fn create_buffer(&self, label: &str, usage: BufferUsages, buffer_data: &[u8]) -> wgpu::Buffer {
        self.context.device().create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: buffer_data,
            usage,
        })
    }

    /// Write-once vertex data: no COPY_DST, the contents are final.
    #[must_use]
    pub(crate) fn create_vertex_buffer(&self, label: &str, buffer_data: &[u8]) -> wgpu::Buffer {
        self.create_buffer(label, BufferUsages::VERTEX, buffer_data)
    }

    /// Write-once index data.
    #[must_use]
    pub(crate) fn create_index_buffer(&self, label: &str, buffer_data: &[u8]) -> wgpu::Buffer {
        self.create_buffer(label, BufferUsages::INDEX, buffer_data)
    }

    #[must_use]
    pub(crate) fn create_uniform_buffer(&self, label: &str, buffer_data: &[u8]) -> wgpu::Buffer {
        self.create_buffer(label, BufferUsages::UNIFORM | BufferUsages::COPY_DST, buffer_data)
    }
}
