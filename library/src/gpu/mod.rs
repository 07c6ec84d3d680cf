pub(crate) mod context;
pub(crate) mod frame_buffer_size;
pub(crate) mod object_buffers;
pub(crate) mod render;
pub(crate) mod resources;
pub(crate) mod shader_pipeline;
pub(crate) mod uniforms;
