use crate::geometry::fundamental_constants::COMPONENTS_IN_POSITION;
use crate::gpu::context::Context;
use crate::gpu::object_buffers::ObjectRegistry;
use crate::gpu::resources::Resources;
use crate::gpu::uniforms::SessionUniforms;
use palette::Srgb;
use std::rc::Rc;
use thiserror::Error;
use wgpu::RenderPass;

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[derive(Error, Debug)]
pub enum ShaderPipelineError {
    #[error("shader stage compilation failed: {what:?}")]
    Compile { what: String },
    #[error("shader program link failed: {what:?}")]
    Link { what: String },
    #[error("uniform binding resolution failed: {what:?}")]
    Bind { what: String },
}

const OBJECT_UNIFORMS_BINDING: u32 = 0;
const SESSION_UNIFORMS_BINDING: u32 = 1;

const VERTEX_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: (COMPONENTS_IN_POSITION * size_of::<f32>()) as wgpu::BufferAddress,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[wgpu::VertexAttribute {
        offset: 0,
        shader_location: 0,
        format: wgpu::VertexFormat::Float32x3,
    }],
};

/// The single shader program of the session, built in three validated
/// stages: module compilation, pipeline link, uniform binding resolution.
/// A failure in any stage is fatal to session startup; there is no fallback
/// null program.
pub(crate) struct ShaderPipeline {
    context: Rc<Context>,
    pipeline: wgpu::RenderPipeline,
    object_bindings_layout: wgpu::BindGroupLayout,
    session_uniforms_buffer: wgpu::Buffer,
}

impl ShaderPipeline {
    const PIPELINE_LABEL: &'static str = "scene rasterization pipeline";

    pub(crate) fn new(
        context: Rc<Context>,
        resources: &Resources,
        color_format: wgpu::TextureFormat,
        shader_source_code: &str,
        light_ambient: Srgb,
    ) -> Result<Self, ShaderPipelineError> {
        let module = Self::compile(&context, shader_source_code)?;
        let pipeline = Self::link(&context, &module, color_format)?;

        /* The light's ambient emission is process-wide: its buffer is filled
        here, at link time, and never written again. */
        let (object_bindings_layout, session_uniforms_buffer) = Self::validated(&context, |_device| {
            let layout = pipeline.get_bind_group_layout(0);
            let light = resources.create_uniform_buffer(
                "session uniforms",
                bytemuck::bytes_of(&SessionUniforms::new(light_ambient)),
            );
            (layout, light)
        })
        .map_err(|what| ShaderPipelineError::Bind { what })?;

        Ok(Self { context, pipeline, object_bindings_layout, session_uniforms_buffer })
    }

    fn compile(context: &Context, shader_source_code: &str) -> Result<wgpu::ShaderModule, ShaderPipelineError> {
        Self::validated(context, |device| {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("scene shader module"),
                source: wgpu::ShaderSource::Wgsl(shader_source_code.into()),
            })
        })
        .map_err(|what| ShaderPipelineError::Compile { what })
    }

    fn link(context: &Context, module: &wgpu::ShaderModule, color_format: wgpu::TextureFormat) -> Result<wgpu::RenderPipeline, ShaderPipelineError> {
        Self::validated(context, |device| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(Self::PIPELINE_LABEL),
                layout: None,
                vertex: wgpu::VertexState {
                    module,
                    entry_point: None,
                    compilation_options: Default::default(),
                    buffers: &[VERTEX_LAYOUT],
                },
                fragment: Some(wgpu::FragmentState {
                    module,
                    entry_point: None,
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: color_format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        })
        .map_err(|what| ShaderPipelineError::Link { what })
    }

    /// Creates the per-object bind groups, completing the load phase. After
    /// this, every registry entry can be drawn.
    pub(crate) fn bind_objects(&self, registry: &mut ObjectRegistry) -> Result<(), ShaderPipelineError> {
        let bind_groups = Self::validated(&self.context, |device| {
            registry
                .entries()
                .iter()
                .map(|entry| {
                    device.create_bind_group(&wgpu::BindGroupDescriptor {
                        label: Some(&format!("bindings of {:?}", entry.slot())),
                        layout: &self.object_bindings_layout,
                        entries: &[
                            wgpu::BindGroupEntry {
                                binding: OBJECT_UNIFORMS_BINDING,
                                resource: entry.uniforms_buffer().as_entire_binding(),
                            },
                            wgpu::BindGroupEntry {
                                binding: SESSION_UNIFORMS_BINDING,
                                resource: self.session_uniforms_buffer.as_entire_binding(),
                            },
                        ],
                    })
                })
                .collect::<Vec<_>>()
        })
        .map_err(|what| ShaderPipelineError::Bind { what })?;

        for (entry, bind_group) in registry.entries_mut().iter_mut().zip(bind_groups) {
            entry.set_bind_group(bind_group);
        }
        Ok(())
    }

    pub(crate) fn set_into_pass(&self, pass: &mut RenderPass) {
        pass.set_pipeline(&self.pipeline);
    }

    /// Runs a wgpu resource creation under a validation error scope and
    /// turns any captured error into a diagnostic string.
    fn validated<Product, Creation>(context: &Context, create: Creation) -> Result<Product, String>
    where
        Creation: FnOnce(&wgpu::Device) -> Product,
    {
        context.device().push_error_scope(wgpu::ErrorFilter::Validation);
        let product = create(context.device());
        match pollster::block_on(context.device().pop_error_scope()) {
            None => Ok(product),
            Some(error) => Err(error.to_string()),
        }
    }
}

pub(crate) const CODE_FOR_GPU: &str = include_str!("../../assets/shaders/rasterizer.wgsl");
