use crate::geometry::alias::Matrix;
use crate::geometry::uv_sphere::TessellationConfig;
use crate::gpu::context::Context;
use crate::gpu::frame_buffer_size::FrameBufferSize;
use crate::gpu::object_buffers::ObjectRegistry;
use crate::gpu::resources::Resources;
use crate::gpu::shader_pipeline::{CODE_FOR_GPU, DEPTH_FORMAT, ShaderPipeline, ShaderPipelineError};
use crate::gpu::uniforms::ObjectUniforms;
use crate::scene::camera::Camera;
use crate::scene::container::{Container, SceneSlot};
use cgmath::SquareMatrix;
use palette::Srgb;
use std::rc::Rc;

/// The light's ambient emission. There is a single implicit white light in
/// the session; objects are tinted by their own ambient reflectance only.
pub(crate) const LIGHT_AMBIENT: Srgb = Srgb::new(1.0, 1.0, 1.0);

const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;
const FAR_PLANE_DEPTH: f32 = 1.0;

pub(crate) struct Renderer {
    context: Rc<Context>,
    registry: ObjectRegistry,
    shader_pipeline: ShaderPipeline,
    camera: Camera,
    depth_view: wgpu::TextureView,
}

impl Renderer {
    /// Uploads every scene object, builds the shader pipeline and resolves
    /// each object's bindings. After a successful return the registry is
    /// sealed: the draw list never changes for the rest of the session.
    pub(crate) fn new(
        context: Rc<Context>,
        scene: &Container,
        camera: Camera,
        tessellation: TessellationConfig,
        color_format: wgpu::TextureFormat,
        frame_buffer_size: FrameBufferSize,
    ) -> Result<Self, ShaderPipelineError> {
        let resources = Rc::new(Resources::new(context.clone()));
        let mut registry = ObjectRegistry::new(resources.clone());

        for (index, mesh) in scene.meshes().iter().enumerate() {
            registry.upload(SceneSlot::Mesh(index), mesh.geometry(), mesh.material().ambient());
        }
        for (index, ellipsoid) in scene.ellipsoids().iter().enumerate() {
            registry.upload(SceneSlot::Ellipsoid(index), &ellipsoid.tessellate(tessellation), ellipsoid.material().ambient());
        }

        let shader_pipeline = ShaderPipeline::new(context.clone(), &resources, color_format, CODE_FOR_GPU, LIGHT_AMBIENT)?;
        shader_pipeline.bind_objects(&mut registry)?;

        let depth_view = Self::create_depth_view(&context, frame_buffer_size);

        Ok(Self { context, registry, shader_pipeline, camera, depth_view })
    }

    /// Draws one frame into the target view. The camera matrices are
    /// recomputed from scratch on every call, so camera mutations between
    /// frames always take effect on the next one.
    pub(crate) fn render(&mut self, target: &wgpu::TextureView) {
        let view_projection = self.camera.view_projection();

        for entry in self.registry.entries() {
            let model = Matrix::identity();
            let uniforms = ObjectUniforms::new(model, view_projection * model, entry.ambient());
            self.context.queue().write_buffer(entry.uniforms_buffer(), 0, bytemuck::bytes_of(&uniforms));
        }

        let mut encoder = self.context.device().create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame encoder"),
        });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(FAR_PLANE_DEPTH),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.shader_pipeline.set_into_pass(&mut pass);
            for entry in self.registry.entries() {
                pass.set_bind_group(0, entry.bind_group(), &[]);
                pass.set_vertex_buffer(0, entry.vertex_buffer().slice(..));
                pass.set_index_buffer(entry.index_buffer().slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..entry.index_count(), 0, 0..1);
            }
        }
        self.context.queue().submit(Some(encoder.finish()));
    }

    pub(crate) fn set_output_size(&mut self, size: FrameBufferSize) {
        self.depth_view = Self::create_depth_view(&self.context, size);
    }

    #[must_use]
    pub(crate) fn camera(&mut self) -> &mut Camera {
        &mut self.camera
    }

    #[must_use]
    pub(crate) fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    #[must_use]
    fn create_depth_view(context: &Context, size: FrameBufferSize) -> wgpu::TextureView {
        let depth_texture = context.device().create_texture(&wgpu::TextureDescriptor {
            label: Some("depth buffer"),
            size: wgpu::Extent3d {
                width: size.width(),
                height: size.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        depth_texture.create_view(&wgpu::TextureViewDescriptor::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::headless_device::tests::create_headless_wgpu_context;
    use crate::scene::records::{EllipsoidRecord, MaterialRecord, MeshRecord};

    const TEST_COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
    const TEST_FRAME_WIDTH: u32 = 64;
    const TEST_FRAME_HEIGHT: u32 = 64;

    #[must_use]
    fn unit_triangle_record() -> MeshRecord {
        MeshRecord {
            vertices: vec![[0.0, 0.0, 0.5], [0.5, 0.0, 0.5], [0.0, 0.5, 0.5]],
            triangles: vec![[0, 1, 2]],
            material: MaterialRecord { ambient: [1.0, 0.0, 0.0], diffuse: None, specular: None, n: None },
        }
    }

    #[must_use]
    fn centered_ellipsoid_record() -> EllipsoidRecord {
        EllipsoidRecord { x: 0.0, y: 0.0, z: 0.5, ambient: [0.0, 1.0, 0.0], diffuse: None, specular: None, n: None }
    }

    #[must_use]
    fn make_render_target(context: &Context) -> wgpu::TextureView {
        let texture = context.device().create_texture(&wgpu::TextureDescriptor {
            label: Some("test render target"),
            size: wgpu::Extent3d { width: TEST_FRAME_WIDTH, height: TEST_FRAME_HEIGHT, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TEST_COLOR_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    #[must_use]
    fn make_system_under_test(scene: &Container) -> Renderer {
        Renderer::new(
            create_headless_wgpu_context(),
            scene,
            Camera::default(),
            TessellationConfig::default(),
            TEST_COLOR_FORMAT,
            FrameBufferSize::new(TEST_FRAME_WIDTH, TEST_FRAME_HEIGHT),
        )
        .unwrap()
    }

    #[test]
    fn test_registry_upload_order_follows_the_scene() {
        let mut scene = Container::new();
        scene.add_mesh(&unit_triangle_record()).unwrap();
        scene.add_mesh(&unit_triangle_record()).unwrap();
        scene.add_ellipsoid(&centered_ellipsoid_record()).unwrap();

        let system_under_test = make_system_under_test(&scene);

        let draw_order: Vec<SceneSlot> = system_under_test.registry().entries().iter().map(|entry| entry.slot()).collect();
        assert_eq!(draw_order, vec![SceneSlot::Mesh(0), SceneSlot::Mesh(1), SceneSlot::Ellipsoid(0)]);
    }

    #[test]
    fn test_ellipsoid_tessellation_happens_at_upload() {
        let mut scene = Container::new();
        scene.add_ellipsoid(&centered_ellipsoid_record()).unwrap();

        let system_under_test = make_system_under_test(&scene);

        let config = TessellationConfig::default();
        let expected_triangles = (config.latitude_bands() * config.longitude_bands() * 2) as u32;
        assert_eq!(system_under_test.registry().entries()[0].triangle_count(), expected_triangles);
    }

    #[test]
    fn test_render_one_frame() {
        let mut scene = Container::new();
        scene.add_mesh(&unit_triangle_record()).unwrap();
        scene.add_ellipsoid(&centered_ellipsoid_record()).unwrap();

        let mut system_under_test = make_system_under_test(&scene);
        let target = make_render_target(&system_under_test.context);

        system_under_test.render(&target);

        system_under_test.context.device().poll(wgpu::PollType::Wait).unwrap();
    }

    #[test]
    fn test_render_an_empty_scene() {
        let mut system_under_test = make_system_under_test(&Container::new());
        let target = make_render_target(&system_under_test.context);

        system_under_test.render(&target);

        system_under_test.context.device().poll(wgpu::PollType::Wait).unwrap();
    }

    #[test]
    fn test_resize_recreates_the_depth_buffer() {
        let mut scene = Container::new();
        scene.add_mesh(&unit_triangle_record()).unwrap();
        let mut system_under_test = make_system_under_test(&scene);

        system_under_test.set_output_size(FrameBufferSize::new(TEST_FRAME_WIDTH * 2, TEST_FRAME_HEIGHT * 2));

        let texture = system_under_test.context.device().create_texture(&wgpu::TextureDescriptor {
            label: Some("resized render target"),
            size: wgpu::Extent3d { width: TEST_FRAME_WIDTH * 2, height: TEST_FRAME_HEIGHT * 2, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TEST_COLOR_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        system_under_test.render(&texture.create_view(&wgpu::TextureViewDescriptor::default()));
    }
}
