#[cfg(test)]
mod tests {
    use crate::geometry::uv_sphere::TessellationConfig;
    use crate::gpu::frame_buffer_size::FrameBufferSize;
    use crate::gpu::headless_device::tests::create_headless_wgpu_context;
    use crate::gpu::render::Renderer;
    use crate::scene::camera::Camera;
    use crate::scene::container::{Container, SceneSlot};
    use crate::scene::source::{ChannelSceneSource, FileSceneSource, LoadError};
    use std::io::Write;
    use std::sync::mpsc;
    use std::time::{Duration, Instant};
    use tempfile::NamedTempFile;

    const TEST_DEADLINE: Duration = Duration::from_millis(40);
    const TEST_COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
    const TEST_FRAME_SIZE: u32 = 32;

    const UNIT_TRIANGLE_COLLECTION: &str = r#"
        [
            {
                "material": {"ambient": [1.0, 1.0, 1.0]},
                "vertices": [[0.0, 0.0, 0.5], [0.5, 0.0, 0.5], [0.0, 0.5, 0.5]],
                "triangles": [[0, 1, 2]]
            }
        ]
    "#;

    const EMPTY_COLLECTION: &str = "[]";

    #[must_use]
    fn delivered(payload: &str) -> ChannelSceneSource {
        let (producer, consumer) = mpsc::channel();
        producer.send(payload.to_string()).unwrap();
        ChannelSceneSource::new(consumer)
    }

    #[must_use]
    fn never_delivered() -> ChannelSceneSource {
        let (producer, consumer) = mpsc::channel();
        std::mem::forget(producer);
        ChannelSceneSource::new(consumer)
    }

    #[must_use]
    fn render_once(scene: &Container) -> Renderer {
        let context = create_headless_wgpu_context();
        let mut renderer = Renderer::new(
            context.clone(),
            scene,
            Camera::default(),
            TessellationConfig::default(),
            TEST_COLOR_FORMAT,
            FrameBufferSize::new(TEST_FRAME_SIZE, TEST_FRAME_SIZE),
        )
        .unwrap();

        let target = context.device().create_texture(&wgpu::TextureDescriptor {
            label: Some("end to end render target"),
            size: wgpu::Extent3d { width: TEST_FRAME_SIZE, height: TEST_FRAME_SIZE, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TEST_COLOR_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        renderer.render(&target.create_view(&wgpu::TextureViewDescriptor::default()));
        context.device().poll(wgpu::PollType::Wait).unwrap();

        renderer
    }

    #[test]
    fn test_scene_from_channels_reaches_the_screen() {
        let scene = Container::from_sources(
            &delivered(UNIT_TRIANGLE_COLLECTION),
            &delivered(EMPTY_COLLECTION),
            TEST_DEADLINE,
        )
        .unwrap();

        let renderer = render_once(&scene);

        let entries = renderer.registry().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].slot(), SceneSlot::Mesh(0));
        assert_eq!(entries[0].vertex_buffer().size(), (9 * size_of::<f32>()) as u64);
        assert_eq!(entries[0].index_count(), 3);
    }

    #[test]
    fn test_scene_from_files_reaches_the_screen() {
        let mut meshes_file = NamedTempFile::new().unwrap();
        meshes_file.write_all(UNIT_TRIANGLE_COLLECTION.as_bytes()).unwrap();
        let mut ellipsoids_file = NamedTempFile::new().unwrap();
        ellipsoids_file.write_all(b"[{\"x\": 0.0, \"y\": 0.0, \"z\": 0.5, \"ambient\": [0.0, 1.0, 0.0]}]").unwrap();

        let scene = Container::from_sources(
            &FileSceneSource::new(meshes_file.path()),
            &FileSceneSource::new(ellipsoids_file.path()),
            TEST_DEADLINE,
        )
        .unwrap();

        let renderer = render_once(&scene);

        assert_eq!(renderer.registry().entries().len(), 2);
        assert_eq!(renderer.registry().position_of(SceneSlot::Ellipsoid(0)), Some(1));
    }

    #[test]
    fn test_silent_source_fails_the_load_before_any_gpu_work() {
        let load_started = Instant::now();

        let load_result = Container::from_sources(
            &never_delivered(),
            &delivered(EMPTY_COLLECTION),
            TEST_DEADLINE,
        );

        assert!(matches!(load_result, Err(LoadError::Timeout { deadline }) if deadline == TEST_DEADLINE));
        assert!(load_started.elapsed() >= TEST_DEADLINE);
    }
}
