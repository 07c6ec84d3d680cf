use cgmath::Deg;
use std::env;
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ControlFlow;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::Window;
use winit::window::WindowId;

use library::Engine;
use library::geometry::alias::{Point, Vector};
use library::geometry::uv_sphere::TessellationConfig;
use library::scene::camera::Camera;
use library::scene::container::Container;
use library::scene::source::{FileSceneSource, SCENE_FETCH_DEADLINE};
use log::error;
use log::info;
use log::trace;

const WINDOW_TITLE: &str = "Scene Rasterizer Sandbox";

const MESH_COLLECTION_PATH: &str = "assets/triangles.json";
const ELLIPSOID_COLLECTION_PATH: &str = "assets/ellipsoids.json";

const CAMERA_STEP: f32 = 0.1;

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(format!("info,{}", Engine::get_reasonable_log_filter())),
    )
    .init();

    match env::current_dir() {
        Ok(path) => println!("current directory: {}", path.display()),
        Err(e) => eprintln!("error getting current directory: {}", e),
    }

    let event_loop = EventLoop::new()
        .map_err(|e| format!("event loop creation failed: {}", e))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut application = Application::default();

    event_loop.run_app(&mut application)
        .map_err(|e| format!("event loop has failed: {}", e))?;

    Ok(())
}

#[derive(Default)]
struct Application {
    window: Option<Arc<Window>>,
    engine: Option<Engine>,

    camera_pan: f32,
}

/* The reference viewpoint of the scene collections: eye just behind the
scene box, looking down the +z axis. Panning shifts eye and target together,
so the view direction never changes. */
#[must_use]
fn make_panned_camera(pan: f32) -> Camera {
    Camera::new(
        Point::new(pan, 0.0, -0.8),
        Point::new(pan, 0.0, 0.5),
        Vector::new(0.0, 1.0, 0.0),
        Deg(90.0),
        1.0,
        0.1,
        10.0,
    )
}

impl Application {
    fn pan_camera(&mut self, direction: f32) {
        self.camera_pan += direction * CAMERA_STEP;
        let panned = make_panned_camera(self.camera_pan);
        self.engine.as_mut().map(|engine| *engine.camera() = panned);
    }
}

impl ApplicationHandler for Application {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let window_creation
            = event_loop.create_window(Window::default_attributes()
                .with_title(WINDOW_TITLE));

        match window_creation {
            Ok(ware) => {
                let window = Arc::new(ware);
                self.window = Some(window.clone());

                let scene_or_error = Container::from_sources(
                    &FileSceneSource::new(MESH_COLLECTION_PATH),
                    &FileSceneSource::new(ELLIPSOID_COLLECTION_PATH),
                    SCENE_FETCH_DEADLINE,
                );
                let scene = match scene_or_error {
                    Ok(ware) => ware,
                    Err(scene_loading_error) => {
                        error!("failed to load the scene: {}", scene_loading_error);
                        event_loop.exit();
                        return;
                    }
                };

                let camera = make_panned_camera(self.camera_pan);

                match pollster::block_on(Engine::new(window.clone(), &scene, camera, TessellationConfig::default())) {
                    Ok(e) => {
                        self.engine = Some(e);
                    },
                    Err(error) => {
                        error!("failed to create an engine: {}", error);
                        event_loop.exit();
                    }
                }
            }
            Err(error) => {
                error!("could not create the window: {}", error);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                trace!("exiting the loop via close request");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                info!("window resized to {:?}", new_size);
                self.engine.as_mut().map(|engine| {
                    engine.handle_window_resize(new_size);
                });
            }
            WindowEvent::ScaleFactorChanged { scale_factor: new_scale_factor, .. } => {
                info!("window scale factor changed to {:?}", new_scale_factor);
            }
            WindowEvent::RedrawRequested => {
                self.window.as_ref().map(|window| {
                    self.engine.as_mut().map(|engine| {
                        engine.render(|| {
                            window.pre_present_notify();
                        });
                    });
                    window.request_redraw();
                });
            }
            WindowEvent::KeyboardInput { event, .. } => {
                match event.logical_key {
                    Key::Named(NamedKey::ArrowRight) => {
                        self.pan_camera(1.0);
                    },
                    Key::Named(NamedKey::ArrowLeft) => {
                        self.pan_camera(-1.0);
                    },
                    Key::Character(letter_key) => {
                        if "r" == letter_key {
                            self.camera_pan = 0.0;
                            self.pan_camera(0.0);
                        }
                    }
                    _ => (),
                }
            }
            _ => (),
        }
    }
}
