use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::config::AppConfig;
use crate::controls;
use crate::error::RendererError;
use crate::gpu::GpuContext;
use crate::input::Input;
use crate::mesh::Mesh;
use crate::phong_pass::{GpuMesh, PhongPass, PhongUniforms};
use crate::scene::SceneState;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.1,
    b: 0.1,
    a: 1.0,
};

/// Opens the viewer window and runs until it is closed or `Esc` is released.
///
/// # Errors
///
/// Returns the first fatal error: event loop creation, window or GPU setup,
/// sphere generation, or an unrecoverable surface error.
pub fn run(config: AppConfig) -> Result<(), RendererError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = PhongApp::Pending {
        config,
        failure: None,
    };
    event_loop.run_app(&mut app)?;

    match app {
        PhongApp::Pending {
            failure: Some(err), ..
        } => Err(err),
        PhongApp::Running(running) => running.failure.map_or(Ok(()), Err),
        _ => Ok(()),
    }
}

enum PhongApp {
    Pending {
        config: AppConfig,
        failure: Option<RendererError>,
    },
    Running(Box<Running>),
}

struct Running {
    window: Arc<Window>,
    gpu: GpuContext,
    pass: PhongPass,
    mesh: GpuMesh,
    scene: SceneState,
    input: Input,
    last_frame: Instant,
    failure: Option<RendererError>,
}

impl Running {
    fn create(event_loop: &ActiveEventLoop, config: &AppConfig) -> Result<Self, RendererError> {
        let window_attrs = WindowAttributes::default()
            .with_title(&config.window.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.window.width,
                config.window.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu = GpuContext::new(window.clone())?;

        let sphere = &config.sphere;
        let mesh = Mesh::sphere(
            sphere.radius,
            sphere.latitude_segments,
            sphere.longitude_segments,
        )?;
        info!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "generated sphere {}x{}",
            mesh.latitude_segments(),
            mesh.longitude_segments()
        );

        let gpu_mesh = GpuMesh::new(&gpu, &mesh);
        let pass = PhongPass::new(&gpu);
        let scene = SceneState::from_config(config);
        info!("Material: {}", scene.material);

        Ok(Self {
            window,
            gpu,
            pass,
            mesh: gpu_mesh,
            scene,
            input: Input::new(),
            last_frame: Instant::now(),
            failure: None,
        })
    }

    /// Applies this frame's commands. Returns `false` once quit was requested.
    fn update(&mut self) -> bool {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        for command in controls::frame_commands(&self.input) {
            if !controls::apply(&mut self.scene, command) {
                return false;
            }
        }

        self.scene.advance(dt);
        true
    }

    fn render(&mut self) -> Result<(), RendererError> {
        let matrices = self.scene.frame_matrices(self.gpu.aspect())?;
        let uniforms = PhongUniforms::new(&matrices, &self.scene);

        let output = match self.gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("surface lost, reconfiguring");
                self.gpu.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("surface acquire timed out, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        self.pass.ensure_depth_size(&self.gpu);

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Phong Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Phong Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.pass.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.pass
                .render(&self.gpu, &mut render_pass, &self.mesh, &uniforms);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

impl ApplicationHandler for PhongApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let PhongApp::Pending { config, failure } = self else {
            return;
        };

        match Running::create(event_loop, config) {
            Ok(running) => *self = PhongApp::Running(Box::new(running)),
            Err(e) => {
                error!("failed to start viewer: {e}");
                *failure = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let PhongApp::Running(app) = self else {
            return;
        };

        app.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                info!("window closed");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                app.gpu.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                if !app.update() {
                    info!("quit requested");
                    event_loop.exit();
                    return;
                }

                if let Err(e) = app.render() {
                    error!("render failed: {e}");
                    app.failure = Some(e);
                    event_loop.exit();
                    return;
                }

                app.input.begin_frame();
                app.window.request_redraw();
            }
            _ => {}
        }
    }
}
