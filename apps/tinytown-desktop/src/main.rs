use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use egui::Context as EguiContext;
use tinytown_assets::TextureSet;
use tinytown_common::TownConfig;
use tinytown_input::{Action, Key, bind_key, mouse_look};
use tinytown_render_wgpu::{FrameBatch, RenderError, WgpuRenderer};
use tinytown_scene::{CLEAR_COLOR, Control, SceneState};
use tinytown_tools::SceneInspector;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

const KEY_HELP: &str = "F1: Inspector | RMB: Look | WASD/RF: Move | IJKL: Turn | Q: Quit";

#[derive(Parser)]
#[command(name = "tinytown-desktop", about = "Tiny town desktop application")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Town configuration (YAML); defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding tex0.bmp .. tex5.bmp
    #[arg(long, default_value = "./assets")]
    assets: PathBuf,
}

/// Translate the physical keys the town binds.
fn key_from_code(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::KeyQ => Key::Char('q'),
        KeyCode::KeyW => Key::Char('w'),
        KeyCode::KeyS => Key::Char('s'),
        KeyCode::KeyA => Key::Char('a'),
        KeyCode::KeyD => Key::Char('d'),
        KeyCode::KeyR => Key::Char('r'),
        KeyCode::KeyF => Key::Char('f'),
        KeyCode::KeyI => Key::Char('i'),
        KeyCode::KeyJ => Key::Char('j'),
        KeyCode::KeyK => Key::Char('k'),
        KeyCode::KeyL => Key::Char('l'),
        KeyCode::Digit1 => Key::Char('1'),
        KeyCode::Digit2 => Key::Char('2'),
        KeyCode::Digit3 => Key::Char('3'),
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::F1 => Key::F1,
        _ => return None,
    };
    Some(key)
}

/// Application state.
struct AppState {
    scene: SceneState,
    batch: FrameBatch,
    textures: TextureSet,
    show_inspector: bool,
    mouse_captured: bool,
}

impl AppState {
    fn new(scene: SceneState, textures: TextureSet) -> Self {
        Self {
            scene,
            batch: FrameBatch::new(),
            textures,
            show_inspector: false,
            mouse_captured: false,
        }
    }

    /// Returns `Control::Quit` when the app should close.
    fn handle_action(&mut self, action: Action) -> Control {
        if action == Action::ToggleInspector {
            self.show_inspector = !self.show_inspector;
        }
        self.scene.apply(action)
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_inspector {
            return;
        }

        let summary = SceneInspector::summary(&self.scene);
        let mut pending = Vec::new();

        egui::SidePanel::left("inspector")
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Tiny Town");
                ui.separator();
                ui.label(format!("Frame: {}  Seed: {}", summary.frame, summary.seed));
                ui.label(format!(
                    "Blocks: {} buildings, {} grass",
                    summary.buildings, summary.grass
                ));
                ui.label(format!("Camera: {:?}", summary.camera));
                let cam = self.scene.camera();
                ui.label(format!(
                    "Eye: ({:.1}, {:.1}, {:.1})  yaw {:.0}  pitch {:.0}",
                    cam.position.x, cam.position.y, cam.position.z, cam.yaw, cam.pitch
                ));
                ui.separator();

                ui.heading("View");
                ui.horizontal(|ui| {
                    if ui.button("Orbit (1)").clicked() {
                        pending.push(Action::ToggleOrbit);
                    }
                    let label = if self.scene.orbit_running() {
                        "Pause (2)"
                    } else {
                        "Resume (2)"
                    };
                    if ui.button(label).clicked() {
                        pending.push(Action::ToggleOrbitPause);
                    }
                    if ui.button("Follow (3)").clicked() {
                        pending.push(Action::ToggleFollow);
                    }
                });
                ui.separator();

                ui.heading("Traffic");
                let h = summary.headings;
                ui.label(format!("Vehicles: {}", summary.fleet_size));
                ui.label(format!(
                    "Right {}  Left {}  Up {}  Down {}  Stopped {}",
                    h.right, h.left, h.up, h.down, h.stop
                ));
                if let Some(lead) = SceneInspector::inspect_vehicle(&self.scene, 0) {
                    ui.label(format!("Lead: {lead}"));
                }

                ui.separator();
                ui.small(KEY_HELP);
            });

        for action in pending {
            self.scene.apply(action);
        }
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<WgpuRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    init_error: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(state: AppState) -> Self {
        Self {
            state,
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
            init_error: None,
        }
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let viewport = self.state.scene.viewport();
        let attrs = Window::default_attributes()
            .with_title("Tiny Town")
            .with_inner_size(PhysicalSize::new(viewport.x, viewport.y));
        let window = Arc::new(event_loop.create_window(attrs).context("creating window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(RenderError::from)?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(RenderError::Adapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("tinytown_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .map_err(RenderError::from)?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(
            &device,
            &queue,
            surface_format,
            config.width,
            config.height,
            &self.state.textures,
        )?;
        self.state
            .scene
            .reshape(config.width, config.height, &mut self.state.batch);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);
        Ok(())
    }

    fn redraw(&mut self) {
        let (Some(window), Some(surface), Some(device), Some(queue), Some(config)) = (
            &self.window,
            &self.surface,
            &self.device,
            &self.queue,
            &self.config,
        ) else {
            return;
        };
        let (Some(renderer), Some(egui_winit), Some(egui_renderer)) = (
            &mut self.renderer,
            &mut self.egui_winit,
            &mut self.egui_renderer,
        ) else {
            return;
        };

        let output = match surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                surface.configure(device, config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let state = &mut self.state;
        state.batch.clear();
        let camera = state.scene.render_frame(&mut state.batch);
        let view_proj = state.scene.projection() * camera.view_matrix();
        renderer.render(device, queue, &view, &state.batch, view_proj, CLEAR_COLOR);

        let raw_input = egui_winit.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            state.draw_ui(ctx);
        });
        egui_winit.handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [config.width, config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui_encoder"),
        });
        egui_renderer.update_buffers(device, queue, &mut encoder, &paint_jobs, &screen_descriptor);
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        output.present();
        window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_gpu(event_loop) {
            tracing::error!("startup failed: {e:#}");
            self.init_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let response = egui_winit.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    self.state
                        .scene
                        .reshape(config.width, config.height, &mut self.state.batch);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                let Some(action) = key_from_code(code).and_then(bind_key) else {
                    return;
                };
                if self.state.handle_action(action) == Control::Quit {
                    tracing::info!("quit requested");
                    event_loop.exit();
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Right,
                state: btn_state,
                ..
            } => {
                self.state.mouse_captured = btn_state == ElementState::Pressed;
                if let Some(window) = &self.window {
                    window.set_cursor_visible(!self.state.mouse_captured);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.state.mouse_captured {
                self.state
                    .scene
                    .apply(mouse_look(delta.0 as f32, delta.1 as f32));
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("tinytown-desktop starting");

    let config = match &cli.config {
        Some(path) => TownConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => TownConfig::default(),
    };
    let textures = TextureSet::load_dir(&cli.assets)
        .with_context(|| format!("loading textures from {}", cli.assets.display()))?;
    let scene = SceneState::new(config);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(AppState::new(scene, textures));
    event_loop.run_app(&mut app)?;

    if let Some(err) = app.init_error.take() {
        return Err(err);
    }
    Ok(())
}
