use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use ocean_scene::core::{Clock, FpsCounter};
use ocean_scene::render::{FrameStatus, Hud, Renderer};
use ocean_scene::traits::OceanScene;
use ocean_scene::{create_scene, Cli, Settings};

const FPS_UPDATE_INTERVAL: f32 = 1.0;

/// Window-bound state, created once the event loop resumes
struct Gfx {
    window: Arc<Window>,
    renderer: Renderer,
    scene: Box<dyn OceanScene>,
    hud: Option<Hud>,
}

impl Gfx {
    fn new(event_loop: &ActiveEventLoop, cli: &Cli, settings: &Settings) -> Result<Self> {
        let window = event_loop
            .create_window(
                Window::default_attributes()
                    .with_title("Ocean")
                    .with_inner_size(winit::dpi::LogicalSize::new(cli.width, cli.height)),
            )
            .context("Failed to create window")?;
        let window = Arc::new(window);

        let renderer = pollster::block_on(Renderer::new(window.clone()))?;
        let (width, height) = renderer.size();
        let scene = create_scene(cli.scene, renderer.gpu(), renderer.format(), settings, width, height)?;
        let hud = (!cli.no_ui).then(|| Hud::new(&window, renderer.gpu(), renderer.format()));

        Ok(Self {
            window,
            renderer,
            scene,
            hud,
        })
    }

    fn render(&mut self, fps: f32) -> Result<()> {
        let frame = match self.renderer.acquire()? {
            FrameStatus::Ready(frame) => frame,
            FrameStatus::Skipped => return Ok(()),
        };
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.renderer.create_encoder();

        self.scene.render(&mut encoder, &view, self.renderer.depth_view());

        if let Some(hud) = &mut self.hud {
            let (width, height) = self.renderer.size();
            hud.draw(
                &self.window,
                self.renderer.gpu(),
                &mut encoder,
                &view,
                [width, height],
                fps,
                self.scene.as_mut(),
            );
        }

        self.renderer.submit(encoder, frame);
        Ok(())
    }
}

struct App {
    cli: Cli,
    settings: Settings,
    gfx: Option<Gfx>,
    clock: Clock,
    fps: FpsCounter,
}

impl App {
    fn new(cli: Cli, settings: Settings) -> Self {
        Self {
            cli,
            settings,
            gfx: None,
            clock: Clock::new(),
            fps: FpsCounter::new(FPS_UPDATE_INTERVAL),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gfx) = &mut self.gfx else {
            return;
        };

        let frame = self.clock.tick();
        if let Some(fps) = self.fps.tick(frame.delta) {
            log::info!("FPS: {:.1}", fps);
        }

        gfx.scene.update(gfx.renderer.gpu().queue(), &frame);
        if let Err(e) = gfx.render(self.fps.fps()) {
            log::error!("Render error: {:#}", e);
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gfx.is_some() {
            return;
        }
        match Gfx::new(event_loop, &self.cli, &self.settings) {
            Ok(gfx) => {
                self.gfx = Some(gfx);
                self.clock = Clock::new();
            }
            Err(e) => {
                log::error!("Failed to initialize: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(gfx) = &mut self.gfx else {
            return;
        };

        // Let egui handle the event first
        if let Some(hud) = &mut gfx.hud {
            if hud.handle_event(&gfx.window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => gfx.scene.handle_key(&event),
            WindowEvent::Resized(size) => {
                if gfx.renderer.resize(size.width, size.height) {
                    gfx.scene.resize(gfx.renderer.gpu().queue(), size.width, size.height);
                } else {
                    // Minimized; don't count the hidden time as one long frame
                    self.clock.skip();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gfx) = &self.gfx {
            gfx.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = cli.settings().context("Invalid settings")?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli, settings);

    log::info!("Controls: WASD move, Space/Shift up/down, Q/E turn, arrows pitch, Escape quits");
    event_loop.run_app(&mut app)?;

    Ok(())
}
