//! Fire in Action -- application entry point.
//!
//! Threads: winit owns the main thread and delivers window lifecycle and
//! pointer events; the game loop runs update/render/pace on its own thread
//! (see `fia_core::game_loop`). The two share the session through
//! `SharedWorld`:
//!
//!   - `Resumed`      -> create window + renderer once, then `start()` the loop
//!   - `Suspended`    -> `stop()` (blocks until the loop thread has exited)
//!   - pointer input  -> `PointerTracker` -> `on_pointer_event` (may attack)
//!   - resize / scale -> recorded in the world's `Viewport` for the renderer
//!   - close / Escape -> `stop()`, then exit
//!
//! Startup failures (bad session config, unknown starting weapon, no GPU) are
//! fatal.

use std::path::Path;

use fia_core::config::{load_session_config_or_default, SessionConfig};
use fia_core::roster::{build_weapon_catalog, init_session};
use fia_core::{on_pointer_event, AttackOutcome, GameLoop, SharedWorld, Viewport, World};
use fia_platform::{PlatformConfig, PointerTracker};
use fia_render::SceneRenderer;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

const SESSION_CONFIG_PATH: &str = "assets/config/session.json";

struct App {
    platform: PlatformConfig,
    session: SessionConfig,
    world: SharedWorld,
    pointer: PointerTracker,
    game_loop: Option<GameLoop<SceneRenderer>>,
}

impl App {
    fn new(session: SessionConfig, world: SharedWorld) -> Self {
        Self {
            platform: PlatformConfig::default(),
            session,
            world,
            pointer: PointerTracker::new(),
            game_loop: None,
        }
    }

    fn create_game_loop(&self, event_loop: &ActiveEventLoop) -> GameLoop<SceneRenderer> {
        let window = fia_platform::create_window(event_loop, &self.platform)
            .unwrap_or_else(|err| panic!("Failed to create window: {err}"));
        // Window queries stay on this thread; the loop thread only sees the copy.
        let size = window.inner_size();
        let viewport = Viewport::new(size.width, size.height, window.scale_factor() as f32);
        self.world.with(|w| w.viewport = viewport);
        log::info!(
            "Window created: {}x{} (scale {})",
            size.width,
            size.height,
            viewport.scale_factor
        );
        let renderer = SceneRenderer::new(window)
            .unwrap_or_else(|err| panic!("Failed to initialise renderer: {err}"));
        GameLoop::new(self.world.clone(), renderer, self.session.target_fps)
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(game_loop) = self.game_loop.as_mut() {
            game_loop.stop();
            if let Some(renderer) = game_loop.renderer() {
                log::info!("Presented {} frames", renderer.frames_presented());
            }
        }
        event_loop.exit();
    }

    fn handle_pointer(&mut self, event: &WindowEvent) {
        let Some(pointer_event) = self.pointer.handle_window_event(event) else {
            return;
        };
        match on_pointer_event(&self.world, pointer_event) {
            Some(AttackOutcome::Hit(report)) if report.lethal => {
                log::info!("Boss defeated with {}", report.weapon);
            }
            Some(AttackOutcome::Hit(report)) => {
                log::debug!(
                    "Hit for {} with {}, boss at {}",
                    report.damage,
                    report.weapon,
                    report.target_health
                );
            }
            Some(AttackOutcome::Skipped(reason)) => {
                log::debug!("Attack skipped: {}", reason.label());
            }
            None => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.game_loop.is_none() {
            self.game_loop = Some(self.create_game_loop(event_loop));
        }
        if let Some(game_loop) = self.game_loop.as_mut() {
            if let Err(err) = game_loop.start() {
                log::error!("{err}");
                event_loop.exit();
            }
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(game_loop) = self.game_loop.as_mut() {
            game_loop.stop();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                self.shutdown(event_loop);
            }

            // Escape stands in for the phone's back button.
            WindowEvent::KeyboardInput { ref event, .. }
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                log::info!("Back pressed, exiting.");
                self.shutdown(event_loop);
            }

            WindowEvent::Resized(size) => {
                self.world.with(|w| {
                    w.viewport.width = size.width;
                    w.viewport.height = size.height;
                });
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.world
                    .with(|w| w.viewport.scale_factor = scale_factor as f32);
            }

            WindowEvent::CursorMoved { .. }
            | WindowEvent::MouseInput { .. }
            | WindowEvent::Touch(_) => self.handle_pointer(&event),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(game_loop) = self.game_loop.as_mut() {
            game_loop.stop();
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Fire in Action starting...");

    let session = load_session_config_or_default(Path::new(SESSION_CONFIG_PATH))
        .unwrap_or_else(|err| panic!("Failed to load session config: {err}"));
    let catalog = build_weapon_catalog();
    log::info!("Weapon catalog: {}", catalog.keys().join(", "));
    let (player, boss) = init_session(&catalog, &session)
        .unwrap_or_else(|err| panic!("Failed to initialise session: {err}"));
    let world = SharedWorld::new(World::new(player, boss));

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    // The game loop thread paces frames; the event loop only has to wake for input.
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(session, world);
    event_loop.run_app(&mut app).expect("Event loop error");
}
