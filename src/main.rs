//! fixedloop - fixed-timestep simulation runtime
//!
//! Runs the demo world either in a window (one frame per redraw) or headless
//! (frames paced by a timer).

use std::process::ExitCode;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use fixedloop::config::AppConfig;
use fixedloop::input::{InputAction, InputMapper};
use fixedloop::logging::init_logging;
use fixedloop::systems::{SimulationSystem, WindowSystem};
use fixedloop_core::{PacedHost, SchedulerState};

/// Frames between window title refreshes
const TITLE_INTERVAL: u64 = 15;

/// Main application state
struct App {
    config: AppConfig,
    window: Option<WindowSystem>,
    simulation: SimulationSystem,
    frames: u64,
    failed: bool,
}

impl App {
    fn new(config: AppConfig, simulation: SimulationSystem) -> Self {
        Self {
            config,
            window: None,
            simulation,
            frames: 0,
            failed: false,
        }
    }

    /// Run one scheduler frame and queue the next redraw
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if let Err(e) = self.simulation.frame() {
            log::error!("Frame failed: {}", e);
            self.failed = true;
            event_loop.exit();
            return;
        }
        self.frames += 1;

        if let Some(window) = &self.window {
            if self.frames % TITLE_INTERVAL == 1 {
                window.update_title(&self.simulation.status_line());
            }
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                self.failed = true;
                event_loop.exit();
                return;
            }
        };

        if self.simulation.scheduler().state() == SchedulerState::Idle {
            if let Err(e) = self.simulation.start() {
                log::warn!("{}", e);
            }
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return;
                };
                match InputMapper::map_keyboard(key, event.state) {
                    Some(InputAction::Exit) => event_loop.exit(),
                    Some(InputAction::ToggleFullscreen) => {
                        if let Some(window) = &self.window {
                            window.toggle_fullscreen();
                        }
                    }
                    Some(action) => {
                        self.simulation.handle_action(action);
                        if let Some(window) = &self.window {
                            window.update_title(&self.simulation.status_line());
                        }
                    }
                    None => {}
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn run_headless(config: &AppConfig, simulation: &mut SimulationSystem) -> ExitCode {
    let mut host = PacedHost::new(config.window.refresh_rate)
        .with_frame_limit(config.window.headless_frames);
    log::info!(
        "Running headless: {} frames at {} Hz",
        config.window.headless_frames,
        config.window.refresh_rate
    );

    match simulation.run(&mut host) {
        Ok(_) => {
            log::info!("{}", simulation.status_line());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Frame failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_windowed(config: AppConfig, simulation: SimulationSystem) -> ExitCode {
    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return ExitCode::FAILURE;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, simulation);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        return ExitCode::FAILURE;
    }

    if app.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn main() -> ExitCode {
    let loaded = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    init_logging(&config.debug.log_level);
    if let Err(e) = &loaded {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting fixedloop");

    let mut simulation = match SimulationSystem::new(&config) {
        Ok(simulation) => simulation,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if config.window.headless {
        run_headless(&config, &mut simulation)
    } else {
        run_windowed(config, simulation)
    }
}
