//! Application shell and main loop
//!
//! Owns the winit event loop, bootstraps the GPU context and simulation in
//! `resumed`, and per frame: computes the elapsed time from a monotonic
//! clock, lets the scheduler decide whether a step runs, then draws and
//! presents. The loop ends on close request or Escape; device resources drop
//! with the state on exit.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::config::{GRID_HEIGHT, GRID_WIDTH, SPAWN_PROBABILITY, UPDATE_INTERVAL};
use crate::gfx::RenderEngine;
use crate::sim::{
    buffer_pair::AutomatonState, scheduler::UpdateScheduler, seeder, stepper::Stepper,
    AUTOMATON_SHADER,
};

pub struct PetriApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    state: Option<AutomatonState>,
    stepper: Option<Stepper>,
    scheduler: UpdateScheduler,
    last_frame: Instant,
    fatal: Option<anyhow::Error>,
}

impl PetriApp {
    /// Creates the application with the fixed grid configuration.
    pub fn new() -> anyhow::Result<Self> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                state: None,
                stepper: None,
                scheduler: UpdateScheduler::new(UPDATE_INTERVAL),
                last_frame: Instant::now(),
                fatal: None,
            },
        })
    }

    /// Runs the main loop until shutdown (consumes self).
    ///
    /// A bootstrap or presentation failure terminates the loop and surfaces
    /// here as the process exit error.
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .context("event loop already consumed")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .context("event loop failed")?;

        match self.app_state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AppState {
    /// Creates the window, GPU context, and simulation state.
    ///
    /// Initialization order: window, render engine (surface, device, output
    /// surface, display pipeline), RNG stream, grid allocation and one-time
    /// seeding, compute pipeline.
    fn bootstrap(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window = event_loop
            .create_window(
                WindowAttributes::default()
                    .with_title("petri")
                    .with_inner_size(winit::dpi::LogicalSize::new(GRID_WIDTH, GRID_HEIGHT))
                    .with_resizable(false),
            )
            .context("failed to create window")?;
        let window = Arc::new(window);

        let render_engine = pollster::block_on(RenderEngine::new(
            window.clone(),
            GRID_WIDTH,
            GRID_HEIGHT,
        ))
        .context("GPU context bootstrap failed")?;

        let mut rng = StdRng::seed_from_u64(seeder::seed());

        let state = AutomatonState::allocate(render_engine.device(), GRID_WIDTH, GRID_HEIGHT);
        state.seed_initial_state(render_engine.queue(), SPAWN_PROBABILITY, &mut rng);

        let stepper = Stepper::new(
            render_engine.device(),
            AUTOMATON_SHADER,
            GRID_WIDTH,
            GRID_HEIGHT,
        );

        log::info!(
            "simulation ready: {GRID_WIDTH}x{GRID_HEIGHT} grid, two channels, \
             {UPDATE_INTERVAL}s update interval"
        );

        self.window = Some(window);
        self.render_engine = Some(render_engine);
        self.state = Some(state);
        self.stepper = Some(stepper);
        self.last_frame = Instant::now();

        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.bootstrap(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: winit::keyboard::PhysicalKey::Code(key_code),
                        ..
                    },
                ..
            } => {
                if matches!(key_code, winit::keyboard::KeyCode::Escape) {
                    event_loop.exit();
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let delta = now.duration_since(self.last_frame).as_secs_f32();
                self.last_frame = now;

                let (Some(render_engine), Some(state), Some(stepper)) = (
                    self.render_engine.as_mut(),
                    self.state.as_mut(),
                    self.stepper.as_ref(),
                ) else {
                    return;
                };

                self.scheduler.on_frame(delta, || {
                    stepper.step(
                        render_engine.device(),
                        render_engine.queue(),
                        state,
                        render_engine.output().view(),
                    );
                });

                let mut fatal = None;
                match render_engine.render_frame() {
                    Ok(()) => {}
                    // A lost or outdated surface on a fixed-size window is
                    // transient; reconfigure and draw again next frame.
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_engine.reconfigure();
                    }
                    Err(err) => {
                        fatal = Some(anyhow::Error::new(err).context("presentation failed"));
                    }
                }
                if let Some(err) = fatal {
                    self.fail(event_loop, err);
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
