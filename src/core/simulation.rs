use log::info;

use crate::core::ballistics::{PathSample, SimulationInput, SolverConfig, Trajectory, integrate_with};
use crate::core::forces::ForceSample;
use crate::core::playback::{FrameHost, Playback, PlaybackCursor, PlaybackState, TickEvent};
use crate::core::window::{ViewParameters, Viewport, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};

/// The active run: its input, view and playback. Only one exists per app.
pub struct Simulation {
    input: SimulationInput,
    solver: SolverConfig,
    viewport: Viewport,
    view: ViewParameters,
    playback: Playback,
}

impl Simulation {
    pub fn new(input: SimulationInput, viewport: Viewport) -> Self {
        Self::with_solver(input, SolverConfig::default(), viewport)
    }

    pub fn with_solver(input: SimulationInput, solver: SolverConfig, viewport: Viewport) -> Self {
        let trajectory = integrate_with(input, solver);
        let view = ViewParameters::autoscale(&trajectory, viewport);
        Self {
            input,
            solver,
            viewport,
            view,
            playback: Playback::new(trajectory),
        }
    }

    pub fn input(&self) -> SimulationInput {
        self.input
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn view(&self) -> &ViewParameters {
        &self.view
    }

    pub fn trajectory(&self) -> &Trajectory {
        self.playback.trajectory()
    }

    pub fn state(&self) -> PlaybackState {
        self.playback.state()
    }

    pub fn cursor(&self) -> PlaybackCursor {
        self.playback.cursor()
    }

    pub fn current_sample(&self) -> PathSample {
        self.playback.current()
    }

    pub fn current_forces(&self) -> ForceSample {
        ForceSample::at(self.current_sample(), self.input.drag, self.input.gravity_mps2)
    }

    /// Recomputes the trajectory for `input` and starts playing it. The
    /// camera extents of the previous run are kept.
    pub fn start(&mut self, input: SimulationInput, host: &mut impl FrameHost) {
        self.playback.cancel_pending(host);
        self.input = input;
        info!(
            "run: speed {:.1} m/s, angle {:.1} deg, drag {:.3}, g {:.2}",
            input.speed_mps, input.angle_deg, input.drag, input.gravity_mps2
        );

        let trajectory = integrate_with(input, self.solver);
        self.view.resize(self.viewport);
        self.playback = Playback::new(trajectory);
        self.playback.start(host);
    }

    pub fn tick(&mut self, host: &mut impl FrameHost) -> Option<TickEvent> {
        self.playback.tick(host)
    }

    pub fn pause(&mut self, host: &mut impl FrameHost) {
        self.playback.pause(host);
    }

    pub fn resume(&mut self, host: &mut impl FrameHost) {
        self.playback.resume(host);
    }

    pub fn toggle_pause(&mut self, host: &mut impl FrameHost) {
        self.playback.toggle_pause(host);
    }

    pub fn reset(&mut self, host: &mut impl FrameHost) {
        self.playback.reset(host);
    }

    pub fn zoom(&mut self, factor: f64) -> bool {
        self.view.zoom(factor, self.viewport)
    }

    pub fn zoom_in(&mut self) -> bool {
        self.zoom(ZOOM_IN_FACTOR)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.zoom(ZOOM_OUT_FACTOR)
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.view.resize(viewport);
    }

    /// Drops zoom and fits the view to the current trajectory again.
    pub fn refit(&mut self) {
        self.view = ViewParameters::autoscale(self.playback.trajectory(), self.viewport);
    }
}
