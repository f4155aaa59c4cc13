use drag_trajectory::core::ballistics::SimulationInput;
use drag_trajectory::core::playback::{FrameHost, FrameId};
use drag_trajectory::core::simulation::Simulation;
use drag_trajectory::core::window::Viewport;

/// macroquad renders every frame anyway; this just remembers whether the
/// playback asked for the next one.
#[derive(Default)]
pub(crate) struct FrameLatch {
    next_id: u64,
    armed: Option<FrameId>,
}

impl FrameLatch {
    pub(crate) fn fire(&mut self) -> bool {
        self.armed.take().is_some()
    }
}

impl FrameHost for FrameLatch {
    fn request_frame(&mut self) -> FrameId {
        self.next_id += 1;
        let id = FrameId(self.next_id);
        self.armed = Some(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if self.armed == Some(id) {
            self.armed = None;
        }
    }
}

pub(crate) struct AppRuntime {
    pub(crate) sim: Simulation,
    pub(crate) frames: FrameLatch,
    pub(crate) speed_mps: f32,
    pub(crate) angle_deg: f32,
    pub(crate) drag: f32,
    pub(crate) gravity_mps2: f32,
    pub(crate) show_velocity: bool,
    pub(crate) show_forces: bool,
    pub(crate) status_line: String,
}

impl AppRuntime {
    pub(crate) fn new(viewport: Viewport) -> Self {
        let input = SimulationInput::default();
        Self {
            sim: Simulation::new(input, viewport),
            frames: FrameLatch::default(),
            speed_mps: input.speed_mps as f32,
            angle_deg: input.angle_deg as f32,
            drag: input.drag as f32,
            gravity_mps2: input.gravity_mps2 as f32,
            show_velocity: false,
            show_forces: false,
            status_line: "Ready".to_string(),
        }
    }

    pub(crate) fn slider_input(&self) -> SimulationInput {
        SimulationInput::new(
            self.speed_mps as f64,
            self.angle_deg as f64,
            self.drag as f64,
            self.gravity_mps2 as f64,
        )
    }
}
