use crate::core::ballistics::{PathSample, Trajectory};

const FORCE_SCALE_STEP: f64 = 5.0;

/// Forces per unit mass, so they share units with acceleration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceSample {
    pub drag_x: f64,
    pub drag_y: f64,
    pub gravity_y: f64,
    pub net_x: f64,
    pub net_y: f64,
}

impl ForceSample {
    pub fn at(sample: PathSample, drag: f64, gravity_mps2: f64) -> Self {
        let speed = sample.speed();
        let drag_x = -drag * speed * sample.vx;
        let drag_y = -drag * speed * sample.vy;
        let gravity_y = -gravity_mps2;
        Self {
            drag_x,
            drag_y,
            gravity_y,
            net_x: drag_x,
            net_y: drag_y + gravity_y,
        }
    }

    pub fn drag_magnitude(&self) -> f64 {
        self.drag_x.hypot(self.drag_y)
    }

    pub fn net_magnitude(&self) -> f64 {
        self.net_x.hypot(self.net_y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityRow {
    pub speed: f64,
    pub vx: f64,
    pub vy: f64,
}

pub fn velocity_series(trajectory: &Trajectory, upto: usize) -> Vec<VelocityRow> {
    trajectory
        .samples()
        .iter()
        .take(upto)
        .map(|s| VelocityRow {
            speed: s.speed(),
            vx: s.vx,
            vy: s.vy,
        })
        .collect()
}

pub fn force_series(trajectory: &Trajectory, drag: f64, gravity_mps2: f64, upto: usize) -> Vec<ForceSample> {
    trajectory
        .samples()
        .iter()
        .take(upto)
        .map(|s| ForceSample::at(*s, drag, gravity_mps2))
        .collect()
}

/// Largest drag, gravity or net magnitude over the first `upto` samples,
/// rounded up to the next multiple of 5 for the force graph's axis.
pub fn force_scale_ceiling(trajectory: &Trajectory, drag: f64, gravity_mps2: f64, upto: usize) -> f64 {
    let peak = force_series(trajectory, drag, gravity_mps2, upto)
        .iter()
        .fold(gravity_mps2, |acc, f| {
            acc.max(f.drag_magnitude()).max(f.net_magnitude())
        });
    ((peak / FORCE_SCALE_STEP).ceil() * FORCE_SCALE_STEP).max(FORCE_SCALE_STEP)
}
