use log::{debug, warn};

use crate::core::error::{Result, SimError};

pub const EARTH_GRAVITY_MPS2: f64 = 9.8;
pub const MAX_LAUNCH_SPEED_MPS: f64 = 50.0;
pub const MIN_GRAVITY_MPS2: f64 = 1.0;
pub const DEFAULT_STEP_S: f64 = 0.01;
pub const MIN_STEP_S: f64 = 1e-4;
pub const MAX_STEP_S: f64 = 0.1;
pub const SAFETY_CEILING_M: f64 = 10_000.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationInput {
    pub speed_mps: f64,
    pub angle_deg: f64,
    pub drag: f64,
    pub gravity_mps2: f64,
}

impl SimulationInput {
    /// Speed is kept within 0..=50 m/s and gravity floored at 1 m/s^2; never fails.
    pub fn new(speed_mps: f64, angle_deg: f64, drag: f64, gravity_mps2: f64) -> Self {
        Self {
            speed_mps: speed_mps.clamp(0.0, MAX_LAUNCH_SPEED_MPS),
            angle_deg,
            drag,
            gravity_mps2: gravity_mps2.max(MIN_GRAVITY_MPS2),
        }
    }

    /// Boundary constructor for raw user values: rejects NaN and infinities,
    /// then clamps like [`SimulationInput::new`].
    pub fn validated(speed_mps: f64, angle_deg: f64, drag: f64, gravity_mps2: f64) -> Result<Self> {
        for (field, value) in [
            ("speed", speed_mps),
            ("angle", angle_deg),
            ("drag", drag),
            ("gravity", gravity_mps2),
        ] {
            if !value.is_finite() {
                return Err(SimError::NonFinite { field, value });
            }
        }

        let input = Self::new(speed_mps, angle_deg, drag, gravity_mps2);
        if input.speed_mps != speed_mps || input.gravity_mps2 != gravity_mps2 {
            debug!(
                "clamped input: speed {speed_mps} -> {}, gravity {gravity_mps2} -> {}",
                input.speed_mps, input.gravity_mps2
            );
        }
        Ok(input)
    }

    pub fn velocity_components(&self) -> (f64, f64) {
        let theta = self.angle_deg.to_radians();
        let vx = self.speed_mps * theta.cos();
        let vy = self.speed_mps * theta.sin();
        (vx, vy)
    }
}

impl Default for SimulationInput {
    fn default() -> Self {
        Self::new(20.0, 45.0, 0.0, EARTH_GRAVITY_MPS2)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PathSample {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl PathSample {
    pub const LAUNCH: Self = Self {
        x: 0.0,
        y: 0.0,
        vx: 0.0,
        vy: 0.0,
    };

    pub fn speed(&self) -> f64 {
        (self.vx * self.vx + self.vy * self.vy).sqrt()
    }

    fn lerp(a: Self, b: Self, t: f64) -> Self {
        Self {
            x: a.x + t * (b.x - a.x),
            y: a.y + t * (b.y - a.y),
            vx: a.vx + t * (b.vx - a.vx),
            vy: a.vy + t * (b.vy - a.vy),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverConfig {
    pub step_s: f64,
    pub ceiling_m: f64,
}

impl SolverConfig {
    /// Rejects step sizes outside `MIN_STEP_S..=MAX_STEP_S`; smaller steps
    /// would grow the sample buffer without bound.
    pub fn with_step(step_s: f64) -> Result<Self> {
        if !(MIN_STEP_S..=MAX_STEP_S).contains(&step_s) {
            return Err(SimError::StepSize {
                value: step_s,
                min: MIN_STEP_S,
                max: MAX_STEP_S,
            });
        }
        Ok(Self {
            step_s,
            ..Self::default()
        })
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            step_s: DEFAULT_STEP_S,
            ceiling_m: SAFETY_CEILING_M,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// Height dropped below zero; the last sample sits on the ground.
    Landed,
    /// x or peak height passed the safety ceiling before landing.
    CeilingReached,
}

#[derive(Clone, Debug)]
pub struct Trajectory {
    samples: Vec<PathSample>,
    max_x: f64,
    max_y: f64,
    step_s: f64,
    termination: Termination,
}

impl Trajectory {
    pub fn samples(&self) -> &[PathSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<PathSample> {
        self.samples.get(index).copied()
    }

    pub fn first(&self) -> PathSample {
        self.samples.first().copied().unwrap_or(PathSample::LAUNCH)
    }

    pub fn last(&self) -> PathSample {
        self.samples.last().copied().unwrap_or(PathSample::LAUNCH)
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    pub fn step_s(&self) -> f64 {
        self.step_s
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn range_m(&self) -> f64 {
        self.last().x
    }

    pub fn flight_time_s(&self) -> f64 {
        self.len().saturating_sub(1) as f64 * self.step_s
    }

    pub fn time_at(&self, index: usize) -> f64 {
        index as f64 * self.step_s
    }

    pub fn peak(&self) -> PathSample {
        self.samples
            .iter()
            .copied()
            .fold(self.first(), |best, s| if s.y > best.y { s } else { best })
    }

    /// Every `every`-th sample plus the final one, for tabular output.
    pub fn decimated(&self, every: usize) -> Vec<(usize, PathSample)> {
        let every = every.max(1);
        let last_idx = self.len().saturating_sub(1);
        self.samples
            .iter()
            .copied()
            .enumerate()
            .filter(|(i, _)| i % every == 0 || *i == last_idx)
            .collect()
    }
}

pub fn integrate(input: SimulationInput) -> Trajectory {
    integrate_with(input, SolverConfig::default())
}

pub fn integrate_with(input: SimulationInput, config: SolverConfig) -> Trajectory {
    let dt = config.step_s;
    let drag = input.drag;
    let g = input.gravity_mps2;

    let (mut vx, mut vy) = input.velocity_components();
    let mut x = 0.0;
    let mut y = 0.0;
    let mut max_x = 0.0f64;
    let mut max_y = 0.0f64;
    let mut samples = Vec::new();
    let mut termination = Termination::Landed;

    while y >= 0.0 {
        samples.push(PathSample { x, y, vx, vy });

        let speed = (vx * vx + vy * vy).sqrt();
        let drag_x = -drag * speed * vx;
        let drag_y = -drag * speed * vy;

        vx += drag_x * dt;
        vy += (-g + drag_y) * dt;
        x += vx * dt;
        y += vy * dt;

        max_x = max_x.max(x);
        max_y = max_y.max(y);
        if x > config.ceiling_m || max_y > config.ceiling_m {
            termination = Termination::CeilingReached;
            break;
        }
    }

    if termination == Termination::Landed {
        // Overshoot sample below ground; replaced by the landing interpolation.
        samples.push(PathSample { x, y, vx, vy });
    } else {
        warn!(
            "integration stopped at safety ceiling after {} steps (x={x:.1}, max_y={max_y:.1})",
            samples.len()
        );
    }

    if let Some(landing_x) = finalize_landing(&mut samples) {
        max_x = max_x.max(landing_x);
    }

    let trajectory = Trajectory {
        samples,
        max_x,
        max_y,
        step_s: dt,
        termination,
    };
    debug!(
        "integrated {} samples: range {:.3} m, peak {:.3} m, flight {:.2} s ({:?})",
        trajectory.len(),
        trajectory.range_m(),
        trajectory.max_y,
        trajectory.flight_time_s(),
        termination
    );
    trajectory
}

/// Pulls the final below-ground sample back onto y = 0 by linear
/// interpolation against the sample before it. Returns the landing x, or
/// `None` when the path is too short or does not straddle the ground.
pub fn finalize_landing(samples: &mut [PathSample]) -> Option<f64> {
    let n = samples.len();
    if n < 2 {
        return None;
    }

    let second_last = samples[n - 2];
    let last = samples[n - 1];
    if !(last.y < 0.0 && second_last.y >= 0.0) {
        return None;
    }

    let t = -second_last.y / (last.y - second_last.y);
    let mut landed = PathSample::lerp(second_last, last, t);
    landed.y = 0.0;
    samples[n - 1] = landed;
    Some(landed.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    #[test]
    fn input_clamps_speed_and_gravity() {
        let input = SimulationInput::new(80.0, 30.0, 0.01, -3.0);
        assert_eq!(input.speed_mps, 50.0);
        assert_eq!(input.gravity_mps2, 1.0);
        assert_eq!(input.drag, 0.01);
    }

    #[test]
    fn negative_speed_is_clamped_and_lands() {
        let input = SimulationInput::new(-1000.0, 225.0, 0.0, 9.8);
        assert_eq!(input.speed_mps, 0.0);

        let traj = integrate(input);
        assert_eq!(traj.termination(), Termination::Landed);
        assert_eq!(traj.last().y, 0.0);
        assert_close(traj.range_m(), 0.0, 1e-9);
    }

    #[test]
    fn step_size_outside_range_is_rejected() {
        for bad in [1e-6, 0.0, -0.01, 0.5, f64::NAN, f64::INFINITY] {
            let err = SolverConfig::with_step(bad).expect_err("step should be rejected");
            assert!(err.to_string().contains("step"), "{err}");
        }

        let config = SolverConfig::with_step(0.005).expect("step in range");
        assert_eq!(config.step_s, 0.005);
        assert_eq!(config.ceiling_m, SAFETY_CEILING_M);
        assert!(SolverConfig::with_step(MIN_STEP_S).is_ok());
        assert!(SolverConfig::with_step(MAX_STEP_S).is_ok());
    }

    #[test]
    fn validated_rejects_non_finite_fields() {
        let err = SimulationInput::validated(20.0, f64::NAN, 0.0, 9.8)
            .expect_err("NaN angle should be rejected");
        assert!(err.to_string().contains("angle"));

        let err = SimulationInput::validated(20.0, 45.0, 0.0, f64::INFINITY)
            .expect_err("infinite gravity should be rejected");
        assert!(err.to_string().contains("gravity"));
    }

    #[test]
    fn first_sample_is_exact_launch_state() {
        let input = SimulationInput::new(20.0, 30.0, 0.02, 9.8);
        let traj = integrate(input);
        let (vx, vy) = input.velocity_components();
        let first = traj.first();
        assert_eq!((first.x, first.y), (0.0, 0.0));
        assert_eq!((first.vx, first.vy), (vx, vy));
    }

    #[test]
    fn drag_free_range_matches_closed_form() {
        let traj = integrate(SimulationInput::new(20.0, 45.0, 0.0, 9.8));
        let expected = 20.0f64.powi(2) * 90f64.to_radians().sin() / 9.8;
        assert_close(traj.range_m(), expected, 0.5);
        assert_close(traj.flight_time_s(), 2.0 * 20.0 * 45f64.to_radians().sin() / 9.8, 0.05);
        assert_eq!(traj.termination(), Termination::Landed);
    }

    #[test]
    fn landed_path_ends_exactly_on_ground() {
        let traj = integrate(SimulationInput::new(33.0, 62.0, 0.01, 9.8));
        assert!(traj.len() >= 2);
        assert_eq!(traj.last().y, 0.0);
        let before_last = &traj.samples()[..traj.len() - 1];
        assert!(before_last.iter().all(|s| s.y >= 0.0));
        assert!(traj.max_x() >= traj.range_m());
    }

    #[test]
    fn drag_shortens_range() {
        let free = integrate(SimulationInput::new(20.0, 45.0, 0.0, 9.8));
        let dragged = integrate(SimulationInput::new(20.0, 45.0, 0.05, 9.8));
        assert!(dragged.range_m() < free.range_m());
        assert!(dragged.max_y() < free.max_y());
    }

    #[test]
    fn flat_and_backward_launches_terminate_at_origin() {
        for angle in [0.0, -30.0, 180.0, 270.0] {
            let traj = integrate(SimulationInput::new(25.0, angle, 0.0, 9.8));
            assert!(!traj.is_empty(), "angle {angle}");
            assert!(traj.len() <= 2, "angle {angle} produced {} samples", traj.len());
            assert_eq!(traj.last().y, 0.0);
            assert_close(traj.range_m(), 0.0, 0.5);
        }
    }

    #[test]
    fn negative_drag_is_stopped_by_ceiling() {
        let traj = integrate(SimulationInput::new(50.0, 45.0, -0.05, 9.8));
        assert_eq!(traj.termination(), Termination::CeilingReached);
        assert!(traj.len() < 10_000);
        assert!(traj.samples().iter().all(|s| s.y >= 0.0));
    }

    #[test]
    fn landing_interpolation_brackets_ground() {
        let mut samples = vec![
            PathSample { x: 0.0, y: 0.0, vx: 1.0, vy: 1.0 },
            PathSample { x: 10.0, y: 2.0, vx: 2.0, vy: -4.0 },
            PathSample { x: 12.0, y: -6.0, vx: 4.0, vy: -8.0 },
        ];
        let landing_x = finalize_landing(&mut samples).expect("path straddles ground");
        assert_close(landing_x, 10.5, 1e-12);
        let last = samples[2];
        assert_eq!(last.y, 0.0);
        assert_close(last.vx, 2.5, 1e-12);
        assert_close(last.vy, -5.0, 1e-12);
        assert_eq!(samples[1].x, 10.0);
    }

    #[test]
    fn landing_interpolation_skips_short_or_airborne_paths() {
        let mut single = vec![PathSample::LAUNCH];
        assert_eq!(finalize_landing(&mut single), None);
        assert_eq!(single, vec![PathSample::LAUNCH]);

        let mut airborne = vec![
            PathSample { x: 0.0, y: 5.0, vx: 1.0, vy: 1.0 },
            PathSample { x: 1.0, y: 6.0, vx: 1.0, vy: 1.0 },
        ];
        assert_eq!(finalize_landing(&mut airborne), None);
        assert_eq!(airborne[1].y, 6.0);
    }

    #[test]
    fn decimated_keeps_final_sample() {
        let traj = integrate(SimulationInput::new(10.0, 45.0, 0.0, 9.8));
        let rows = traj.decimated(25);
        assert_eq!(rows.first().map(|(i, _)| *i), Some(0));
        assert_eq!(rows.last().map(|(i, _)| *i), Some(traj.len() - 1));
    }
}
