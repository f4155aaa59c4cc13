use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::core::ballistics::Trajectory;
use crate::core::error::SimError;

pub const AXIS_MARGIN_PX: f64 = 60.0; // total per axis, half on each side
pub const PADDING_RATIO: f64 = 0.10;
pub const MIN_MAX_X: f64 = 10.0;
pub const MIN_MAX_Y: f64 = 5.0;
pub const X_TICK_COUNT: f64 = 20.0;
pub const Y_TICK_COUNT: f64 = 10.0;

const WIDE_ASPECT_LIMIT: f64 = 2.0;
const TALL_ASPECT_LIMIT: f64 = 0.5;
const ASPECT_STRETCH: f64 = 1.5;

pub const ZOOM_IN_FACTOR: f64 = 1.2;
pub const ZOOM_OUT_FACTOR: f64 = 0.8;
const ZOOM_X_RANGE: (f64, f64) = (5.0, 1000.0);
const ZOOM_Y_RANGE: (f64, f64) = (2.0, 500.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn drawable_width(&self) -> f64 {
        (self.width - AXIS_MARGIN_PX).max(1.0)
    }

    pub fn drawable_height(&self) -> f64 {
        (self.height - AXIS_MARGIN_PX).max(1.0)
    }

    pub fn aspect(&self) -> f64 {
        self.drawable_width() / self.drawable_height()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Viewport {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SimError::Viewport(s.to_string());
        let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width = w.trim().parse::<f64>().map_err(|_| invalid())?;
        let height = h.trim().parse::<f64>().map_err(|_| invalid())?;
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(invalid());
        }
        Ok(Self::new(width, height))
    }
}

/// Snaps a raw spacing to 1, 2, 5 or 10 times its power of ten, rounded and
/// never below one world unit.
pub fn tick_interval(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }

    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    let normalized = raw / magnitude;
    let interval = if normalized <= 1.0 {
        magnitude
    } else if normalized <= 2.0 {
        2.0 * magnitude
    } else if normalized <= 5.0 {
        5.0 * magnitude
    } else {
        10.0 * magnitude
    };
    interval.round().max(1.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewParameters {
    pub max_x: f64,
    pub max_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub x_tick_interval: f64,
    pub y_tick_interval: f64,
}

impl ViewParameters {
    /// Fits padded trajectory extents into the viewport, widening whichever
    /// axis would otherwise squash the curve into a line or a spike.
    pub fn autoscale(trajectory: &Trajectory, viewport: Viewport) -> Self {
        Self::fit_extents(trajectory.max_x(), trajectory.max_y(), viewport)
    }

    pub fn fit_extents(raw_max_x: f64, raw_max_y: f64, viewport: Viewport) -> Self {
        let mut max_x = (raw_max_x * (1.0 + PADDING_RATIO)).max(MIN_MAX_X);
        let mut max_y = (raw_max_y * (1.0 + PADDING_RATIO)).max(MIN_MAX_Y);

        let screen_aspect = viewport.aspect();
        let trajectory_aspect = max_x / max_y;
        if trajectory_aspect > screen_aspect * WIDE_ASPECT_LIMIT {
            max_y = max_x / (screen_aspect * ASPECT_STRETCH);
        } else if trajectory_aspect < screen_aspect * TALL_ASPECT_LIMIT {
            max_x = max_y * screen_aspect * ASPECT_STRETCH;
        }

        let view = Self::with_extents(max_x, max_y, viewport);
        debug!(
            "autoscaled view to {:.2} x {:.2} m (ticks {} / {})",
            view.max_x, view.max_y, view.x_tick_interval, view.y_tick_interval
        );
        view
    }

    pub fn with_extents(max_x: f64, max_y: f64, viewport: Viewport) -> Self {
        Self {
            max_x,
            max_y,
            scale_x: viewport.drawable_width() / max_x,
            scale_y: viewport.drawable_height() / max_y,
            x_tick_interval: tick_interval(max_x / X_TICK_COUNT),
            y_tick_interval: tick_interval(max_y / Y_TICK_COUNT),
        }
    }

    /// Divides both extents by `factor`. Returns false and leaves the view
    /// untouched if the result falls outside the zoom limits.
    pub fn zoom(&mut self, factor: f64, viewport: Viewport) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }

        let new_max_x = self.max_x / factor;
        let new_max_y = self.max_y / factor;
        if new_max_x < ZOOM_X_RANGE.0
            || new_max_x > ZOOM_X_RANGE.1
            || new_max_y < ZOOM_Y_RANGE.0
            || new_max_y > ZOOM_Y_RANGE.1
        {
            debug!("zoom x{factor} rejected: {new_max_x:.2} x {new_max_y:.2} out of range");
            return false;
        }

        *self = Self::with_extents(new_max_x, new_max_y, viewport);
        true
    }

    pub fn resize(&mut self, viewport: Viewport) {
        *self = Self::with_extents(self.max_x, self.max_y, viewport);
    }

    pub fn world_to_screen(&self, x: f64, y: f64, viewport: Viewport) -> (f64, f64) {
        let inset = AXIS_MARGIN_PX * 0.5;
        (
            inset + x * self.scale_x,
            viewport.height - inset - y * self.scale_y,
        )
    }

    pub fn x_ticks(&self) -> Vec<f64> {
        ticks_up_to(self.max_x, self.x_tick_interval)
    }

    pub fn y_ticks(&self) -> Vec<f64> {
        ticks_up_to(self.max_y, self.y_tick_interval)
    }
}

fn ticks_up_to(extent: f64, interval: f64) -> Vec<f64> {
    if interval <= 0.0 || !extent.is_finite() {
        return vec![0.0];
    }
    let count = (extent / interval).floor() as usize;
    (0..=count).map(|i| i as f64 * interval).collect()
}

pub fn compute_view(trajectory: &Trajectory, viewport: Viewport, zoom_factor: f64) -> ViewParameters {
    let mut view = ViewParameters::autoscale(trajectory, viewport);
    if zoom_factor != 1.0 {
        view.zoom(zoom_factor, viewport);
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ballistics::{SimulationInput, integrate};

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    #[test]
    fn tick_interval_snaps_to_nice_numbers() {
        assert_eq!(tick_interval(0.3), 1.0);
        assert_eq!(tick_interval(1.0), 1.0);
        assert_eq!(tick_interval(1.5), 2.0);
        assert_eq!(tick_interval(3.0), 5.0);
        assert_eq!(tick_interval(7.0), 10.0);
        assert_eq!(tick_interval(42.0), 50.0);
        assert_eq!(tick_interval(120.0), 200.0);
        assert_eq!(tick_interval(0.0), 1.0);
        assert_eq!(tick_interval(f64::NAN), 1.0);
    }

    #[test]
    fn tick_interval_is_non_decreasing() {
        let mut raw = 0.01;
        let mut previous = tick_interval(raw);
        while raw < 50_000.0 {
            raw *= 1.013;
            let current = tick_interval(raw);
            assert!(current >= previous, "tick({raw}) = {current} < {previous}");
            previous = current;
        }
    }

    #[test]
    fn tiny_trajectory_uses_floor_extents() {
        let view = ViewParameters::fit_extents(0.0, 0.0, Viewport::new(800.0, 600.0));
        assert_eq!(view.max_x, 10.0);
        assert_eq!(view.max_y, 5.0);
        assert_close(view.scale_x, 74.0, 1e-9);
        assert_close(view.scale_y, 108.0, 1e-9);
    }

    #[test]
    fn very_wide_trajectory_widens_vertical_extent() {
        let viewport = Viewport::new(800.0, 600.0);
        let view = ViewParameters::fit_extents(1000.0, 10.0, viewport);
        let aspect = 740.0 / 540.0;
        assert_close(view.max_x, 1100.0, 1e-9);
        assert_close(view.max_y, 1100.0 / (aspect * 1.5), 1e-9);
        assert!(view.scale_y < 2.0, "scale_y {}", view.scale_y);
    }

    #[test]
    fn very_tall_trajectory_widens_horizontal_extent() {
        let viewport = Viewport::new(800.0, 600.0);
        let view = ViewParameters::fit_extents(1.0, 1000.0, viewport);
        let aspect = 740.0 / 540.0;
        assert_close(view.max_y, 1100.0, 1e-9);
        assert_close(view.max_x, 1100.0 * aspect * 1.5, 1e-9);
    }

    #[test]
    fn zoom_then_inverse_restores_extents() {
        let viewport = Viewport::default();
        let traj = integrate(SimulationInput::new(20.0, 45.0, 0.0, 9.8));
        let original = ViewParameters::autoscale(&traj, viewport);
        let mut view = original;

        assert!(view.zoom(ZOOM_IN_FACTOR, viewport));
        assert!(view.max_x < original.max_x);
        assert!(view.zoom(1.0 / ZOOM_IN_FACTOR, viewport));
        assert_close(view.max_x, original.max_x, 1e-9);
        assert_close(view.max_y, original.max_y, 1e-9);
        assert_close(view.scale_x, original.scale_x, 1e-9);
    }

    #[test]
    fn zoom_outside_limits_is_a_no_op() {
        let viewport = Viewport::default();
        let mut view = ViewParameters::with_extents(6.0, 3.0, viewport);
        let before = view;
        assert!(!view.zoom(2.0, viewport));
        assert_eq!(view, before);
        assert!(!view.zoom(0.0, viewport));
        assert!(!view.zoom(f64::NAN, viewport));
        assert_eq!(view, before);
    }

    #[test]
    fn resize_keeps_extents_and_rescales() {
        let mut view = ViewParameters::with_extents(100.0, 50.0, Viewport::new(800.0, 600.0));
        view.resize(Viewport::new(1060.0, 560.0));
        assert_eq!(view.max_x, 100.0);
        assert_eq!(view.max_y, 50.0);
        assert_close(view.scale_x, 10.0, 1e-9);
        assert_close(view.scale_y, 10.0, 1e-9);
    }

    #[test]
    fn screen_mapping_puts_origin_at_inset_corner() {
        let viewport = Viewport::new(800.0, 600.0);
        let view = ViewParameters::with_extents(74.0, 54.0, viewport);
        assert_eq!(view.world_to_screen(0.0, 0.0, viewport), (30.0, 570.0));
        let (sx, sy) = view.world_to_screen(37.0, 27.0, viewport);
        assert_close(sx, 400.0, 1e-9);
        assert_close(sy, 300.0, 1e-9);
        let (ex, ey) = view.world_to_screen(74.0, 54.0, viewport);
        assert_close(ex, 770.0, 1e-9);
        assert_close(ey, 30.0, 1e-9);
    }

    #[test]
    fn ticks_stop_at_extent() {
        let view = ViewParameters::with_extents(44.0, 23.0, Viewport::default());
        assert_eq!(view.x_tick_interval, 5.0);
        assert_eq!(view.x_ticks().last().copied(), Some(40.0));
        assert_eq!(view.y_tick_interval, 5.0);
        assert_eq!(view.y_ticks(), vec![0.0, 5.0, 10.0, 15.0, 20.0]);
    }

    #[test]
    fn viewport_parses_dimensions() {
        let viewport: Viewport = "1024x768".parse().expect("valid viewport");
        assert_eq!(viewport, Viewport::new(1024.0, 768.0));
        assert!("1024".parse::<Viewport>().is_err());
        assert!("0x10".parse::<Viewport>().is_err());
        assert!("axb".parse::<Viewport>().is_err());
    }

    #[test]
    fn compute_view_applies_zoom_factor() {
        let viewport = Viewport::default();
        let traj = integrate(SimulationInput::new(20.0, 45.0, 0.0, 9.8));
        let plain = compute_view(&traj, viewport, 1.0);
        let zoomed = compute_view(&traj, viewport, 2.0);
        assert_close(zoomed.max_x, plain.max_x / 2.0, 1e-9);
    }
}
