use std::fmt::Display;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::core::ballistics::{SimulationInput, Trajectory};
use crate::core::error::{Result, SimError};
use crate::core::window::{ViewParameters, Viewport};

/// `trajectory-20260101-120000.png` style name for exports without a path.
pub fn timestamped_file_name(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!("trajectory-{}.png", now.format("%Y%m%d-%H%M%S")))
}

fn plot_err(err: impl Display) -> SimError {
    SimError::Plot(err.to_string())
}

fn label_count(extent: f64, interval: f64) -> usize {
    ((extent / interval.max(1.0)).floor() as usize + 1).max(2)
}

/// Writes the trajectory chart using the view's extents and tick spacing.
/// `.svg` paths produce SVG, everything else a bitmap.
pub fn export_chart(
    path: &Path,
    trajectory: &Trajectory,
    input: SimulationInput,
    view: &ViewParameters,
    viewport: Viewport,
) -> Result<()> {
    let size = (viewport.width as u32, viewport.height as u32);
    let is_svg = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

    if is_svg {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw_chart(&root, trajectory, input, view)?;
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw_chart(&root, trajectory, input, view)?;
    }

    info!("wrote trajectory chart to {}", path.display());
    Ok(())
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    trajectory: &Trajectory,
    input: SimulationInput,
    view: &ViewParameters,
) -> Result<()> {
    root.fill(&WHITE).map_err(plot_err)?;

    let caption = format!(
        "v0 = {:.1} m/s, angle = {:.1} deg, drag = {:.3}, g = {:.1} m/s^2",
        input.speed_mps, input.angle_deg, input.drag, input.gravity_mps2
    );
    let mut chart = ChartBuilder::on(root)
        .caption(caption, ("sans-serif", 20))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..view.max_x, 0.0..view.max_y)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_labels(label_count(view.max_x, view.x_tick_interval))
        .y_labels(label_count(view.max_y, view.y_tick_interval))
        .x_desc("Distance (m)")
        .y_desc("Height (m)")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(
            trajectory.samples().iter().map(|s| (s.x, s.y)),
            &BLUE,
        ))
        .map_err(plot_err)?;

    let landing = trajectory.last();
    let peak = trajectory.peak();
    chart
        .draw_series([
            Circle::new((landing.x, landing.y), 4, RED.filled()),
            Circle::new((peak.x, peak.y), 4, GREEN.filled()),
        ])
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamped_name_uses_local_time() {
        let now = Local
            .with_ymd_and_hms(2026, 3, 14, 9, 26, 53)
            .single()
            .expect("unambiguous local time");
        assert_eq!(
            timestamped_file_name(now),
            PathBuf::from("trajectory-20260314-092653.png")
        );
    }

    #[test]
    fn label_count_covers_every_tick() {
        assert_eq!(label_count(44.0, 5.0), 9);
        assert_eq!(label_count(3.0, 5.0), 2);
        assert_eq!(label_count(10.0, 0.0), 11);
    }
}
