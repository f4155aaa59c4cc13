use drag_trajectory::core::ballistics::Termination;
use drag_trajectory::core::forces::{force_scale_ceiling, force_series, velocity_series};
use macroquad::prelude::*;

use crate::constants::{
    DRAG_COLOR, GRAPH_FRAME_COLOR, GRAPH_GAP, GRAPH_SIZE, GRAPH_TOP, GRAVITY_COLOR, NET_COLOR,
    VELOCITY_GRAPH_LIMIT_MPS,
};
use crate::controls::state_text;
use crate::render::draw_ui_text;
use crate::state::AppRuntime;

pub(crate) fn draw_hud(state: &AppRuntime, screen_w: f32, font: Option<&Font>) {
    let trajectory = state.sim.trajectory();
    let cursor = state.sim.cursor();
    let sample = state.sim.current_sample();
    let right = screen_w - 30.0;
    let color = Color::from_rgba(30, 30, 35, 255);

    let lines = [
        format!(
            "{} | step {} of {}",
            state_text(state.sim.state()),
            cursor.step_index,
            trajectory.len()
        ),
        format!(
            "t = {:.2} s | vx = {:.2} m/s | vy = {:.2} m/s",
            trajectory.time_at(cursor.step_index.saturating_sub(1)),
            sample.vx,
            sample.vy
        ),
        format!(
            "Range {:.2} m | Peak {:.2} m | Flight {:.2} s",
            trajectory.range_m(),
            trajectory.max_y(),
            trajectory.flight_time_s()
        ),
        if trajectory.termination() == Termination::CeilingReached {
            "Stopped at safety ceiling".to_string()
        } else {
            state.status_line.clone()
        },
    ];

    for (i, line) in lines.iter().enumerate() {
        let size = measure_text(line, font, 18, 1.0);
        draw_ui_text(
            line,
            right - size.width,
            40.0 + i as f32 * 22.0,
            18,
            color,
            font,
        );
    }
}

pub(crate) fn draw_graphs(state: &AppRuntime, screen_w: f32, font: Option<&Font>) {
    let left = screen_w - 30.0 - GRAPH_SIZE.0;
    let mut top = GRAPH_TOP;
    if state.show_velocity {
        draw_velocity_graph(state, Rect::new(left, top, GRAPH_SIZE.0, GRAPH_SIZE.1), font);
        top += GRAPH_SIZE.1 + GRAPH_GAP;
    }
    if state.show_forces {
        draw_force_graph(state, Rect::new(left, top, GRAPH_SIZE.0, GRAPH_SIZE.1), font);
    }
}

fn draw_velocity_graph(state: &AppRuntime, area: Rect, font: Option<&Font>) {
    let trajectory = state.sim.trajectory();
    let rows = velocity_series(trajectory, state.sim.cursor().step_index);
    let mid = area.y + area.h * 0.5;
    let limit = VELOCITY_GRAPH_LIMIT_MPS;

    draw_rectangle_lines(area.x, area.y, area.w, area.h, 1.0, GRAPH_FRAME_COLOR);
    draw_line(area.x, mid, area.x + area.w, mid, 1.0, GRAPH_FRAME_COLOR);
    draw_graph_labels(
        area,
        &format!("+{limit:.0} m/s"),
        &format!("-{limit:.0} m/s"),
        font,
    );

    let half = Rect::new(area.x, area.y, area.w, area.h * 0.5);
    let total = trajectory.len();
    for (series, color) in [
        (rows.iter().map(|r| r.speed).collect::<Vec<_>>(), RED),
        (rows.iter().map(|r| r.vy).collect(), GREEN),
        (rows.iter().map(|r| r.vx).collect(), BLUE),
    ] {
        draw_polyline(&graph_points(&series, total, half, limit), color);
    }
}

fn draw_force_graph(state: &AppRuntime, area: Rect, font: Option<&Font>) {
    let trajectory = state.sim.trajectory();
    let input = state.sim.input();
    let upto = state.sim.cursor().step_index;
    let forces = force_series(trajectory, input.drag, input.gravity_mps2, upto);
    let ceiling = force_scale_ceiling(trajectory, input.drag, input.gravity_mps2, upto);

    draw_rectangle_lines(area.x, area.y, area.w, area.h, 1.0, GRAPH_FRAME_COLOR);
    draw_graph_labels(area, &format!("{ceiling:.0} N/kg"), "0", font);

    let total = trajectory.len();
    for (series, color) in [
        (forces.iter().map(|f| f.drag_magnitude()).collect::<Vec<_>>(), DRAG_COLOR),
        (forces.iter().map(|f| -f.gravity_y).collect(), GRAVITY_COLOR),
        (forces.iter().map(|f| f.net_magnitude()).collect(), NET_COLOR),
    ] {
        draw_polyline(&graph_points(&series, total, area, ceiling), color);
    }
}

fn draw_graph_labels(area: Rect, top: &str, bottom: &str, font: Option<&Font>) {
    let color = Color::from_rgba(30, 30, 35, 255);
    let right = area.x + area.w - 2.0;
    let size = measure_text(top, font, 12, 1.0);
    draw_ui_text(top, right - size.width, area.y + 12.0, 12, color, font);
    let size = measure_text(bottom, font, 12, 1.0);
    draw_ui_text(bottom, right - size.width, area.y + area.h - 3.0, 12, color, font);
}

fn draw_polyline(points: &[Vec2], color: Color) {
    for pair in points.windows(2) {
        draw_line(pair[0].x, pair[0].y, pair[1].x, pair[1].y, 1.5, color);
    }
}

/// Maps `values[i]` to screen space: x spreads over the whole run of `total`
/// samples, and `limit` sits at the top edge of `area` with zero at its bottom.
fn graph_points(values: &[f64], total: usize, area: Rect, limit: f64) -> Vec<Vec2> {
    if total == 0 || limit <= 0.0 {
        return Vec::new();
    }
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = area.x + i as f32 / total as f32 * area.w;
            let y = area.y + area.h - (v / limit) as f32 * area.h;
            vec2(x, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_points_span_run_and_scale_to_limit() {
        let area = Rect::new(10.0, 20.0, 200.0, 100.0);
        let points = graph_points(&[0.0, 25.0, 50.0, -50.0], 8, area, 50.0);

        assert_eq!(points.len(), 4);
        assert_eq!(points[0], vec2(10.0, 120.0));
        assert_eq!(points[1], vec2(35.0, 70.0));
        assert_eq!(points[2], vec2(60.0, 20.0));
        assert_eq!(points[3], vec2(85.0, 220.0));
    }

    #[test]
    fn graph_points_empty_for_degenerate_scale() {
        let area = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(graph_points(&[1.0], 0, area, 5.0).is_empty());
        assert!(graph_points(&[1.0], 4, area, 0.0).is_empty());
    }
}
