use std::f32::consts::PI;

use drag_trajectory::core::ballistics::{PathSample, Trajectory};
use drag_trajectory::core::forces::ForceSample;
use drag_trajectory::core::window::{AXIS_MARGIN_PX, ViewParameters, Viewport};
use macroquad::prelude::*;

use crate::constants::{
    ARROW_HEAD_PX, AXIS_COLOR, BALL_RADIUS_PX, DRAG_COLOR, FORCE_ARROW_SCALE, GRAVITY_COLOR,
    MAJOR_TICK_PX, NET_COLOR, PATH_COLOR, TICK_COLOR, VELOCITY_ARROW_SCALE,
};

pub(crate) fn draw_ui_text(
    text: &str,
    x: f32,
    y: f32,
    font_size: u16,
    color: Color,
    font: Option<&Font>,
) {
    draw_text_ex(
        text,
        x,
        y,
        TextParams {
            font,
            font_size,
            color,
            ..Default::default()
        },
    );
}

pub(crate) fn to_screen(view: &ViewParameters, viewport: Viewport, x: f64, y: f64) -> Vec2 {
    let (sx, sy) = view.world_to_screen(x, y, viewport);
    vec2(sx as f32, sy as f32)
}

pub(crate) fn draw_axes(view: &ViewParameters, viewport: Viewport, font: Option<&Font>) {
    let inset = (AXIS_MARGIN_PX * 0.5) as f32;
    let width = viewport.width as f32;
    let height = viewport.height as f32;
    let origin = vec2(inset, height - inset);
    let tick_font_size: u16 = 14;

    draw_line(origin.x, origin.y, width - inset, origin.y, 1.0, AXIS_COLOR);
    draw_line(origin.x, origin.y, origin.x, inset, 1.0, AXIS_COLOR);

    for x in view.x_ticks() {
        let p = to_screen(view, viewport, x, 0.0);
        if p.x > width - inset {
            break;
        }
        draw_line(p.x, origin.y, p.x, origin.y - MAJOR_TICK_PX, 1.0, TICK_COLOR);
        let label = format!("{}", x.round());
        let size = measure_text(&label, font, tick_font_size, 1.0);
        draw_ui_text(
            &label,
            p.x - size.width * 0.5,
            origin.y + 4.0 + size.height,
            tick_font_size,
            AXIS_COLOR,
            font,
        );
    }

    for y in view.y_ticks() {
        let p = to_screen(view, viewport, 0.0, y);
        if p.y < inset {
            break;
        }
        draw_line(origin.x, p.y, origin.x + MAJOR_TICK_PX, p.y, 1.0, TICK_COLOR);
        let label = format!("{}", y.round());
        let size = measure_text(&label, font, tick_font_size, 1.0);
        draw_ui_text(
            &label,
            origin.x - 5.0 - size.width,
            p.y + size.height * 0.5,
            tick_font_size,
            AXIS_COLOR,
            font,
        );
    }
}

pub(crate) fn draw_path(trajectory: &Trajectory, view: &ViewParameters, viewport: Viewport) {
    let samples = trajectory.samples();
    if samples.len() < 2 {
        return;
    }
    // Every other segment, for a dashed look.
    for (i, pair) in samples.windows(2).enumerate() {
        if (i / 8) % 2 == 1 {
            continue;
        }
        let a = to_screen(view, viewport, pair[0].x, pair[0].y);
        let b = to_screen(view, viewport, pair[1].x, pair[1].y);
        draw_line(a.x, a.y, b.x, b.y, 2.0, PATH_COLOR);
    }
}

pub(crate) fn draw_ball(
    sample: PathSample,
    view: &ViewParameters,
    viewport: Viewport,
    font: Option<&Font>,
) -> Vec2 {
    let p = to_screen(view, viewport, sample.x, sample.y);
    draw_circle(p.x, p.y, BALL_RADIUS_PX, PATH_COLOR);
    draw_ui_text(
        &format!("x: {:.2} m", sample.x),
        p.x + 10.0,
        p.y - 20.0,
        16,
        AXIS_COLOR,
        font,
    );
    draw_ui_text(
        &format!("y: {:.2} m", sample.y),
        p.x + 10.0,
        p.y - 5.0,
        16,
        AXIS_COLOR,
        font,
    );
    p
}

/// `delta` is in screen pixels with y pointing up.
fn draw_arrow(from: Vec2, delta: Vec2, color: Color) {
    let to = vec2(from.x + delta.x, from.y - delta.y);
    draw_line(from.x, from.y, to.x, to.y, 2.0, color);

    let dir = to - from;
    if dir.length_squared() < 1e-6 {
        return;
    }
    let angle = dir.y.atan2(dir.x);
    let spread = PI / 6.0;
    let left = to - vec2((angle - spread).cos(), (angle - spread).sin()) * ARROW_HEAD_PX;
    let right = to - vec2((angle + spread).cos(), (angle + spread).sin()) * ARROW_HEAD_PX;
    draw_triangle(to, left, right, color);
}

pub(crate) fn draw_velocity_arrows(ball: Vec2, sample: PathSample) {
    if sample.speed() <= 1e-4 {
        return;
    }
    let vx = sample.vx as f32 * VELOCITY_ARROW_SCALE;
    let vy = sample.vy as f32 * VELOCITY_ARROW_SCALE;
    draw_arrow(ball, vec2(vx, vy), RED);
    draw_arrow(ball, vec2(vx, 0.0), BLUE);
    draw_arrow(ball, vec2(0.0, vy), GREEN);
}

pub(crate) fn draw_force_arrows(ball: Vec2, forces: ForceSample) {
    let scale = FORCE_ARROW_SCALE;
    draw_arrow(
        ball,
        vec2(forces.drag_x as f32, forces.drag_y as f32) * scale,
        DRAG_COLOR,
    );
    draw_arrow(ball, vec2(0.0, forces.gravity_y as f32) * scale, GRAVITY_COLOR);
    draw_arrow(
        ball,
        vec2(forces.net_x as f32, forces.net_y as f32) * scale,
        NET_COLOR,
    );
}
