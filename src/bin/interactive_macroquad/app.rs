use drag_trajectory::core::playback::TickEvent;
use drag_trajectory::core::window::Viewport;
use log::warn;
use macroquad::prelude::*;

use crate::constants::{INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH, MSAA_SAMPLES, UI_FONT_PATH};
use crate::controls::{apply_actions, draw_control_panel, hotkey_actions};
use crate::hud::{draw_graphs, draw_hud};
use crate::render::{draw_axes, draw_ball, draw_force_arrows, draw_path, draw_velocity_arrows};
use crate::state::AppRuntime;

pub(crate) fn window_conf() -> Conf {
    Conf {
        window_title: "Drag Trajectory".to_string(),
        window_width: INITIAL_WINDOW_WIDTH,
        window_height: INITIAL_WINDOW_HEIGHT,
        high_dpi: true,
        sample_count: MSAA_SAMPLES,
        window_resizable: true,
        ..Default::default()
    }
}

fn current_viewport() -> Viewport {
    Viewport::new(screen_width() as f64, screen_height() as f64)
}

pub(crate) async fn run() {
    let ui_font = match load_ttf_font(UI_FONT_PATH).await {
        Ok(font) => Some(font),
        Err(err) => {
            warn!("could not load '{UI_FONT_PATH}': {err}; using default font");
            None
        }
    };

    let mut state = AppRuntime::new(current_viewport());

    loop {
        let viewport = current_viewport();
        if viewport != state.sim.viewport() {
            state.sim.resize(viewport);
        }

        let actions = hotkey_actions().merge(draw_control_panel(&mut state));
        apply_actions(&mut state, actions);

        if state.frames.fire() {
            if let Some(TickEvent::Completed(sample)) = state.sim.tick(&mut state.frames) {
                state.status_line = format!("Landed at x = {:.2} m", sample.x);
            }
        }

        clear_background(WHITE);
        let view = *state.sim.view();
        draw_axes(&view, viewport, ui_font.as_ref());
        draw_path(state.sim.trajectory(), &view, viewport);

        let sample = state.sim.current_sample();
        let ball = draw_ball(sample, &view, viewport, ui_font.as_ref());
        if sample.y > 0.0 {
            if state.show_velocity {
                draw_velocity_arrows(ball, sample);
            }
            if state.show_forces {
                draw_force_arrows(ball, state.sim.current_forces());
            }
        }

        draw_hud(&state, viewport.width as f32, ui_font.as_ref());
        draw_graphs(&state, viewport.width as f32, ui_font.as_ref());

        next_frame().await;
    }
}
