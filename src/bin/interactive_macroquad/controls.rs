use drag_trajectory::core::playback::PlaybackState;
use macroquad::prelude::*;
use macroquad::ui::{hash, root_ui, widgets};

use crate::constants::{ANGLE_RANGE, DRAG_RANGE, GRAVITY_RANGE, PANEL_POS, PANEL_SIZE, SPEED_RANGE};
use crate::state::AppRuntime;

#[derive(Default, Clone, Copy)]
pub(crate) struct FrameActions {
    pub(crate) run: bool,
    pub(crate) pause: bool,
    pub(crate) reset: bool,
    pub(crate) zoom_in: bool,
    pub(crate) zoom_out: bool,
    pub(crate) refit: bool,
}

impl FrameActions {
    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            run: self.run || other.run,
            pause: self.pause || other.pause,
            reset: self.reset || other.reset,
            zoom_in: self.zoom_in || other.zoom_in,
            zoom_out: self.zoom_out || other.zoom_out,
            refit: self.refit || other.refit,
        }
    }
}

pub(crate) fn hotkey_actions() -> FrameActions {
    FrameActions {
        run: is_key_pressed(KeyCode::Enter),
        pause: is_key_pressed(KeyCode::Space),
        reset: is_key_pressed(KeyCode::R),
        zoom_in: is_key_pressed(KeyCode::Equal),
        zoom_out: is_key_pressed(KeyCode::Minus),
        refit: is_key_pressed(KeyCode::F),
    }
}

pub(crate) fn draw_control_panel(state: &mut AppRuntime) -> FrameActions {
    let mut actions = FrameActions::default();
    widgets::Window::new(
        hash!(),
        vec2(PANEL_POS.0, PANEL_POS.1),
        vec2(PANEL_SIZE.0, PANEL_SIZE.1),
    )
    .label("Launch")
    .ui(&mut *root_ui(), |ui| {
        ui.slider(
            hash!(),
            "Velocity (m/s)",
            SPEED_RANGE.0..SPEED_RANGE.1,
            &mut state.speed_mps,
        );
        ui.slider(
            hash!(),
            "Angle (deg)",
            ANGLE_RANGE.0..ANGLE_RANGE.1,
            &mut state.angle_deg,
        );
        ui.slider(hash!(), "Drag", DRAG_RANGE.0..DRAG_RANGE.1, &mut state.drag);
        ui.slider(
            hash!(),
            "Gravity (m/s^2)",
            GRAVITY_RANGE.0..GRAVITY_RANGE.1,
            &mut state.gravity_mps2,
        );
        ui.label(
            None,
            &format!(
                "v {:.0} | angle {:.0} | drag {:.3} | g {:.1}",
                state.speed_mps, state.angle_deg, state.drag, state.gravity_mps2
            ),
        );
        ui.separator();
        ui.checkbox(hash!(), "Show velocity", &mut state.show_velocity);
        ui.checkbox(hash!(), "Show forces", &mut state.show_forces);
        ui.separator();
        if ui.button(None, "Run (Enter)") {
            actions.run = true;
        }
        if ui.button(None, "Pause / Resume (Space)") {
            actions.pause = true;
        }
        if ui.button(None, "Reset (R)") {
            actions.reset = true;
        }
        if ui.button(None, "Zoom In (+)") {
            actions.zoom_in = true;
        }
        if ui.button(None, "Zoom Out (-)") {
            actions.zoom_out = true;
        }
        if ui.button(None, "Fit View (F)") {
            actions.refit = true;
        }
        ui.label(None, &format!("State: {}", state_text(state.sim.state())));
    });

    actions
}

pub(crate) fn apply_actions(state: &mut AppRuntime, actions: FrameActions) {
    if actions.run {
        let input = state.slider_input();
        state.sim.start(input, &mut state.frames);
        state.status_line = "Running".to_string();
    }

    if actions.pause {
        state.sim.toggle_pause(&mut state.frames);
        state.status_line = state_text(state.sim.state()).to_string();
    }

    if actions.reset {
        state.sim.reset(&mut state.frames);
        state.status_line = "Reset".to_string();
    }

    if actions.zoom_in && !state.sim.zoom_in() {
        state.status_line = "Zoom limit reached".to_string();
    }
    if actions.zoom_out && !state.sim.zoom_out() {
        state.status_line = "Zoom limit reached".to_string();
    }

    if actions.refit {
        state.sim.refit();
        state.status_line = "View fitted to trajectory".to_string();
    }
}

pub(crate) fn state_text(playback: PlaybackState) -> &'static str {
    match playback {
        PlaybackState::Idle => "Idle",
        PlaybackState::Running => "Running",
        PlaybackState::Paused => "Paused",
        PlaybackState::Completed => "Completed",
    }
}
