use log::{debug, info};

use crate::core::ballistics::{PathSample, Trajectory};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

/// Frame-pacing primitive supplied by the renderer.
pub trait FrameHost {
    fn request_frame(&mut self) -> FrameId;

    /// Must tolerate ids that already fired or were never issued.
    fn cancel_frame(&mut self, id: FrameId);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Running,
    Paused,
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackCursor {
    pub step_index: usize,
    pub running: bool,
    pub paused: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickEvent {
    /// Sample to display this frame; another frame has been requested.
    Advanced(PathSample),
    /// Cursor ran off the end and was clamped to the final sample.
    Completed(PathSample),
}

impl TickEvent {
    pub fn sample(&self) -> PathSample {
        match *self {
            TickEvent::Advanced(sample) | TickEvent::Completed(sample) => sample,
        }
    }
}

/// Walks a precomputed trajectory one sample per display frame. It never
/// schedules anything itself; the host calls `tick` when a requested frame
/// arrives.
pub struct Playback {
    trajectory: Trajectory,
    cursor: usize,
    state: PlaybackState,
    pending: Option<FrameId>,
    current: PathSample,
}

impl Playback {
    pub fn new(trajectory: Trajectory) -> Self {
        let current = trajectory.first();
        Self {
            trajectory,
            cursor: 0,
            state: PlaybackState::Idle,
            pending: None,
            current,
        }
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn cursor(&self) -> PlaybackCursor {
        PlaybackCursor {
            step_index: self.cursor,
            running: matches!(self.state, PlaybackState::Running | PlaybackState::Paused),
            paused: self.state == PlaybackState::Paused,
        }
    }

    pub fn current(&self) -> PathSample {
        self.current
    }

    /// Rewinds to the launch point and begins running.
    pub fn start(&mut self, host: &mut impl FrameHost) {
        self.cancel_pending(host);
        self.cursor = 0;
        self.current = self.trajectory.first();
        self.state = PlaybackState::Running;
        self.pending = Some(host.request_frame());
        info!("playback started over {} samples", self.trajectory.len());
    }

    pub fn tick(&mut self, host: &mut impl FrameHost) -> Option<TickEvent> {
        if self.state != PlaybackState::Running {
            return None;
        }
        self.pending = None;

        let len = self.trajectory.len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
            self.current = self.trajectory.last();
            self.state = PlaybackState::Completed;
            info!(
                "playback completed at step {} (x={:.2} m)",
                self.cursor, self.current.x
            );
            return Some(TickEvent::Completed(self.current));
        }

        self.current = self.trajectory.get(self.cursor).unwrap_or(self.current);
        self.cursor += 1;
        self.pending = Some(host.request_frame());
        Some(TickEvent::Advanced(self.current))
    }

    pub fn pause(&mut self, host: &mut impl FrameHost) {
        if self.state != PlaybackState::Running {
            return;
        }
        self.cancel_pending(host);
        self.state = PlaybackState::Paused;
        debug!("paused at step {}", self.cursor);
    }

    pub fn resume(&mut self, host: &mut impl FrameHost) {
        if self.state != PlaybackState::Paused {
            return;
        }
        self.state = PlaybackState::Running;
        self.cancel_pending(host);
        self.pending = Some(host.request_frame());
        debug!("resumed at step {}", self.cursor);
    }

    pub fn toggle_pause(&mut self, host: &mut impl FrameHost) {
        match self.state {
            PlaybackState::Running => self.pause(host),
            PlaybackState::Paused => self.resume(host),
            PlaybackState::Idle | PlaybackState::Completed => {}
        }
    }

    pub fn reset(&mut self, host: &mut impl FrameHost) {
        self.cancel_pending(host);
        self.state = PlaybackState::Idle;
        self.cursor = 0;
        self.current = self.trajectory.first();
    }

    /// Safe to call repeatedly.
    pub fn cancel_pending(&mut self, host: &mut impl FrameHost) {
        if let Some(id) = self.pending.take() {
            host.cancel_frame(id);
        }
    }
}
