pub mod ballistics;
pub mod error;
pub mod forces;
pub mod playback;
pub mod plot;
pub mod simulation;
pub mod window;
