//! Screen-side half of clickframe: mapping cells to screen coordinates,
//! driving the pointer, and pacing playback.

mod abort;
mod actuator;
mod layout;
mod pacing;
mod player;

use std::time::Duration;

pub use abort::{
    is_abort_event, keycode_for, keys_request_abort, AbortSignal, AbortToken, KeyAbort, NeverAbort,
};
pub use actuator::{Action, Actuator, EnigoActuator, RecordingActuator};
pub use layout::ScreenLayout;
pub use pacing::{FramePacer, Pace, RecordingSleeper, Sleeper, ThreadSleeper, Timing};
pub use player::{PlaybackReport, Player};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to connect to the input system: {0}")]
    Connection(#[from] enigo::NewConError),
    #[error("input event failed: {0}")]
    Input(#[from] enigo::InputError),
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
    #[error("drawing a frame takes {draw:?}, longer than the {interval:?} frame interval")]
    FrameTooSlow { draw: Duration, interval: Duration },
    #[error("abort key {0:?} must be a letter or digit")]
    UnsupportedAbortKey(char),
    #[error(transparent)]
    Grid(#[from] clickframe_grid::GridError),
}
