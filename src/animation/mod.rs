//! Transition state machine driving the particle pool.

mod phase;
pub mod transition;

pub use phase::{FrameState, TransitionPhase};
pub use transition::TransitionController;
