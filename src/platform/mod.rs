//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/ticks (frame deltas from whatever clock the host has)
//! - Input events (key down/up folded into per-tick input)
//!
//! Nothing here schedules frames; the host loop calls in.

pub mod input;
pub mod time;

pub use input::{InputState, KeyAction};
pub use time::FrameClock;
