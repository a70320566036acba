//! Timeline painting: commit engine and gesture state machine

mod commit;
mod gesture;

pub use commit::{paint_effect, paint_situation, PaintCommit, PaintMode};
pub use gesture::{Gesture, PaintTarget, Stroke};
