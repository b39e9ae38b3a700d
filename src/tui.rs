//! Terminal front end of the comment search widget

mod engine;
mod input;
mod renderer;

pub use engine::{create_input_stream, run_tui, InputEvent, TuiEngine};
pub use input::{InputAction, InputHandler};
pub use renderer::{BarSegment, TuiRenderer, ViewState};
