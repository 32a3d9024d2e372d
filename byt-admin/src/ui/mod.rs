//! Terminal front end for the users page.

pub mod keymap;
pub mod render;
pub mod tui;

pub use keymap::{KeyAction, map_key};
pub use render::render;
pub use tui::{EventSource, ScriptEventSource, TuiExit, run_app, run_tui};
