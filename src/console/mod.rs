// Terminal front end: parses commands per screen, renders screens and drives
// fetches and spin animations.

// Public API - what other modules can use
pub use command::{parse_command, Command};
pub use driver::Console;
pub use render::{help_text, render_frame, render_screen};
pub use terminal::{ctrl_c_interrupt, no_interrupt, Interrupt, LineSource, ReaderLines};

// Internal modules
mod command;
mod driver;
mod render;
mod terminal;
