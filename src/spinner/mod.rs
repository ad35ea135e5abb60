// Public API - what other modules can use
pub use animation::{animate, SpinFrame, SpinOutcome, SpinTiming};
pub use draw::{Draw, RngDraw, ScriptedDraw};
pub use session::{SpinCommit, SpinError, SpinSession, SpinState, NO_GAMES_TOKEN};
pub use wheel::{ease_out_cubic, Wheel};

// Internal modules
mod animation;
mod draw;
mod session;
mod wheel;
