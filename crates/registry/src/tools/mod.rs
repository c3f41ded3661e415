//! Built-in tool implementations.

pub mod math_add;
pub mod time_now;

pub use math_add::MathAddTool;
pub use time_now::TimeNowTool;
