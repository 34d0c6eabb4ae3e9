//! Generation pipeline: prompt rendering, reply parsing, task flattening.
//!
//! Pure functions only; the HTTP handler wires them around the completion
//! client and the store.

mod flatten;
mod parse;
mod prompt;

pub use flatten::flatten_tasks;
pub use parse::{parse_breakdown, TaskBreakdown};
pub use prompt::build_prompt;
