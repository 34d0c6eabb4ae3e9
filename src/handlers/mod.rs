//! HTTP API handlers.
//!
//! Each submodule handles one domain of the REST surface; `router` wires
//! them together and `state` holds the shared application context.

pub mod generate;
pub mod health;
pub mod router;
pub mod specs;
pub mod state;

pub use router::build_router;
pub use state::{AppContext, AppState};
