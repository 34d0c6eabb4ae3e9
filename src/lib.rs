//! Tasks Generator API - feature requests to task breakdowns via an LLM.
//!
//! Pipeline: HTTP surface -> prompt builder -> completion client ->
//! response parser -> task flattener -> store.

pub mod config;
pub mod errors;
pub mod generate;
pub mod handlers;
pub mod llm;
pub mod model;
pub mod storage;
