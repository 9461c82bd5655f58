//! Step definitions for task access scenarios.

mod then;
mod when;
pub mod world;
