//! Application orchestration.
//!
//! Runtime wiring and lifecycle management for the long-running pool.

pub mod runtime;
