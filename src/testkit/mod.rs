//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`clock`]: `ManualClock`, advanced explicitly by tests.
//! - [`factory`]: client factories that count, fail, or fail on a schedule.
//! - [`llm`]: `MockLlm`, a canned [`Llm`](crate::port::outbound::llm::Llm).
//! - [`config`]: canonical pool settings and model configs.

pub mod clock;
pub mod config;
pub mod factory;
pub mod llm;
