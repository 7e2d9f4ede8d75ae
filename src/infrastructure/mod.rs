//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! pool logic: configuration, wiring, runtime lifecycle and the status file.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation
//! - [`operator`] - Implementations of the operator ports used by the CLI
//! - [`orchestration`] - Runtime lifecycle
//! - [`status_file`] - JSON status snapshot for external monitoring

pub mod bootstrap;
pub mod config;
pub mod operator;
pub mod orchestration;
pub mod status_file;
