//! Infrastructure configuration modules.

pub mod consumer;
pub mod logging;
pub mod settings;
