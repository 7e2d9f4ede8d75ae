//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod clock;
pub mod factory;
pub mod llm;
