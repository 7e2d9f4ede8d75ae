//! Inbound ports (driving side): use-cases offered to inbound adapters.

pub mod operator;
