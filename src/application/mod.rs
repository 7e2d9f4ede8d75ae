//! Application services.
//!
//! Use cases that coordinate domain types and outbound ports.

pub mod pool;
