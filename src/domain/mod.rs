//! Pool domain types: identifiers, keys, model configuration and stats.

pub mod id;
pub mod key;
pub mod model;
pub mod stats;
