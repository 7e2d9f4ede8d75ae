//! Client handle factory port.

use std::sync::Arc;

use crate::domain::model::ModelConfig;
use crate::error::FactoryError;

use super::llm::Llm;

/// Factory function for creating new client handles.
///
/// Called by the connection registry under its lock, both while prewarming
/// and on an acquire miss, so implementations must only construct the
/// handle and never perform network I/O.
pub type ClientFactory =
    Arc<dyn Fn(&ModelConfig) -> Result<Arc<dyn Llm>, FactoryError> + Send + Sync>;
