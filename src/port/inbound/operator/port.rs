//! Unified operator capability surface for inbound adapters.

use super::completion::CompletionOperator;
use super::config::ConfigurationOperator;
use super::runtime::RuntimeOperator;
use super::status::StatusOperator;

/// Unified operator capability surface consumed by inbound adapters.
pub trait OperatorPort:
    CompletionOperator + ConfigurationOperator + RuntimeOperator + StatusOperator
{
}

impl<T> OperatorPort for T where
    T: CompletionOperator + ConfigurationOperator + RuntimeOperator + StatusOperator
{
}
