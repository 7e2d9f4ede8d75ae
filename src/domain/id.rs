//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::key::PoolKey;

/// Consumer identifier - newtype for type safety.
///
/// A consumer is anything that owns one or more model slots (an agent, a
/// workflow, a tenant). The inner String is private to ensure all
/// construction goes through the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConsumerId(String);

impl ConsumerId {
    /// Create a new `ConsumerId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the consumer ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConsumerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ConsumerId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ConsumerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Unique identifier of a pooled connection.
///
/// Generated as `<key>#<uuid>` so log lines can be traced back to the
/// owning pool, or constructed from an existing string when a caller hands
/// an id back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Generate a fresh identifier for a connection owned by `key`.
    #[must_use]
    pub fn generate(key: &PoolKey) -> Self {
        Self(format!("{key}#{}", Uuid::new_v4().simple()))
    }

    /// Wrap an existing identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the connection ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ConnectionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::key::ModelRole;

    #[test]
    fn consumer_id_display() {
        let id = ConsumerId::new("agent-42");
        assert_eq!(id.to_string(), "agent-42");
        assert_eq!(id.as_str(), "agent-42");
    }

    #[test]
    fn connection_ids_are_unique_per_key() {
        let key = PoolKey::new(ConsumerId::new("7"), ModelRole::ModelA);
        let a = ConnectionId::generate(&key);
        let b = ConnectionId::generate(&key);

        assert_ne!(a, b);
        assert!(a.as_str().starts_with("7/model_a#"));
    }

    #[test]
    fn connection_id_round_trips_through_string() {
        let key = PoolKey::primary(ConsumerId::new("1"));
        let id = ConnectionId::generate(&key);
        assert_eq!(ConnectionId::new(id.to_string()), id);
    }
}
