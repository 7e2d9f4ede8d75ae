//! Pool keys: which model slot of which consumer a pool serves.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::id::ConsumerId;

/// Sub-role of a model slot within a consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelRole {
    /// The only model of a single-model consumer.
    Primary,
    /// First model of a dual-model consumer.
    ModelA,
    /// Second model of a dual-model consumer.
    ModelB,
}

impl ModelRole {
    /// Stable name used in keys, logs and the status file.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::ModelA => "model_a",
            Self::ModelB => "model_b",
        }
    }
}

impl fmt::Display for ModelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ModelRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "primary" => Ok(Self::Primary),
            "model_a" | "a" => Ok(Self::ModelA),
            "model_b" | "b" => Ok(Self::ModelB),
            other => Err(format!("unknown model role '{other}'")),
        }
    }
}

/// Shape of a consumer: how many model slots it owns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsumerKind {
    /// One model, one pool.
    #[default]
    Single,
    /// Two collaborating models, one pool each.
    Dual,
}

impl ConsumerKind {
    /// Roles owned by a consumer of this kind.
    #[must_use]
    pub const fn roles(self) -> &'static [ModelRole] {
        match self {
            Self::Single => &[ModelRole::Primary],
            Self::Dual => &[ModelRole::ModelA, ModelRole::ModelB],
        }
    }

    /// Stable name used in logs and CLI output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Dual => "dual",
        }
    }
}

impl fmt::Display for ConsumerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite pool identifier: (consumer, role).
///
/// Displayed as `<consumer>/<role>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PoolKey {
    consumer: ConsumerId,
    role: ModelRole,
}

impl PoolKey {
    #[must_use]
    pub fn new(consumer: ConsumerId, role: ModelRole) -> Self {
        Self { consumer, role }
    }

    /// Key of a single-model consumer.
    #[must_use]
    pub fn primary(consumer: ConsumerId) -> Self {
        Self::new(consumer, ModelRole::Primary)
    }

    /// All keys owned by `consumer` given its kind.
    #[must_use]
    pub fn for_consumer(consumer: &ConsumerId, kind: ConsumerKind) -> Vec<Self> {
        kind.roles()
            .iter()
            .map(|role| Self::new(consumer.clone(), *role))
            .collect()
    }

    #[must_use]
    pub fn consumer(&self) -> &ConsumerId {
        &self.consumer
    }

    #[must_use]
    pub fn role(&self) -> ModelRole {
        self.role
    }
}

impl fmt::Display for PoolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.consumer, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_consumer_owns_one_key() {
        let keys = PoolKey::for_consumer(&ConsumerId::new("42"), ConsumerKind::Single);
        assert_eq!(keys, vec![PoolKey::primary(ConsumerId::new("42"))]);
    }

    #[test]
    fn dual_consumer_owns_two_keys() {
        let id = ConsumerId::new("7");
        let keys = PoolKey::for_consumer(&id, ConsumerKind::Dual);

        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].role(), ModelRole::ModelA);
        assert_eq!(keys[1].role(), ModelRole::ModelB);
        assert!(keys.iter().all(|k| k.consumer() == &id));
    }

    #[test]
    fn key_display() {
        let key = PoolKey::new(ConsumerId::new("7"), ModelRole::ModelB);
        assert_eq!(key.to_string(), "7/model_b");
    }

    #[test]
    fn role_parses_short_and_long_names() {
        assert_eq!("a".parse::<ModelRole>().unwrap(), ModelRole::ModelA);
        assert_eq!("model_b".parse::<ModelRole>().unwrap(), ModelRole::ModelB);
        assert_eq!("primary".parse::<ModelRole>().unwrap(), ModelRole::Primary);
        assert!("c".parse::<ModelRole>().is_err());
    }

    #[test]
    fn kind_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            kind: ConsumerKind,
        }
        let w: Wrapper = toml::from_str(r#"kind = "dual""#).unwrap();
        assert_eq!(w.kind, ConsumerKind::Dual);
    }
}
