//! Configuration operator implementation.

use crate::error::Result;
use crate::infrastructure::config::consumer::ConsumerSettings;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::operator::config::{
    ConfigCheckReport, ConfigurationOperator, ConsumerView, ModelSlotView, PoolSettingsView,
};

use super::entry::Operator;

impl ConfigurationOperator for Operator {
    fn check_config(&self, config_toml: &str) -> Result<ConfigCheckReport> {
        let config = Config::parse_toml(config_toml)?;

        Ok(ConfigCheckReport {
            pool: PoolSettingsView {
                size_per_key: config.pool.size_per_key,
                max_idle_secs: config.pool.max_idle_secs,
                reap_interval_secs: config.pool.reap_interval_secs,
                max_lifetime_secs: config.pool.max_lifetime_secs,
            },
            consumers: config.consumers.iter().map(consumer_view).collect(),
        })
    }
}

fn consumer_view(settings: &ConsumerSettings) -> ConsumerView {
    // Shape was validated by `parse_toml`, so slots line up with roles.
    let models = settings
        .kind
        .roles()
        .iter()
        .zip(settings.slots())
        .map(|(role, slot)| ModelSlotView {
            role: role.to_string(),
            provider: slot.provider.to_string(),
            model: slot.model.clone(),
            key_source: slot.key_source(),
        })
        .collect();

    ConsumerView {
        id: settings.id.clone(),
        kind: settings.kind.to_string(),
        models,
        error: settings.resolve().err().map(|e| e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
[pool]
size_per_key = 3

[[consumers]]
id = "ok"
kind = "dual"
[consumers.model_a]
model = "gpt-4o"
api_key = "sk-a"
[consumers.model_b]
provider = "anthropic"
model = "claude-haiku-4-5"
api_key_env = "WARMPOOL_OPERATOR_TEST_UNSET_B"

[[consumers]]
id = "inline"
[consumers.model]
model = "gpt-4o-mini"
api_key = "sk-b"
"#;

    #[test]
    fn check_reports_slots_and_failures() {
        let report = Operator.check_config(CONFIG).unwrap();

        assert_eq!(report.pool.size_per_key, 3);
        assert_eq!(report.consumers.len(), 2);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_valid());

        let dual = &report.consumers[0];
        assert_eq!(dual.kind, "dual");
        assert_eq!(dual.models[0].role, "model_a");
        assert_eq!(dual.models[0].key_source, "inline");
        assert_eq!(dual.models[1].provider, "anthropic");
        assert_eq!(dual.models[1].key_source, "$WARMPOOL_OPERATOR_TEST_UNSET_B");
        assert!(dual
            .error
            .as_deref()
            .unwrap()
            .contains("WARMPOOL_OPERATOR_TEST_UNSET_B"));

        let single = &report.consumers[1];
        assert_eq!(single.models[0].role, "primary");
        assert!(single.error.is_none());
    }

    #[test]
    fn check_rejects_malformed_config() {
        assert!(Operator.check_config("[pool]\nsize_per_key = 0\n").is_err());
    }
}
