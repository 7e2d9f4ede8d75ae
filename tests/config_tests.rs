//! Loading configuration files from disk.

use std::io::Write;

use tempfile::NamedTempFile;
use warmpool::domain::key::{ConsumerKind, ModelRole};
use warmpool::domain::model::Provider;
use warmpool::error::{ConfigError, Error};
use warmpool::infrastructure::config::settings::Config;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn loads_consumers_from_file() {
    std::env::set_var("WARMPOOL_CONFIG_TEST_ANTHROPIC", "sk-ant-test");
    let file = write_config(
        r#"
[pool]
size_per_key = 4
max_idle_secs = 300
max_lifetime_secs = 3600

[[consumers]]
id = "support-bot"
[consumers.model]
model = "gpt-4o-mini"
api_key = "sk-test"
temperature = 0.2

[[consumers]]
id = "debate-1"
kind = "dual"
[consumers.model_a]
model = "gpt-4o"
api_key = "sk-test"
[consumers.model_b]
provider = "anthropic"
model = "claude-haiku-4-5"
api_key_env = "WARMPOOL_CONFIG_TEST_ANTHROPIC"
max_tokens = 1024
"#,
    );

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.pool.size_per_key, 4);
    assert_eq!(config.pool.max_lifetime_secs, 3600);

    let consumers = config.resolve_consumers().unwrap();
    assert_eq!(consumers.len(), 2);

    let (id, bot) = &consumers[0];
    assert_eq!(id.as_str(), "support-bot");
    assert_eq!(bot.kind(), ConsumerKind::Single);
    assert_eq!(bot.model(ModelRole::Primary).unwrap().temperature, 0.2);

    let (_, debate) = &consumers[1];
    let model_b = debate.model(ModelRole::ModelB).unwrap();
    assert_eq!(model_b.provider, Provider::Anthropic);
    assert_eq!(model_b.api_key, "sk-ant-test");
    assert_eq!(model_b.max_tokens, Some(1024));
    assert!(debate.model(ModelRole::Primary).is_none());
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let file = write_config("[[consumers]\nid = ");
    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
}

#[test]
fn shape_errors_name_the_consumer() {
    let file = write_config(
        r#"
[[consumers]]
id = "lonely"
kind = "dual"
[consumers.model_a]
model = "gpt-4o"
api_key = "sk-test"
"#,
    );
    let err = Config::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("lonely"));
}

#[test]
fn missing_credential_fails_resolution_only() {
    let file = write_config(
        r#"
[[consumers]]
id = "no-key"
[consumers.model]
model = "gpt-4o-mini"
api_key_env = "WARMPOOL_CONFIG_TEST_NEVER_SET"
"#,
    );

    // Loading is structural; the credential is looked up on resolve.
    let config = Config::load(file.path()).unwrap();
    let err = config.resolve_consumers().unwrap_err();
    assert!(err.to_string().contains("WARMPOOL_CONFIG_TEST_NEVER_SET"));
}

#[test]
fn out_of_range_temperature_is_rejected_on_resolve() {
    let file = write_config(
        r#"
[[consumers]]
id = "hot"
[consumers.model]
model = "gpt-4o-mini"
api_key = "sk-test"
temperature = 3.5
"#,
    );
    let config = Config::load(file.path()).unwrap();
    let err = config.resolve_consumers().unwrap_err();
    assert!(err.to_string().contains("temperature"));
}
