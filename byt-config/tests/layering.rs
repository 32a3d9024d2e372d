use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;

use byt_config::{
    AdminConfig, ConfigLoadError, ConfigLoader, ConfigOverrides, ConfigSource,
};
use tempfile::NamedTempFile;

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn write_toml(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write toml");
    file
}

#[test]
fn defaults_point_at_the_production_backend() {
    let load = ConfigLoader::new()
        .without_default_file()
        .with_env(HashMap::new())
        .load()
        .unwrap();

    assert_eq!(load.config, AdminConfig::default());
    assert_eq!(
        load.config.api.base_url_str(),
        "https://buildyourtech.dtechne.com"
    );
    assert_eq!(load.config.api.timeout, Duration::from_secs(30));
    assert_eq!(load.sources, vec![ConfigSource::Defaults]);
}

#[test]
fn file_then_env_then_overrides() {
    let file = write_toml(
        r#"
[api]
base_url = "http://file.example:8080/"
timeout = "5s"

[operator]
name = "maria"
role = 2

[cart]
items = 3
"#,
    );

    let load = ConfigLoader::new()
        .with_file(file.path())
        .with_env(env(&[
            ("BYT_API_TIMEOUT", "2m"),
            ("BYT_OPERATOR_ROLE", "1"),
            ("UNRELATED", "ignored"),
        ]))
        .with_overrides(ConfigOverrides {
            base_url: Some("https://cli.example".into()),
            ..ConfigOverrides::default()
        })
        .load()
        .unwrap();

    let config = load.config;
    assert_eq!(config.api.base_url_str(), "https://cli.example");
    assert_eq!(config.api.timeout, Duration::from_secs(120));
    assert_eq!(config.operator.name, "maria");
    assert_eq!(config.operator.role, 1);
    assert_eq!(config.cart.items, 3);
    assert_eq!(
        load.sources,
        vec![
            ConfigSource::Defaults,
            ConfigSource::File,
            ConfigSource::Environment,
            ConfigSource::Overrides,
        ]
    );
}

#[test]
fn dotenv_never_shadows_the_real_environment() {
    let mut dotenv = NamedTempFile::new().unwrap();
    writeln!(dotenv, "BYT_OPERATOR_NAME=from-dotenv").unwrap();
    writeln!(dotenv, "BYT_CART_ITEMS=7").unwrap();

    let load = ConfigLoader::new()
        .without_default_file()
        .with_env_file(dotenv.path())
        .with_env(env(&[("BYT_OPERATOR_NAME", "from-env")]))
        .load()
        .unwrap();

    assert_eq!(load.config.operator.name, "from-env");
    assert_eq!(load.config.cart.items, 7);
    assert!(load.sources.contains(&ConfigSource::EnvFile));
}

#[test]
fn invalid_values_name_their_key() {
    let err = ConfigLoader::new()
        .without_default_file()
        .with_env(env(&[("BYT_CART_ITEMS", "many")]))
        .load()
        .unwrap_err();
    assert!(err.to_string().contains("BYT_CART_ITEMS"), "{err}");

    let err = ConfigLoader::new()
        .without_default_file()
        .with_env(env(&[("BYT_API_BASE_URL", "not a url")]))
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::InvalidUrl { .. }), "{err}");
}

#[test]
fn unknown_file_keys_are_rejected() {
    let file = write_toml("[api]\nbase_uri = \"https://typo.example\"\n");
    let err = ConfigLoader::new()
        .with_file(file.path())
        .with_env(HashMap::new())
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::FileParse { .. }), "{err}");
}

#[test]
fn missing_explicit_file_is_an_error() {
    let err = ConfigLoader::new()
        .with_file("/definitely/not/here/byt-admin.toml")
        .with_env(HashMap::new())
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::FileIo { .. }), "{err}");
}

#[test]
fn printed_config_loads_back_identically() {
    let mut original = AdminConfig::default();
    original.operator.name = "root".into();
    original.api.timeout = Duration::from_secs(90);

    let rendered = original.to_toml().unwrap();
    let file = write_toml(&rendered);

    let load = ConfigLoader::new()
        .with_file(file.path())
        .with_env(HashMap::new())
        .load()
        .unwrap();
    assert_eq!(load.config, original);
}
