//! # Configuration Tests
//!
//! Tests for the configuration loading logic: `${VAR}` substitution, prefixed
//! environment overrides and the defaults applied when a file leaves keys out.
//! Environment variables are process-global, so every test here is `#[serial]`.

use hrqa::RetrievalConfig;
use hrqa_server::config::{get_config, ConfigError};
use serial_test::serial;
use std::{env, fs, time::Duration};
use tempfile::{tempdir, TempDir};

const MINIMAL_CONFIG: &str = r#"
store:
  url: "http://localhost:8000"
embedding:
  api_url: "http://localhost:8001/v1/embeddings"
  model_name: "text-embedding-3-small"
  api_key: "${HRQA_TEST_EMBEDDING_KEY}"
providers:
  deepseek:
    provider: "local"
    api_url: "http://localhost:8002/chat/completions"
    api_key: "${HRQA_TEST_DEEPSEEK_KEY}"
    model_name: "deepseek-chat"
answer:
  providers: ["deepseek"]
web_search:
  provider: "deepseek"
"#;

/// Clears every variable these tests set, so each starts from a clean slate.
fn clear_env_vars() {
    env::remove_var("HRQA_TEST_EMBEDDING_KEY");
    env::remove_var("HRQA_TEST_DEEPSEEK_KEY");
    env::remove_var("HRQA_RETRIEVAL__SCOPED_MIN_SCORE");
    env::remove_var("HRQA_TIMEOUTS__STORE_SECS");
    env::remove_var("HRQA_RETRIEVAL__TOP_K");
    env::remove_var("PORT");
}

fn write_config(content: &str) -> (TempDir, String) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yml");
    fs::write(&path, content).unwrap();
    let path = path.to_str().unwrap().to_string();
    (dir, path)
}

#[test]
#[serial]
fn test_placeholders_are_substituted_from_environment() {
    clear_env_vars();
    env::set_var("HRQA_TEST_EMBEDDING_KEY", "sk-embed");
    env::set_var("HRQA_TEST_DEEPSEEK_KEY", "sk-deepseek");
    let (_dir, path) = write_config(MINIMAL_CONFIG);

    let config = get_config(Some(&path)).expect("Configuration should load successfully");

    assert_eq!(config.embedding.api_key.as_deref(), Some("sk-embed"));
    let deepseek = &config.providers["deepseek"];
    assert_eq!(deepseek.configured_key(), Some("sk-deepseek"));
    assert_eq!(deepseek.max_tokens, 2000);

    clear_env_vars();
}

#[test]
#[serial]
fn test_unset_placeholder_disables_provider() {
    clear_env_vars();
    let (_dir, path) = write_config(MINIMAL_CONFIG);

    let config = get_config(Some(&path)).unwrap();

    assert_eq!(config.providers["deepseek"].api_key.as_deref(), Some(""));
    assert_eq!(config.providers["deepseek"].configured_key(), None);
}

#[test]
#[serial]
fn test_defaults_fill_omitted_sections() {
    clear_env_vars();
    let (_dir, path) = write_config(MINIMAL_CONFIG);

    let config = get_config(Some(&path)).unwrap();

    assert_eq!(config.port, 5002);
    assert_eq!(config.store.collection, "country_employment_guides");
    assert_eq!(config.retrieval, RetrievalConfig::default());
    assert_eq!(config.timeouts.store(), Duration::from_secs(10));
    assert_eq!(config.timeouts.generation(), Duration::from_secs(60));
    assert!(config.answer.user_prompt.contains("{context}"));
    assert!(config.answer.user_prompt.contains("{question}"));
    assert!(config.web_search.user_prompt.contains("{question}"));
}

#[test]
#[serial]
fn test_prefixed_environment_overrides_nested_keys() {
    clear_env_vars();
    env::set_var("HRQA_RETRIEVAL__SCOPED_MIN_SCORE", "20");
    env::set_var("HRQA_TIMEOUTS__STORE_SECS", "3");
    env::set_var("PORT", "9999");
    let (_dir, path) = write_config(MINIMAL_CONFIG);

    let config = get_config(Some(&path)).unwrap();

    assert_eq!(config.retrieval.scoped_min_score, 20);
    assert_eq!(config.retrieval.top_k, 3);
    assert_eq!(config.timeouts.store(), Duration::from_secs(3));
    assert_eq!(config.port, 9999);

    clear_env_vars();
}

#[test]
#[serial]
fn test_missing_config_file_is_not_found() {
    clear_env_vars();
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.yml");

    let err = get_config(path.to_str()).unwrap_err();

    assert!(matches!(err, ConfigError::NotFound(_)), "got {err}");
}

#[test]
#[serial]
fn test_bundled_default_config_loads() {
    clear_env_vars();
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.default.yml");

    let config = get_config(Some(path)).unwrap();

    assert_eq!(config.answer.providers, vec!["deepseek", "openai", "claude"]);
    assert_eq!(config.web_search.provider.as_deref(), Some("deepseek"));
    assert_eq!(config.providers["claude"].provider, "anthropic");
}

#[test]
#[serial]
fn test_zero_top_k_is_rejected() {
    clear_env_vars();
    env::set_var("HRQA_RETRIEVAL__TOP_K", "0");
    let (_dir, path) = write_config(MINIMAL_CONFIG);

    let err = get_config(Some(&path)).unwrap_err();

    assert!(
        matches!(&err, ConfigError::General(msg) if msg.contains("top_k")),
        "got {err}"
    );

    clear_env_vars();
}

#[test]
#[serial]
fn test_debug_output_hides_api_keys() {
    clear_env_vars();
    env::set_var("HRQA_TEST_EMBEDDING_KEY", "sk-embed-secret");
    env::set_var("HRQA_TEST_DEEPSEEK_KEY", "sk-deepseek-secret");
    let (_dir, path) = write_config(MINIMAL_CONFIG);

    let config = get_config(Some(&path)).unwrap();
    let rendered = format!("{config:?}");

    assert!(!rendered.contains("sk-embed-secret"), "{rendered}");
    assert!(!rendered.contains("sk-deepseek-secret"), "{rendered}");
    assert!(rendered.contains("<redacted>"));
    assert!(rendered.contains("deepseek-chat"));

    clear_env_vars();
}
