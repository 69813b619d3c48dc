use super::*;

use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_config(contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("gastos_config_test_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("gastos.toml");
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn defaults_to_local_tls_endpoint() {
    let settings = Settings::default();
    assert_eq!(settings.base_url, "https://localhost:7133");
    assert!(!settings.accept_invalid_certs);
}

#[test]
fn missing_file_keeps_defaults() {
    let mut settings = Settings::default();
    apply_file(&mut settings, Path::new("/nonexistent/gastos.toml")).expect("apply");
    assert_eq!(settings, Settings::default());
}

#[test]
fn file_values_override_defaults() {
    let path = temp_config("base_url = \"https://gastos.example\"\naccept_invalid_certs = true\n");
    let mut settings = Settings::default();

    apply_file(&mut settings, &path).expect("apply");

    assert_eq!(settings.base_url, "https://gastos.example");
    assert!(settings.accept_invalid_certs);
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn malformed_file_is_reported() {
    let path = temp_config("base_url = [");
    let mut settings = Settings::default();

    let err = apply_file(&mut settings, &path).expect_err("should fail");
    assert!(err.to_string().contains("failed to parse config file"));
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn app_prefixed_env_wins_over_plain_env() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("GASTOS_API_URL", "https://plain.example"),
        ("APP__BASE_URL", "https://prefixed.example"),
        ("GASTOS_ACCEPT_INVALID_CERTS", "TRUE"),
    ]);
    let mut settings = Settings::default();

    apply_env(&mut settings, |key| env.get(key).map(|v| v.to_string()));

    assert_eq!(settings.base_url, "https://prefixed.example");
    assert!(settings.accept_invalid_certs);
}

#[test]
fn base_url_requires_http_scheme() {
    assert!(parse_base_url("https://localhost:7133").is_ok());
    assert!(parse_base_url("ftp://localhost").is_err());
    assert!(parse_base_url("not a url").is_err());
}
