use super::*;

#[test]
fn test_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.skill.name, "Hello World");
    assert_eq!(cfg.skill.default_language, "en");
    assert_eq!(cfg.skill.skill_id, None);
    assert_eq!(cfg.skill.locales_dir, None);
    assert_eq!(cfg.skill.log_level, "info");
    assert_eq!(cfg.api.host, "127.0.0.1");
    assert_eq!(cfg.api.port, 3000);
    assert!(cfg.api.api_key.is_empty());
}

#[test]
fn test_empty_toml_uses_defaults() {
    let cfg: Config = toml::from_str("").unwrap();
    assert_eq!(cfg.skill.default_language, "en");
    assert_eq!(cfg.api.port, 3000);
}

#[test]
fn test_partial_toml() {
    let toml_str = r#"
        [skill]
        skill_id = "amzn1.ask.skill.123"
        default_language = "es"

        [api]
        port = 8443
    "#;
    let cfg: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(cfg.skill.skill_id.as_deref(), Some("amzn1.ask.skill.123"));
    assert_eq!(cfg.skill.default_language, "es");
    assert_eq!(cfg.skill.name, "Hello World");
    assert_eq!(cfg.api.port, 8443);
    assert_eq!(cfg.api.host, "127.0.0.1");
}

#[test]
fn test_load_missing_file_returns_defaults() {
    let cfg = load("/nonexistent/__hello_skill_config__.toml").unwrap();
    assert_eq!(cfg.api.port, 3000);
}

#[test]
fn test_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[skill]\nlocales_dir = \"/srv/locales\"\n").unwrap();
    let cfg = load(path.to_str().unwrap()).unwrap();
    assert_eq!(cfg.skill.locales_dir.as_deref(), Some("/srv/locales"));
}

#[test]
fn test_load_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[skill\nname = ").unwrap();
    let err = load(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, SkillError::Config(_)));
}

#[test]
fn test_shellexpand() {
    assert_eq!(shellexpand("/abs/path"), "/abs/path");
    if let Some(home) = std::env::var_os("HOME") {
        assert_eq!(
            shellexpand("~/locales"),
            format!("{}/locales", home.to_string_lossy())
        );
    }
}

/// Collects formatted log output in memory.
#[derive(Clone, Default)]
struct LogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_load_missing_file_logs_fallback() {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .finish();

    let cfg = tracing::subscriber::with_default(subscriber, || {
        load("/nonexistent/hello-skill/config.toml").unwrap()
    });

    assert_eq!(cfg.skill.log_level, "info");
    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("Config file not found at /nonexistent/hello-skill/config.toml"));
    assert!(output.contains("using defaults"));
}
