use runscope::{LogTarget, LoggingConfig, default_log_file};

#[test]
fn default_log_file_lives_under_runscope_dir() {
    let path = default_log_file();
    assert!(path.ends_with("runscope/runscope.log"));
}

#[test]
fn verbose_forces_debug_level() {
    let config = LoggingConfig::new(true);
    assert_eq!(config.log_level, "debug");
    assert!(config.force_level);
    assert_eq!(config.target, LogTarget::Stderr);

    let quiet = LoggingConfig::default();
    assert_eq!(quiet.log_level, "info");
    assert!(!quiet.force_level);
}

#[test]
fn builder_sets_target_and_format() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("logs").join("runscope.log");
    let config = LoggingConfig::new(false)
        .with_target(LogTarget::File(file.clone()))
        .with_json_logs(true);

    assert_eq!(config.target, LogTarget::File(file));
    assert!(config.json_logs);
}
