use combat_content::RuntimeConfig;
use combat_runtime::{RuntimeError, logging};

/// The global subscriber can be installed once per process, so both cases
/// live in one test.
#[test]
fn init_writes_log_file_and_refuses_second_install() {
    let dir = tempfile::tempdir().unwrap();
    let log_file = dir.path().join("nested").join("combat.log");
    let config = RuntimeConfig {
        log_filter: "info".to_string(),
        log_file: Some(log_file.clone()),
        ..RuntimeConfig::default()
    };

    let guard = logging::init(&config).expect("first init should succeed");
    tracing::warn!("combat log smoke test");
    drop(guard);

    let written = std::fs::read_to_string(&log_file).expect("log file should exist");
    assert!(written.contains("combat log smoke test"));

    assert!(matches!(
        logging::init(&RuntimeConfig::default()),
        Err(RuntimeError::Logging(_))
    ));
}
