use log::{info, warn};
use prism::{prelude::*, start_logger, LevelFilter, LoggerConfig};
use prism_test::RecordingEffect;

#[test]
fn logger_writes_file_and_bind_warnings_pass_through() {
    let path = std::env::temp_dir().join(format!("prism_logger_{}.log", std::process::id()));
    start_logger(LoggerConfig {
        use_colors: false,
        level_filter: LevelFilter::Info,
        log_file: Some(path.clone()),
    });

    info!("starting material test");
    let mut effect = RecordingEffect::new("unlit", &[]);
    let mut param = MaterialParameter::new("lightColor");
    param.set_float(1.0);
    param.bind(&mut effect).unwrap();
    warn!("done");
    log::logger().flush();

    let contents = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(contents.contains("[INFO]"));
    assert!(contents.contains("lightColor"));
    assert!(contents.contains("[WARN]"));
}

#[test]
fn default_config_is_loadable() {
    let config = LoggerConfig::load_str("()").unwrap();
    assert_eq!(LoggerConfig::default(), config);
}
