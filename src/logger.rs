//! Default terminal logger.

use std::{env, io, path::PathBuf, str::FromStr};

use log::debug;
pub use log::LevelFilter;
use serde::{Deserialize, Serialize};

/// Logger configuration object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Whether to use color output when logging to the terminal or not.
    pub use_colors: bool,
    /// Sets the overarching level filter for the logger.
    pub level_filter: LevelFilter,
    /// If set, records are also appended to this file.
    pub log_file: Option<PathBuf>,
}

impl Default for LoggerConfig {
    fn default() -> LoggerConfig {
        LoggerConfig {
            use_colors: true,
            level_filter: LevelFilter::Info,
            log_file: None,
        }
        .with_env_overrides()
    }
}

impl LoggerConfig {
    /// Apply `PRISM_LOG_DISABLE_COLORS` and `PRISM_LOG_LEVEL_FILTER` on top of this config.
    pub fn with_env_overrides(mut self) -> Self {
        if env::var("PRISM_LOG_DISABLE_COLORS").is_ok() {
            self.use_colors = false;
        }
        if let Ok(lf) = env::var("PRISM_LOG_LEVEL_FILTER") {
            if let Ok(level_filter) = LevelFilter::from_str(&lf) {
                self.level_filter = level_filter;
            }
        }
        self
    }
}

/// Starts a basic logger outputting to stdout with color on supported platforms.
///
/// If you do not intend on using the logger builtin to Prism, it's highly recommended you
/// initialise your own.
pub fn start_logger(config: LoggerConfig) {
    let color_config = fern::colors::ColoredLevelConfig::new();
    let use_colors = config.use_colors;

    let mut dispatch = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{color}[{level}][{target}] {message}{color_reset}",
                color = if use_colors {
                    format!(
                        "\x1B[{}m",
                        color_config.get_color(&record.level()).to_fg_str()
                    )
                } else {
                    String::from("")
                },
                level = record.level(),
                target = record.target(),
                message = message,
                color_reset = if use_colors { "\x1B[0m" } else { "" }
            ))
        })
        .level(config.level_filter)
        .chain(io::stdout());

    if let Some(path) = &config.log_file {
        match fern::log_file(path) {
            Ok(file) => dispatch = dispatch.chain(file),
            Err(e) => eprintln!("Unable to open log file '{}': {}", path.display(), e),
        }
    }

    dispatch.apply().unwrap_or_else(|_| {
        debug!("Global logger already set, default Prism logger will not be used")
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_config::Config;

    #[test]
    fn config_from_ron() {
        let config = LoggerConfig::load_str(
            r#"(
                use_colors: false,
                level_filter: Warn,
            )"#,
        )
        .expect("valid logger config");

        assert!(!config.use_colors);
        assert_eq!(LevelFilter::Warn, config.level_filter);
        assert_eq!(None, config.log_file);
    }
}
