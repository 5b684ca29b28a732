use serde::Deserialize;

/// Where and how verbosely diagnostics are logged
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_to_file: bool,
    #[serde(default = "default_log_file_path")]
    pub log_file_path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_to_file: false,
            log_file_path: default_log_file_path(),
        }
    }
}

/// Default log level; keeps skipped-record warnings visible
fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_file_path() -> String {
    "acr-dump.log".to_string()
}
