use std::env;
use std::path::PathBuf;
use dotenvy::dotenv;
#[derive(Clone, Debug)]
pub struct Config {
    /// directory holding the JSON fixtures
    pub data_dir: PathBuf,
    /// client-local storage (session flag, notifications)
    pub storage_dir: PathBuf,

    // Logging
    pub log_dir: PathBuf,
    pub log_file: String,
    pub log_level: tracing::Level,

    // Login stub
    pub portal_username: String,
    pub portal_password: String,
    pub display_name: String,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            data_dir: var_or("DATA_DIR", "data").into(),
            storage_dir: var_or("STORAGE_DIR", ".portal").into(),

            log_dir: var_or("LOG_DIR", "logs").into(),
            log_file: var_or("LOG_FILE", "portal.log"),
            log_level: var_or("LOG_LEVEL", "debug")
                .parse()
                .unwrap_or(tracing::Level::DEBUG),

            portal_username: var_or("PORTAL_USERNAME", "admin"),
            portal_password: var_or("PORTAL_PASSWORD", "password"),
            display_name: var_or("PORTAL_DISPLAY_NAME", "Employee"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: "data".into(),
            storage_dir: ".portal".into(),
            log_dir: "logs".into(),
            log_file: "portal.log".to_string(),
            log_level: tracing::Level::DEBUG,
            portal_username: "admin".to_string(),
            portal_password: "password".to_string(),
            display_name: "Employee".to_string(),
        }
    }
}
