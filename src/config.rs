use std::{env, path::PathBuf, str::FromStr};

use dotenvy::dotenv;
use tracing::warn;

use crate::model::attendance::{ABSENT, PRESENT};

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,

    // Storage
    pub data_dir: PathBuf,
    pub storage_key: String,

    // Form
    pub employee_directory: Option<PathBuf>,
    pub status_options: Vec<String>,
    pub date_format: String,

    pub export_title: String,
    pub rate_api_per_min: u32,
    pub log_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:8080".to_string(),
            api_prefix: "/api".to_string(),
            data_dir: PathBuf::from("data"),
            storage_key: "attendanceRecords".to_string(),
            employee_directory: None,
            status_options: vec![PRESENT.to_string(), ABSENT.to_string()],
            date_format: "%-m/%-d/%Y".to_string(),
            export_title: "Employee Attendance Records".to_string(),
            rate_api_per_min: 1000,
            log_dir: "logs".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();
        let defaults = Self::default();

        Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or(defaults.server_addr),
            api_prefix: env::var("API_PREFIX").unwrap_or(defaults.api_prefix),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            storage_key: env::var("STORAGE_KEY").unwrap_or(defaults.storage_key),
            employee_directory: env::var("EMPLOYEE_DIRECTORY").ok().map(PathBuf::from),
            status_options: env::var("STATUS_OPTIONS")
                .map(|raw| parse_status_options(&raw))
                .unwrap_or(defaults.status_options),
            date_format: env::var("DATE_FORMAT").unwrap_or(defaults.date_format),
            export_title: env::var("EXPORT_TITLE").unwrap_or(defaults.export_title),
            rate_api_per_min: parse_or("RATE_API_PER_MIN", defaults.rate_api_per_min),
            log_dir: env::var("LOG_DIR").unwrap_or(defaults.log_dir),
        }
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, %default, "Invalid number, using default");
            default
        }),
        Err(_) => default,
    }
}

/// Comma separated list; `Present` and `Absent` are always offered.
fn parse_status_options(raw: &str) -> Vec<String> {
    let mut options: Vec<String> = Vec::new();
    for opt in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !options.iter().any(|o| o == opt) {
            options.push(opt.to_string());
        }
    }
    for required in [PRESENT, ABSENT] {
        if !options.iter().any(|o| o == required) {
            options.push(required.to_string());
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn status_options_always_include_present_and_absent() {
        assert_eq!(
            parse_status_options("Half Day, Leave,,Leave"),
            vec!["Half Day", "Leave", "Present", "Absent"]
        );
        assert_eq!(parse_status_options("Absent,Present"), vec!["Absent", "Present"]);
    }

    #[test]
    #[serial]
    fn reads_overrides_from_env() {
        unsafe {
            env::set_var("STORAGE_KEY", "records_test");
            env::set_var("RATE_API_PER_MIN", "42");
            env::set_var("STATUS_OPTIONS", "Present,Absent,Remote");
        }

        let config = Config::from_env();

        unsafe {
            env::remove_var("STORAGE_KEY");
            env::remove_var("RATE_API_PER_MIN");
            env::remove_var("STATUS_OPTIONS");
        }
        assert_eq!(config.storage_key, "records_test");
        assert_eq!(config.rate_api_per_min, 42);
        assert_eq!(config.status_options, vec!["Present", "Absent", "Remote"]);
    }

    #[test]
    #[serial]
    fn bad_numbers_fall_back() {
        unsafe { env::set_var("RATE_API_PER_MIN", "lots") };
        let config = Config::from_env();
        unsafe { env::remove_var("RATE_API_PER_MIN") };

        assert_eq!(config.rate_api_per_min, 1000);
    }
}
