// Copyright 2025 TimeTune developers
// SPDX-License-Identifier: AGPL-3.0-only

use std::env;

use config::Config;
use params::Params;

pub mod command;
use crate::{config::Config as TimeTuneConfig, error::Error};
mod params;

pub fn build_config(env: bool, file: &str) -> Result<TimeTuneConfig, Error> {
    // Env configuration
    let mut params_env = Params::default();
    if env {
        params_env = Params::from_env()?;
    }

    // file configuration (json, yaml or toml)
    let mut params_file = Params::default();
    if !file.is_empty() {
        let mut config = Config::builder();

        config = config.add_source(config::File::with_name(file));

        let config = config.build().map_err(|e| {
            Error::Config(format!("Error building config: {}", e))
        })?;

        params_file = config.try_deserialize().map_err(|e| {
            Error::Config(format!("Error try deserialize config: {}", e))
        })?;
    }

    // Mix configurations.
    TimeTuneConfig::try_from(params_env.mix_config(params_file))
}

pub fn build_file_path() -> String {
    env::var("TIMETUNE_FILE_PATH").unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serial_test::serial;

    use super::*;
    use crate::config::LoggingRotation;

    fn clear_env() {
        for (key, _) in env::vars() {
            if key.starts_with("TIMETUNE_") {
                unsafe { env::remove_var(key) };
            }
        }
    }

    fn settings_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = build_config(true, "").unwrap();
        assert_eq!(config, TimeTuneConfig::default());
    }

    #[test]
    #[serial]
    fn test_env_config() {
        clear_env();
        unsafe {
            env::set_var("TIMETUNE_ESTIMATOR_MIN_MINUTES", "10");
            env::set_var("TIMETUNE_ESTIMATOR_MAX_MINUTES", "20");
            env::set_var("TIMETUNE_ESTIMATOR_SEED", "99");
            env::set_var("TIMETUNE_LOGGING_OUTPUT", "stdout,file");
            env::set_var("TIMETUNE_LOGGING_ROTATION", "daily");
        }
        let config = build_config(true, "").unwrap();
        clear_env();

        assert_eq!(config.estimator.min_minutes, 10);
        assert_eq!(config.estimator.max_minutes, 20);
        assert_eq!(config.estimator.seed, Some(99));
        assert!(config.logging.output.file);
        assert!(config.logging.output.stdout);
        assert_eq!(config.logging.rotation, LoggingRotation::Daily);

        unsafe { env::set_var("TIMETUNE_ESTIMATOR_MIN_MINUTES", "10") };
        let config = build_config(false, "").unwrap();
        clear_env();
        assert_eq!(config.estimator.min_minutes, 30);
    }

    #[test]
    #[serial]
    fn test_file_overrides_env() {
        clear_env();
        unsafe {
            env::set_var("TIMETUNE_ESTIMATOR_MIN_MINUTES", "10");
            env::set_var("TIMETUNE_ESTIMATOR_MAX_MINUTES", "20");
        }
        let file = settings_file(
            ".toml",
            r#"
[timetune.estimator]
max_minutes = 90

[timetune.logging]
level = "debug"
max_files = 7
"#,
        );
        let config =
            build_config(true, file.path().to_str().unwrap()).unwrap();
        clear_env();

        assert_eq!(config.estimator.min_minutes, 10);
        assert_eq!(config.estimator.max_minutes, 90);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.max_files, 7);
    }

    #[test]
    #[serial]
    fn test_json_file() {
        clear_env();
        let file = settings_file(
            ".json",
            r#"{ "timetune": { "estimator": { "seed": 5 }, "logging": { "output": "file", "rotation": "never" } } }"#,
        );
        let config =
            build_config(false, file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.estimator.seed, Some(5));
        assert!(!config.logging.output.stdout);
        assert!(config.logging.output.file);
        assert_eq!(config.logging.rotation, LoggingRotation::Never);
    }

    #[test]
    #[serial]
    fn test_invalid_config() {
        clear_env();
        assert!(matches!(
            build_config(false, "/nonexistent/timetune-settings.toml"),
            Err(Error::Config(_))
        ));

        let file = settings_file(
            ".yaml",
            "timetune:\n  estimator:\n    min_minutes: 70\n    max_minutes: 60\n",
        );
        assert!(matches!(
            build_config(false, file.path().to_str().unwrap()),
            Err(Error::Config(_))
        ));

        let file = settings_file(
            ".yaml",
            "timetune:\n  logging:\n    rotation: fortnightly\n",
        );
        assert!(build_config(false, file.path().to_str().unwrap()).is_err());
    }
}
