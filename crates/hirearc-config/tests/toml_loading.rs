//! Integration tests for layered TOML + env configuration loading.
//!
//! Uses `figment::Jail` for safe, sandboxed env var and cwd manipulation.

use figment::Jail;
use hirearc_config::HireConfig;

#[test]
fn loads_queue_config_from_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "hirearc.toml",
            r#"
[queue]
min_workers = 4
max_workers = 80
job_max_retries = 5
"#,
        )?;

        let config = HireConfig::load_from_project_and_env().expect("config loads");
        assert_eq!(config.queue.min_workers, 4);
        assert_eq!(config.queue.max_workers, 80);
        assert_eq!(config.queue.job_max_retries, 5);
        // Fields not present in the file keep their defaults.
        assert_eq!(config.queue.queue_high_watermark, 1000);
        Ok(())
    });
}

#[test]
fn loads_full_config_from_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "hirearc.toml",
            r#"
[resources]
memory_limit_mb = 8192
cpu_limit_percent = 75.0

[matching]
skill_report_threshold = 0.6
"#,
        )?;

        let config = HireConfig::load_from_project_and_env().expect("config loads");
        assert_eq!(config.resources.memory_limit_mb, 8192);
        assert!((config.matching.skill_report_threshold - 0.6).abs() < f64::EPSILON);
        Ok(())
    });
}

#[test]
fn env_var_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.set_env("HIRE_QUEUE__MIN_WORKERS", "9");

        jail.create_file(
            "hirearc.toml",
            r#"
[queue]
min_workers = 4
max_workers = 80
"#,
        )?;

        let config = HireConfig::load_from_project_and_env().expect("config loads");
        // Env should win over TOML.
        assert_eq!(config.queue.min_workers, 9);
        // TOML value not overridden by env should remain.
        assert_eq!(config.queue.max_workers, 80);
        Ok(())
    });
}

#[test]
fn env_var_overrides_default_with_no_project_file() {
    Jail::expect_with(|jail| {
        jail.set_env("HIRE_RESOURCES__MAX_GLOBAL_CONCURRENT", "500");

        let config = HireConfig::load_from_project_and_env().expect("config loads");
        assert_eq!(config.resources.max_global_concurrent, 500);
        Ok(())
    });
}
