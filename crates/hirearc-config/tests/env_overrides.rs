use figment::Jail;
use hirearc_config::HireConfig;

#[test]
fn defaults_survive_with_no_sources_present() {
    Jail::expect_with(|_jail| {
        let config = HireConfig::load_from_project_and_env().expect("config loads");
        assert_eq!(config, HireConfig::default());
        Ok(())
    });
}

#[test]
fn rate_limit_endpoint_profile_is_overridable_via_env() {
    Jail::expect_with(|jail| {
        jail.set_env(
            "HIRE_RATE_LIMIT__REPUTATION_DECAY_DOWN",
            "0.2",
        );

        let config = HireConfig::load_from_project_and_env().expect("config loads");
        assert!((config.rate_limit.reputation_decay_down - 0.2).abs() < f64::EPSILON);
        // Untouched fields retain their defaults.
        assert!((config.rate_limit.reputation_decay_up - 0.01).abs() < f64::EPSILON);
        Ok(())
    });
}
