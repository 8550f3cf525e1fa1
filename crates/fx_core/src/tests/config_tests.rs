use super::*;

use std::collections::HashMap;

#[test]
fn defaults_are_valid() {
    let settings = Settings::default();
    settings.validate().expect("defaults validate");
    assert_eq!(settings.theme_storage_key, "theme");
    assert_eq!(settings.default_theme, Theme::Dark);
    assert_eq!(settings.particle_count, 50);
    assert_eq!(settings.typing_phrases.len(), 4);
    assert_eq!(settings.preload_urls.len(), 2);
}

#[test]
fn toml_overrides_only_named_fields() {
    let settings = Settings::from_toml_str(
        r#"
        particle_count = 12
        typing_phrases = ["Rustacean"]
        "#,
    )
    .expect("parse");

    assert_eq!(settings.particle_count, 12);
    assert_eq!(settings.typing_phrases, vec!["Rustacean".to_string()]);
    assert_eq!(settings.counter_steps, 50);
    assert_eq!(settings.submit_delay(), Duration::from_millis(2000));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = Settings::from_toml_str("particle_count = \"many\"").expect_err("bad type");
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn validation_rejects_empty_phrases() {
    let mut settings = Settings::default();
    settings.typing_phrases.clear();
    assert!(matches!(
        settings.validate(),
        Err(ConfigError::EmptyPhraseList)
    ));

    settings.typing_phrases = vec!["ok".into(), String::new()];
    assert!(matches!(
        settings.validate(),
        Err(ConfigError::EmptyPhrase { index: 1 })
    ));
}

#[test]
fn validation_rejects_zero_steps_ticks_and_bad_thresholds() {
    let settings = Settings {
        counter_steps: 0,
        ..Settings::default()
    };
    assert!(matches!(settings.validate(), Err(ConfigError::ZeroCounterSteps)));

    let settings = Settings {
        counter_tick_ms: 0,
        ..Settings::default()
    };
    assert!(matches!(
        settings.validate(),
        Err(ConfigError::ZeroDuration {
            name: "counter_tick_ms"
        })
    ));

    let settings = Settings {
        counter_threshold: 1.5,
        ..Settings::default()
    };
    let err: FxError = settings.validate().expect_err("threshold").into();
    assert!(err.to_string().contains("counter_threshold"));
}

#[test]
fn env_overrides_apply_on_top_of_file_values() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("APP__THEME_STORAGE_KEY", "portfolio-theme"),
        ("APP__DEFAULT_THEME", "light"),
        ("APP__PARTICLE_COUNT", "7"),
        ("APP__TYPING_PHRASES", "Writer, ,Speaker"),
    ]);
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, |name| env.get(name).map(|v| v.to_string()));

    assert_eq!(settings.theme_storage_key, "portfolio-theme");
    assert_eq!(settings.default_theme, Theme::Light);
    assert_eq!(settings.particle_count, 7);
    assert_eq!(
        settings.typing_phrases,
        vec!["Writer".to_string(), "Speaker".to_string()]
    );
}

#[test]
fn unparsable_env_values_are_ignored() {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, |name| match name {
        "APP__DEFAULT_THEME" => Some("sepia".into()),
        "APP__PARTICLE_COUNT" => Some("lots".into()),
        _ => None,
    });
    assert_eq!(settings.default_theme, Theme::Dark);
    assert_eq!(settings.particle_count, 50);
}

#[test]
fn load_settings_reads_file_and_skips_missing_one() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let path = temp_root.path().join("portfolio.toml");
    fs::write(&path, "counter_steps = 10\n").expect("write");

    let loaded = load_settings(&path);
    assert_eq!(loaded.counter_steps, 10);

    let missing = load_settings(&temp_root.path().join("absent.toml"));
    assert_eq!(missing.counter_steps, 50);
}

#[test]
fn load_settings_falls_back_to_defaults_on_malformed_file() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let path = temp_root.path().join("portfolio.toml");
    fs::write(&path, "counter_steps = [").expect("write");

    assert_eq!(load_settings(&path).counter_steps, 50);
}
