use stat_charts::api::{EditorConfig, square_viewport};
use stat_charts::core::Viewport;
use stat_charts::telemetry;

#[test]
fn default_config_is_valid() {
    let config = EditorConfig::default();
    config.validate().expect("valid");
    assert_eq!(config.chart_size, 650.0);
    assert_eq!(config.radar_padding, 80.0);
    assert_eq!(config.alignment_padding, 60.0);
    assert!(!config.readonly);
}

#[test]
fn config_json_fills_missing_fields() {
    let config = EditorConfig::from_json_str(r#"{ "chart_size": 500, "readonly": true }"#)
        .expect("config");
    assert_eq!(config.chart_size, 500.0);
    assert_eq!(config.mobile_breakpoint, 768.0);
    assert!(config.readonly);
}

#[test]
fn config_rejects_chart_smaller_than_padding() {
    assert!(EditorConfig::from_json_str(r#"{ "chart_size": 100 }"#).is_err());
    assert!(EditorConfig::from_json_str("nope").is_err());
}

#[test]
fn square_viewport_rounds_size() {
    assert_eq!(square_viewport(399.6).expect("viewport"), Viewport::square(400));
    assert!(square_viewport(0.0).is_err());
    assert!(square_viewport(f64::NAN).is_err());
}

#[test]
fn telemetry_init_is_idempotent() {
    let first = telemetry::init_default_tracing();
    let second = telemetry::init_default_tracing();
    assert!(!(first && second));
}
