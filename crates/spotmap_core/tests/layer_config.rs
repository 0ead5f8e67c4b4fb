use spotmap_core::{LayerConfig, RadiusBand, RadiusPolicy, TOUCH_SURFACE_ENV};

#[test]
fn partial_config_fills_in_defaults() {
    let config: LayerConfig = serde_json::from_value(serde_json::json!({
        "touch_surface": true
    }))
    .expect("partial config should decode");

    assert!(config.touch_surface);
    assert_eq!(config.radius_policy, RadiusPolicy::default());
    assert_eq!(config.radius_policy.bands().len(), 4);
}

#[test]
fn custom_band_table_decodes_and_drives_radius() {
    let config: LayerConfig = serde_json::from_value(serde_json::json!({
        "radius_policy": [
            { "max_zoom": 4.0, "radius_km": 800.0 },
            { "max_zoom": 11.0, "radius_km": 10.0 }
        ]
    }))
    .expect("sorted table should decode");

    assert!(!config.touch_surface);
    assert_eq!(
        config.radius_policy.bands(),
        &[RadiusBand::new(4.0, 800.0), RadiusBand::new(11.0, 10.0)]
    );
    assert_eq!(config.radius_policy.radius_for_zoom(10.0), 10.0);
    assert_eq!(config.radius_policy.radius_for_zoom(12.0), 0.0);
}

#[test]
fn unsorted_band_table_is_rejected_on_decode() {
    let err = serde_json::from_value::<LayerConfig>(serde_json::json!({
        "radius_policy": [
            { "max_zoom": 7.0, "radius_km": 200.0 },
            { "max_zoom": 3.0, "radius_km": 1000.0 }
        ]
    }))
    .expect_err("unsorted table must fail");

    assert!(err
        .to_string()
        .contains("radius band 1 must have a max_zoom greater than the previous band"));
}

#[test]
fn empty_band_table_is_rejected_on_decode() {
    let err = serde_json::from_value::<LayerConfig>(serde_json::json!({ "radius_policy": [] }))
        .expect_err("empty table must fail");
    assert!(err.to_string().contains("at least one band"));
}

// Only test in this binary that touches the process environment.
#[test]
fn from_env_reads_touch_surface_flag() {
    std::env::set_var(TOUCH_SURFACE_ENV, "yes");
    let config = LayerConfig::from_env().expect("`yes` should parse");
    assert!(config.touch_surface);
    assert_eq!(config.radius_policy, RadiusPolicy::default());

    std::env::set_var(TOUCH_SURFACE_ENV, "0");
    assert!(!LayerConfig::from_env().expect("`0` should parse").touch_surface);

    std::env::set_var(TOUCH_SURFACE_ENV, "sometimes");
    let err = LayerConfig::from_env().expect_err("garbage must fail");
    assert!(err.to_string().contains(TOUCH_SURFACE_ENV));

    std::env::remove_var(TOUCH_SURFACE_ENV);
    assert!(!LayerConfig::from_env().expect("unset uses defaults").touch_surface);
}
