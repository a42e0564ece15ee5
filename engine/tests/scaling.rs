use track_engine::{
    config::ScalingConfig,
    units::{myr, years, Myr},
    EngineError, RateScalingCurve,
};

#[test]
fn present_and_future_are_unscaled() {
    let c = RateScalingCurve::new(Myr(5.0), vec![1.0, 2.0, 4.0]).unwrap();
    assert_eq!(c.scaling_factor(years(0.0)), 1.0);
    assert_eq!(c.scaling_factor(years(-3.0e6)), 1.0);
    assert_eq!(c.scaling_factor(years(0.0)), c.factors()[0]);
}

#[test]
fn interpolates_between_bins() {
    let c = RateScalingCurve::new(Myr(5.0), vec![1.0, 2.0, 4.0]).unwrap();
    let at = |m: f64| c.scaling_factor(myr(m).into());
    assert!((at(2.5) - 1.5).abs() < 1e-12);
    assert!((at(5.0) - 2.0).abs() < 1e-12);
    assert!((at(7.5) - 3.0).abs() < 1e-12);
    // monotone for a monotone table
    let mut prev = 1.0;
    for k in 1..=30 {
        let f = at(k as f64 * 0.5);
        assert!(f >= prev, "non-monotone at {k}");
        prev = f;
    }
}

#[test]
fn saturates_past_last_bin() {
    let c = RateScalingCurve::new(Myr(5.0), vec![1.0, 2.0, 4.0]).unwrap();
    assert_eq!(c.scaling_factor(myr(10.0).into()), 4.0);
    assert_eq!(c.scaling_factor(myr(17.3).into()), 4.0);
    assert_eq!(c.scaling_factor(myr(1.0e4).into()), 4.0);
}

#[test]
fn single_entry_table_is_flat() {
    let c = RateScalingCurve::new(Myr(5.0), vec![1.0]).unwrap();
    assert_eq!(c.scaling_factor(myr(12.0).into()), 1.0);
}

#[test]
fn rejects_bad_tables() {
    let bad = [
        RateScalingCurve::new(Myr(5.0), vec![]),
        RateScalingCurve::new(Myr(5.0), vec![1.1, 2.0]),
        RateScalingCurve::new(Myr(0.0), vec![1.0, 2.0]),
        RateScalingCurve::new(Myr(-5.0), vec![1.0, 2.0]),
        RateScalingCurve::new(Myr(5.0), vec![1.0, f64::NAN]),
    ];
    for r in bad {
        assert!(matches!(r, Err(EngineError::Config(_))));
    }
}

#[test]
fn default_matches_config_defaults() {
    let from_cfg = RateScalingCurve::from_config(&ScalingConfig::default()).unwrap();
    assert_eq!(from_cfg, RateScalingCurve::default());
    assert_eq!(from_cfg.factors()[0], 1.0);
}
