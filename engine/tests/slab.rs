use track_engine::{slab::SlabParams, units::years};

#[test]
fn edge_sits_at_trench_before_subduction() {
    let s = SlabParams::default();
    assert_eq!(s.leading_edge_longitude(years(-50.0e6)), -125.0);
    assert_eq!(s.leading_edge_longitude(years(-45.0e6)), -125.0);
}

#[test]
fn edge_advances_then_saturates() {
    let s = SlabParams::default();
    // 10 Myr of 28 mm/yr down a 45° slab: ~198 km east at 42°N
    let e = s.leading_edge_longitude(years(-35.0e6));
    assert!((e - (-125.0 + 2.396)).abs() < 1e-2, "edge = {e}");

    let mut prev = f64::NEG_INFINITY;
    for k in 0..=50 {
        let date = -45.0e6 + k as f64 * 1.0e6;
        let edge = s.leading_edge_longitude(years(date));
        assert!(edge >= prev, "edge retreated at {date}");
        prev = edge;
    }
    // 500 km max depth at 45° is 500 km east, ~6.05° at 42°N
    let sat = s.leading_edge_longitude(years(0.0));
    assert!((sat - (-125.0 + 6.051)).abs() < 1e-2, "saturated edge = {sat}");
    assert_eq!(sat, s.leading_edge_longitude(years(-10.0e6)));
}

#[test]
fn occlusion_follows_edge() {
    let s = SlabParams::default();
    assert!(s.occludes(years(0.0), -120.0));
    assert!(!s.occludes(years(0.0), -110.67));
    assert!(!s.occludes(years(-44.0e6), -124.0));
}

#[test]
fn validation() {
    assert!(SlabParams::default().validate().is_ok());
    let flat = SlabParams { dip_deg: 0.0, ..SlabParams::default() };
    assert!(flat.validate().is_err());
    let shallow = SlabParams { max_depth_m: -1.0, ..SlabParams::default() };
    assert!(shallow.validate().is_err());
    let polar = SlabParams { tracking_latitude: 90.0, ..SlabParams::default() };
    assert!(polar.validate().is_err());
}

#[test]
fn saturated_extent_is_depth_over_tan_dip() {
    let steep = SlabParams { dip_deg: 60.0, ..SlabParams::default() };
    let expected = 500.0e3 / 60f64.to_radians().tan();
    assert!((steep.max_east_extent_m() - expected).abs() < 1e-6);
    // steeper slabs reach maximum depth closer to the trench
    assert!(steep.max_east_extent_m() < SlabParams::default().max_east_extent_m());
    assert!((SlabParams::default().max_east_extent_m() - 500.0e3).abs() < 1e-6);
}
