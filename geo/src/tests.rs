#[cfg(test)]
mod tests {
    use crate::math::*;
    use rand::{Rng, SeedableRng};

    #[test]
    fn latitude_for_one_km_north() {
        let lat = latitude_from_north_displacement(1000.0);
        assert!((lat - 0.00898).abs() < 0.001, "lat = {lat}");
        assert!((latitude_from_north_displacement(-1000.0) + lat).abs() < 1e-15);
    }

    #[test]
    fn longitude_for_one_km_east_at_45n() {
        let lon = longitude_from_east_displacement(45.0, 1000.0);
        assert!((lon - 0.0127).abs() < 0.001, "lon = {lon}");
    }

    #[test]
    fn clamp_is_total() {
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.25, 0.0, 1.0), 0.25);
        // inverted bounds do not panic
        assert_eq!(clamp(0.5, 1.0, 0.0), 1.0);
    }

    #[test]
    fn longitude_uses_updated_latitude() {
        let start = Location::new(-110.0, 44.0);
        let out = apply_local_displacement(start, 50_000.0, 100_000.0);
        let new_lat = 44.0 + latitude_from_north_displacement(100_000.0);
        let expected = -110.0 + longitude_from_east_displacement(new_lat, 50_000.0);
        assert_eq!(out.latitude, new_lat);
        assert_eq!(out.longitude, expected);
        // using the old latitude would give a measurably different answer
        let stale = -110.0 + longitude_from_east_displacement(44.0, 50_000.0);
        assert!((stale - out.longitude).abs() > 1e-4);
    }

    #[test]
    fn displacement_round_trip_small_error() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let start = Location::new(rng.gen_range(-179.0..179.0), rng.gen_range(-60.0..60.0));
            let e = rng.gen_range(-9_999.0..9_999.0);
            let n = rng.gen_range(-9_999.0..9_999.0);
            let there = apply_local_displacement(start, e, n);
            let back = apply_local_displacement(there, -e, -n);
            let err_lat = (back.latitude - start.latitude).abs();
            let err_lon = (back.longitude - start.longitude).abs();
            assert!(err_lat < 1e-9, "lat err = {err_lat}");
            assert!(err_lon < 1e-3, "lon err = {err_lon} at {start:?}");
        }
    }

    #[test]
    fn local_displacement_between_inverts_apply() {
        let start = Location::new(-118.5, 46.2);
        let moved = apply_local_displacement(start, -12_345.0, 6_789.0);
        let (e, n) = local_displacement_between(start, moved);
        assert!((e + 12_345.0).abs() < 1e-6, "e = {e}");
        assert!((n - 6_789.0).abs() < 1e-6, "n = {n}");
    }

    #[test]
    fn path_length_sums_hops() {
        let a = Location::new(-112.0, 43.0);
        let b = apply_local_displacement(a, 3_000.0, 4_000.0);
        let c = apply_local_displacement(b, 0.0, -1_000.0);
        let len = crate::planar_path_length_m(&[a, b, c]);
        assert!((len - 6_000.0).abs() < 1e-6, "len = {len}");
        assert_eq!(crate::planar_path_length_m(&[a]), 0.0);
    }

    #[test]
    fn range_check() {
        assert!(Location::new(-110.67, 44.43).is_in_range());
        assert!(!Location::new(181.0, 0.0).is_in_range());
        assert!(!Location::new(0.0, -90.5).is_in_range());
    }
}
