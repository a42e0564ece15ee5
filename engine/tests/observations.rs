use std::io::Write;

use track_engine::{
    observations::{normalize_longitude, RegionFilter},
    units::MetersPerYear,
    EngineError, GpsTextSource, ObservationSource,
};

const TABLE: &str = "\
// lon lat Ve Vn Se Sn Ren
// NSHM 2023 western US excerpt
  236.50  44.10   8.20  12.40  0.30  0.31  0.01
  -117.25,45.00,-1.50,2.25
# trailing comment
  247.00  43.50   1.00  -0.50  0.20  0.20  0.00
  garbage line here
  240.0 45.0 1.0
";

#[test]
fn parses_mixed_table() {
    let src = GpsTextSource::new("unused.txt");
    let (samples, skipped) = src.parse(TABLE);
    assert_eq!(samples.len(), 3);
    assert_eq!(skipped, 2);
    let s = samples[0];
    assert!((s.longitude - -123.5).abs() < 1e-12);
    assert_eq!(s.latitude, 44.1);
    // mm/yr to m/yr
    assert!((s.east_rate - 0.0082).abs() < 1e-15);
    assert!((s.north_rate - 0.0124).abs() < 1e-15);
    assert_eq!(samples[1].longitude, -117.25);
    assert!((samples[2].north_rate - -0.0005).abs() < 1e-15);
}

#[test]
fn region_filter_and_rate_unit() {
    let region = RegionFilter { min_lon: -124.0, max_lon: -110.0, min_lat: 41.0, max_lat: 50.0 };
    let src = GpsTextSource::new("unused.txt").with_region(region).with_rate_unit(MetersPerYear(1.0));
    let (samples, _) = src.parse(TABLE);
    assert_eq!(samples.len(), 3);
    let narrow = RegionFilter { min_lon: -120.0, ..region };
    let (kept, _) = GpsTextSource::new("unused.txt").with_region(narrow).parse(TABLE);
    assert_eq!(kept.len(), 2);
    assert_eq!(samples[0].east_rate, 8.2);
}

#[test]
fn fetch_reads_file() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(TABLE.as_bytes()).unwrap();
    let src = GpsTextSource::new(f.path());
    assert_eq!(src.path(), f.path());
    let samples = src.fetch().unwrap();
    assert_eq!(samples.len(), 3);
}

#[test]
fn missing_or_empty_file_is_unavailable() {
    let src = GpsTextSource::new("/definitely/not/here/gps.txt");
    assert!(matches!(src.fetch(), Err(EngineError::DataUnavailable(_))));

    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(b"// header only\n").unwrap();
    let src = GpsTextSource::new(f.path());
    assert!(matches!(src.fetch(), Err(EngineError::DataUnavailable(_))));
}

#[test]
fn longitude_folding() {
    assert_eq!(normalize_longitude(236.0), -124.0);
    assert_eq!(normalize_longitude(-110.0), -110.0);
    assert_eq!(normalize_longitude(180.0), 180.0);
    assert_eq!(normalize_longitude(-190.0), 170.0);
}
