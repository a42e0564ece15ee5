use std::io::Write;

use clap::Parser;
use track_cli::{build_config, run, Args};
use track_engine::{EngineError, SamplingStrategy};

fn args(extra: &[&str]) -> Args {
    let mut argv = vec!["hotspot-track"];
    argv.extend_from_slice(extra);
    Args::try_parse_from(argv).unwrap()
}

#[test]
fn parses_negative_step_and_flags() {
    let a = args(&["--dt-years", "-250000", "--steps", "8", "--no-crustal", "--slab"]);
    assert_eq!(a.dt_years, Some(-250_000.0));
    assert_eq!(a.steps, Some(8));
    assert!(a.no_crustal);
    assert!(a.slab);
    assert!(!a.historical_scaling);
}

#[test]
fn overrides_apply_on_top_of_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("track.toml");
    std::fs::write(&path, "apply_crustal_velocity = false\n[run]\nsteps = 4\n").unwrap();
    let path = path.to_str().unwrap();

    let cfg = build_config(&args(&["--config", path])).unwrap();
    assert_eq!(cfg.run.steps, 4);
    assert!(!cfg.apply_crustal_velocity);

    let cfg = build_config(&args(&[
        "--config",
        path,
        "--steps",
        "9",
        "--strategy",
        "linear",
        "--historical-scaling",
    ]))
    .unwrap();
    assert_eq!(cfg.run.steps, 9);
    assert_eq!(cfg.sampling.strategy, SamplingStrategy::LinearInterpolation);
    assert!(cfg.apply_historical_scaling);
}

#[test]
fn rejects_bad_input() {
    // crustal velocity is on by default and needs a table
    assert!(matches!(build_config(&args(&[])), Err(EngineError::Config(_))));
    assert!(matches!(
        build_config(&args(&["--no-crustal", "--strategy", "cubic"])),
        Err(EngineError::Config(_))
    ));
    assert!(matches!(
        build_config(&args(&["--no-crustal", "--dt-years", "0"])),
        Err(EngineError::Config(_))
    ));
    assert!(matches!(
        build_config(&args(&["--config", "/no/such/track.toml"])),
        Err(EngineError::Io(_))
    ));
}

#[test]
fn rigid_run_writes_csv() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("track.csv");
    let a = args(&["--no-crustal", "--steps", "3", "--slab", "--out", out.to_str().unwrap()]);
    let summary = run(&a).unwrap();
    assert!(summary.completed());
    assert_eq!(summary.records.len(), 3);
    let text = std::fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().count(), 4);
    assert!(text.lines().next().unwrap().ends_with("occluded"));
}

#[test]
fn run_with_observation_table() {
    let mut table = tempfile::NamedTempFile::new().unwrap();
    writeln!(table, "// lon lat ve vn").unwrap();
    for i in 0..5 {
        for j in 0..5 {
            let lon = 248.0 + 0.5 * i as f64;
            let lat = 43.5 + 0.5 * j as f64;
            writeln!(table, "{lon:.2} {lat:.2} 2.0 1.0").unwrap();
        }
    }
    let a = args(&[
        "--observations",
        table.path().to_str().unwrap(),
        "--steps",
        "2",
        "--dt-years",
        "100000",
    ]);
    let summary = run(&a).unwrap();
    assert!(summary.completed());
    let r = summary.records[0];
    assert!(r.sample.is_some());
    assert!((r.crustal_velocity.east - -0.002).abs() < 1e-15);
}
