//! Hotspot track binary.
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::dbg_macro, clippy::large_enum_variant)]

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotspot_track=info,track_cli=info,track_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = track_cli::Args::parse();

    let summary = match track_cli::run(&args) {
        Ok(s) => s,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let end = summary.path().last().copied().unwrap_or(summary.start);
    info!(
        "[track] steps={} end lon={:.4} lat={:.4} length={:.1} km",
        summary.records.len(),
        end.longitude,
        end.latitude,
        summary.track_length_m() / 1000.0
    );
    if let Some(e) = &summary.halted {
        error!("halted early: {e}");
        std::process::exit(2);
    }
}
