//! Track writers for archiving simulation output.

use std::io::Write;

use crate::motion::StepRecord;
use crate::slab::SlabParams;
use crate::units::Years;

/// Column header of the track CSV (without the optional slab columns).
pub const TRACK_HEADER: &str = "step,elapsed_years,longitude,latitude,crustal_east,crustal_north,\
rigid_east,rigid_north,combined_east,combined_north,delta_longitude,delta_latitude,scaling";

/// Write one CSV row per step record.
///
/// Format:
/// - Header: [`TRACK_HEADER`], plus `slab_edge_longitude,occluded` when `slab` is given
/// - `longitude`/`latitude` are where the step started; deltas give where it ended
/// - Velocities in m/yr with the motion sense applied
pub fn write_track<W: Write>(
    out: &mut W,
    records: &[StepRecord],
    slab: Option<&SlabParams>,
) -> std::io::Result<()> {
    if slab.is_some() {
        writeln!(out, "{TRACK_HEADER},slab_edge_longitude,occluded")?;
    } else {
        writeln!(out, "{TRACK_HEADER}")?;
    }
    for (i, r) in records.iter().enumerate() {
        write!(
            out,
            "{},{},{:.8},{:.8},{:.6e},{:.6e},{:.6e},{:.6e},{:.6e},{:.6e},{:.8},{:.8},{:.4}",
            i,
            r.state.elapsed_years,
            r.from.longitude,
            r.from.latitude,
            r.crustal_velocity.east,
            r.crustal_velocity.north,
            r.rigid_velocity.east,
            r.rigid_velocity.north,
            r.combined_velocity.east,
            r.combined_velocity.north,
            r.delta_longitude,
            r.delta_latitude,
            r.scaling_factor,
        )?;
        if let Some(s) = slab {
            let date = Years(r.state.elapsed_years);
            let edge = s.leading_edge_longitude(date);
            write!(out, ",{:.6},{}", edge, s.occludes(date, r.state.location.longitude))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write the track CSV to `path`. Errors are bubbled up from the filesystem.
pub fn write_csv_track(
    path: &std::path::Path,
    records: &[StepRecord],
    slab: Option<&SlabParams>,
) -> std::io::Result<()> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_track(&mut file, records, slab)?;
    file.flush()
}
