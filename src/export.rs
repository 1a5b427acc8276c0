use crate::error::DgResult;
use crate::result::TrialResult;
use crate::session::{ParticipantId, Session};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Column order of the exported file. Matches the field order of
/// [`TrialResult`].
pub const COLUMNS: [&str; 20] = [
    "participant_id",
    "is_gust_trial",
    "gust_forced",
    "gust_target_zone",
    "start_x",
    "start_y",
    "release_x",
    "release_y",
    "intended_x",
    "intended_y",
    "landing_x",
    "landing_y",
    "drag_dist",
    "held_ms",
    "strength_est",
    "base_points",
    "bonus_points",
    "bonus_zone_hit",
    "points_earned",
    "score_total",
];

/// Writes a header plus one row per result. The header is written even when
/// there are no results.
pub fn write_csv<W: Write>(results: &[TrialResult], writer: W) -> DgResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(COLUMNS)?;
    for r in results {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn csv_filename(participant: &ParticipantId, unix_ms: u128) -> String {
    format!("dart_pilot_{}_{}.csv", participant, unix_ms)
}

pub fn write_csv_file<P: AsRef<Path>>(
    dir: P,
    session: &Session,
    unix_ms: u128,
) -> DgResult<PathBuf> {
    let path = dir
        .as_ref()
        .join(csv_filename(session.participant(), unix_ms));
    let file = File::create(&path)?;
    write_csv(session.results(), file)?;
    info!("💾 Wrote {} trials to {:?}", session.results().len(), path);
    Ok(path)
}
