use dartgust::config::Config;
use dartgust::export::{self, COLUMNS};
use dartgust::geometry::Arena;
use dartgust::session::ParticipantId;
use dartgust::sim::{self, ThrowerProfile};
use regex::Regex;
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

fn simulated_session(id: &str) -> dartgust::session::Session {
    sim::run_session(
        &Config::default(),
        Arc::new(Arena::standard()),
        ParticipantId::parse(id),
        ThrowerProfile::default(),
        Some(11),
    )
    .unwrap()
}

#[test]
fn test_filename_format() {
    let name = export::csv_filename(&ParticipantId::parse("42"), 1_700_000_000_123);
    assert_eq!(name, "dart_pilot_042_1700000000123.csv");

    let re = Regex::new(r"^dart_pilot_\d{3}_\d+\.csv$").unwrap();
    assert!(re.is_match(&export::csv_filename(&ParticipantId::anonymous(), 0)));
}

#[test]
fn test_empty_export_still_has_header() {
    let mut buf = Vec::new();
    export::write_csv(&[], &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(text.trim_end(), COLUMNS.join(","));
}

#[test]
fn test_rows_follow_header() {
    let session = simulated_session("7");
    let mut buf = Vec::new();
    export::write_csv(session.results(), &mut buf).unwrap();

    let mut reader = csv::Reader::from_reader(buf.as_slice());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), COLUMNS.to_vec());

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), session.results().len());

    let idx = |name: &str| COLUMNS.iter().position(|c| *c == name).unwrap();
    for (row, result) in rows.iter().zip(session.results()) {
        assert_eq!(row.len(), COLUMNS.len());
        assert_eq!(&row[idx("participant_id")], "007");
        assert_eq!(&row[idx("is_gust_trial")], result.is_gust_trial.to_string());
        assert_eq!(&row[idx("score_total")], result.score_total.to_string());
        if result.bonus_zone_hit.is_none() {
            assert_eq!(&row[idx("bonus_zone_hit")], "");
        }
    }
}

#[test]
fn test_write_file_into_directory() {
    let dir = tempdir().unwrap();
    let session = simulated_session("123");
    let path = export::write_csv_file(dir.path(), &session, 1234).unwrap();

    assert_eq!(path.file_name().unwrap(), "dart_pilot_123_1234.csv");
    let text = fs::read_to_string(&path).unwrap();
    // Header plus one line per trial
    assert_eq!(text.lines().count(), 1 + session.results().len());
}
