//! Loader integration harness.
//!
//! # What this covers
//!
//! - **Input shapes**: JSON array, column-oriented JSON object and JSON Lines
//!   all load to the same listings.
//! - **Fallback order**: whole-document decoding first, JSON Lines second.
//! - **Failures**: unreadable files and text that is neither shape surface as
//!   [`LoadError`] carrying the path and both reasons.
//! - **Table metadata**: source path and load time.
//!
//! # Running
//!
//! ```sh
//! cargo test --test loader_harness
//! ```

mod common;
use common::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use stayboard_core::{error::LoadError, load_path, loader::parse_records, Listing};

fn names(rows: &[Listing]) -> Vec<String> {
    rows.iter()
        .map(|l| l.hotel_name.clone().unwrap_or_default())
        .collect()
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

#[rstest]
#[case::array("hotels.json", DATASET_ARRAY, 5)]
#[case::lines("hotels.jsonl", DATASET_LINES, 2)]
#[case::columns("hotels.json", DATASET_COLUMNS, 2)]
fn every_shape_loads(#[case] file: &str, #[case] contents: &str, #[case] rows: usize) {
    let (_dir, path) = write_dataset(file, contents);
    let table = load_path(&path).expect("dataset loads");
    assert_eq!(table.len(), rows);
    assert_eq!(table.listings()[0].hotel_name.as_deref(), Some("Blue Inn"));
    assert_eq!(table.listings()[0].city.as_deref(), Some("Pune"));
    assert_eq!(table.source(), Some(path.as_path()));
}

#[test]
fn shapes_agree_on_shared_rows() {
    let (_a, lines) = write_dataset("a.jsonl", DATASET_LINES);
    let (_b, columns) = write_dataset("b.json", DATASET_COLUMNS);
    let from_lines = load_path(&lines).expect("lines load");
    let from_columns = load_path(&columns).expect("columns load");
    assert_eq!(from_lines.listings(), from_columns.listings());
}

#[test]
fn array_fixture_values() {
    let (_dir, path) = write_dataset("hotels.json", DATASET_ARRAY);
    let table = load_path(&path).expect("dataset loads");
    let rows = table.listings();

    assert_eq!(
        names(rows),
        vec!["Blue Inn", "Sea View", "Fort Stay", "Hill Top", "Blue Inn"]
    );
    assert_eq!(rows[0].rated_by, Some(1));
    assert_eq!(rows[3].rated_by, Some(1234));
    assert_eq!(rows[4].rated_by, Some(3000));
    assert_eq!(rows[2].rating, None);
    assert_eq!(rows[3].rating, Some(2.8));
    assert_eq!(rows[2].amenities_list, vec!["AC", "TV"]);
    assert!(rows[4].amenities_list.is_empty());
    assert_eq!(rows[3].discount_pct, None);
    assert_eq!(rows[4].extra.get("CHECKIN"), Some(&serde_json::json!("12:00")));
}

#[test]
fn column_index_sorts_numerically() {
    let text = r#"{"NAME": {"10": "K", "2": "B", "1": "A"}}"#;
    let records = parse_records(text).expect("column-oriented");
    let got: Vec<_> = records.iter().map(|r| r["NAME"].clone()).collect();
    assert_eq!(got, vec!["A", "B", "K"]);
}

// ---------------------------------------------------------------------------
// Edge cases
// ---------------------------------------------------------------------------

#[test]
fn empty_file_is_an_empty_table() {
    let (_dir, path) = write_dataset("empty.json", "");
    let table = load_path(&path).expect("empty loads");
    assert!(table.is_empty());
}

#[test]
fn empty_array_is_an_empty_table() {
    let (_dir, path) = write_dataset("empty.json", "[]");
    assert!(load_path(&path).expect("loads").is_empty());
}

#[rstest]
#[case::scalar_line("{\"NAME\": \"A\"}\n42\n")]
#[case::broken_json("[{\"NAME\": \"A\"},")]
#[case::array_of_scalars("[1, 2, 3]")]
fn malformed_input_fails(#[case] contents: &str) {
    let (_dir, path) = write_dataset("bad.json", contents);
    match load_path(&path) {
        Err(LoadError::Format { path: p, source }) => {
            assert_eq!(p, path);
            assert!(!source.document.is_empty());
            assert!(!source.lines.is_empty());
        }
        other => panic!("expected a format error, got {other:?}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nope.json");
    let err = load_path(&path).expect_err("missing file");
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn load_time_is_recent() {
    let (_dir, path) = write_dataset("hotels.json", DATASET_ARRAY);
    let before = chrono::Utc::now();
    let table = load_path(&path).expect("loads");
    assert!(table.loaded_at() >= before);
}
