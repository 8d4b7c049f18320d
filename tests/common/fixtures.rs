//! Dataset fixtures used across harnesses.
//!
//! The same five listings are available in every input shape the loader
//! accepts, so harnesses can assert that the shape never changes the result.

use std::path::PathBuf;
use tempfile::TempDir;

/// Five listings as a JSON array, in the messy shape real exports have.
pub const DATASET_ARRAY: &str = r#"[
  {"NAME": "Blue Inn", "RATING": "4.5 stars", "RATED BY": "1.2k ratings",
   "BASE_COST": "₹2,000", "FINAL_COST": "₹1,500", "ROOM SIZE": "120 sqft",
   "AMENITYS": "WiFi, AC, TV", "ADDRESS": "12 MG Road, Pune, MH", "CATEGORY": "Townhouse"},
  {"NAME": "Sea View", "RATING": "3.9", "RATED BY": "87",
   "BASE_COST": "1000", "FINAL_COST": "800",
   "AMENITYS": "WiFi|Geyser", "ADDRESS": "Baga Beach, Goa", "CATEGORY": "Flagship"},
  {"NAME": "Fort Stay", "RATING": null, "RATED BY": null,
   "BASE_COST": "₹1,500", "FINAL_COST": "₹1,500",
   "AMENITYS": ["AC", "TV"], "ADDRESS": "Fort, Mumbai", "CATEGORY": null},
  {"NAME": "Hill Top", "RATING": 2.8, "RATED BY": "₹1,234",
   "BASE_COST": "0", "FINAL_COST": "450",
   "AMENITYS": "AC;Parking", "ADDRESS": "Mall Road, Pune", "CATEGORY": "Townhouse"},
  {"NAME": "Blue Inn", "RATING": "4.1/5", "RATED BY": "3k",
   "BASE_COST": "2200", "FINAL_COST": "1980",
   "AMENITYS": "", "ADDRESS": "Koregaon Park, Pune", "CATEGORY": "Townhouse",
   "CHECKIN": "12:00"}
]"#;

/// The first two listings as JSON Lines, with a blank line in between.
pub const DATASET_LINES: &str = concat!(
    r#"{"NAME": "Blue Inn", "RATING": "4.5 stars", "ADDRESS": "12 MG Road, Pune, MH", "AMENITYS": "WiFi, AC, TV"}"#,
    "\n\n",
    r#"{"NAME": "Sea View", "RATING": "3.9", "ADDRESS": "Baga Beach, Goa", "AMENITYS": "WiFi|Geyser"}"#,
    "\n",
);

/// The same two listings, column-oriented (`{column: {index: value}}`).
pub const DATASET_COLUMNS: &str = r#"{
  "NAME": {"0": "Blue Inn", "1": "Sea View"},
  "RATING": {"0": "4.5 stars", "1": "3.9"},
  "ADDRESS": {"0": "12 MG Road, Pune, MH", "1": "Baga Beach, Goa"},
  "AMENITYS": {"0": "WiFi, AC, TV", "1": "WiFi|Geyser"}
}"#;

/// Write `contents` to a file named `name` in a fresh temp dir.
///
/// Keep the returned [`TempDir`] alive for as long as the file is needed.
pub fn write_dataset(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write dataset");
    (dir, path)
}

/// `n` synthetic listings as a JSON array, for volume tests and benches.
pub fn synthetic_dataset(n: usize) -> String {
    const CITIES: &[&str] = &["Pune", "Goa", "Mumbai", "Delhi", "Jaipur"];
    const AMENITIES: &[&str] = &["WiFi", "AC", "TV", "Geyser", "Parking"];
    let rows: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            let base = 800 + (i * 37) % 3000;
            let fin = base - (i * 13) % (base / 2);
            serde_json::json!({
                "NAME": format!("Hotel {}", i % (n / 2 + 1)),
                "RATING": format!("{:.1} stars", 1.0 + (i % 40) as f64 / 10.0),
                "RATED BY": format!("{} ratings", (i * 7) % 900),
                "BASE_COST": format!("₹{base}"),
                "FINAL_COST": format!("₹{fin}"),
                "AMENITYS": AMENITIES[..1 + i % AMENITIES.len()].join(", "),
                "ADDRESS": format!("{} Main St, {}", i, CITIES[i % CITIES.len()]),
                "CATEGORY": if i % 3 == 0 { serde_json::Value::Null } else { "Townhouse".into() },
            })
        })
        .collect();
    serde_json::Value::Array(rows).to_string()
}
