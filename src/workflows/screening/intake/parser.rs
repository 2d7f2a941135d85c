use std::collections::{HashMap, HashSet};
use std::io::Read;
use tracing::warn;

/// Columns every passenger row must supply, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 14] = [
    "passenger_id",
    "passenger_name",
    "flight_no",
    "behavior_state",
    "bag_tampering",
    "no_fly_match",
    "chemical_trace",
    "baggage_scan_result",
    "travel_anomaly_level",
    "travel_pattern_risk",
    "duplicate_bag_tag",
    "unattended_baggage",
    "multiple_boarding_passes",
    "extra_weight_kg",
];

/// One data row as read from the file, keyed by normalised column name.
#[derive(Debug)]
pub(crate) struct RawRecord {
    pub(crate) line: u64,
    pub(crate) fields: HashMap<String, String>,
    /// Columns whose bytes were not valid UTF-8.
    pub(crate) undecodable: HashSet<String>,
}

impl RawRecord {
    pub(crate) fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    pub(crate) fn is_undecodable(&self, column: &str) -> bool {
        self.undecodable.contains(column)
    }
}

/// Reads every data row. Field bytes are decoded per column so one badly encoded
/// row cannot abort the rest of the file.
pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<RawRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .byte_headers()?
        .iter()
        .map(|raw| normalize_header(&String::from_utf8_lossy(raw)))
        .collect();

    let missing = missing_columns(&headers);
    if !missing.is_empty() {
        warn!(
            missing = %missing.join(", "),
            "passenger dataset lacks required columns; affected rows will be rejected"
        );
    }

    let mut records = Vec::new();
    for row in csv_reader.byte_records() {
        let row = row?;
        let line = row.position().map(|pos| pos.line()).unwrap_or_default();

        let mut fields = HashMap::with_capacity(headers.len());
        let mut undecodable = HashSet::new();
        for (header, value) in headers.iter().zip(row.iter()) {
            if fields.contains_key(header) || undecodable.contains(header) {
                continue;
            }
            match std::str::from_utf8(value) {
                Ok(text) => {
                    fields.insert(header.clone(), text.to_string());
                }
                Err(_) => {
                    undecodable.insert(header.clone());
                }
            }
        }

        records.push(RawRecord {
            line,
            fields,
            undecodable,
        });
    }

    Ok(records)
}

/// Required columns absent from the normalised header row, in canonical order.
pub(crate) fn missing_columns(headers: &[String]) -> Vec<&'static str> {
    REQUIRED_COLUMNS
        .into_iter()
        .filter(|column| !headers.iter().any(|header| header.as_str() == *column))
        .collect()
}

pub(crate) fn normalize_header(value: &str) -> String {
    value.trim_start_matches('\u{feff}').trim().to_lowercase()
}
