use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value as JsonValue;

use super::model::{Cell, Column, Dataset, Record, TIMING_COLUMNS};

/// One source row reduced to the known columns, cells still as raw text.
type RawRow = BTreeMap<Column, String>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and normalize a measurement table.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`          – comma-separated, header row first
/// * `.tsv` / `.tab` – tab-separated, header row first
/// * `.json`         – `[{ "Device": "...", "RSSI_avg(dBm)": -61, ... }, ...]`
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV file")?;
            load_delimited(file, b',')?
        }
        "tsv" | "tab" => {
            let file = std::fs::File::open(path).context("opening TSV file")?;
            load_delimited(file, b'\t')?
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            load_json(&text)?
        }
        other => bail!("Unsupported file extension: .{other}"),
    };

    log::info!(
        "Loaded {} rows from {} ({} known columns)",
        dataset.len(),
        path.display(),
        dataset.columns.len()
    );
    let missing = dataset.missing_columns();
    if !missing.is_empty() {
        log::warn!(
            "Columns not present, dependent charts will be unavailable: {:?}",
            missing.iter().map(|c| c.header()).collect::<Vec<_>>()
        );
    }

    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Delimited loader
// ---------------------------------------------------------------------------

/// Read a delimited table with a header row. Headers are trimmed, unknown
/// columns ignored, short rows padded with nulls. Rows the CSV parser cannot
/// decode at all are skipped with a warning.
pub fn load_delimited<R: Read>(source: R, delimiter: u8) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(source);

    let header_columns: Vec<Option<Column>> = reader
        .headers()
        .context("reading header row")?
        .iter()
        .map(Column::from_header)
        .collect();
    let columns: BTreeSet<Column> = header_columns.iter().flatten().copied().collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping row {row_no}: {e}");
                continue;
            }
        };

        let raw: RawRow = record
            .iter()
            .zip(&header_columns)
            .filter_map(|(value, col)| col.map(|c| (c, value.to_string())))
            .collect();
        rows.push(raw);
    }

    Ok(normalize(rows, columns))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')` layout.
/// A key seen in any record counts as a present column.
pub fn load_json(text: &str) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut columns = BTreeSet::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut raw = RawRow::new();
        for (key, val) in obj {
            let Some(col) = Column::from_header(key) else {
                continue;
            };
            columns.insert(col);
            match val {
                JsonValue::Null => {}
                JsonValue::String(s) => {
                    raw.insert(col, s.clone());
                }
                other => {
                    raw.insert(col, other.to_string());
                }
            }
        }
        rows.push(raw);
    }

    Ok(normalize(rows, columns))
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

fn normalize(rows: Vec<RawRow>, columns: BTreeSet<Column>) -> Dataset {
    let records = rows.iter().map(normalize_row).collect();
    Dataset::from_records(records, columns)
}

fn normalize_row(raw: &RawRow) -> Record {
    let text = move |col: Column| raw.get(&col).map(String::as_str);
    let number = move |col: Column| text(col).and_then(parse_number);

    let mut timing = [None; 7];
    for (slot, col) in timing.iter_mut().zip(TIMING_COLUMNS) {
        *slot = number(col);
    }

    let mut record = Record {
        device: text(Column::Device).and_then(non_empty).map(|s| s.to_lowercase()),
        traffic: text(Column::Traffic).and_then(non_empty).map(|s| s.to_uppercase()),
        rssi: number(Column::Rssi),
        category: None,
        jitter: text(Column::Jitter).and_then(parse_jitter),
        throughput: number(Column::Throughput),
        app_retry: number(Column::AppRetry),
        mac_retry: number(Column::MacRetry),
        mcs_initial: text(Column::McsInitial).and_then(parse_integer),
        mcs_retry: text(Column::McsRetry).and_then(parse_integer),
        sgi: number(Column::Sgi),
        lgi: number(Column::Lgi),
        most_msdu: text(Column::MostMsdu).and_then(guess_cell_type),
        most_ampdu: text(Column::MostAmpdu).and_then(guess_cell_type),
        timing,
    };
    record.classify();
    record
}

fn non_empty(s: &str) -> Option<&str> {
    if s.trim().is_empty() { None } else { Some(s) }
}

/// Lossy float parse: anything unparseable or non-finite is missing.
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Jitter cells carry a unit, e.g. `"5.2ms"` or `" 3 ms"`.
pub fn parse_jitter(s: &str) -> Option<f64> {
    parse_number(&s.replace("ms", ""))
}

/// Integer cells may be written as floats by upstream tooling (`"7.0"`).
pub fn parse_integer(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Some(i);
    }
    parse_number(s)
        .filter(|v| v.fract() == 0.0 && v.abs() < i64::MAX as f64)
        .map(|v| v as i64)
}

fn guess_cell_type(s: &str) -> Option<Cell> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Some(Cell::Integer(i));
    }
    if let Some(f) = parse_number(s) {
        return Some(Cell::Float(f));
    }
    Some(Cell::Text(s.to_string()))
}
