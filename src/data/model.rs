use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Column – the known schema
// ---------------------------------------------------------------------------

/// Every column the dashboard understands, matched by trimmed header name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Device,
    Traffic,
    Rssi,
    Jitter,
    Throughput,
    AppRetry,
    MacRetry,
    McsInitial,
    McsRetry,
    Sgi,
    Lgi,
    MostMsdu,
    MostAmpdu,
    MgmtOverhead,
    CtrlOverhead,
    Data0,
    Data1,
    Unrelated,
    OtherBss,
    Idle,
}

/// The seven time-share columns, in pie order.
pub const TIMING_COLUMNS: [Column; 7] = [
    Column::MgmtOverhead,
    Column::CtrlOverhead,
    Column::Data0,
    Column::Data1,
    Column::Unrelated,
    Column::OtherBss,
    Column::Idle,
];

impl Column {
    pub const ALL: [Column; 20] = [
        Column::Device,
        Column::Traffic,
        Column::Rssi,
        Column::Jitter,
        Column::Throughput,
        Column::AppRetry,
        Column::MacRetry,
        Column::McsInitial,
        Column::McsRetry,
        Column::Sgi,
        Column::Lgi,
        Column::MostMsdu,
        Column::MostAmpdu,
        Column::MgmtOverhead,
        Column::CtrlOverhead,
        Column::Data0,
        Column::Data1,
        Column::Unrelated,
        Column::OtherBss,
        Column::Idle,
    ];

    /// Header text as it appears in the source file.
    pub fn header(self) -> &'static str {
        match self {
            Column::Device => "Device",
            Column::Traffic => "Traffic",
            Column::Rssi => "RSSI_avg(dBm)",
            Column::Jitter => "Jitter",
            Column::Throughput => "Throughput(iperf)",
            Column::AppRetry => "Retry_perc(iperf)",
            Column::MacRetry => "TXOP_retry_rate",
            Column::McsInitial => "R0_Max_MCS",
            Column::McsRetry => "R1_Max_MCS",
            Column::Sgi => "sgi",
            Column::Lgi => "lgi",
            Column::MostMsdu => "Most_MSDU_per_TXOP",
            Column::MostAmpdu => "Most_AMPDU_per_TXOP",
            Column::MgmtOverhead => "Mgnt_overheads",
            Column::CtrlOverhead => "Ctrl Overheads",
            Column::Data0 => "data0",
            Column::Data1 => "data1",
            Column::Unrelated => "Unrelated",
            Column::OtherBss => "Other_BSS",
            Column::Idle => "Idle",
        }
    }

    /// Resolve a header name (surrounding whitespace ignored).
    pub fn from_header(header: &str) -> Option<Column> {
        let header = header.trim();
        Column::ALL.into_iter().find(|c| c.header() == header)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

// ---------------------------------------------------------------------------
// SignalCategory – binned RSSI
// ---------------------------------------------------------------------------

/// Signal quality bins, ordered from strongest to weakest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SignalCategory {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl SignalCategory {
    pub const ALL: [SignalCategory; 4] = [
        SignalCategory::Excellent,
        SignalCategory::Good,
        SignalCategory::Fair,
        SignalCategory::Poor,
    ];

    /// Bin an RSSI reading. Lower bounds are inclusive, so -50 is Excellent,
    /// -65 is Good and -75 is Fair.
    pub fn classify(rssi_dbm: f64) -> Self {
        if rssi_dbm >= -50.0 {
            SignalCategory::Excellent
        } else if rssi_dbm >= -65.0 {
            SignalCategory::Good
        } else if rssi_dbm >= -75.0 {
            SignalCategory::Fair
        } else {
            SignalCategory::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SignalCategory::Excellent => "Excellent (≥ -50 dBm)",
            SignalCategory::Good => "Good (-65 to -50 dBm)",
            SignalCategory::Fair => "Fair (-75 to -65 dBm)",
            SignalCategory::Poor => "Poor (< -75 dBm)",
        }
    }
}

impl fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Cell – a categorical value (MSDU / AMPDU burst sizes)
// ---------------------------------------------------------------------------

/// A loosely typed cell for columns whose values are only counted, never
/// averaged. Must be `Ord` so modes break ties deterministically.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Eq for Cell {}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;
        match (self, other) {
            (Cell::Integer(a), Cell::Integer(b)) => a.cmp(b),
            (Cell::Float(a), Cell::Float(b)) => a.total_cmp(b),
            (Cell::Integer(a), Cell::Float(b)) => (*a as f64).total_cmp(b).then(Ordering::Less),
            (Cell::Float(a), Cell::Integer(b)) => a.total_cmp(&(*b as f64)).then(Ordering::Greater),
            (Cell::Text(a), Cell::Text(b)) => a.cmp(b),
            // Numbers sort before text.
            (Cell::Text(_), _) => Ordering::Greater,
            (_, Cell::Text(_)) => Ordering::Less,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Text(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one normalized row
// ---------------------------------------------------------------------------

/// One measurement row after normalization. Every field is optional: a
/// missing column or an unparseable cell both end up as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// Lowercased device identifier.
    pub device: Option<String>,
    /// Uppercased traffic identifier.
    pub traffic: Option<String>,
    pub rssi: Option<f64>,
    /// Derived from `rssi`; `None` only when the reading is missing.
    pub category: Option<SignalCategory>,
    pub jitter: Option<f64>,
    pub throughput: Option<f64>,
    pub app_retry: Option<f64>,
    pub mac_retry: Option<f64>,
    pub mcs_initial: Option<i64>,
    pub mcs_retry: Option<i64>,
    pub sgi: Option<f64>,
    pub lgi: Option<f64>,
    pub most_msdu: Option<Cell>,
    pub most_ampdu: Option<Cell>,
    /// Time shares in [`TIMING_COLUMNS`] order.
    pub timing: [Option<f64>; 7],
}

impl Record {
    /// Numeric accessor for the float-valued columns. Text and categorical
    /// columns return `None`; MCS indices are widened to `f64`.
    pub fn number(&self, column: Column) -> Option<f64> {
        match column {
            Column::Rssi => self.rssi,
            Column::Jitter => self.jitter,
            Column::Throughput => self.throughput,
            Column::AppRetry => self.app_retry,
            Column::MacRetry => self.mac_retry,
            Column::McsInitial => self.mcs_initial.map(|v| v as f64),
            Column::McsRetry => self.mcs_retry.map(|v| v as f64),
            Column::Sgi => self.sgi,
            Column::Lgi => self.lgi,
            Column::Device | Column::Traffic | Column::MostMsdu | Column::MostAmpdu => None,
            timing => TIMING_COLUMNS
                .iter()
                .position(|c| *c == timing)
                .and_then(|i| self.timing[i]),
        }
    }

    /// Set the category from the current RSSI.
    pub fn classify(&mut self) {
        self.category = self.rssi.map(SignalCategory::classify);
    }
}

// ---------------------------------------------------------------------------
// Dataset – the immutable normalized table
// ---------------------------------------------------------------------------

/// The full normalized table with the schema and filter indices computed
/// once at load time.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All rows.
    pub records: Vec<Record>,
    /// Known columns present in the source header.
    pub columns: BTreeSet<Column>,
    /// Distinct observed (normalized) device identifiers.
    pub devices: BTreeSet<String>,
    /// Distinct observed (normalized) traffic identifiers.
    pub traffic: BTreeSet<String>,
    /// Categories that occur in at least one row.
    pub categories: BTreeSet<SignalCategory>,
}

impl Dataset {
    /// Build the indices from normalized records.
    pub fn from_records(records: Vec<Record>, columns: BTreeSet<Column>) -> Self {
        let mut devices = BTreeSet::new();
        let mut traffic = BTreeSet::new();
        let mut categories = BTreeSet::new();

        for rec in &records {
            if let Some(d) = &rec.device {
                devices.insert(d.clone());
            }
            if let Some(t) = &rec.traffic {
                traffic.insert(t.clone());
            }
            if let Some(c) = rec.category {
                categories.insert(c);
            }
        }

        Dataset {
            records,
            columns,
            devices,
            traffic,
            categories,
        }
    }

    /// Whether the source carried this column.
    pub fn has(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// Known columns the source did not carry.
    pub fn missing_columns(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|c| !self.columns.contains(c))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_boundaries() {
        assert_eq!(SignalCategory::classify(-48.0), SignalCategory::Excellent);
        assert_eq!(SignalCategory::classify(-50.0), SignalCategory::Excellent);
        assert_eq!(SignalCategory::classify(-50.01), SignalCategory::Good);
        assert_eq!(SignalCategory::classify(-65.0), SignalCategory::Good);
        assert_eq!(SignalCategory::classify(-65.5), SignalCategory::Fair);
        assert_eq!(SignalCategory::classify(-75.0), SignalCategory::Fair);
        assert_eq!(SignalCategory::classify(-75.1), SignalCategory::Poor);
        assert_eq!(SignalCategory::classify(f64::MIN), SignalCategory::Poor);
        assert_eq!(SignalCategory::classify(f64::MAX), SignalCategory::Excellent);
    }

    #[test]
    fn header_lookup_trims() {
        assert_eq!(Column::from_header("  Ctrl Overheads "), Some(Column::CtrlOverhead));
        assert_eq!(Column::from_header("RSSI_avg(dBm)"), Some(Column::Rssi));
        assert_eq!(Column::from_header("Timestamp"), None);
    }

    #[test]
    fn every_column_round_trips_through_its_header() {
        for col in Column::ALL {
            assert_eq!(Column::from_header(col.header()), Some(col));
        }
    }

    #[test]
    fn numeric_accessor_reaches_timing_fields() {
        let mut rec = Record::default();
        rec.timing[6] = Some(42.0);
        rec.mcs_retry = Some(5);
        assert_eq!(rec.number(Column::Idle), Some(42.0));
        assert_eq!(rec.number(Column::McsRetry), Some(5.0));
        assert_eq!(rec.number(Column::Device), None);
    }

    #[test]
    fn cell_order_puts_numbers_first() {
        let mut cells = vec![
            Cell::Text("a".into()),
            Cell::Float(2.5),
            Cell::Integer(3),
            Cell::Integer(1),
        ];
        cells.sort();
        assert_eq!(
            cells,
            vec![
                Cell::Integer(1),
                Cell::Float(2.5),
                Cell::Integer(3),
                Cell::Text("a".into()),
            ]
        );
    }

    #[test]
    fn dataset_collects_distinct_values() {
        let mut a = Record {
            device: Some("laptop".into()),
            traffic: Some("UDP".into()),
            rssi: Some(-70.0),
            ..Default::default()
        };
        a.classify();
        let b = Record {
            device: Some("laptop".into()),
            traffic: Some("TCP".into()),
            ..Default::default()
        };
        let ds = Dataset::from_records(vec![a, b], BTreeSet::from([Column::Device]));

        assert_eq!(ds.devices.len(), 1);
        assert_eq!(ds.traffic.len(), 2);
        assert_eq!(ds.categories, BTreeSet::from([SignalCategory::Fair]));
        assert!(ds.has(Column::Device));
        assert!(!ds.has(Column::Traffic));
        assert_eq!(ds.missing_columns().len(), Column::ALL.len() - 1);
    }
}
