use super::{ChartResult, Unavailable, require};
use crate::data::filter::View;
use crate::data::model::Column;

/// Fields of the correlation heatmap, in row/column order.
pub const CORRELATION_COLUMNS: [Column; 5] = [
    Column::Throughput,
    Column::Jitter,
    Column::AppRetry,
    Column::MacRetry,
    Column::Rssi,
];

const N: usize = CORRELATION_COLUMNS.len();

/// Square, symmetric Pearson matrix with a unit diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub labels: [&'static str; N],
    pub values: [[f64; N]; N],
    /// Rows that had all five fields.
    pub samples: usize,
}

impl CorrelationMatrix {
    /// Pearson correlation over complete observations. A pair where either
    /// side has zero variance is reported as 0.
    pub fn from_observations(rows: &[[f64; N]]) -> ChartResult<Self> {
        if rows.is_empty() {
            return Err(Unavailable::NoData);
        }
        let n = rows.len() as f64;

        let mut means = [0.0; N];
        for row in rows {
            for (m, v) in means.iter_mut().zip(row) {
                *m += v / n;
            }
        }

        // Co-moment sums; only the upper triangle is filled, then mirrored.
        let mut cov = [[0.0; N]; N];
        for row in rows {
            for i in 0..N {
                let di = row[i] - means[i];
                for j in i..N {
                    cov[i][j] += di * (row[j] - means[j]);
                }
            }
        }

        let mut values = [[0.0; N]; N];
        for i in 0..N {
            values[i][i] = 1.0;
            for j in (i + 1)..N {
                let denom = (cov[i][i] * cov[j][j]).sqrt();
                let r = if denom > 0.0 {
                    (cov[i][j] / denom).clamp(-1.0, 1.0)
                } else {
                    0.0
                };
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Ok(Self {
            labels: CORRELATION_COLUMNS.map(Column::header),
            values,
            samples: rows.len(),
        })
    }

    pub fn get(&self, a: Column, b: Column) -> Option<f64> {
        let i = CORRELATION_COLUMNS.iter().position(|c| *c == a)?;
        let j = CORRELATION_COLUMNS.iter().position(|c| *c == b)?;
        Some(self.values[i][j])
    }
}

/// Correlation of throughput, jitter, both retry measures and RSSI over the
/// rows where all five are present.
pub fn correlation_matrix(view: &View<'_>) -> ChartResult<CorrelationMatrix> {
    require(view, &CORRELATION_COLUMNS)?;
    let rows: Vec<[f64; N]> = view
        .rows()
        .filter_map(|r| {
            let mut row = [0.0; N];
            for (slot, col) in row.iter_mut().zip(CORRELATION_COLUMNS) {
                *slot = r.number(col)?;
            }
            Some(row)
        })
        .collect();
    CorrelationMatrix::from_observations(&rows)
}
