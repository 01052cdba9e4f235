//! CSV persistence of Sender and Receiver strategies

use std::path::{Path, PathBuf};

use crate::{Error, Result, matrix::Matrix};

/// Output paths derived from a prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyFiles {
    pub sender: PathBuf,
    pub receiver: PathBuf,
}

impl StrategyFiles {
    /// `<prefix>-sender.csv` and `<prefix>-receiver.csv`
    pub fn from_prefix(prefix: &str) -> Self {
        Self {
            sender: PathBuf::from(format!("{prefix}-sender.csv")),
            receiver: PathBuf::from(format!("{prefix}-receiver.csv")),
        }
    }
}

/// Exporter for strategy CSV files
pub struct StrategyCsvExporter;

impl StrategyCsvExporter {
    /// Write both strategies next to `prefix`
    pub fn export(prefix: &str, sender: &Matrix, receiver: &Matrix) -> Result<StrategyFiles> {
        let files = StrategyFiles::from_prefix(prefix);
        Self::write_matrix(&files.sender, sender)?;
        Self::write_matrix(&files.receiver, receiver)?;
        Ok(files)
    }

    /// Write one matrix, one CSV record per row, no header
    pub fn write_matrix<P: AsRef<Path>>(path: P, matrix: &Matrix) -> Result<()> {
        let path = path.as_ref();
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;
        for row in matrix.row_iter() {
            writer.write_record(row.iter().map(|value| value.to_string()))?;
        }
        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush {}", path.display()),
            source,
        })?;
        Ok(())
    }

    /// Read a matrix written by [`StrategyCsvExporter::write_matrix`]
    pub fn read_matrix<P: AsRef<Path>>(path: P) -> Result<Matrix> {
        let path = path.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let mut rows = Vec::new();
        for (row_idx, record) in reader.records().enumerate() {
            let record = record?;
            let row = record
                .iter()
                .map(|cell| {
                    cell.parse::<f64>().map_err(|_| Error::ParseNumber {
                        value: cell.to_string(),
                        row: row_idx,
                        context: path.display().to_string(),
                    })
                })
                .collect::<Result<Vec<f64>>>()?;
            rows.push(row);
        }
        Matrix::from_rows(rows)
    }
}
