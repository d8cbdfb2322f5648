//! JSON-file persistence for the transaction sequence.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::domain::Transaction;
use crate::errors::TrackerError;

/// Result of a tolerant load: whatever could be read, plus one warning per
/// recovered failure.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub transactions: Vec<Transaction>,
    pub warnings: Vec<String>,
}

/// Result of an append: the new record count, plus any warnings surfaced by
/// the preceding load.
#[derive(Debug)]
pub struct AppendReport {
    pub total: usize,
    pub warnings: Vec<String>,
}

/// Reads and rewrites the single transactions file. The file is the sole
/// source of truth: every load reads it fully and every save rewrites it
/// fully via a temp file renamed over the destination.
pub struct TransactionStore {
    path: PathBuf,
}

impl TransactionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let ext = match self.path.extension().and_then(|ext| ext.to_str()) {
            Some(existing) => format!("{existing}.tmp"),
            None => String::from("tmp"),
        };
        let mut tmp = self.path.clone();
        tmp.set_extension(ext);
        tmp
    }

    /// Strict load. An empty or whitespace-only file is an empty sequence;
    /// a missing file or undecodable contents is an error.
    pub fn load(&self) -> Result<Vec<Transaction>, TrackerError> {
        let data = fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(Vec::new());
        }
        let transactions: Vec<Transaction> = serde_json::from_str(&data)?;
        debug!(
            path = %self.path.display(),
            count = transactions.len(),
            "loaded transactions"
        );
        Ok(transactions)
    }

    /// Tolerant load used by the interactive commands: a missing file and a
    /// decode failure each become an empty sequence plus a warning, so the
    /// shell never crashes on a read.
    pub fn load_tolerant(&self) -> LoadReport {
        match self.load() {
            Ok(transactions) => LoadReport {
                transactions,
                warnings: Vec::new(),
            },
            Err(TrackerError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "transaction file not found");
                LoadReport {
                    transactions: Vec::new(),
                    warnings: vec![format!(
                        "Transaction file {} not found; starting with an empty set.",
                        self.path.display()
                    )],
                }
            }
            Err(TrackerError::Serde(err)) => {
                warn!(path = %self.path.display(), error = %err, "could not decode transaction file");
                LoadReport {
                    transactions: Vec::new(),
                    warnings: vec![format!(
                        "Could not decode {}: {}. Treating it as empty.",
                        self.path.display(),
                        err
                    )],
                }
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "could not read transaction file");
                LoadReport {
                    transactions: Vec::new(),
                    warnings: vec![format!(
                        "Could not read {}: {}. Treating it as empty.",
                        self.path.display(),
                        err
                    )],
                }
            }
        }
    }

    /// Writes the full sequence atomically: serialize to `<file>.json.tmp`
    /// in the same directory, then rename over the destination. The
    /// destination is only ever observed as the old or the new complete
    /// content. On failure the original file is untouched and the staging
    /// file is removed best-effort.
    pub fn save(&self, transactions: &[Transaction]) -> Result<(), TrackerError> {
        let staging = self.staging_path();
        let json = serde_json::to_string_pretty(transactions)?;

        if let Err(err) = fs::write(&staging, json) {
            let _ = fs::remove_file(&staging);
            return Err(err.into());
        }
        if let Err(err) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(err.into());
        }

        debug!(
            path = %self.path.display(),
            count = transactions.len(),
            "saved transactions"
        );
        Ok(())
    }

    /// Full read-modify-write cycle: tolerant load, push one record, save
    /// the whole sequence back. There is no cross-process lock, so an
    /// external writer racing this cycle loses or wins whole-file (last
    /// writer wins); acceptable for a single-user interactive tool.
    pub fn append(&self, transaction: Transaction) -> Result<AppendReport, TrackerError> {
        let LoadReport {
            mut transactions,
            warnings,
        } = self.load_tolerant();
        transactions.push(transaction);
        self.save(&transactions)?;
        Ok(AppendReport {
            total: transactions.len(),
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransactionKind;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn sample(day: u32, amount: f64) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            TransactionKind::Expense,
            amount,
            "groceries",
            "",
        )
    }

    #[test]
    fn save_then_load_round_trips_in_order() {
        let dir = tempdir().unwrap();
        let store = TransactionStore::new(dir.path().join("transactions.json"));
        let records = vec![sample(1, 10.0), sample(2, 20.0), sample(1, 10.0)];

        store.save(&records).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn empty_file_loads_as_empty_sequence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transactions.json");
        fs::write(&path, "  \n").unwrap();

        let store = TransactionStore::new(path);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_a_strict_error_but_a_tolerant_warning() {
        let dir = tempdir().unwrap();
        let store = TransactionStore::new(dir.path().join("transactions.json"));

        match store.load() {
            Err(TrackerError::Io(err)) => assert_eq!(err.kind(), io::ErrorKind::NotFound),
            other => panic!("expected NotFound, got {other:?}"),
        }

        let report = store.load_tolerant();
        assert!(report.transactions.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("not found"));
    }

    #[test]
    fn corrupt_file_is_recovered_with_a_decode_warning() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transactions.json");
        fs::write(&path, "{not json").unwrap();

        let store = TransactionStore::new(path);
        let report = store.load_tolerant();
        assert!(report.transactions.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("Could not decode"));
    }

    #[test]
    fn append_creates_the_file_and_grows_it() {
        let dir = tempdir().unwrap();
        let store = TransactionStore::new(dir.path().join("transactions.json"));

        let report = store.append(sample(1, 10.0)).unwrap();
        assert_eq!(report.total, 1);
        assert_eq!(report.warnings.len(), 1, "first append reads a missing file");

        let report = store.append(sample(2, 20.0)).unwrap();
        assert_eq!(report.total, 2);
        assert!(report.warnings.is_empty());
        assert_eq!(store.load().unwrap().len(), 2);
    }

    #[test]
    fn failed_save_leaves_original_content_intact() {
        let dir = tempdir().unwrap();
        let store = TransactionStore::new(dir.path().join("transactions.json"));
        store.save(&[sample(1, 10.0)]).unwrap();
        let original = fs::read_to_string(store.path()).unwrap();

        // A directory colliding with the staging path forces the write to fail.
        fs::create_dir_all(store.staging_path()).unwrap();
        let result = store.save(&[sample(2, 99.0)]);
        assert!(result.is_err());

        let current = fs::read_to_string(store.path()).unwrap();
        assert_eq!(current, original);
    }
}
