//! The fixed registry of allowed category labels per transaction type.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use strsim::levenshtein;

use crate::domain::TransactionKind;
use crate::errors::TrackerError;

/// Allowed category labels, keyed by transaction type. Loaded once at
/// process start from `categories.json` and immutable afterwards; a missing
/// or malformed file fails startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryRegistry {
    expense_categories: Vec<String>,
    income_categories: Vec<String>,
}

impl CategoryRegistry {
    pub fn new(expense_categories: Vec<String>, income_categories: Vec<String>) -> Self {
        Self {
            expense_categories,
            income_categories,
        }
    }

    pub fn load(path: &Path) -> Result<Self, TrackerError> {
        if !path.exists() {
            return Err(TrackerError::Registry(format!(
                "category file not found: {}",
                path.display()
            )));
        }
        let data = fs::read_to_string(path).map_err(|err| {
            TrackerError::Registry(format!("failed to read {}: {}", path.display(), err))
        })?;
        serde_json::from_str(&data).map_err(|err| {
            TrackerError::Registry(format!(
                "failed to parse {}: {} (expected {{\"expense_categories\": [..], \"income_categories\": [..]}})",
                path.display(),
                err
            ))
        })
    }

    pub fn labels_for(&self, kind: TransactionKind) -> &[String] {
        match kind {
            TransactionKind::Expense => &self.expense_categories,
            TransactionKind::Income => &self.income_categories,
        }
    }

    /// Exact membership in the type's group — the `add` validation path.
    pub fn contains(&self, kind: TransactionKind, label: &str) -> bool {
        self.labels_for(kind).iter().any(|known| known == label)
    }

    /// Case-insensitive membership in the union of both groups — the
    /// `view category` validation path.
    pub fn contains_any_ci(&self, label: &str) -> bool {
        self.all_labels()
            .any(|known| known.eq_ignore_ascii_case(label))
    }

    /// Expense labels first, then income labels. The order error messages
    /// list valid choices in.
    pub fn all_labels(&self) -> impl Iterator<Item = &str> {
        self.expense_categories
            .iter()
            .chain(self.income_categories.iter())
            .map(String::as_str)
    }

    /// Nearest known label by edit distance, for near-miss hints.
    pub fn suggest(&self, label: &str) -> Option<&str> {
        nearest(self.all_labels(), label)
    }

    /// Nearest label within one type's group.
    pub fn suggest_for(&self, kind: TransactionKind, label: &str) -> Option<&str> {
        nearest(self.labels_for(kind).iter().map(String::as_str), label)
    }
}

fn nearest<'a>(labels: impl Iterator<Item = &'a str>, label: &str) -> Option<&'a str> {
    labels
        .map(|known| (levenshtein(known, label), known))
        .min_by_key(|(distance, _)| *distance)
        .filter(|(distance, _)| *distance <= 3)
        .map(|(_, known)| known)
}
