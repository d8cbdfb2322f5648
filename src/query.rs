//! Predicate filtering over the materialized transaction sequence.
//!
//! One filter dimension per invocation; filters do not compose. Matches are
//! yielded in insertion order together with their original positions.

use chrono::NaiveDate;

use crate::domain::{Transaction, TransactionKind};

/// Comparison applied by a date filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOp {
    Before,
    After,
    On,
}

impl DateOp {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "<" => Some(DateOp::Before),
            ">" => Some(DateOp::After),
            "=" => Some(DateOp::On),
            _ => None,
        }
    }
}

/// A single predicate over transactions.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionFilter {
    All,
    Date { op: DateOp, date: NaiveDate },
    Kind(TransactionKind),
    Category(String),
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            TransactionFilter::All => true,
            // Dates compare as calendar values, never as strings.
            TransactionFilter::Date { op, date } => match op {
                DateOp::Before => transaction.date < *date,
                DateOp::After => transaction.date > *date,
                DateOp::On => transaction.date == *date,
            },
            TransactionFilter::Kind(kind) => transaction.kind == *kind,
            TransactionFilter::Category(label) => {
                transaction.category.eq_ignore_ascii_case(label)
            }
        }
    }

    /// Selects matching transactions in insertion order, paired with their
    /// original indices.
    pub fn select<'a>(&self, transactions: &'a [Transaction]) -> Vec<(usize, &'a Transaction)> {
        transactions
            .iter()
            .enumerate()
            .filter(|(_, transaction)| self.matches(transaction))
            .collect()
    }
}
