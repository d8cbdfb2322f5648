#![doc(test(attr(deny(warnings))))]

//! Tally records income and expense transactions in a flat JSON file and
//! answers simple date, type, and category queries over them from an
//! interactive shell.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod query;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Tally tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
