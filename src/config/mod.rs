//! Resolution of the data directory holding the two backing files.

use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

const CATEGORIES_FILE: &str = "categories.json";
const TRANSACTIONS_FILE: &str = "transactions.json";

/// Locates `categories.json` and `transactions.json`. Resolved once at
/// startup and owned by the shell context; never re-resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    data_dir: PathBuf,
}

impl Paths {
    /// Resolves the data directory: `TALLY_HOME` if set, otherwise the
    /// current working directory (the files live beside the process).
    pub fn resolve() -> Self {
        Self::from_override(env::var_os("TALLY_HOME"))
    }

    fn from_override(home: Option<OsString>) -> Self {
        let data_dir = home
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self { data_dir }
    }

    /// Builds paths rooted at an explicit directory (used by tests).
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn categories_file(&self) -> PathBuf {
        self.data_dir.join(CATEGORIES_FILE)
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir.join(TRANSACTIONS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_data_dir_places_both_files() {
        let paths = Paths::with_data_dir("/tmp/tally-data");
        assert_eq!(
            paths.categories_file(),
            PathBuf::from("/tmp/tally-data/categories.json")
        );
        assert_eq!(
            paths.transactions_file(),
            PathBuf::from("/tmp/tally-data/transactions.json")
        );
    }

    #[test]
    fn home_override_wins_over_cwd() {
        let paths = Paths::from_override(Some(OsString::from("/tmp/tally-home")));
        assert_eq!(paths.data_dir(), Path::new("/tmp/tally-home"));
    }

    #[test]
    fn absent_override_defaults_to_cwd() {
        let paths = Paths::from_override(None);
        assert_eq!(paths.data_dir(), Path::new("."));
    }
}
