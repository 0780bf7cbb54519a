//! Banned (source, book) combinations
//!
//! Certain source/book pairs have documented negative historical returns on
//! total-market flips. They are excluded from total-market analysis before
//! any scoring happens. The set is injected configuration data so it can be
//! revised without touching classifier logic.

use serde::{Deserialize, Serialize};

/// One excluded (source, book) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannedCombination {
    pub source: String,
    pub book: Option<String>,
}

impl BannedCombination {
    fn key(&self) -> String {
        combination_key(&self.source, self.book.as_deref())
    }
}

/// Versioned table of excluded combinations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannedCombinations {
    /// Revision of the table, bumped whenever an entry changes
    pub version: u32,
    entries: Vec<BannedCombination>,
}

impl BannedCombinations {
    /// Build a table from explicit entries
    pub fn new(version: u32, entries: Vec<BannedCombination>) -> Self {
        Self { version, entries }
    }

    /// An empty table (nothing excluded)
    pub fn empty() -> Self {
        Self {
            version: 0,
            entries: Vec::new(),
        }
    }

    /// Whether the (source, book) pair is excluded
    pub fn is_banned(&self, source: &str, book: Option<&str>) -> bool {
        let key = combination_key(source, book);
        self.entries.iter().any(|entry| entry.key() == key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for BannedCombinations {
    fn default() -> Self {
        Self {
            version: 3,
            entries: vec![
                banned("covers", Some("draftkings")),
                banned("covers", None),
                banned("actionnetwork", Some("betmgm")),
                banned("oddsshark", Some("caesars")),
            ],
        }
    }
}

fn banned(source: &str, book: Option<&str>) -> BannedCombination {
    BannedCombination {
        source: source.to_string(),
        book: book.map(str::to_string),
    }
}

fn combination_key(source: &str, book: Option<&str>) -> String {
    format!("{}-{}", source, book.unwrap_or("NULL"))
}
