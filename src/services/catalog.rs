// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Item catalog loading and name resolution.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Number of ambiguous candidates logged when a query matches several items.
const MAX_LOGGED_CANDIDATES: usize = 5;

/// Static mapping from lowercase item name to item id.
#[derive(Debug, Default, Clone)]
pub struct ItemCatalog {
    /// Entries in file order (substring search order)
    entries: Vec<(String, u32)>,
    /// Lowercase name -> index into `entries`
    index: HashMap<String, usize>,
}

/// A user-supplied item reference: numeric id or free-text name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemRef {
    Id(u32),
    Name(String),
}

impl ItemRef {
    /// Strings made only of ASCII digits are ids; everything else is a name.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(id) = trimmed.parse() {
                return ItemRef::Id(id);
            }
        }
        ItemRef::Name(input.to_string())
    }
}

/// Outcome of looking up a name in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemMatch {
    /// Case-insensitive exact name match
    Exact(u32),
    /// Exactly one catalog name contains the query
    Partial { name: String, id: u32 },
    /// Several names contain the query; never auto-broken
    Ambiguous(Vec<(String, u32)>),
    NotFound,
}

impl ItemMatch {
    pub fn id(&self) -> Option<u32> {
        match self {
            ItemMatch::Exact(id) | ItemMatch::Partial { id, .. } => Some(*id),
            ItemMatch::Ambiguous(_) | ItemMatch::NotFound => None,
        }
    }
}

impl ItemCatalog {
    /// Load the catalog from an `id:name` text file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let contents =
            fs::read_to_string(path.as_ref()).map_err(|e| CatalogError::IoError(e.to_string()))?;
        Ok(Self::parse(&contents))
    }

    /// Parse `id:name` lines. Lines without a colon are ignored and lines
    /// with a non-numeric id are skipped with a warning.
    pub fn parse(contents: &str) -> Self {
        let mut catalog = Self::default();

        for (line_no, line) in contents.lines().enumerate() {
            let line = line.trim();
            let Some((id, name)) = line.split_once(':') else {
                continue;
            };
            match id.trim().parse::<u32>() {
                Ok(id) => catalog.insert(name.trim(), id),
                Err(_) => {
                    tracing::warn!(line = line_no + 1, content = %line, "Skipping malformed catalog line");
                }
            }
        }

        tracing::info!(count = catalog.len(), "Loaded item catalog");
        catalog
    }

    /// Insert or replace an entry; the name is stored lowercase.
    pub fn insert(&mut self, name: &str, id: u32) {
        let key = name.to_lowercase();
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = id,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, id));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a name: exact (case-insensitive) first, then substring.
    pub fn lookup(&self, query: &str) -> ItemMatch {
        let query = query.to_lowercase();

        if let Some(&pos) = self.index.get(&query) {
            return ItemMatch::Exact(self.entries[pos].1);
        }

        let mut matches: Vec<(String, u32)> = self
            .entries
            .iter()
            .filter(|(name, _)| name.contains(&query))
            .cloned()
            .collect();

        match matches.len() {
            0 => ItemMatch::NotFound,
            1 => {
                let (name, id) = matches.remove(0);
                ItemMatch::Partial { name, id }
            }
            _ => ItemMatch::Ambiguous(matches),
        }
    }

    /// Resolve a name to an id, logging why resolution failed.
    pub fn resolve(&self, query: &str) -> Option<u32> {
        match self.lookup(query) {
            ItemMatch::Exact(id) => Some(id),
            ItemMatch::Partial { name, id } => {
                tracing::info!(query, matched = %name, id, "Resolved item by partial name");
                Some(id)
            }
            ItemMatch::Ambiguous(candidates) => {
                let shown: Vec<String> = candidates
                    .iter()
                    .take(MAX_LOGGED_CANDIDATES)
                    .map(|(name, id)| format!("{} (ID: {})", name, id))
                    .collect();
                tracing::warn!(
                    query,
                    total = candidates.len(),
                    candidates = ?shown,
                    "Multiple items match, refusing to guess"
                );
                None
            }
            ItemMatch::NotFound => {
                tracing::warn!(query, "No item found");
                None
            }
        }
    }

    /// Resolve an [`ItemRef`]; ids pass through without touching the catalog.
    pub fn resolve_ref(&self, item: &ItemRef) -> Option<u32> {
        match item {
            ItemRef::Id(id) => Some(*id),
            ItemRef::Name(name) => self.resolve(name),
        }
    }
}

/// Errors from catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read item catalog: {0}")]
    IoError(String),
}

impl From<CatalogError> for crate::error::AppError {
    fn from(err: CatalogError) -> Self {
        crate::error::AppError::Config(err.to_string())
    }
}
