//! Prefix search over place names.
//!
//! Names are indexed under a normalized key (see [`normalize`]) in a trie whose
//! nodes live in a flat arena. Each node maps a character to its child index;
//! children are kept in a `BTreeMap` so traversal order is alphabetical and
//! stable across runs. A node that ends a stored key carries an explicit
//! terminal payload holding every record inserted under that key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named place recorded during load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub fn new(id: i64, name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            id,
            name: name.into(),
            lat,
            lon,
        }
    }
}

/// Derive the index key for a raw name: keep ASCII letters and spaces, drop
/// everything else, and lowercase the result.
///
/// ```
/// use mapquery_lib::normalize;
///
/// assert_eq!(normalize("Top Dog's Café!"), "top dogs caf");
/// ```
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == ' ')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[derive(Debug, Clone, Default)]
struct Terminal {
    /// Distinct raw names in insertion order.
    names: Vec<String>,
    locations: Vec<Location>,
}

impl Terminal {
    fn push(&mut self, location: Location) {
        if !self.names.iter().any(|name| *name == location.name) {
            self.names.push(location.name.clone());
        }
        self.locations.push(location);
    }
}

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: BTreeMap<char, usize>,
    terminal: Option<Terminal>,
}

/// Trie of normalized place names. Mutated only while loading.
#[derive(Debug, Clone)]
pub struct PrefixIndex {
    nodes: Vec<TrieNode>,
    records: usize,
    keys: usize,
}

impl Default for PrefixIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixIndex {
    const ROOT: usize = 0;

    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            records: 0,
            keys: 0,
        }
    }

    /// Index a location under its normalized name.
    ///
    /// Returns `false` when the name normalizes to an empty key and nothing was
    /// stored. Inserting a second record under an existing key appends to that
    /// key's payload.
    pub fn insert(&mut self, location: Location) -> bool {
        let key = normalize(&location.name);
        if key.is_empty() {
            return false;
        }

        let mut current = Self::ROOT;
        for ch in key.chars() {
            current = match self.nodes[current].children.get(&ch) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[current].children.insert(ch, child);
                    child
                }
            };
        }

        let node = &mut self.nodes[current];
        if node.terminal.is_none() {
            self.keys += 1;
        }
        node.terminal.get_or_insert_with(Terminal::default).push(location);
        self.records += 1;
        true
    }

    /// Every record stored under exactly the normalized form of `raw`.
    pub fn lookup_exact(&self, raw: &str) -> Option<&[Location]> {
        let key = normalize(raw);
        if key.is_empty() {
            return None;
        }
        self.walk(&key)
            .and_then(|node| self.nodes[node].terminal.as_ref())
            .map(|terminal| terminal.locations.as_slice())
    }

    /// Lazily enumerate the names stored under `prefix`, pre-order and
    /// alphabetical by child character.
    ///
    /// A name that is itself a prefix of longer names is yielded before them.
    /// An empty or unmatched prefix yields nothing.
    pub fn autocomplete(&self, prefix: &str) -> Autocomplete<'_> {
        let key = normalize(prefix);
        let start = if key.is_empty() { None } else { self.walk(&key) };
        Autocomplete {
            nodes: &self.nodes,
            stack: start.into_iter().collect(),
            current: None,
        }
    }

    /// The first `limit` autocomplete suggestions.
    pub fn autocomplete_limit(&self, prefix: &str, limit: usize) -> Vec<String> {
        self.autocomplete(prefix)
            .take(limit)
            .map(str::to_owned)
            .collect()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    /// Number of distinct normalized keys.
    pub fn key_count(&self) -> usize {
        self.keys
    }

    fn walk(&self, key: &str) -> Option<usize> {
        key.chars().try_fold(Self::ROOT, |node, ch| {
            self.nodes[node].children.get(&ch).copied()
        })
    }
}

/// Iterator returned by [`PrefixIndex::autocomplete`].
///
/// Cloning the iterator captures its position, so a clone can replay the
/// remaining suggestions independently.
#[derive(Debug, Clone)]
pub struct Autocomplete<'a> {
    nodes: &'a [TrieNode],
    stack: Vec<usize>,
    /// Terminal node being drained and the next name index within it.
    current: Option<(usize, usize)>,
}

impl<'a> Iterator for Autocomplete<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((node, index)) = self.current {
                let names = self.nodes[node]
                    .terminal
                    .as_ref()
                    .map(|terminal| terminal.names.as_slice())
                    .unwrap_or_default();
                if let Some(name) = names.get(index) {
                    self.current = Some((node, index + 1));
                    return Some(name.as_str());
                }
                self.current = None;
            }

            let node = self.stack.pop()?;
            // Reversed so the smallest character is popped first.
            self.stack
                .extend(self.nodes[node].children.values().rev().copied());
            if self.nodes[node].terminal.is_some() {
                self.current = Some((node, 0));
            }
        }
    }
}
