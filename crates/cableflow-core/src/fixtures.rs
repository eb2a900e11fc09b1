// ── Local fixture files ──
//
// Flow and CMTS definitions kept next to the harness as files. The store
// scans a directory tree for one extension, keys each file by its stem and
// classifies JSON content by probing the known record shapes.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::CoreError;

/// Extension scanned when none is configured.
pub const DEFAULT_EXTENSION: &str = "json";

// ── Classification ───────────────────────────────────────────────────

/// What a fixture file describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FixtureKind {
    Cmts { address: String },
    Flow { name: String },
    Invalid,
}

impl FixtureKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cmts { .. } => "cmts",
            Self::Flow { .. } => "flow",
            Self::Invalid => "invalid json file",
        }
    }

    /// The CMTS address or flow name, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Cmts { address } => Some(address),
            Self::Flow { name } => Some(name),
            Self::Invalid => None,
        }
    }
}

/// Classify fixture text by the first known shape it matches.
///
/// A `cmts-node.address` (with or without the `packetcable-cmts:` module
/// prefix) makes it a CMTS; a `flow.flow-name` makes it a flow. Anything
/// else, including text that is not JSON, is invalid.
pub fn classify(text: &str) -> FixtureKind {
    let Ok(json) = serde_json::from_str::<Value>(text) else {
        return FixtureKind::Invalid;
    };
    classify_value(&json)
}

pub fn classify_value(json: &Value) -> FixtureKind {
    for key in ["cmts-node", "packetcable-cmts:cmts-node"] {
        if let Some(address) = json.get(key).and_then(|n| n.get("address")) {
            return FixtureKind::Cmts {
                address: scalar(address),
            };
        }
    }

    if let Some(name) = json.get("flow").and_then(|f| f.get("flow-name")) {
        return FixtureKind::Flow { name: scalar(name) };
    }

    FixtureKind::Invalid
}

fn scalar(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), str::to_owned)
}

// ── Catalogue ────────────────────────────────────────────────────────

/// One lettered line of the fixture menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogueEntry {
    pub letter: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: FixtureKind,
}

/// Menu letter for position `index`: a..z, then aa, ab, ...
pub fn menu_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(b'a' + u8::try_from(n % 26).unwrap_or_default());
        n /= 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

// ── FixtureStore ─────────────────────────────────────────────────────

/// Raw fixture text keyed by file stem, iterated in sorted order.
#[derive(Debug, Clone, Default)]
pub struct FixtureStore {
    fixtures: BTreeMap<String, String>,
}

impl FixtureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recursively scan `root` for files ending in `.{extension}`.
    ///
    /// Unreadable entries are logged and skipped; a missing `root` is an
    /// error. When two files share a stem, the one visited last wins.
    pub fn load(root: &Path, extension: &str) -> Result<Self, CoreError> {
        std::fs::metadata(root).map_err(|source| CoreError::FixtureIo {
            path: root.to_path_buf(),
            source,
        })?;

        let extension = extension.trim_start_matches('.');
        let mut store = Self::new();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Error accessing directory entry: {e}");
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(extension)
            {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            match std::fs::read_to_string(path) {
                Ok(text) => {
                    debug!(fixture = stem, path = %path.display(), "loaded fixture");
                    store.insert(stem, text);
                }
                Err(e) => warn!(path = %path.display(), "skipping unreadable fixture: {e}"),
            }
        }

        Ok(store)
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.fixtures.insert(name.into(), text.into());
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }

    /// Fixture names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fixtures.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fixtures.get(name).map(String::as_str)
    }

    /// Parse a fixture as a JSON record.
    pub fn record(&self, name: &str) -> Result<Value, CoreError> {
        let text = self.get(name).ok_or_else(|| CoreError::UnknownRecord {
            name: name.to_owned(),
        })?;
        serde_json::from_str(text).map_err(|source| CoreError::FixtureJson {
            name: name.to_owned(),
            source,
        })
    }

    /// Lettered, classified listing of every fixture.
    pub fn catalogue(&self) -> Vec<CatalogueEntry> {
        self.fixtures
            .iter()
            .enumerate()
            .map(|(i, (name, text))| CatalogueEntry {
                letter: menu_letter(i),
                name: name.clone(),
                kind: classify(text),
            })
            .collect()
    }

    /// Resolve a catalogue letter to its fixture name and text.
    pub fn select(&self, letter: &str) -> Option<(&str, &str)> {
        let letter = letter.trim();
        self.fixtures
            .iter()
            .enumerate()
            .find(|(i, _)| menu_letter(*i) == letter)
            .map(|(_, (name, text))| (name.as_str(), text.as_str()))
    }
}
