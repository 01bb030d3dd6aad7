// NewsSleuth - app/history.rs
//
// Bounded analysis history: newest first, capped, evicting the oldest.
//
// Design principles:
// - The store is a trait so the service and tests can swap the backend.
// - The file backend keeps the whole collection in one JSON array and
//   saves it atomically (write→temp, rename→final) so a crash during save
//   never corrupts the previous good history.
// - Every read-modify-write runs under a single in-process writer lock.
//   Separate processes sharing the file are still last-writer-wins.
// - Read errors are never surfaced: a missing, oversized or corrupt file
//   reads as an empty history and the next write replaces it.

use crate::core::model::{truncate_chars, AnalysisResult, HistoryItem, InputType};
use crate::util::constants::{
    DEFAULT_HISTORY_MAX_ITEMS, HISTORY_CONTENT_MAX_CHARS, HISTORY_FILE_NAME,
    MAX_HISTORY_FILE_SIZE,
};
use crate::util::error::HistoryError;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Persisted, bounded collection of past analyses.
pub trait HistoryStore: Send + Sync {
    /// Record a new analysis at the front of the history, evicting the
    /// oldest items beyond the cap. Returns the stored item.
    fn append(
        &self,
        input_type: InputType,
        content: &str,
        result: &AnalysisResult,
    ) -> Result<HistoryItem, HistoryError>;

    /// All items, newest first. Empty when nothing is stored or the stored
    /// data cannot be read.
    fn list(&self) -> Vec<HistoryItem>;

    /// Look up one item by id.
    fn get(&self, id: &str) -> Option<HistoryItem> {
        self.list().into_iter().find(|item| item.id == id)
    }

    /// Remove the item with `id`. Returns whether an item was removed.
    fn delete_by_id(&self, id: &str) -> Result<bool, HistoryError>;

    /// Remove every item.
    fn clear(&self) -> Result<(), HistoryError>;
}

// =============================================================================
// Shared item construction
// =============================================================================

/// Id for an item created at `now`: its epoch milliseconds, bumped past the
/// largest numeric id already stored so two appends in the same
/// millisecond still get distinct, increasing ids.
///
/// A stored id of `i64::MAX` cannot be bumped; the millisecond id is used
/// and uniqueness falls back to the clock.
pub fn next_id(existing: &[HistoryItem], now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis();
    let max_existing = existing
        .iter()
        .filter_map(|item| item.id.parse::<i64>().ok())
        .max();
    let id = match max_existing {
        Some(max) if millis <= max => max.checked_add(1).unwrap_or_else(|| {
            tracing::warn!(max, "Stored history id cannot be incremented, using clock id");
            millis
        }),
        _ => millis,
    };
    id.to_string()
}

/// Build an item and insert it at the front of `items`, truncating to `cap`.
fn insert_bounded(
    items: &mut Vec<HistoryItem>,
    input_type: InputType,
    content: &str,
    result: &AnalysisResult,
    cap: usize,
) -> HistoryItem {
    let now = Utc::now();
    let item = HistoryItem {
        id: next_id(items, now),
        input_type,
        content: truncate_chars(content, HISTORY_CONTENT_MAX_CHARS),
        result: result.clone(),
        timestamp: now,
    };
    items.insert(0, item.clone());
    if items.len() > cap {
        let evicted = items.len() - cap;
        items.truncate(cap);
        tracing::debug!(evicted, cap, "History cap reached, oldest items evicted");
    }
    item
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, HistoryError> {
    mutex.lock().map_err(|_| HistoryError::LockPoisoned)
}

// =============================================================================
// In-memory store
// =============================================================================

/// History held in process memory only. Used by tests and by runs with
/// history persistence turned off.
#[derive(Debug)]
pub struct MemoryHistoryStore {
    items: Mutex<Vec<HistoryItem>>,
    max_items: usize,
}

impl MemoryHistoryStore {
    pub fn new(max_items: usize) -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            max_items: max_items.max(1),
        }
    }
}

impl Default for MemoryHistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_MAX_ITEMS)
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn append(
        &self,
        input_type: InputType,
        content: &str,
        result: &AnalysisResult,
    ) -> Result<HistoryItem, HistoryError> {
        let mut items = lock(&self.items)?;
        Ok(insert_bounded(
            &mut items,
            input_type,
            content,
            result,
            self.max_items,
        ))
    }

    fn list(&self) -> Vec<HistoryItem> {
        // A poisoned lock still holds a consistent Vec: every mutation is
        // a single insert/truncate/retain/clear call.
        match self.items.lock() {
            Ok(items) => items.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn delete_by_id(&self, id: &str) -> Result<bool, HistoryError> {
        let mut items = lock(&self.items)?;
        let before = items.len();
        items.retain(|item| item.id != id);
        Ok(items.len() != before)
    }

    fn clear(&self) -> Result<(), HistoryError> {
        lock(&self.items)?.clear();
        Ok(())
    }
}

// =============================================================================
// JSON file store
// =============================================================================

/// Resolve the history file path from the platform data directory.
pub fn history_path(data_dir: &Path) -> PathBuf {
    data_dir.join(HISTORY_FILE_NAME)
}

/// History persisted as one JSON array in a single file.
#[derive(Debug)]
pub struct JsonFileHistoryStore {
    path: PathBuf,
    max_items: usize,
    /// Serialises read-modify-write cycles within this process.
    writer: Mutex<()>,
}

impl JsonFileHistoryStore {
    /// Store backed by `history.json` inside `data_dir`.
    pub fn new(data_dir: &Path, max_items: usize) -> Self {
        Self::with_path(history_path(data_dir), max_items)
    }

    /// Store backed by an explicit file path.
    pub fn with_path(path: PathBuf, max_items: usize) -> Self {
        Self {
            path,
            max_items: max_items.max(1),
            writer: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored array. Any failure reads as an empty history.
    fn load(&self) -> Vec<HistoryItem> {
        let path = &self.path;

        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > MAX_HISTORY_FILE_SIZE => {
                tracing::warn!(
                    path = %path.display(),
                    size = meta.len(),
                    max = MAX_HISTORY_FILE_SIZE,
                    "History file exceeds size limit, treating as empty"
                );
                return Vec::new();
            }
            Ok(_) => {}
            Err(e) => {
                // "Not found" is the normal first-run case.
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %e, "Cannot stat history file");
                }
                return Vec::new();
            }
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Cannot read history file");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<HistoryItem>>(&content) {
            Ok(items) => {
                tracing::debug!(path = %path.display(), count = items.len(), "History loaded");
                items
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "History file is malformed, treating as empty"
                );
                Vec::new()
            }
        }
    }

    /// Save `items` atomically (write temp → rename).
    fn save(&self, items: &[HistoryItem]) -> Result<(), HistoryError> {
        let path = &self.path;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| HistoryError::Io {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let json = serde_json::to_string(items).map_err(|e| HistoryError::Serialize {
            path: path.clone(),
            source: e,
        })?;

        // A crash between write and rename loses the new history but never
        // corrupts the previous one.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json.as_bytes()).map_err(|e| HistoryError::Io {
            path: tmp.clone(),
            operation: "write",
            source: e,
        })?;

        std::fs::rename(&tmp, path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            HistoryError::Io {
                path: path.clone(),
                operation: "rename",
                source: e,
            }
        })?;

        tracing::debug!(path = %path.display(), count = items.len(), "History saved");
        Ok(())
    }
}

impl HistoryStore for JsonFileHistoryStore {
    fn append(
        &self,
        input_type: InputType,
        content: &str,
        result: &AnalysisResult,
    ) -> Result<HistoryItem, HistoryError> {
        let _guard = lock(&self.writer)?;
        let mut items = self.load();
        let item = insert_bounded(&mut items, input_type, content, result, self.max_items);
        self.save(&items)?;
        tracing::info!(id = %item.id, verdict = %item.result.verdict, "Analysis saved to history");
        Ok(item)
    }

    fn list(&self) -> Vec<HistoryItem> {
        self.load()
    }

    fn delete_by_id(&self, id: &str) -> Result<bool, HistoryError> {
        let _guard = lock(&self.writer)?;
        let mut items = self.load();
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Ok(false);
        }
        self.save(&items)?;
        tracing::info!(id, "History item deleted");
        Ok(true)
    }

    fn clear(&self) -> Result<(), HistoryError> {
        let _guard = lock(&self.writer)?;
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "History cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(HistoryError::Io {
                path: self.path.clone(),
                operation: "remove",
                source: e,
            }),
        }
    }
}

// =============================================================================
// Unit tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analyzer::{analyze, FixedRandom};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn result_for(content: &str) -> AnalysisResult {
        analyze(InputType::Text, content, &mut FixedRandom(0), Utc::now())
    }

    fn file_store(dir: &TempDir, cap: usize) -> JsonFileHistoryStore {
        JsonFileHistoryStore::new(dir.path(), cap)
    }

    #[test]
    fn test_next_id_uses_millis_when_fresh() {
        let now = Utc::now();
        assert_eq!(next_id(&[], now), now.timestamp_millis().to_string());
    }

    #[test]
    fn test_next_id_bumps_past_existing() {
        let store = MemoryHistoryStore::new(10);
        let r = result_for("Hi");
        let a = store.append(InputType::Text, "a", &r).unwrap();
        let b = store.append(InputType::Text, "b", &r).unwrap();
        let c = store.append(InputType::Text, "c", &r).unwrap();
        let ids: Vec<i64> = [a, b, c].iter().map(|i| i.id.parse().unwrap()).collect();
        assert!(ids[0] < ids[1] && ids[1] < ids[2], "ids not increasing: {ids:?}");
    }

    #[test]
    fn test_file_store_append_after_max_id_does_not_overflow() {
        let dir = TempDir::new().unwrap();
        let r = result_for("hi");
        let legacy = HistoryItem {
            id: i64::MAX.to_string(),
            input_type: InputType::Text,
            content: "legacy".to_string(),
            result: r.clone(),
            timestamp: r.timestamp,
        };
        std::fs::write(
            history_path(dir.path()),
            serde_json::to_string(&vec![legacy]).unwrap(),
        )
        .unwrap();

        let store = file_store(&dir, 10);
        let item = store.append(InputType::Text, "fresh", &r).unwrap();
        let id: i64 = item.id.parse().unwrap();
        assert!(id > 0, "id wrapped negative: {id}");
        assert_ne!(id, i64::MAX);
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn test_memory_store_newest_first_and_capped() {
        let store = MemoryHistoryStore::new(3);
        let r = result_for("Hi");
        for n in 0..5 {
            store.append(InputType::Text, &format!("item {n}"), &r).unwrap();
        }
        let contents: Vec<String> = store.list().into_iter().map(|i| i.content).collect();
        assert_eq!(contents, vec!["item 4", "item 3", "item 2"]);
    }

    #[test]
    fn test_memory_store_delete_and_clear() {
        let store = MemoryHistoryStore::default();
        let r = result_for("Hi");
        let a = store.append(InputType::Url, "a", &r).unwrap();
        store.append(InputType::Url, "b", &r).unwrap();

        assert!(store.delete_by_id(&a.id).unwrap());
        assert!(!store.delete_by_id(&a.id).unwrap());
        assert_eq!(store.list().len(), 1);
        assert!(store.get(&a.id).is_none());

        store.clear().unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_file_store_round_trip_truncates_content() {
        let dir = TempDir::new().unwrap();
        let store = file_store(&dir, 50);
        let long = "é".repeat(HISTORY_CONTENT_MAX_CHARS + 30);
        let r = result_for(&long);

        let saved = store.append(InputType::Headline, &long, &r).unwrap();
        let listed = store.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], saved);
        assert_eq!(listed[0].content.chars().count(), HISTORY_CONTENT_MAX_CHARS);
        assert_eq!(listed[0].result, r);
        assert_eq!(listed[0].input_type, InputType::Headline);
    }

    #[test]
    fn test_file_store_missing_file_lists_empty() {
        let dir = TempDir::new().unwrap();
        assert!(file_store(&dir, 50).list().is_empty());
    }

    #[test]
    fn test_file_store_malformed_file_lists_empty_then_recovers() {
        let dir = TempDir::new().unwrap();
        let store = file_store(&dir, 50);
        std::fs::write(store.path(), b"not valid json {{{{").unwrap();
        assert!(store.list().is_empty());

        store.append(InputType::Text, "fresh", &result_for("fresh")).unwrap();
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_file_store_creates_data_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = JsonFileHistoryStore::new(&nested, 50);
        store.append(InputType::Text, "x", &result_for("x")).unwrap();
        assert!(nested.join(HISTORY_FILE_NAME).exists());
    }

    #[test]
    fn test_file_store_clear_removes_file() {
        let dir = TempDir::new().unwrap();
        let store = file_store(&dir, 50);
        store.append(InputType::Text, "x", &result_for("x")).unwrap();
        assert!(store.path().exists());

        store.clear().unwrap();
        assert!(!store.path().exists());
        assert!(store.list().is_empty());
        // Clearing an already empty history is not an error.
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_delete_unknown_id_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let store = file_store(&dir, 50);
        store.append(InputType::Text, "x", &result_for("x")).unwrap();
        assert!(!store.delete_by_id("does-not-exist").unwrap());
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_file_store_leftover_temp_file_does_not_break_save() {
        let dir = TempDir::new().unwrap();
        let store = file_store(&dir, 50);
        store.append(InputType::Text, "one", &result_for("one")).unwrap();
        std::fs::write(store.path().with_extension("json.tmp"), b"garbage").unwrap();

        store.append(InputType::Text, "two", &result_for("two")).unwrap();
        let contents: Vec<String> = store.list().into_iter().map(|i| i.content).collect();
        assert_eq!(contents, vec!["two", "one"]);
    }

    /// Appends from several threads through one store must not lose items.
    #[test]
    fn test_file_store_concurrent_appends_lose_nothing() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(file_store(&dir, 100));
        let r = result_for("Hi");

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = Arc::clone(&store);
                let r = r.clone();
                std::thread::spawn(move || {
                    for n in 0..5 {
                        store
                            .append(InputType::Text, &format!("t{t}-{n}"), &r)
                            .unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let items = store.list();
        assert_eq!(items.len(), 20);
        let mut ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 20, "ids must be unique");
    }
}
