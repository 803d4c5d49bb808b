//! Per-root-invocation import cache.
//!
//! Shared by reference among a parser and its transitively spawned child
//! parsers, the same table visible to every file reached by `@import` from
//! one root. Parsing is sequential — no `@import` runs concurrently with
//! another — so a `RefCell` is sufficient; no locking is needed.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::value::{Constants, Object};

/// The memoised result of fully parsing one imported file.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub values: Object,
    pub constants: Constants,
}

/// Tracks completed parses by absolute path, plus the set of paths whose
/// parse is currently in progress higher up the same import chain — the
/// mechanism that detects both direct self-imports and indirect cycles
/// (`A -> B -> A`), per the open question resolved in SPEC_FULL.md.
#[derive(Debug, Default)]
pub struct ImportCache {
    entries: RefCell<HashMap<PathBuf, Rc<CacheEntry>>>,
    in_progress: RefCell<HashSet<PathBuf>>,
}

impl ImportCache {
    pub fn new() -> Self {
        ImportCache { entries: RefCell::new(HashMap::new()), in_progress: RefCell::new(HashSet::new()) }
    }

    pub fn get(&self, path: &Path) -> Option<Rc<CacheEntry>> {
        self.entries.borrow().get(path).cloned()
    }

    pub fn is_in_progress(&self, path: &Path) -> bool {
        self.in_progress.borrow().contains(path)
    }

    /// Registers `path` as being parsed. Callers must pair this with
    /// [`ImportCache::finish`] or [`ImportCache::abandon`].
    pub fn begin(&self, path: PathBuf) {
        self.in_progress.borrow_mut().insert(path);
    }

    /// Completes a successful parse of `path`, moving it from in-progress to
    /// the completed cache, and returns the shared entry.
    pub fn finish(&self, path: PathBuf, entry: CacheEntry) -> Rc<CacheEntry> {
        self.in_progress.borrow_mut().remove(&path);
        let entry = Rc::new(entry);
        self.entries.borrow_mut().insert(path, entry.clone());
        entry
    }

    /// Unregisters `path` after a failed parse, without caching a result.
    pub fn abandon(&self, path: &Path) {
        self.in_progress.borrow_mut().remove(path);
    }
}
