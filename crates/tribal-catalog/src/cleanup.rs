//! Best-effort cleanup of files that could not be deleted.
//!
//! The document store and the buckets share no transaction, so a file
//! deletion can fail after the document that owned the file has already
//! changed. Such files are parked here and re-attempted on request
//! (at-least-once: a file already gone counts as cleaned).

use std::sync::Mutex;

use tribal_types::FileRef;

/// Files awaiting deletion, in the order they were parked.
#[derive(Debug, Default)]
pub struct CleanupQueue {
    pending: Mutex<Vec<FileRef>>,
}

impl CleanupQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park a file. A file already parked is not added twice.
    pub fn push(&self, file: FileRef) {
        let mut pending = self.pending.lock().expect("lock poisoned");
        if !pending.contains(&file) {
            pending.push(file);
        }
    }

    /// Copy of the parked files.
    pub fn snapshot(&self) -> Vec<FileRef> {
        self.pending.lock().expect("lock poisoned").clone()
    }

    /// Remove and return every parked file.
    pub fn drain(&self) -> Vec<FileRef> {
        std::mem::take(&mut *self.pending.lock().expect("lock poisoned"))
    }

    pub fn len(&self) -> usize {
        self.pending.lock().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of one cleanup pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub removed: Vec<FileRef>,
    pub still_pending: Vec<FileRef>,
}

impl CleanupReport {
    pub fn is_complete(&self) -> bool {
        self.still_pending.is_empty()
    }
}
