use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard};

use crate::vsm::{document::Document, term::TermFrequency};

/// One trained document with its term counts.
/// Built once at training time and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct TrainedRecord {
    document: Document,
    term_freq: TermFrequency,
}

impl TrainedRecord {
    pub fn new(document: Document, mut term_freq: TermFrequency) -> Self {
        term_freq.shrink_to_fit();
        Self { document, term_freq }
    }

    pub fn text(&self) -> &str {
        &self.document.text
    }

    pub fn label(&self) -> &str {
        &self.document.label
    }

    /// Owned copy of the trained document
    pub fn to_document(&self) -> Document {
        self.document.clone()
    }

    pub(crate) fn term_freq(&self) -> &TermFrequency {
        &self.term_freq
    }
}

/// Append-only, ordered collection of trained documents.
///
/// Insertion order is training order and indices are stable.
/// The running total is kept in an atomic so it can be read without
/// taking the read lock.
#[derive(Debug, Default)]
pub struct DocCorpus {
    records: RwLock<Vec<TrainedRecord>>,
    total: AtomicU64,
}

/// Read-locked view over the corpus used for a ranking scan.
/// Appends wait until the snapshot is dropped.
pub struct CorpusSnapshot<'a> {
    guard: RwLockReadGuard<'a, Vec<TrainedRecord>>,
}

impl<'a> CorpusSnapshot<'a> {
    pub fn records(&self) -> &[TrainedRecord] {
        &self.guard
    }

    pub fn len(&self) -> usize {
        self.guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }
}

impl DocCorpus {
    /// Create a new instance
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            total: AtomicU64::new(0),
        }
    }

    /// Append a record under exclusive access and publish the new length.
    /// Returns the index of the record.
    pub fn append(&self, record: TrainedRecord) -> usize {
        // records are pushed whole, a poisoned lock never holds a partial one
        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        records.push(record);
        let len = records.len();
        self.total.store(len as u64, Ordering::Release);
        len - 1
    }

    /// Read-locked view for scanning
    pub fn snapshot_for_scan(&self) -> CorpusSnapshot<'_> {
        CorpusSnapshot {
            guard: self.records.read().unwrap_or_else(|e| e.into_inner()),
        }
    }

    /// Number of trained documents, as of the last completed append
    #[inline]
    pub fn count(&self) -> u64 {
        self.total.load(Ordering::Acquire)
    }

    /// Copies of every trained document in training order
    pub fn documents(&self) -> Vec<Document> {
        self.snapshot_for_scan()
            .records()
            .iter()
            .map(TrainedRecord::to_document)
            .collect()
    }
}
