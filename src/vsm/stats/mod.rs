use ahash::RandomState;
use dashmap::DashMap;

/// Document frequency of every term ever trained.
///
/// Thread-safe: reads run concurrently, and each increment is a single
/// entry update under the shard's write lock, so no reader observes a
/// torn count. Entries are never removed.
#[derive(Debug, Default)]
pub struct TermStats {
    doc_freq: DashMap<Box<str>, u64, RandomState>,
}

impl TermStats {
    /// Create a new instance
    pub fn new() -> Self {
        Self {
            doc_freq: DashMap::with_hasher(RandomState::new()),
        }
    }

    /// Number of trained documents containing `term`,
    /// `None` if the term was never seen
    #[inline]
    pub fn get(&self, term: &str) -> Option<u64> {
        self.doc_freq.get(term).map(|count| *count)
    }

    /// Increase the document frequency of `term` by one,
    /// creating the entry at zero first if absent
    #[inline]
    pub fn increment_doc_frequency(&self, term: &str) -> u64 {
        let mut count = self.doc_freq.entry(term.into()).or_insert(0);
        *count += 1;
        *count
    }

    /// Increment every term of a document's unique term set
    pub fn add_set<'a, I>(&self, terms: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for term in terms {
            self.increment_doc_frequency(term);
        }
    }

    /// Current vocabulary size (number of unique terms)
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.doc_freq.len()
    }

    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.doc_freq.contains_key(term)
    }
}
