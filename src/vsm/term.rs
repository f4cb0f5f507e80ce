use ahash::RandomState;
use indexmap::IndexMap;

/// Splits a normalized sentence into terms.
///
/// The sentence is split on single spaces, then each piece is lower-cased
/// and trimmed. Repeated spaces yield empty terms which are kept as their
/// own bucket.
#[inline]
pub fn tokenize(sentence: &str) -> impl Iterator<Item = String> + '_ {
    sentence.split(' ').map(|piece| piece.to_lowercase().trim().to_owned())
}

/// TermFrequency struct
/// Sparse term -> occurrence count map of one sentence.
/// Iteration follows first-sighting order so sums over it are reproducible.
///
/// # Examples
/// ```
/// use vsm_ranker::TermFrequency;
/// let tf = TermFrequency::from_sentence("Silver truck silver");
///
/// assert_eq!(tf.term_count("silver"), 2);
/// assert_eq!(tf.term_num(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermFrequency {
    term_count: IndexMap<Box<str>, u64, RandomState>,
    total_term_count: u64,
}

impl TermFrequency {
    /// Create a new TermFrequency
    pub fn new() -> Self {
        TermFrequency {
            term_count: IndexMap::with_hasher(RandomState::new()),
            total_term_count: 0,
        }
    }

    /// Tokenize a normalized sentence and count its terms
    pub fn from_sentence(sentence: &str) -> Self {
        let mut tf = Self::new();
        for term in tokenize(sentence) {
            tf.add_term(&term);
        }
        tf
    }

    /// Add a term
    ///
    /// # Arguments
    /// * `term` - term to add
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        if let Some(count) = self.term_count.get_mut(term) {
            *count += 1;
        } else {
            self.term_count.insert(term.into(), 1);
        }
        self.total_term_count += 1;
        self
    }

    /// Add multiple terms
    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }

    /// Occurrence count of a term, 0 if absent
    #[inline]
    pub fn term_count(&self, term: &str) -> u64 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// Iterate `(term, count)` in first-sighting order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_count.iter().map(|(term, &count)| (term.as_ref(), count))
    }

    /// Unique terms in first-sighting order
    #[inline]
    pub fn term_set_iter(&self) -> impl Iterator<Item = &str> {
        self.term_count.keys().map(|term| term.as_ref())
    }

    /// Sum of all counts
    #[inline]
    pub fn term_sum(&self) -> u64 {
        self.total_term_count
    }

    /// Number of unique terms
    #[inline]
    pub fn term_num(&self) -> usize {
        self.term_count.len()
    }

    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.term_count.contains_key(term)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.term_count.is_empty()
    }

    pub fn shrink_to_fit(&mut self) {
        self.term_count.shrink_to_fit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_lowercases_and_trims() {
        let terms: Vec<String> = tokenize("Shipment OF Gold.\t").collect();
        assert_eq!(terms, vec!["shipment", "of", "gold."]);
    }

    #[test]
    fn tokenize_keeps_empty_pieces() {
        let terms: Vec<String> = tokenize("a  b").collect();
        assert_eq!(terms, vec!["a", "", "b"]);

        let tf = TermFrequency::from_sentence("a  b");
        assert_eq!(tf.term_count(""), 1);
        assert_eq!(tf.term_num(), 3);
    }

    #[test]
    fn counts_repeated_terms() {
        let tf = TermFrequency::from_sentence("Delivery of silver arrived in a silver truck.");
        assert_eq!(tf.term_count("silver"), 2);
        assert_eq!(tf.term_count("truck."), 1);
        assert_eq!(tf.term_count("gold"), 0);
        assert_eq!(tf.term_sum(), 8);
        assert_eq!(tf.term_num(), 7);
    }

    #[test]
    fn iteration_follows_first_sighting() {
        let mut tf = TermFrequency::new();
        tf.add_terms(&["b", "a", "b", "c"]);
        let order: Vec<&str> = tf.term_set_iter().collect();
        assert_eq!(order, vec!["b", "a", "c"]);
        let pairs: Vec<(&str, u64)> = tf.iter().collect();
        assert_eq!(pairs, vec![("b", 2), ("a", 1), ("c", 1)]);
    }
}
