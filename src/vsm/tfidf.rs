/// TF-IDF weighting strategy used by the ranking engine.
///
/// `idf` may return a non-finite value for degenerate inputs; the scorer
/// drops such terms instead of letting them poison the similarity.
pub trait TfIdfEngine: Send + Sync {
    /// Inverse document frequency of a term
    /// # Arguments
    /// * `doc_num` - number of trained documents
    /// * `doc_freq` - number of trained documents containing the term
    fn idf(doc_num: u64, doc_freq: u64) -> f64;

    /// Weight of a term occurring `term_freq` times
    #[inline]
    fn weight(term_freq: u64, idf: f64) -> f64 {
        term_freq as f64 * idf
    }
}

/// Textbook TF-IDF
/// `w = tf * ln(N / df)`
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTfIdfEngine;

impl TfIdfEngine for DefaultTfIdfEngine {
    #[inline]
    fn idf(doc_num: u64, doc_freq: u64) -> f64 {
        (doc_num as f64 / doc_freq as f64).ln()
    }
}
