pub mod config;
pub mod corpus;
pub mod document;
pub mod evaluate;
pub mod stats;
pub mod stream;
pub mod term;
pub mod tfidf;
pub mod train;

use std::borrow::Cow;
use std::fmt::Debug;
use std::marker::PhantomData;

use tracing::warn;

use crate::error::{Result, VsmError};
use crate::utils::normalizer::Normalizer;
use crate::vsm::{
    config::VsmConfig,
    corpus::DocCorpus,
    document::Document,
    stats::TermStats,
    term::TermFrequency,
    tfidf::{DefaultTfIdfEngine, TfIdfEngine},
};

/// Vector space model engine.
///
/// Holds the term statistics and the append-only corpus shared by training
/// and ranking. All operations take `&self`; share the engine across threads
/// with `Arc<Vsm>`.
pub struct Vsm<E = DefaultTfIdfEngine>
where
    E: TfIdfEngine,
{
    /// document frequency per term
    pub(crate) stats: TermStats,
    /// trained documents in training order
    pub(crate) corpus: DocCorpus,
    /// applied to training texts and queries; identity when unset
    normalizer: Option<Box<dyn Normalizer>>,
    config: VsmConfig,
    _marker: PhantomData<E>,
}

impl Vsm {
    /// Create an engine with the default TF-IDF weighting and no normalizer
    pub fn new() -> Self {
        Self::with_engine()
    }
}

impl Default for Vsm {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Vsm<E>
where
    E: TfIdfEngine,
{
    /// Create an engine using the weighting strategy `E`
    pub fn with_engine() -> Self {
        Self {
            stats: TermStats::new(),
            corpus: DocCorpus::new(),
            normalizer: None,
            config: VsmConfig::default(),
            _marker: PhantomData,
        }
    }

    /// Set the normalizer applied to every sentence and query
    pub fn with_normalizer<N>(mut self, normalizer: N) -> Self
    where
        N: Normalizer + 'static,
    {
        self.normalizer = Some(Box::new(normalizer));
        self
    }

    pub fn with_config(mut self, config: VsmConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &VsmConfig {
        &self.config
    }

    /// Number of trained documents
    #[inline]
    pub fn len(&self) -> u64 {
        self.corpus.count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of trained documents containing `term`.
    /// The term is looked up as-is, without normalization.
    pub fn doc_frequency(&self, term: &str) -> Option<u64> {
        self.stats.get(term)
    }

    /// Number of distinct terms seen so far
    pub fn vocab_size(&self) -> usize {
        self.stats.vocab_size()
    }

    /// Copies of every trained document in training order
    pub fn documents(&self) -> Vec<Document> {
        self.corpus.documents()
    }

    /// Run the normalizer over a sentence
    pub(crate) fn normalize<'a>(&self, sentence: &'a str) -> Result<Cow<'a, str>> {
        match &self.normalizer {
            Some(normalizer) => normalizer
                .normalize(sentence)
                .map(Cow::Owned)
                .map_err(|e| {
                    warn!(error = %e, "normalizer rejected sentence");
                    VsmError::Normalize(e)
                }),
            None => Ok(Cow::Borrowed(sentence)),
        }
    }

    /// Normalize and tokenize a sentence into its term counts
    pub(crate) fn term_freq(&self, sentence: &str) -> Result<TermFrequency> {
        let sentence = self.normalize(sentence)?;
        Ok(TermFrequency::from_sentence(&sentence))
    }
}

impl<E> Debug for Vsm<E>
where
    E: TfIdfEngine,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vsm")
            .field("documents", &self.corpus.count())
            .field("vocab_size", &self.stats.vocab_size())
            .field("normalizer", &self.normalizer.is_some())
            .field("config", &self.config)
            .finish()
    }
}
