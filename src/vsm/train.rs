use tracing::debug;

use crate::error::Result;
use crate::vsm::{corpus::TrainedRecord, document::Document, tfidf::TfIdfEngine, Vsm};

impl<E> Vsm<E>
where
    E: TfIdfEngine,
{
    /// Train a single document.
    ///
    /// Either the document becomes visible in both the term statistics and
    /// the corpus, or normalization fails and nothing is mutated.
    /// Each unique term of the document bumps its document frequency once,
    /// however many times it occurs.
    pub fn train_one(&self, document: Document) -> Result<()> {
        let term_freq = self.term_freq(&document.text)?;

        self.stats.add_set(term_freq.term_set_iter());

        let unique_terms = term_freq.term_num();
        let label = document.label.clone();
        let index = self.corpus.append(TrainedRecord::new(document, term_freq));
        debug!(label = %label, unique_terms, index, "trained document");
        Ok(())
    }

    /// Train documents in order, stopping at the first failure.
    /// Documents trained before the failure stay trained.
    pub fn train_all<I>(&self, documents: I) -> Result<usize>
    where
        I: IntoIterator<Item = Document>,
    {
        let mut trained = 0;
        for document in documents {
            self.train_one(document)?;
            trained += 1;
        }
        Ok(trained)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use crate::error::{BoxError, VsmError};
    use crate::vsm::{document::Document, Vsm};

    #[test]
    fn doc_frequency_counts_documents_not_occurrences() {
        let vsm = Vsm::new();
        vsm.train_one(Document::new("silver silver silver truck", "d1")).unwrap();
        vsm.train_one(Document::new("Silver gold", "d2")).unwrap();

        assert_eq!(vsm.doc_frequency("silver"), Some(2));
        assert_eq!(vsm.doc_frequency("truck"), Some(1));
        assert_eq!(vsm.doc_frequency("gold"), Some(1));
        assert_eq!(vsm.doc_frequency("copper"), None);
        assert_eq!(vsm.len(), 2);
    }

    #[test]
    fn failed_normalization_leaves_state_untouched() {
        let vsm = Vsm::new().with_normalizer(|s: &str| -> Result<String, BoxError> {
            if s.contains("poison") { Err("poisoned".into()) } else { Ok(s.to_owned()) }
        });
        vsm.train_one(Document::new("gold truck", "d1")).unwrap();

        let err = vsm.train_one(Document::new("poison gold", "d2")).unwrap_err();
        assert!(matches!(err, VsmError::Normalize(_)));
        assert_eq!(vsm.len(), 1);
        assert_eq!(vsm.doc_frequency("gold"), Some(1));
        assert_eq!(vsm.doc_frequency("poison"), None);
    }

    #[test]
    fn train_all_stops_at_first_error() {
        let vsm = Vsm::new().with_normalizer(|s: &str| -> Result<String, BoxError> {
            if s.is_empty() { Err("empty".into()) } else { Ok(s.to_owned()) }
        });
        let docs = vec![
            Document::new("a", "1"),
            Document::new("", "2"),
            Document::new("c", "3"),
        ];
        assert!(vsm.train_all(docs).is_err());
        assert_eq!(vsm.len(), 1);
        assert_eq!(vsm.documents(), vec![Document::new("a", "1")]);
    }

    #[test]
    fn concurrent_training_keeps_counters_consistent() {
        let vsm = Arc::new(Vsm::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let vsm = Arc::clone(&vsm);
                thread::spawn(move || {
                    for i in 0..50 {
                        vsm.train_one(Document::new(format!("common common t{t}"), format!("{t}-{i}")))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(vsm.len(), 200);
        assert_eq!(vsm.documents().len(), 200);
        assert_eq!(vsm.doc_frequency("common"), Some(200));
        for t in 0..4 {
            assert_eq!(vsm.doc_frequency(&format!("t{t}")), Some(50));
        }
    }
}
