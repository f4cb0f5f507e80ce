use std::fmt::Debug;

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::error::Result;
use crate::vsm::{
    corpus::TrainedRecord, document::Document, term::TermFrequency, tfidf::TfIdfEngine, Vsm,
};

/// Similarity of one trained document to a query
#[derive(Clone, PartialEq)]
pub struct Hit {
    /// position of the document in training order
    pub index: usize,
    pub document: Document,
    /// cosine similarity, 0.0 when undefined
    pub score: f64,
}

impl Debug for Hit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {:?}: {:.6}", self.index, self.document.label, self.score)
    }
}

/// Query side of a scan: term counts plus the query vector magnitude
struct QueryVector {
    term_freq: TermFrequency,
    magnitude: f64,
    doc_num: u64,
}

impl<E> Vsm<E>
where
    E: TfIdfEngine,
{
    /// Most similar trained document to `query`.
    ///
    /// Returns `Ok(None)` when nothing scores above zero: empty corpus,
    /// no known query terms, or every similarity undefined.
    /// Among equal scores the earliest trained document wins.
    /// The returned document is a copy.
    pub fn search(&self, query: &str) -> Result<Option<Document>> {
        let Some(query) = self.query_vector(query)? else {
            debug!("search: no scorable query terms");
            return Ok(None);
        };

        let snapshot = self.corpus.snapshot_for_scan();
        let records = snapshot.records();

        let best = if records.len() >= self.config().parallel_scan_threshold {
            records
                .par_iter()
                .enumerate()
                .map(|(idx, record)| (idx, self.cosine(record, &query)))
                .filter(|&(_, score)| score > 0.0)
                .reduce_with(|a, b| {
                    // strictly greater wins, equal scores keep the lower index
                    if b.1 > a.1 || (b.1 == a.1 && b.0 < a.0) { b } else { a }
                })
        } else {
            let mut best: Option<(usize, f64)> = None;
            let mut max_score = 0.0;
            for (idx, record) in records.iter().enumerate() {
                let score = self.cosine(record, &query);
                if score > max_score {
                    max_score = score;
                    best = Some((idx, score));
                }
            }
            best
        };

        Ok(best.map(|(idx, score)| {
            let record = &records[idx];
            debug!(label = %record.label(), index = idx, score, "search: best match");
            record.to_document()
        }))
    }

    /// Cosine similarity of every trained document to `query`, in training
    /// order. Undefined similarities are reported as 0.0.
    pub fn similarity_scores(&self, query: &str) -> Result<Vec<Hit>> {
        let query = self.query_vector(query)?;
        let snapshot = self.corpus.snapshot_for_scan();
        let hits = snapshot
            .records()
            .iter()
            .enumerate()
            .map(|(index, record)| Hit {
                index,
                document: record.to_document(),
                score: query.as_ref().map_or(0.0, |q| self.cosine(record, q)),
            })
            .collect();
        Ok(hits)
    }

    /// Normalize and weigh the query.
    /// `None` when there is nothing to compare against.
    fn query_vector(&self, query: &str) -> Result<Option<QueryVector>> {
        let term_freq = self.term_freq(query)?;

        let doc_num = self.corpus.count();
        if doc_num == 0 {
            return Ok(None);
        }

        let sum: f64 = term_freq
            .iter()
            .filter_map(|(term, count)| {
                let idf = self.idf(term, doc_num)?;
                Some(E::weight(count, idf).powi(2))
            })
            .sum();
        let magnitude = sum.sqrt();
        if !(magnitude > 0.0 && magnitude.is_finite()) {
            return Ok(None);
        }

        Ok(Some(QueryVector { term_freq, magnitude, doc_num }))
    }

    /// IDF of a known term; unknown terms and non-finite values give `None`
    #[inline]
    fn idf(&self, term: &str, doc_num: u64) -> Option<f64> {
        let doc_freq = self.stats.get(term)?;
        let idf = E::idf(doc_num, doc_freq);
        idf.is_finite().then_some(idf)
    }

    /// cosθ = d・q / (|d||q|)
    /// Walks only the document's own terms.
    fn cosine(&self, record: &TrainedRecord, query: &QueryVector) -> f64 {
        let mut doc_sum = 0_f64;
        let mut coeff = 0_f64;
        for (term, count) in record.term_freq().iter() {
            let Some(idf) = self.idf(term, query.doc_num) else {
                continue;
            };
            let weight = E::weight(count, idf);
            doc_sum += weight.powi(2);
            coeff += weight * E::weight(query.term_freq.term_count(term), idf);
        }
        let score = coeff / (doc_sum.sqrt() * query.magnitude);
        trace!(label = %record.label(), score, "cosine");
        if score.is_finite() { score } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use crate::vsm::{
        config::VsmConfig,
        document::Document,
        tfidf::{DefaultTfIdfEngine, TfIdfEngine},
        Vsm,
    };

    /// Terms found in a single document get an infinite idf
    struct RareIsInfinite;

    impl TfIdfEngine for RareIsInfinite {
        fn idf(doc_num: u64, doc_freq: u64) -> f64 {
            if doc_freq == 1 {
                f64::INFINITY
            } else {
                DefaultTfIdfEngine::idf(doc_num, doc_freq)
            }
        }
    }

    fn gold_silver_corpus(vsm: &Vsm) {
        for (text, label) in [
            ("Shipment of gold damaged in a fire.", "d1"),
            ("Delivery of silver arrived in a silver truck.", "d2"),
            ("Shipment of gold arrived in a truck.", "d3"),
        ] {
            vsm.train_one(Document::new(text, label)).unwrap();
        }
    }

    #[test]
    fn empty_corpus_has_no_match() {
        let vsm = Vsm::new();
        assert_eq!(vsm.search("gold").unwrap(), None);
        assert!(vsm.similarity_scores("gold").unwrap().is_empty());
    }

    #[test]
    fn best_match_by_cosine() {
        let vsm = Vsm::new();
        gold_silver_corpus(&vsm);
        let doc = vsm.search("gold silver truck.").unwrap().unwrap();
        assert_eq!(doc.label, "d2");
        let doc = vsm.search("shipment gold fire.").unwrap().unwrap();
        assert_eq!(doc.label, "d1");
    }

    #[test]
    fn unknown_terms_give_no_match() {
        let vsm = Vsm::new();
        gold_silver_corpus(&vsm);
        assert_eq!(vsm.search("this query should result an empty document.").unwrap(), None);
    }

    #[test]
    fn terms_in_every_document_carry_no_weight() {
        let vsm = Vsm::new();
        gold_silver_corpus(&vsm);
        // "of", "in" and "a" have idf ln(3/3) = 0
        assert_eq!(vsm.search("of in a").unwrap(), None);
    }

    #[test]
    fn equal_scores_keep_earliest_document() {
        let vsm = Vsm::new();
        vsm.train_one(Document::new("alpha beta", "first")).unwrap();
        vsm.train_one(Document::new("alpha beta", "second")).unwrap();
        vsm.train_one(Document::new("gamma", "third")).unwrap();
        let doc = vsm.search("alpha").unwrap().unwrap();
        assert_eq!(doc.label, "first");
    }

    #[test]
    fn parallel_scan_matches_sequential_scan() {
        let sequential = Vsm::new();
        let parallel = Vsm::new().with_config(VsmConfig {
            parallel_scan_threshold: 0,
            ..VsmConfig::default()
        });
        for vsm in [&sequential, &parallel] {
            for i in 0..64 {
                let text = format!("term{} term{} shared filler{}", i % 7, i % 5, i);
                vsm.train_one(Document::new(text, format!("doc{i}"))).unwrap();
            }
        }
        for query in ["term3 term4", "term0", "shared term2 filler9", "nothing"] {
            assert_eq!(sequential.search(query).unwrap(), parallel.search(query).unwrap(), "{query}");
        }
    }

    #[test]
    fn scores_are_reported_in_training_order() {
        let vsm = Vsm::new();
        gold_silver_corpus(&vsm);
        let hits = vsm.similarity_scores("gold silver truck.").unwrap();
        assert_eq!(hits.len(), 3);
        let labels: Vec<&str> = hits.iter().map(|h| h.document.label.as_str()).collect();
        assert_eq!(labels, vec!["d1", "d2", "d3"]);
        assert!(hits[1].score > hits[2].score);
        assert!(hits[2].score > hits[0].score);
        assert!(hits.iter().all(|h| (0.0..=1.0 + 1e-9).contains(&h.score)));
    }

    #[test]
    fn repeated_search_is_stable() {
        let vsm = Vsm::new();
        gold_silver_corpus(&vsm);
        let first = vsm.search("silver truck.").unwrap();
        for _ in 0..10 {
            assert_eq!(vsm.search("silver truck.").unwrap(), first);
        }
    }

    #[test]
    fn returned_document_is_a_copy() {
        let vsm = Vsm::new();
        gold_silver_corpus(&vsm);
        let mut doc = vsm.search("silver").unwrap().unwrap();
        doc.label.push_str("-edited");
        vsm.train_one(Document::new("silver silver silver", "d4")).unwrap();
        assert_eq!(vsm.documents()[1].label, "d2");
    }

    #[test]
    fn non_finite_idf_only_drops_that_term() {
        let vsm = Vsm::<RareIsInfinite>::with_engine();
        for (text, label) in [
            ("gold copper", "a"),
            ("gold silver rare1", "b"),
            ("silver copper copper", "c"),
            ("copper rare2", "d"),
        ] {
            vsm.train_one(Document::new(text, label)).unwrap();
        }

        let doc = vsm.search("gold silver rare1").unwrap().unwrap();
        assert_eq!(doc.label, "b");

        let hits = vsm.similarity_scores("gold silver rare1").unwrap();
        assert!(hits.iter().all(|h| h.score.is_finite()));
        // "rare1" is skipped on both sides, leaving b equal to the query
        assert!((hits[1].score - 1.0).abs() < 1e-9);
        assert!(hits[0].score > hits[2].score);
        assert!(hits[2].score > 0.0);
        assert_eq!(hits[3].score, 0.0);
    }

    #[test]
    fn zero_magnitude_document_scores_zero() {
        let vsm = Vsm::new();
        // "alpha" and "beta" have idf 0, so d1 has no weight at all
        vsm.train_one(Document::new("alpha beta", "d1")).unwrap();
        vsm.train_one(Document::new("alpha beta gamma", "d2")).unwrap();

        let hits = vsm.similarity_scores("gamma").unwrap();
        assert_eq!(hits[0].score, 0.0);
        assert!((hits[1].score - 1.0).abs() < 1e-9);
        assert_eq!(vsm.search("gamma").unwrap().unwrap().label, "d2");

        assert_eq!(vsm.search("alpha beta").unwrap(), None);
        assert!(vsm.similarity_scores("alpha beta").unwrap().iter().all(|h| h.score == 0.0));
    }
}
