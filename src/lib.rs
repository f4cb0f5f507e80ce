//! In-memory document ranker built on the algebraic vector space model.
//!
//! Documents and queries are represented as sparse vectors over a shared
//! term space, weighted by TF-IDF:
//!
//! ```text
//! w = tf * ln(N / df)
//! ```
//!
//! and compared by the cosine of the angle between them:
//!
//! ```text
//! cosθ = d・q / (|d||q|)
//! ```
//!
//! # Examples
//! ```
//! use vsm_ranker::{Document, Vsm};
//!
//! let vsm = Vsm::new();
//! vsm.train_one(Document::new("Shipment of gold damaged in a fire.", "d1")).unwrap();
//! vsm.train_one(Document::new("Delivery of silver arrived in a silver truck.", "d2")).unwrap();
//! vsm.train_one(Document::new("Shipment of gold arrived in a truck.", "d3")).unwrap();
//!
//! let best = vsm.search("gold silver truck.").unwrap().unwrap();
//! assert_eq!(best.label, "d2");
//! ```
pub mod error;
pub mod utils;
pub mod vsm;

/// Vector space model engine
/// The top-level struct of this crate.
///
/// Internally, it holds:
/// - The document frequency of every term seen
/// - The append-only corpus of trained documents with their term counts
/// - An optional sentence normalizer
///
/// `Vsm<E>` takes the weighting strategy `E` as a generic parameter,
/// `DefaultTfIdfEngine` unless stated otherwise.
///
/// # Thread Safety
/// Training and searching take `&self` and may run concurrently from any
/// number of threads. Share it as `Arc<Vsm>`.
pub use vsm::Vsm;

/// Labeled text, the unit of training and the result of a search
pub use vsm::document::Document;

/// Engine configuration
pub use vsm::config::VsmConfig;

/// Streaming training
/// `Vsm::train_stream` trains documents from a channel on a background task
/// and publishes a `TrainingOutcome` per document on a `TrainingStream`.
pub use vsm::stream::{TrainingOutcome, TrainingStream};

/// Per-document similarity report of `Vsm::similarity_scores`
pub use vsm::evaluate::scoring::Hit;

/// Term counts of one sentence, and the tokenizer feeding them
pub use vsm::term::{tokenize, TermFrequency};

/// TF-IDF weighting strategy
/// Implement `TfIdfEngine` to plug a different weighting into `Vsm<E>`.
pub use vsm::tfidf::{DefaultTfIdfEngine, TfIdfEngine};

/// Sentence normalizers
/// A `Normalizer` runs before tokenization on both training texts and queries.
pub use utils::normalizer::{Chain, CharMap, Identity, Normalizer};

pub use error::{BoxError, Result, VsmError};

/// Cancellation token accepted by `Vsm::train_stream`
pub use tokio_util::sync::CancellationToken;
