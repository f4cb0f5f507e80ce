use std::fmt::Debug;

use crate::error::BoxError;

/// Characters carrying the Unicode `Hyphen` property
pub const HYPHENS: &[char] = &[
    '\u{002D}', '\u{00AD}', '\u{058A}', '\u{1806}', '\u{2010}', '\u{2011}',
    '\u{2E17}', '\u{30FB}', '\u{FE63}', '\u{FF0D}', '\u{FF65}',
];

/// Sentence filter applied to every training text and every query
/// before tokenization.
///
/// Returning an error marks the sentence as un-tokenizable:
/// training of that document or the search is aborted without touching
/// the engine's state.
///
/// Any `Fn(&str) -> Result<String, BoxError>` is a normalizer.
///
/// # Examples
/// ```
/// use vsm_ranker::{Normalizer, CharMap};
/// let n = CharMap::hyphens_to_spaces();
/// assert_eq!(n.normalize("gold-arrived").unwrap(), "gold arrived");
/// ```
pub trait Normalizer: Send + Sync {
    fn normalize(&self, sentence: &str) -> Result<String, BoxError>;
}

impl<F> Normalizer for F
where
    F: Fn(&str) -> Result<String, BoxError> + Send + Sync,
{
    #[inline]
    fn normalize(&self, sentence: &str) -> Result<String, BoxError> {
        self(sentence)
    }
}

/// Leaves the sentence untouched
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl Normalizer for Identity {
    #[inline]
    fn normalize(&self, sentence: &str) -> Result<String, BoxError> {
        Ok(sentence.to_owned())
    }
}

/// Maps every char of the sentence through a function
pub struct CharMap<F = fn(char) -> char> {
    map: F,
}

impl<F> CharMap<F>
where
    F: Fn(char) -> char + Send + Sync,
{
    pub fn new(map: F) -> Self {
        Self { map }
    }
}

impl CharMap {
    /// Replaces every hyphen with a space
    pub fn hyphens_to_spaces() -> Self {
        fn map(c: char) -> char {
            if HYPHENS.contains(&c) { ' ' } else { c }
        }
        CharMap { map: map as fn(char) -> char }
    }
}

impl<F> Normalizer for CharMap<F>
where
    F: Fn(char) -> char + Send + Sync,
{
    fn normalize(&self, sentence: &str) -> Result<String, BoxError> {
        Ok(sentence.chars().map(&self.map).collect())
    }
}

impl<F> Debug for CharMap<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharMap").finish_non_exhaustive()
    }
}

/// Applies normalizers in order.
/// The first failing step aborts the whole chain.
#[derive(Default)]
pub struct Chain {
    steps: Vec<Box<dyn Normalizer>>,
}

impl Chain {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn then<N>(mut self, step: N) -> Self
    where
        N: Normalizer + 'static,
    {
        self.steps.push(Box::new(step));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Normalizer for Chain {
    fn normalize(&self, sentence: &str) -> Result<String, BoxError> {
        let mut out = sentence.to_owned();
        for step in &self.steps {
            out = step.normalize(&out)?;
        }
        Ok(out)
    }
}

impl Debug for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain").field("steps", &self.steps.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_keeps_sentence() {
        assert_eq!(Identity.normalize("Shipment-of gold").unwrap(), "Shipment-of gold");
    }

    #[test]
    fn hyphens_become_spaces() {
        let n = CharMap::hyphens_to_spaces();
        assert_eq!(
            n.normalize("Shipment-of\u{2010}gold\u{2011}arrived").unwrap(),
            "Shipment of gold arrived"
        );
    }

    #[test]
    fn chain_applies_in_order_and_stops_on_error() {
        let chain = Chain::new()
            .then(CharMap::new(|c: char| if c == '_' { '-' } else { c }))
            .then(CharMap::hyphens_to_spaces());
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.normalize("a_b-c").unwrap(), "a b c");

        let failing = Chain::new()
            .then(|_: &str| -> Result<String, BoxError> { Err("boom".into()) })
            .then(CharMap::hyphens_to_spaces());
        let err = failing.normalize("a-b").unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn empty_chain_is_identity() {
        let chain = Chain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.normalize("x y").unwrap(), "x y");
    }
}
