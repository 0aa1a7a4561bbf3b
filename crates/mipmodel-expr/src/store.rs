//! Append-only term storage with lazy canonicalization.
//!
//! Terms are never merged at insertion time. The raw sequence keeps every
//! call and its provenance; [`TermStore::canonical`] aggregates repeats on
//! read, one entry per key, and drops keys whose coefficients sum to zero.

use std::collections::BTreeMap;

use crate::error::TermError;
use crate::term::{Term, TermKey};

/// Sum of every raw definition for one key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregatedTerm<K> {
    term: Term<K>,
    definitions: usize,
}

impl<K: TermKey> AggregatedTerm<K> {
    /// Synthesized term carrying the summed coefficient.
    pub fn term(&self) -> Term<K> {
        self.term
    }

    pub fn coefficient(&self) -> f64 {
        self.term.coefficient()
    }

    /// Number of raw terms that referenced the key.
    pub fn definitions(&self) -> usize {
        self.definitions
    }
}

#[derive(Debug, Clone)]
pub struct TermStore<K> {
    raw: Vec<Term<K>>,
}

impl<K: TermKey> TermStore<K> {
    pub fn new() -> Self {
        Self { raw: Vec::new() }
    }

    /// Append a raw term. The store is left untouched when the coefficient is NaN.
    pub fn push(&mut self, coefficient: f64, key: K) -> Result<Term<K>, TermError> {
        if coefficient.is_nan() {
            return Err(TermError::NanCoefficient);
        }
        let term = Term::new(coefficient, key);
        self.raw.push(term);
        Ok(term)
    }

    /// Raw terms in insertion order.
    pub fn raw(&self) -> &[Term<K>] {
        &self.raw
    }

    /// Number of raw terms, repeats included.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Aggregate every raw definition of `key`.
    ///
    /// Keys never referenced report a zero coefficient and zero definitions.
    pub fn term(&self, key: K) -> AggregatedTerm<K> {
        let mut coefficient = 0.0;
        let mut definitions = 0;
        for term in self.raw.iter().filter(|term| term.key() == key) {
            coefficient += term.coefficient();
            definitions += 1;
        }
        AggregatedTerm {
            term: Term::new(coefficient, key),
            definitions,
        }
    }

    /// One term per key with a non-zero aggregated coefficient.
    ///
    /// Coefficients are summed in insertion order. Callers must not rely on
    /// the order of the returned terms; sort by key when order matters.
    pub fn canonical(&self) -> Vec<Term<K>> {
        let mut merged: BTreeMap<K, f64> = BTreeMap::new();
        for term in &self.raw {
            if term.coefficient() == 0.0 {
                continue;
            }
            *merged.entry(term.key()).or_insert(0.0) += term.coefficient();
        }
        merged
            .into_iter()
            .filter(|(_, coefficient)| *coefficient != 0.0)
            .map(|(key, coefficient)| Term::new(coefficient, key))
            .collect()
    }

    /// Independent store holding only the canonical terms of this one.
    pub fn canonicalized(&self) -> Self {
        Self {
            raw: self.canonical(),
        }
    }
}

impl<K: TermKey> Default for TermStore<K> {
    fn default() -> Self {
        Self::new()
    }
}
