//! Linear and quadratic terms.
//!
//! A term is a coefficient attached to a key: a single variable for linear
//! terms, an unordered variable pair for quadratic terms. Both share the
//! same storage and aggregation machinery through [`TermKey`].

use std::fmt::Debug;

use crate::ids::VariableId;

/// Key a term aggregates on.
pub trait TermKey: Copy + Ord + Debug {}

impl TermKey for VariableId {}

impl TermKey for VariablePair {}

/// Unordered pair of variables, stored lowest index first.
///
/// `VariablePair::new(a, b) == VariablePair::new(b, a)` for all `a`, `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariablePair {
    first: VariableId,
    second: VariableId,
}

impl VariablePair {
    pub fn new(a: VariableId, b: VariableId) -> Self {
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    /// Variable with the lower index.
    pub fn first(self) -> VariableId {
        self.first
    }

    /// Variable with the higher (or equal) index.
    pub fn second(self) -> VariableId {
        self.second
    }

    /// True when both sides reference the same variable.
    pub fn is_square(self) -> bool {
        self.first == self.second
    }
}

/// A coefficient applied to a key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term<K = VariableId> {
    key: K,
    coefficient: f64,
}

/// Coefficient times the product of two variables.
pub type QuadraticTerm = Term<VariablePair>;

impl<K: TermKey> Term<K> {
    pub fn new(coefficient: f64, key: K) -> Self {
        Self { key, coefficient }
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    pub fn key(&self) -> K {
        self.key
    }
}

impl Term<VariableId> {
    pub fn variable(&self) -> VariableId {
        self.key
    }
}

impl Term<VariablePair> {
    /// Quadratic term over `a * b`; the pair is normalized.
    pub fn quadratic(coefficient: f64, a: VariableId, b: VariableId) -> Self {
        Self::new(coefficient, VariablePair::new(a, b))
    }

    pub fn pair(&self) -> VariablePair {
        self.key
    }

    pub fn var1(&self) -> VariableId {
        self.key.first()
    }

    pub fn var2(&self) -> VariableId {
        self.key.second()
    }
}
