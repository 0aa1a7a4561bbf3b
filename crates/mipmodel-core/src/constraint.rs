//! Constraints: a term store compared against a right-hand side.

use mipmodel_expr::ids::{ConstraintId, VariableId};
use mipmodel_expr::{AggregatedTerm, Term, TermError, TermStore};

use crate::types::ComparisonSense;

/// A linear constraint `sum(terms) <sense> rhs`.
///
/// Terms for the same variable may be added repeatedly; they are summed when
/// read through [`Constraint::term`] or [`Constraint::terms`].
#[derive(Debug, Clone)]
pub struct Constraint {
    id: ConstraintId,
    sense: ComparisonSense,
    rhs: f64,
    terms: TermStore<VariableId>,
}

impl Constraint {
    pub(crate) fn new(id: ConstraintId, sense: ComparisonSense, rhs: f64) -> Self {
        Self {
            id,
            sense,
            rhs,
            terms: TermStore::new(),
        }
    }

    pub fn id(&self) -> ConstraintId {
        self.id
    }

    pub fn sense(&self) -> ComparisonSense {
        self.sense
    }

    pub fn right_hand_side(&self) -> f64 {
        self.rhs
    }

    /// Summed coefficient of `variable` and the number of terms that defined it.
    pub fn term(&self, variable: VariableId) -> AggregatedTerm<VariableId> {
        self.terms.term(variable)
    }

    /// One term per variable with a non-zero summed coefficient, in no
    /// particular order.
    pub fn terms(&self) -> Vec<Term> {
        self.terms.canonical()
    }

    /// Terms exactly as they were added.
    pub fn raw_terms(&self) -> &[Term] {
        self.terms.raw()
    }

    pub(crate) fn push_term(
        &mut self,
        coefficient: f64,
        variable: VariableId,
    ) -> Result<Term, TermError> {
        self.terms.push(coefficient, variable)
    }

    pub(crate) fn canonical_copy(&self) -> Self {
        Self {
            id: self.id,
            sense: self.sense,
            rhs: self.rhs,
            terms: self.terms.canonicalized(),
        }
    }
}
