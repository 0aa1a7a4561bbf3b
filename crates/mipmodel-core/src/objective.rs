//! The model objective: linear and quadratic terms plus a direction.

use mipmodel_expr::ids::VariableId;
use mipmodel_expr::{AggregatedTerm, QuadraticTerm, Term, TermError, TermStore, VariablePair};

use crate::types::Sense;

/// Objective function with a sense, linear terms and quadratic terms.
///
/// Minimizes by default.
#[derive(Debug, Clone, Default)]
pub struct Objective {
    sense: Sense,
    linear: TermStore<VariableId>,
    quadratic: TermStore<VariablePair>,
}

impl Objective {
    /// Create a new empty minimization objective.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn is_maximize(&self) -> bool {
        self.sense == Sense::Maximize
    }

    /// True when at least one quadratic pair has a non-zero summed coefficient.
    pub fn is_quadratic(&self) -> bool {
        !self.quadratic.canonical().is_empty()
    }

    pub fn is_linear(&self) -> bool {
        !self.is_quadratic()
    }

    pub fn term(&self, variable: VariableId) -> AggregatedTerm<VariableId> {
        self.linear.term(variable)
    }

    /// Canonical linear terms. Order is unspecified.
    pub fn terms(&self) -> Vec<Term> {
        self.linear.canonical()
    }

    /// Summed coefficient of the product `a * b`; `(a, b)` and `(b, a)` agree.
    pub fn quadratic_term(&self, a: VariableId, b: VariableId) -> AggregatedTerm<VariablePair> {
        self.quadratic.term(VariablePair::new(a, b))
    }

    /// Canonical quadratic terms, one per unordered pair. Order is unspecified.
    pub fn quadratic_terms(&self) -> Vec<QuadraticTerm> {
        self.quadratic.canonical()
    }

    pub fn raw_terms(&self) -> &[Term] {
        self.linear.raw()
    }

    pub fn raw_quadratic_terms(&self) -> &[QuadraticTerm] {
        self.quadratic.raw()
    }

    pub(crate) fn set_sense(&mut self, sense: Sense) {
        self.sense = sense;
    }

    pub(crate) fn push_term(
        &mut self,
        coefficient: f64,
        variable: VariableId,
    ) -> Result<Term, TermError> {
        self.linear.push(coefficient, variable)
    }

    pub(crate) fn push_quadratic_term(
        &mut self,
        coefficient: f64,
        a: VariableId,
        b: VariableId,
    ) -> Result<QuadraticTerm, TermError> {
        self.quadratic.push(coefficient, VariablePair::new(a, b))
    }

    pub(crate) fn canonical_copy(&self) -> Self {
        Self {
            sense: self.sense,
            linear: self.linear.canonicalized(),
            quadratic: self.quadratic.canonicalized(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn v(index: u32) -> VariableId {
        VariableId::new(index)
    }

    #[test]
    fn new_objective_minimizes() {
        let objective = Objective::new();
        assert!(!objective.is_maximize());
        assert!(objective.is_linear());
        assert!(objective.terms().is_empty());
    }

    #[test]
    fn quadratic_classification_uses_canonical_terms() {
        let mut objective = Objective::new();
        objective.push_quadratic_term(1.0, v(0), v(1)).unwrap();
        assert!(objective.is_quadratic());

        objective.push_quadratic_term(-1.0, v(1), v(0)).unwrap();
        assert!(objective.is_linear());
        assert_eq!(objective.raw_quadratic_terms().len(), 2);
        assert_eq!(objective.quadratic_term(v(0), v(1)).definitions(), 2);
    }

    #[test]
    fn canonical_copy_keeps_sense_and_sums() {
        let mut objective = Objective::new();
        objective.set_sense(Sense::Maximize);
        objective.push_term(1.0, v(0)).unwrap();
        objective.push_term(2.0, v(0)).unwrap();
        objective.push_quadratic_term(0.5, v(2), v(1)).unwrap();

        let copy = objective.canonical_copy();
        assert!(copy.is_maximize());
        assert_eq!(copy.raw_terms().len(), 1);
        assert_eq!(copy.term(v(0)).coefficient(), 3.0);
        assert_eq!(copy.quadratic_term(v(1), v(2)).coefficient(), 0.5);
    }
}
