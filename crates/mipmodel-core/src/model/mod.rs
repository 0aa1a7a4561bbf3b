//! Model module for building optimization models.
//!
//! This module provides the core [`Model`] type: an append-only registry of
//! variables, an append-only set of constraints, and a single objective.
//!
//! # Module Organization
//!
//! - [`error`]: Model error types
//! - [`builder`]: Methods for adding variables, constraints, and terms
//! - [`storage`]: Read access to variables, constraints, and the objective
//! - [`metadata`]: Variable and constraint naming and metadata
//! - [`copy`]: Structural deep copy
//! - [`inspect`]: Model inspection and snapshots
//! - [`pretty`]: Diagnostic text rendering

mod builder;
mod copy;
mod error;
mod inspect;
mod metadata;
mod pretty;
mod storage;

use crate::constraint::Constraint;
use crate::objective::Objective;
use crate::types::{Variable, VariableKind};
use mipmodel_expr::ids::{ConstraintId, VariableId};
use std::collections::BTreeMap;

pub use error::ModelError;
pub use inspect::{
    ConstraintView, InspectOptions, ModelSnapshot, ObjectiveView, QuadraticTermView,
    SnapshotMetadata, TermView, VariableView,
};
pub use pretty::PrettyPrintOptions;

/// An append-only builder for mixed-integer linear and quadratic models.
///
/// Variables and constraints are identified by their creation index. Nothing
/// is ever removed; [`Model::copy`] produces an independent model with the same
/// structure.
#[derive(Debug)]
pub struct Model {
    pub(crate) variables: Vec<Variable>,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) objective: Objective,
    // Lazy-allocated side tables keyed by entity id
    pub(crate) variable_names: Option<BTreeMap<VariableId, String>>,
    pub(crate) constraint_names: Option<BTreeMap<ConstraintId, String>>,
    pub(crate) variable_metadata: Option<BTreeMap<VariableId, serde_json::Value>>,
    pub(crate) constraint_metadata: Option<BTreeMap<ConstraintId, serde_json::Value>>,
}

impl Model {
    /// Create a new empty model.
    pub fn new() -> Self {
        Self {
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: Objective::new(),
            variable_names: None,
            constraint_names: None,
            variable_metadata: None,
            constraint_metadata: None,
        }
    }

    /// Create an empty model with preallocated registries.
    pub fn with_capacities(variables: usize, constraints: usize) -> Self {
        Self {
            variables: Vec::with_capacity(variables),
            constraints: Vec::with_capacity(constraints),
            ..Self::new()
        }
    }

    pub(crate) fn ensure_variable_exists(&self, id: VariableId) -> Result<(), ModelError> {
        if id.index() < self.variables.len() {
            Ok(())
        } else {
            Err(ModelError::InvalidVariableId(id))
        }
    }

    pub(crate) fn ensure_constraint_exists(&self, id: ConstraintId) -> Result<(), ModelError> {
        if id.index() < self.constraints.len() {
            Ok(())
        } else {
            Err(ModelError::InvalidConstraintId(id))
        }
    }

    pub(crate) fn push_variable(&mut self, kind: VariableKind) -> VariableId {
        let id = VariableId::new(self.variables.len() as u32);
        self.variables.push(Variable::new(id, kind));
        id
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn rejected(operation: &'static str, err: ModelError) -> ModelError {
    tracing::debug!(
        component = "model",
        operation,
        status = "error",
        code = err.code(),
        "{err}"
    );
    err
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::{ComparisonSense, Sense};
    use mipmodel_expr::TermError;

    mod copy_pretty;
    mod metadata_inspect;
    mod support;

    #[test]
    fn test_new_model_is_empty() {
        let model = Model::new();
        assert_eq!(model.num_variables(), 0);
        assert_eq!(model.num_constraints(), 0);
        assert!(!model.objective().is_maximize());
    }

    #[test]
    fn test_indices_follow_creation_order_across_kinds() {
        let mut model = Model::new();
        let a = model.new_float(0.0, 1.0).unwrap();
        let b = model.new_bool();
        let c = model.new_int(-3, 3);
        let d = model.new_float(-1.0, 1.0).unwrap();
        let e = model.new_bool();

        let indices: Vec<usize> = [a, b, c, d, e].iter().map(|id| id.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);

        let vars = model.vars();
        for (position, var) in vars.iter().enumerate() {
            assert_eq!(var.index(), position);
        }
        assert!(vars[1].is_bool());
        assert!(vars[2].is_int());
        assert!(vars[3].is_float());
    }

    #[test]
    fn test_new_float_rejects_nan_bounds() {
        let mut model = Model::new();
        model.new_bool();

        let lower = model.new_float(f64::NAN, 1.0);
        assert!(matches!(lower, Err(ModelError::NanBound { .. })));
        let upper = model.new_float(0.0, f64::NAN);
        assert!(matches!(upper, Err(ModelError::NanBound { .. })));
        assert_eq!(model.num_variables(), 1);

        let next = model.new_float(0.0, 1.0).unwrap();
        assert_eq!(next.index(), 1);
    }

    #[test]
    fn test_bounds_are_not_ordered_by_the_model() {
        let mut model = Model::new();
        let x = model.new_float(5.0, 1.0).unwrap();
        let var = model.variable(x).unwrap();
        assert_eq!(var.lower_bound(), 5.0);
        assert_eq!(var.upper_bound(), 1.0);
    }

    #[test]
    fn test_infinite_bounds_are_accepted() {
        let mut model = Model::new();
        let x = model.new_float(f64::NEG_INFINITY, f64::INFINITY).unwrap();
        assert!(model.variable(x).unwrap().lower_bound().is_infinite());
    }

    #[test]
    fn test_new_constraint_rejects_nan_rhs() {
        let mut model = Model::new();
        let result = model.new_constraint(ComparisonSense::Equal, f64::NAN);
        assert_eq!(result, Err(ModelError::NanRightHandSide));
        assert_eq!(model.num_constraints(), 0);
    }

    #[test]
    fn test_constraint_terms_accumulate() {
        let mut model = Model::new();
        let x = model.new_float(10.0, 100.0).unwrap();
        let c = model
            .new_constraint(ComparisonSense::LessEqual, 123.4)
            .unwrap();
        model.add_constraint_term(c, 1.0, x).unwrap();
        model.add_constraint_term(c, 2.0, x).unwrap();

        let constraint = model.constraint(c).unwrap();
        assert_eq!(constraint.sense(), ComparisonSense::LessEqual);
        assert_eq!(constraint.right_hand_side(), 123.4);
        assert_eq!(constraint.raw_terms().len(), 2);

        let terms = constraint.terms();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].variable(), x);
        assert_eq!(terms[0].coefficient(), 3.0);

        let aggregated = constraint.term(x);
        assert_eq!(aggregated.coefficient(), 3.0);
        assert_eq!(aggregated.definitions(), 2);
    }

    #[test]
    fn test_constraint_term_rejects_nan_without_linking() {
        let mut model = Model::new();
        let x = model.new_bool();
        let c = model
            .new_constraint(ComparisonSense::GreaterEqual, 1.0)
            .unwrap();
        model.add_constraint_term(c, 1.0, x).unwrap();

        let result = model.add_constraint_term(c, f64::NAN, x);
        assert_eq!(result, Err(ModelError::Term(TermError::NanCoefficient)));
        assert_eq!(model.constraint(c).unwrap().raw_terms().len(), 1);
    }

    #[test]
    fn test_constraint_term_with_invalid_ids_fails() {
        let mut model = Model::new();
        let x = model.new_bool();
        let c = model.new_constraint(ComparisonSense::Equal, 0.0).unwrap();

        let missing_var = VariableId::new(99);
        assert_eq!(
            model.add_constraint_term(c, 1.0, missing_var),
            Err(ModelError::InvalidVariableId(missing_var))
        );

        let missing_con = ConstraintId::new(5);
        assert_eq!(
            model.add_constraint_term(missing_con, 1.0, x),
            Err(ModelError::InvalidConstraintId(missing_con))
        );
        assert!(model.constraint(c).unwrap().raw_terms().is_empty());
    }

    #[test]
    fn test_objective_sense_toggles() {
        let mut model = Model::new();
        model.set_maximize();
        assert!(model.objective().is_maximize());
        assert_eq!(model.objective().sense(), Sense::Maximize);
        model.set_minimize();
        assert!(!model.objective().is_maximize());
    }

    #[test]
    fn test_objective_terms_scenario() {
        let mut model = Model::new();
        let x = model.new_bool();
        let y = model.new_bool();
        let unused = model.new_bool();

        assert!(model.objective().terms().is_empty());
        let t1 = model.add_objective_term(2.0, x).unwrap();
        let t2 = model.add_objective_term(1.0, x).unwrap();
        let t3 = model.add_objective_term(3.0, y).unwrap();
        assert_eq!((t1.variable(), t1.coefficient()), (x, 2.0));
        assert_eq!((t2.variable(), t2.coefficient()), (x, 1.0));
        assert_eq!((t3.variable(), t3.coefficient()), (y, 3.0));

        let mut terms = model.objective().terms();
        terms.sort_by_key(|term| term.variable());
        let terms: Vec<(VariableId, f64)> = terms
            .iter()
            .map(|term| (term.variable(), term.coefficient()))
            .collect();
        assert_eq!(terms, vec![(x, 3.0), (y, 3.0)]);

        let tx = model.objective().term(x);
        assert_eq!((tx.coefficient(), tx.definitions()), (3.0, 2));
        let ty = model.objective().term(y);
        assert_eq!((ty.coefficient(), ty.definitions()), (3.0, 1));
        let tu = model.objective().term(unused);
        assert_eq!((tu.coefficient(), tu.definitions()), (0.0, 0));
        assert!(!model.objective().is_maximize());
    }

    #[test]
    fn test_quadratic_objective_terms_are_symmetric() {
        let mut model = Model::new();
        let a = model.new_float(0.0, 1.0).unwrap();
        let b = model.new_float(0.0, 1.0).unwrap();

        model.add_objective_quadratic_term(1.5, b, a).unwrap();
        model.add_objective_quadratic_term(2.0, a, b).unwrap();
        model.add_objective_quadratic_term(1.0, a, a).unwrap();

        let objective = model.objective();
        assert!(objective.is_quadratic());
        assert!(!objective.is_linear());

        let mut terms = objective.quadratic_terms();
        terms.sort_by_key(|term| term.pair());
        assert_eq!(terms.len(), 2);
        assert_eq!((terms[0].var1(), terms[0].var2()), (a, a));
        assert_eq!((terms[1].var1(), terms[1].var2()), (a, b));
        assert_eq!(terms[1].coefficient(), 3.5);

        let cross = objective.quadratic_term(b, a);
        assert_eq!(cross.coefficient(), 3.5);
        assert_eq!(cross.definitions(), 2);
    }

    #[test]
    fn test_cancelled_quadratic_terms_leave_objective_linear() {
        let mut model = Model::new();
        let a = model.new_float(0.0, 1.0).unwrap();
        let b = model.new_float(0.0, 1.0).unwrap();
        model.add_objective_quadratic_term(2.0, a, b).unwrap();
        model.add_objective_quadratic_term(-2.0, b, a).unwrap();
        assert!(model.objective().is_linear());
        assert!(model.objective().quadratic_terms().is_empty());
    }

    #[test]
    fn test_objective_term_rejects_nan() {
        let mut model = Model::new();
        let x = model.new_bool();
        assert!(model.add_objective_term(f64::NAN, x).is_err());
        assert!(model.add_objective_quadratic_term(f64::NAN, x, x).is_err());
        assert!(model.objective().raw_terms().is_empty());
        assert!(model.objective().raw_quadratic_terms().is_empty());
    }

    #[test]
    fn test_objective_term_with_invalid_variable_fails() {
        let mut model = Model::new();
        let x = model.new_bool();
        let missing = VariableId::new(3);
        assert_eq!(
            model.add_objective_term(1.0, missing),
            Err(ModelError::InvalidVariableId(missing))
        );
        assert_eq!(
            model.add_objective_quadratic_term(1.0, x, missing),
            Err(ModelError::InvalidVariableId(missing))
        );
    }

    #[test]
    fn test_vars_and_constraints_are_copies() {
        let mut model = Model::new();
        model.new_bool();
        model.new_constraint(ComparisonSense::Equal, 1.0).unwrap();

        let mut vars = model.vars();
        vars.clear();
        let mut constraints = model.constraints();
        constraints.clear();

        assert_eq!(model.num_variables(), 1);
        assert_eq!(model.num_constraints(), 1);
    }
}
