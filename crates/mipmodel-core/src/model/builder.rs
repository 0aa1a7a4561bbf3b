//! Model builder methods for adding variables, constraints, and terms.

use crate::constraint::Constraint;
use crate::types::{ComparisonSense, Sense, VariableKind};
use mipmodel_expr::ids::{ConstraintId, VariableId};
use mipmodel_expr::{QuadraticTerm, Term};

use crate::model::error::ModelError;
use crate::model::{Model, rejected};

impl Model {
    /// Add a continuous variable with bounds `[lower, upper]`.
    ///
    /// Bounds are stored as given; only NaN is rejected.
    pub fn new_float(&mut self, lower: f64, upper: f64) -> Result<VariableId, ModelError> {
        if lower.is_nan() || upper.is_nan() {
            return Err(rejected(
                "new_float",
                ModelError::NanBound { lower, upper },
            ));
        }
        Ok(self.push_variable(VariableKind::Float { lower, upper }))
    }

    /// Add an integer variable with bounds `[lower, upper]`.
    pub fn new_int(&mut self, lower: i64, upper: i64) -> VariableId {
        self.push_variable(VariableKind::Int { lower, upper })
    }

    /// Add a binary variable.
    pub fn new_bool(&mut self) -> VariableId {
        self.push_variable(VariableKind::Bool)
    }

    /// Add a constraint with no terms. A constraint whose terms all stay zero
    /// contributes nothing to the model.
    pub fn new_constraint(
        &mut self,
        sense: ComparisonSense,
        rhs: f64,
    ) -> Result<ConstraintId, ModelError> {
        if rhs.is_nan() {
            return Err(rejected("new_constraint", ModelError::NanRightHandSide));
        }

        let id = ConstraintId::new(self.constraints.len() as u32);
        self.constraints.push(Constraint::new(id, sense, rhs));
        Ok(id)
    }

    /// Add `coefficient * variable` to a constraint.
    ///
    /// Repeated calls for the same variable accumulate.
    pub fn add_constraint_term(
        &mut self,
        constraint_id: ConstraintId,
        coefficient: f64,
        variable: VariableId,
    ) -> Result<Term, ModelError> {
        self.ensure_variable_exists(variable)
            .map_err(|err| rejected("add_constraint_term", err))?;
        let constraint = self
            .constraints
            .get_mut(constraint_id.index())
            .ok_or_else(|| {
                rejected(
                    "add_constraint_term",
                    ModelError::InvalidConstraintId(constraint_id),
                )
            })?;
        constraint
            .push_term(coefficient, variable)
            .map_err(|err| rejected("add_constraint_term", err.into()))
    }

    /// Add `coefficient * variable` to the objective.
    pub fn add_objective_term(
        &mut self,
        coefficient: f64,
        variable: VariableId,
    ) -> Result<Term, ModelError> {
        self.ensure_variable_exists(variable)
            .map_err(|err| rejected("add_objective_term", err))?;
        self.objective
            .push_term(coefficient, variable)
            .map_err(|err| rejected("add_objective_term", err.into()))
    }

    /// Add `coefficient * a * b` to the objective.
    ///
    /// `(a, b)` and `(b, a)` address the same product.
    pub fn add_objective_quadratic_term(
        &mut self,
        coefficient: f64,
        a: VariableId,
        b: VariableId,
    ) -> Result<QuadraticTerm, ModelError> {
        self.ensure_variable_exists(a)
            .and_then(|()| self.ensure_variable_exists(b))
            .map_err(|err| rejected("add_objective_quadratic_term", err))?;
        self.objective
            .push_quadratic_term(coefficient, a, b)
            .map_err(|err| rejected("add_objective_quadratic_term", err.into()))
    }

    /// Make the objective a maximization.
    pub fn set_maximize(&mut self) {
        self.set_objective_sense(Sense::Maximize);
    }

    /// Make the objective a minimization.
    pub fn set_minimize(&mut self) {
        self.set_objective_sense(Sense::Minimize);
    }

    pub fn set_objective_sense(&mut self, sense: Sense) {
        self.objective.set_sense(sense);
        tracing::debug!(
            component = "model",
            operation = "set_objective_sense",
            status = "success",
            sense = sense.as_str(),
            "Updated objective sense"
        );
    }
}
