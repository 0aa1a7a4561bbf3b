//! Storage access methods for the model.

use crate::constraint::Constraint;
use crate::objective::Objective;
use crate::types::Variable;
use mipmodel_expr::ids::{ConstraintId, VariableId};

use super::Model;
use super::error::ModelError;

impl Model {
    /// Get the number of variables
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Get the number of constraints
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Get a variable by ID.
    pub fn variable(&self, id: VariableId) -> Result<&Variable, ModelError> {
        self.variables
            .get(id.index())
            .ok_or(ModelError::InvalidVariableId(id))
    }

    /// Get a constraint by ID.
    pub fn constraint(&self, id: ConstraintId) -> Result<&Constraint, ModelError> {
        self.constraints
            .get(id.index())
            .ok_or(ModelError::InvalidConstraintId(id))
    }

    /// Get the objective
    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    /// All variables in creation order. The returned vector is a copy.
    pub fn vars(&self) -> Vec<Variable> {
        self.variables.clone()
    }

    /// All constraints in creation order. The returned vector is a copy.
    pub fn constraints(&self) -> Vec<Constraint> {
        self.constraints.clone()
    }

    /// Borrowing iterator over variables in creation order.
    pub fn iter_vars(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    /// Borrowing iterator over constraints in creation order.
    pub fn iter_constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter()
    }
}
