//! Structural deep copy.

use std::time::Instant;

use crate::model::Model;

impl Model {
    /// Build an independent model with the same structure.
    ///
    /// Variables are recreated in creation order, so every index maps to the
    /// same index in the copy. Objective and constraint terms are replayed
    /// from their canonical form: each variable (or pair) appears once in the
    /// copy with its summed coefficient, and zero sums are gone. Names and
    /// metadata are carried over.
    pub fn copy(&self) -> Model {
        let started = Instant::now();
        let mut copy = Model::with_capacities(self.num_variables(), self.num_constraints());

        for variable in &self.variables {
            copy.push_variable(variable.kind());
        }
        copy.variable_names = self.variable_names.clone();
        copy.variable_metadata = self.variable_metadata.clone();

        copy.objective = self.objective.canonical_copy();

        copy.constraints = self
            .constraints
            .iter()
            .map(|constraint| constraint.canonical_copy())
            .collect();
        copy.constraint_names = self.constraint_names.clone();
        copy.constraint_metadata = self.constraint_metadata.clone();

        tracing::debug!(
            component = "model",
            operation = "copy",
            status = "success",
            variables = copy.num_variables(),
            constraints = copy.num_constraints(),
            objective_terms = copy.objective.raw_terms().len(),
            objective_quadratic_terms = copy.objective.raw_quadratic_terms().len(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Copied model"
        );

        copy
    }
}
