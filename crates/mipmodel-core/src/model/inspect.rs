//! Model inspection and snapshots.
//!
//! A [`ModelSnapshot`] is the read-only view handed to a solver back end:
//! ordered variables, ordered constraints with canonical terms, and the
//! canonical objective. Term lists in a snapshot are sorted by variable index.

use std::collections::HashSet;
use std::time::Instant;

use serde::Serialize;

use crate::types::{Bounds, ComparisonSense, Sense};
use mipmodel_expr::ids::{ConstraintId, VariableId};
use mipmodel_expr::{QuadraticTerm, Term};

use crate::model::Model;

/// View of a variable in a model snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct VariableView {
    pub id: VariableId,
    pub kind: &'static str,
    pub name: Option<String>,
    pub label: String,
    pub bounds: Bounds,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// A canonical linear term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TermView {
    pub variable: VariableId,
    pub coefficient: f64,
}

/// A canonical quadratic term, `var1 <= var2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuadraticTermView {
    pub var1: VariableId,
    pub var2: VariableId,
    pub coefficient: f64,
}

/// View of a constraint in a model snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ConstraintView {
    pub id: ConstraintId,
    pub name: String,
    pub sense: ComparisonSense,
    pub rhs: f64,
    /// Number of canonical terms.
    pub nnz: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms: Option<Vec<TermView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// View of the objective in a model snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectiveView {
    pub sense: Sense,
    pub terms: Vec<TermView>,
    pub quadratic_terms: Vec<QuadraticTermView>,
}

/// Counts over the whole model, independent of filters.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SnapshotMetadata {
    pub variables: usize,
    pub constraints: usize,
    pub objective_terms: usize,
    pub objective_quadratic_terms: usize,
}

/// A complete snapshot of a model.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSnapshot {
    pub variables: Vec<VariableView>,
    pub constraints: Vec<ConstraintView>,
    pub objective: ObjectiveView,
    pub metadata: SnapshotMetadata,
}

/// Options for inspecting a model.
#[derive(Debug, Clone)]
pub struct InspectOptions {
    pub include_terms: bool,
    pub variable_filter: Option<Vec<VariableId>>,
    pub constraint_filter: Option<Vec<ConstraintId>>,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            include_terms: true,
            variable_filter: None,
            constraint_filter: None,
        }
    }
}

pub(crate) fn sorted_term_views(mut terms: Vec<Term>) -> Vec<TermView> {
    terms.sort_by_key(|term| term.variable());
    terms
        .into_iter()
        .map(|term| TermView {
            variable: term.variable(),
            coefficient: term.coefficient(),
        })
        .collect()
}

pub(crate) fn sorted_quadratic_views(mut terms: Vec<QuadraticTerm>) -> Vec<QuadraticTermView> {
    terms.sort_by_key(|term| term.pair());
    terms
        .into_iter()
        .map(|term| QuadraticTermView {
            var1: term.var1(),
            var2: term.var2(),
            coefficient: term.coefficient(),
        })
        .collect()
}

impl Model {
    /// Inspect the model structure and return a structured snapshot.
    pub fn inspect(&self, options: InspectOptions) -> ModelSnapshot {
        let started = Instant::now();
        let InspectOptions {
            include_terms,
            variable_filter,
            constraint_filter,
        } = options;

        let var_filter: Option<HashSet<VariableId>> =
            variable_filter.map(|ids| ids.into_iter().collect());
        let con_filter: Option<HashSet<ConstraintId>> =
            constraint_filter.map(|ids| ids.into_iter().collect());

        let variables: Vec<VariableView> = self
            .variables
            .iter()
            .filter(|var| {
                var_filter
                    .as_ref()
                    .is_none_or(|filter| filter.contains(&var.id()))
            })
            .map(|var| VariableView {
                id: var.id(),
                kind: var.kind().as_str(),
                name: self.variable_name(var.id()).map(ToString::to_string),
                label: self
                    .variable_label(var.id())
                    .unwrap_or_else(|_| var.default_label()),
                bounds: var.bounds(),
                metadata: self.variable_metadata(var.id()).cloned(),
            })
            .collect();

        let constraints: Vec<ConstraintView> = self
            .constraints
            .iter()
            .filter(|constraint| {
                con_filter
                    .as_ref()
                    .is_none_or(|filter| filter.contains(&constraint.id()))
            })
            .map(|constraint| {
                let terms = sorted_term_views(constraint.terms());
                ConstraintView {
                    id: constraint.id(),
                    name: self.constraint_name(constraint.id()).to_string(),
                    sense: constraint.sense(),
                    rhs: constraint.right_hand_side(),
                    nnz: terms.len(),
                    terms: include_terms.then_some(terms),
                    metadata: self.constraint_metadata(constraint.id()).cloned(),
                }
            })
            .collect();

        let objective = ObjectiveView {
            sense: self.objective.sense(),
            terms: sorted_term_views(self.objective.terms()),
            quadratic_terms: sorted_quadratic_views(self.objective.quadratic_terms()),
        };

        let metadata = SnapshotMetadata {
            variables: self.num_variables(),
            constraints: self.num_constraints(),
            objective_terms: objective.terms.len(),
            objective_quadratic_terms: objective.quadratic_terms.len(),
        };

        tracing::debug!(
            component = "model",
            operation = "inspect",
            status = "success",
            variables = variables.len(),
            constraints = constraints.len(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Built model snapshot"
        );

        ModelSnapshot {
            variables,
            constraints,
            objective,
            metadata,
        }
    }
}
