//! Human-readable model rendering for diagnostics.
//!
//! The output is meant for logs and debugging; it is not a file format and is
//! never parsed back.

use std::fmt::{self, Write as _};

use mipmodel_expr::ids::{ConstraintId, VariableId};
use mipmodel_expr::{QuadraticTerm, Term};

use crate::model::Model;
use crate::model::error::ModelError;

const PREVIEW_CONSTRAINTS: usize = 20;
const PREVIEW_VARIABLES: usize = 20;

/// Formatting controls for [`Model::format_model`].
#[derive(Debug, Clone, Copy)]
pub struct PrettyPrintOptions {
    /// Maximum number of constraints to render.
    pub constraints: Option<usize>,
    /// Maximum number of variables to render.
    pub variables: Option<usize>,
}

impl PrettyPrintOptions {
    /// Preview mode used by terse displays.
    pub fn preview() -> Self {
        Self {
            constraints: Some(PREVIEW_CONSTRAINTS),
            variables: Some(PREVIEW_VARIABLES),
        }
    }

    /// Full mode with no truncation.
    pub fn full() -> Self {
        Self {
            constraints: None,
            variables: None,
        }
    }
}

impl Default for PrettyPrintOptions {
    fn default() -> Self {
        Self::full()
    }
}

impl Model {
    /// Render a constraint as `<coef> <label> + ... <op> <rhs>`, terms sorted
    /// by variable index.
    pub fn format_constraint(&self, id: ConstraintId) -> Result<String, ModelError> {
        let constraint = self.constraint(id)?;
        let mut terms = constraint.terms();
        terms.sort_by_key(|term| term.variable());

        let mut rendered = String::new();
        for (idx, term) in terms.iter().enumerate() {
            if idx > 0 {
                rendered.push_str("+ ");
            }
            let _ = write!(rendered, "{} ", self.render_term(term));
        }
        let _ = write!(
            rendered,
            "{} {}",
            constraint.sense().symbol(),
            constraint.right_hand_side()
        );
        Ok(rendered)
    }

    /// Render the objective as `minimize`/`maximize` followed by its
    /// canonical linear terms and then its canonical quadratic terms.
    pub fn format_objective(&self) -> String {
        let objective = self.objective();
        let mut rendered = objective.sense().as_str().to_string();

        let mut terms = objective.terms();
        terms.sort_by_key(|term| term.variable());
        let mut quadratic_terms = objective.quadratic_terms();
        quadratic_terms.sort_by_key(|term| term.pair());

        let linear = terms.iter().map(|term| self.render_term(term));
        let quadratic = quadratic_terms
            .iter()
            .map(|term| self.render_quadratic_term(term));

        let mut operator = ' ';
        for body in linear.chain(quadratic) {
            let _ = write!(rendered, " {operator} {body}");
            operator = '+';
        }
        rendered
    }

    /// Render the objective, every constraint and every variable with its bounds.
    pub fn format_model(&self, options: PrettyPrintOptions) -> String {
        let mut lines = vec![self.format_objective()];

        let total_constraints = self.num_constraints();
        let constraint_limit = options
            .constraints
            .unwrap_or(total_constraints)
            .min(total_constraints);
        for constraint in self.constraints.iter().take(constraint_limit) {
            if let Ok(body) = self.format_constraint(constraint.id()) {
                let name = self.constraint_name(constraint.id());
                if name.is_empty() {
                    lines.push(format!("{:>7}: {body}", constraint.id().index()));
                } else {
                    lines.push(format!("{:>7}: {name}: {body}", constraint.id().index()));
                }
            }
        }
        if constraint_limit < total_constraints {
            lines.push(format!(
                "    ... ({} more constraints)",
                total_constraints - constraint_limit
            ));
        }

        let total_variables = self.num_variables();
        let variable_limit = options
            .variables
            .unwrap_or(total_variables)
            .min(total_variables);
        for variable in self.variables.iter().take(variable_limit) {
            lines.push(format!(
                "{:>7}: {} [{}, {}]",
                variable.index(),
                self.label_or_default(variable.id()),
                variable.lower_bound(),
                variable.upper_bound()
            ));
        }
        if variable_limit < total_variables {
            lines.push(format!(
                "    ... ({} more variables)",
                total_variables - variable_limit
            ));
        }

        lines.join("\n")
    }

    fn render_term(&self, term: &Term) -> String {
        format!(
            "{} {}",
            term.coefficient(),
            self.label_or_default(term.variable())
        )
    }

    fn render_quadratic_term(&self, term: &QuadraticTerm) -> String {
        if term.pair().is_square() {
            format!(
                "{} {}^2",
                term.coefficient(),
                self.label_or_default(term.var1())
            )
        } else {
            format!(
                "{} {}*{}",
                term.coefficient(),
                self.label_or_default(term.var1()),
                self.label_or_default(term.var2())
            )
        }
    }

    fn label_or_default(&self, id: VariableId) -> String {
        self.variable_label(id)
            .unwrap_or_else(|_| format!("x[{}]", id.inner()))
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_model(PrettyPrintOptions::full()))
    }
}
