use crate::model::Model;
use crate::types::ComparisonSense;
use mipmodel_expr::ids::{ConstraintId, VariableId};

/// Two floats `x`, `y` named after themselves and the `-8 x + 10 y <= 13` row.
pub(super) fn named_pair_model() -> (Model, VariableId, VariableId, ConstraintId) {
    let mut model = Model::new();
    let x = model.new_float(0.0, 100.0).unwrap();
    let y = model.new_float(0.0, 100.0).unwrap();
    model.set_variable_name(x, "x").unwrap();
    model.set_variable_name(y, "y").unwrap();
    let c = model
        .new_constraint(ComparisonSense::LessEqual, 13.0)
        .unwrap();
    model.add_constraint_term(c, -8.0, x).unwrap();
    model.add_constraint_term(c, 10.0, y).unwrap();
    (model, x, y, c)
}

pub(super) fn sorted_terms(mut terms: Vec<mipmodel_expr::Term>) -> Vec<(u32, f64)> {
    terms.sort_by_key(|term| term.variable());
    terms
        .into_iter()
        .map(|term| (term.variable().inner(), term.coefficient()))
        .collect()
}
