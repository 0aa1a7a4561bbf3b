//! Solver-independent modeling layer for mixed-integer linear and quadratic
//! programs.

pub mod constraint;
pub mod model;
pub mod objective;
pub mod types;

pub use model::{
    ConstraintView, InspectOptions, Model, ModelError, ModelSnapshot, ObjectiveView,
    PrettyPrintOptions, QuadraticTermView, SnapshotMetadata, TermView, VariableView,
};

pub use constraint::Constraint;
pub use objective::Objective;
pub use types::{Bounds, ComparisonSense, Sense, Variable, VariableKind};

pub use mipmodel_expr::{
    AggregatedTerm, ConstraintId, QuadraticTerm, Term, TermError, VariableId, VariablePair,
};
