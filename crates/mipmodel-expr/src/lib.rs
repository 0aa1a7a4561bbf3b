//! Term storage for mipmodel: variable identities, linear and quadratic
//! terms, and the lazily canonicalized term store shared by constraints and
//! objectives.

pub mod error;
pub mod ids;
pub mod store;
pub mod term;

pub use error::TermError;
pub use ids::{ConstraintId, VariableId};
pub use store::{AggregatedTerm, TermStore};
pub use term::{QuadraticTerm, Term, TermKey, VariablePair};
