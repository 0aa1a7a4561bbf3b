use mipmodel_expr::ids::VariableId;
use serde::Serialize;

/// Optimization sense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sense {
    #[default]
    Minimize,
    Maximize,
}

impl Sense {
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Minimize => "minimize",
            Sense::Maximize => "maximize",
        }
    }
}

/// Relation between a constraint's weighted sum and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonSense {
    LessEqual,
    Equal,
    GreaterEqual,
}

impl ComparisonSense {
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonSense::LessEqual => "le",
            ComparisonSense::Equal => "eq",
            ComparisonSense::GreaterEqual => "ge",
        }
    }

    /// Operator used when rendering the constraint.
    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonSense::LessEqual => "<=",
            ComparisonSense::Equal => "=",
            ComparisonSense::GreaterEqual => ">=",
        }
    }
}

/// Bounds for a variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }
}

/// Domain of a decision variable. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VariableKind {
    Float { lower: f64, upper: f64 },
    Int { lower: i64, upper: i64 },
    /// Integer restricted to [0, 1].
    Bool,
}

impl VariableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Float { .. } => "float",
            VariableKind::Int { .. } => "int",
            VariableKind::Bool => "bool",
        }
    }

    fn label_prefix(self) -> char {
        match self {
            VariableKind::Float { .. } => 'F',
            VariableKind::Int { .. } => 'I',
            VariableKind::Bool => 'B',
        }
    }
}

/// A decision variable owned by a [`Model`](crate::Model).
///
/// Bounds and kind never change after creation; the display name lives in the
/// model's name table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variable {
    id: VariableId,
    kind: VariableKind,
}

impl Variable {
    pub(crate) fn new(id: VariableId, kind: VariableKind) -> Self {
        Self { id, kind }
    }

    pub fn id(&self) -> VariableId {
        self.id
    }

    /// Creation index, equal to the position in [`Model::vars`](crate::Model::vars).
    pub fn index(&self) -> usize {
        self.id.index()
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    pub fn is_float(&self) -> bool {
        matches!(self.kind, VariableKind::Float { .. })
    }

    /// True for int and bool variables.
    pub fn is_int(&self) -> bool {
        matches!(self.kind, VariableKind::Int { .. } | VariableKind::Bool)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self.kind, VariableKind::Bool)
    }

    pub fn lower_bound(&self) -> f64 {
        match self.kind {
            VariableKind::Float { lower, .. } => lower,
            VariableKind::Int { lower, .. } => lower as f64,
            VariableKind::Bool => 0.0,
        }
    }

    pub fn upper_bound(&self) -> f64 {
        match self.kind {
            VariableKind::Float { upper, .. } => upper,
            VariableKind::Int { upper, .. } => upper as f64,
            VariableKind::Bool => 1.0,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.lower_bound(), self.upper_bound())
    }

    /// Label used when no name has been assigned, e.g. `F0`, `I3`, `B7`.
    pub fn default_label(&self) -> String {
        format!("{}{}", self.kind.label_prefix(), self.id.inner())
    }
}
