//! Metadata methods for variable and constraint naming.
//!
//! Names and metadata live in side tables keyed by entity id, so renaming
//! never touches the entity itself.

use std::collections::BTreeMap;

use mipmodel_expr::ids::{ConstraintId, VariableId};

use crate::model::Model;
use crate::model::error::ModelError;

impl Model {
    /// Set name for a variable.
    pub fn set_variable_name(
        &mut self,
        id: VariableId,
        name: impl Into<String>,
    ) -> Result<(), ModelError> {
        self.ensure_variable_exists(id)?;
        self.variable_names
            .get_or_insert_with(BTreeMap::new)
            .insert(id, name.into());
        Ok(())
    }

    /// Get the explicitly assigned name of a variable.
    pub fn variable_name(&self, id: VariableId) -> Option<&str> {
        self.variable_names
            .as_ref()
            .and_then(|names| names.get(&id).map(|s| s.as_str()))
    }

    /// Display label of a variable: its name, or `F<i>`/`I<i>`/`B<i>` when
    /// no non-empty name was assigned.
    pub fn variable_label(&self, id: VariableId) -> Result<String, ModelError> {
        let variable = self.variable(id)?;
        Ok(match self.variable_name(id) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => variable.default_label(),
        })
    }

    /// Lookup a variable by name.
    pub fn variable_by_name(&self, name: &str) -> Option<VariableId> {
        self.variable_names.as_ref().and_then(|names| {
            names
                .iter()
                .find_map(|(id, value)| (value == name).then_some(*id))
        })
    }

    /// Set metadata for a variable.
    pub fn set_variable_metadata(
        &mut self,
        id: VariableId,
        metadata: serde_json::Value,
    ) -> Result<(), ModelError> {
        self.ensure_variable_exists(id)?;
        self.variable_metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(id, metadata);
        Ok(())
    }

    /// Get metadata for a variable.
    pub fn variable_metadata(&self, id: VariableId) -> Option<&serde_json::Value> {
        self.variable_metadata
            .as_ref()
            .and_then(|meta| meta.get(&id))
    }

    /// Set name for a constraint.
    pub fn set_constraint_name(
        &mut self,
        id: ConstraintId,
        name: impl Into<String>,
    ) -> Result<(), ModelError> {
        self.ensure_constraint_exists(id)?;
        self.constraint_names
            .get_or_insert_with(BTreeMap::new)
            .insert(id, name.into());
        Ok(())
    }

    /// Get name for a constraint; empty when none was assigned.
    pub fn constraint_name(&self, id: ConstraintId) -> &str {
        self.constraint_names
            .as_ref()
            .and_then(|names| names.get(&id).map(|s| s.as_str()))
            .unwrap_or("")
    }

    /// Lookup a constraint by name.
    pub fn constraint_by_name(&self, name: &str) -> Option<ConstraintId> {
        self.constraint_names.as_ref().and_then(|names| {
            names
                .iter()
                .find_map(|(id, value)| (value == name).then_some(*id))
        })
    }

    /// Set metadata for a constraint.
    pub fn set_constraint_metadata(
        &mut self,
        id: ConstraintId,
        metadata: serde_json::Value,
    ) -> Result<(), ModelError> {
        self.ensure_constraint_exists(id)?;
        self.constraint_metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(id, metadata);
        Ok(())
    }

    /// Get metadata for a constraint.
    pub fn constraint_metadata(&self, id: ConstraintId) -> Option<&serde_json::Value> {
        self.constraint_metadata
            .as_ref()
            .and_then(|meta| meta.get(&id))
    }
}
