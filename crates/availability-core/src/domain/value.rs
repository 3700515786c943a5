use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{ComputationTargetSpecification, ValidationError};

/// Property naming the function that produces a value.
pub const FUNCTION: &str = "Function";

/// Property naming the market-data source a value is sourced from.
pub const DATA_SOURCE: &str = "DataSource";

/// Named property sets used both as requirement constraints and as the
/// concrete properties of a specification.
///
/// A property present with an empty value set means "any value".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueProperties(BTreeMap<String, BTreeSet<String>>);

impl ValueProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` to the values of property `name`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.entry(name.into()).or_default().insert(value.into());
        self
    }

    /// Declare property `name` with no restriction on its value.
    pub fn with_any(mut self, name: impl Into<String>) -> Self {
        self.0.entry(name.into()).or_default();
        self
    }

    /// Add `value` to property `name` only when the property is not yet defined.
    pub fn with_default(self, name: &str, value: impl Into<String>) -> Self {
        if self.0.contains_key(name) {
            self
        } else {
            self.with(name, value)
        }
    }

    pub fn values(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.0.get(name)
    }

    /// The single value of `name`, if the property has exactly one.
    pub fn single_value(&self, name: &str) -> Option<&str> {
        let values = self.0.get(name)?;
        if values.len() == 1 {
            values.iter().next().map(String::as_str)
        } else {
            None
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.0.keys().any(|name| name.trim().is_empty()) {
            return Err(ValidationError::EmptyPropertyName);
        }
        Ok(())
    }
}

impl Display for ValueProperties {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (index, (name, values)) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}=[")?;
            for (value_index, value) in values.iter().enumerate() {
                if value_index > 0 {
                    f.write_str(",")?;
                }
                f.write_str(value)?;
            }
            f.write_str("]")?;
        }
        f.write_str("}")
    }
}

fn validate_value_name(value_name: &str) -> Result<(), ValidationError> {
    if value_name.trim().is_empty() {
        return Err(ValidationError::EmptyValueName);
    }
    Ok(())
}

/// Request for a named value about a computation target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ValueRequirement {
    value_name: String,
    target: ComputationTargetSpecification,
    constraints: ValueProperties,
}

impl ValueRequirement {
    pub fn new(
        value_name: impl Into<String>,
        target: ComputationTargetSpecification,
    ) -> Result<Self, ValidationError> {
        Self::with_constraints(value_name, target, ValueProperties::new())
    }

    pub fn with_constraints(
        value_name: impl Into<String>,
        target: ComputationTargetSpecification,
        constraints: ValueProperties,
    ) -> Result<Self, ValidationError> {
        let value_name = value_name.into();
        validate_value_name(&value_name)?;
        constraints.validate()?;
        Ok(Self {
            value_name,
            target,
            constraints,
        })
    }

    pub fn value_name(&self) -> &str {
        &self.value_name
    }

    pub fn target(&self) -> &ComputationTargetSpecification {
        &self.target
    }

    pub fn constraints(&self) -> &ValueProperties {
        &self.constraints
    }
}

impl Display for ValueRequirement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} on {}", self.value_name, self.target)?;
        if !self.constraints.is_empty() {
            write!(f, " with {}", self.constraints)?;
        }
        Ok(())
    }
}

/// Concrete description of a value a source would produce.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ValueSpecification {
    value_name: String,
    target: ComputationTargetSpecification,
    properties: ValueProperties,
}

impl ValueSpecification {
    pub fn new(
        value_name: impl Into<String>,
        target: ComputationTargetSpecification,
        properties: ValueProperties,
    ) -> Result<Self, ValidationError> {
        let value_name = value_name.into();
        validate_value_name(&value_name)?;
        properties.validate()?;
        Ok(Self {
            value_name,
            target,
            properties,
        })
    }

    /// Specification answering `requirement`, whose value name is already
    /// validated. Callers pass properties with non-empty names.
    pub(crate) fn answering(
        requirement: &ValueRequirement,
        target: ComputationTargetSpecification,
        properties: ValueProperties,
    ) -> Self {
        Self {
            value_name: requirement.value_name.clone(),
            target,
            properties,
        }
    }

    pub fn value_name(&self) -> &str {
        &self.value_name
    }

    pub fn target(&self) -> &ComputationTargetSpecification {
        &self.target
    }

    pub fn properties(&self) -> &ValueProperties {
        &self.properties
    }

    pub fn function_id(&self) -> Option<&str> {
        self.properties.single_value(FUNCTION)
    }
}

impl Display for ValueSpecification {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} on {} {}", self.value_name, self.target, self.properties)
    }
}
