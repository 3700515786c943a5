use thiserror::Error;

/// Validation errors raised by data-model constructors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("identifier scheme cannot be empty")]
    EmptyScheme,
    #[error("identifier value cannot be empty")]
    EmptyIdentifierValue,
    #[error("identifier scheme '{scheme}' must not contain '~'")]
    SchemeContainsSeparator { scheme: String },
    #[error("external identifier must be formatted as SCHEME~VALUE: '{value}'")]
    MalformedExternalId { value: String },
    #[error("unique identifier must be formatted as SCHEME~VALUE[~VERSION]: '{value}'")]
    MalformedUniqueId { value: String },
    #[error("unique identifier version cannot be empty")]
    EmptyVersion,

    #[error("value name cannot be empty")]
    EmptyValueName,
    #[error("property name cannot be empty")]
    EmptyPropertyName,

    #[error("invalid computation target type '{value}'")]
    InvalidTargetType { value: String },
}

/// Hard failure of an availability check.
///
/// Distinct from a definite "no" and from a deferred verdict: the requirement
/// can never be satisfied, so exploration of it stops here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    #[error("requirement '{value_name}' can never be satisfied: {reason}")]
    NeverSatisfiable { value_name: String, reason: String },
}

impl AvailabilityError {
    pub fn never_satisfiable(value_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NeverSatisfiable {
            value_name: value_name.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while parsing or building a source configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse source configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("domain source must recognize at least one scheme")]
    EmptySchemes,
    #[error("domain source must recognize at least one value name")]
    EmptyNames,
    #[error("union source must contain at least one member")]
    EmptyUnion,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
