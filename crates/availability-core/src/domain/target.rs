use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{ExternalId, ExternalIdBundle, UniqueId, ValidationError};

/// Type tag of a computation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComputationTargetType {
    Primitive,
    Security,
    Position,
    Trade,
    Portfolio,
    Null,
}

impl ComputationTargetType {
    pub const ALL: [Self; 6] = [
        Self::Primitive,
        Self::Security,
        Self::Position,
        Self::Trade,
        Self::Portfolio,
        Self::Null,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primitive => "PRIMITIVE",
            Self::Security => "SECURITY",
            Self::Position => "POSITION",
            Self::Trade => "TRADE",
            Self::Portfolio => "PORTFOLIO",
            Self::Null => "NULL",
        }
    }
}

impl Display for ComputationTargetType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComputationTargetType {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|target_type| target_type.as_str() == normalized)
            .ok_or_else(|| ValidationError::InvalidTargetType {
                value: value.trim().to_owned(),
            })
    }
}

/// Type-tagged identity of the subject a value is computed about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComputationTargetSpecification {
    target_type: ComputationTargetType,
    unique_id: Option<UniqueId>,
}

impl ComputationTargetSpecification {
    pub fn of(target_type: ComputationTargetType, unique_id: UniqueId) -> Self {
        Self {
            target_type,
            unique_id: Some(unique_id),
        }
    }

    /// Specification of the empty target.
    pub fn null() -> Self {
        Self {
            target_type: ComputationTargetType::Null,
            unique_id: None,
        }
    }

    pub fn target_type(&self) -> ComputationTargetType {
        self.target_type
    }

    pub fn unique_id(&self) -> Option<&UniqueId> {
        self.unique_id.as_ref()
    }
}

impl Display for ComputationTargetSpecification {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.unique_id {
            Some(unique_id) => write!(f, "{}[{unique_id}]", self.target_type),
            None => write!(f, "{}[]", self.target_type),
        }
    }
}

/// Identification views a target wrapper type may expose.
///
/// Both views default to absent; a type exposing neither has no external
/// identification.
pub trait TargetIdentification: fmt::Debug + Send + Sync {
    fn external_id(&self) -> Option<&ExternalId> {
        None
    }

    fn external_id_bundle(&self) -> Option<&ExternalIdBundle> {
        None
    }
}

/// Runtime subject of an availability check.
#[derive(Debug, Clone)]
pub enum Target {
    /// The target is itself an external identifier.
    ExternalId(ExternalId),
    /// The target is itself an identifier bundle.
    Bundle(ExternalIdBundle),
    /// An arbitrary target object queried through its identification views.
    Object(Arc<dyn TargetIdentification>),
    /// A target known only by its platform-internal identity.
    UniqueId(UniqueId),
    /// No target at all.
    Null,
}

impl Target {
    pub fn object(object: impl TargetIdentification + 'static) -> Self {
        Self::Object(Arc::new(object))
    }
}

impl From<ExternalId> for Target {
    fn from(value: ExternalId) -> Self {
        Self::ExternalId(value)
    }
}

impl From<ExternalIdBundle> for Target {
    fn from(value: ExternalIdBundle) -> Self {
        Self::Bundle(value)
    }
}

impl From<UniqueId> for Target {
    fn from(value: UniqueId) -> Self {
        Self::UniqueId(value)
    }
}

/// Security target exposing its identifier bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Security {
    unique_id: UniqueId,
    identifiers: ExternalIdBundle,
}

impl Security {
    pub fn new(unique_id: UniqueId, identifiers: ExternalIdBundle) -> Self {
        Self {
            unique_id,
            identifiers,
        }
    }

    pub fn unique_id(&self) -> &UniqueId {
        &self.unique_id
    }

    pub fn specification(&self) -> ComputationTargetSpecification {
        ComputationTargetSpecification::of(ComputationTargetType::Security, self.unique_id.clone())
    }
}

impl TargetIdentification for Security {
    fn external_id_bundle(&self) -> Option<&ExternalIdBundle> {
        Some(&self.identifiers)
    }
}

/// Primitive target addressed by a single external identifier, such as a
/// live-data ticker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Primitive {
    external_id: ExternalId,
}

impl Primitive {
    pub fn new(external_id: ExternalId) -> Self {
        Self { external_id }
    }

    pub fn specification(&self) -> ComputationTargetSpecification {
        ComputationTargetSpecification::of(
            ComputationTargetType::Primitive,
            UniqueId::from_external_id(&self.external_id),
        )
    }
}

impl TargetIdentification for Primitive {
    fn external_id(&self) -> Option<&ExternalId> {
        Some(&self.external_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_target_type_case_insensitively() {
        let parsed: ComputationTargetType = " security ".parse().expect("type should parse");
        assert_eq!(parsed, ComputationTargetType::Security);

        let err = "DESK".parse::<ComputationTargetType>().expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidTargetType { .. }));
    }

    #[test]
    fn displays_target_specification() {
        let spec = ComputationTargetSpecification::of(
            ComputationTargetType::Security,
            UniqueId::of("DbSec", "42").expect("valid uid"),
        );
        assert_eq!(spec.to_string(), "SECURITY[DbSec~42]");
        assert_eq!(ComputationTargetSpecification::null().to_string(), "NULL[]");
    }
}
