use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const SEPARATOR: char = '~';

/// Namespace of an external identifier, e.g. `TICKER` or `ISIN`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExternalScheme(String);

impl ExternalScheme {
    /// Parse a scheme, trimming surrounding whitespace.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyScheme);
        }
        if trimmed.contains(SEPARATOR) {
            return Err(ValidationError::SchemeContainsSeparator {
                scheme: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ExternalScheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for ExternalScheme {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for ExternalScheme {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ExternalScheme> for String {
    fn from(value: ExternalScheme) -> Self {
        value.0
    }
}

/// `(scheme, value)` pair identifying a real-world instrument or entity.
///
/// The textual form is `SCHEME~VALUE`; the value may itself contain `~`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExternalId {
    scheme: ExternalScheme,
    value: String,
}

impl ExternalId {
    pub fn new(scheme: ExternalScheme, value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::EmptyIdentifierValue);
        }
        Ok(Self { scheme, value })
    }

    /// Build an identifier from raw scheme and value strings.
    pub fn of(scheme: &str, value: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(ExternalScheme::parse(scheme)?, value)
    }

    /// Parse the `SCHEME~VALUE` form.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let Some((scheme, value)) = trimmed.split_once(SEPARATOR) else {
            return Err(ValidationError::MalformedExternalId {
                value: trimmed.to_owned(),
            });
        };
        Self::of(scheme, value)
    }

    pub fn scheme(&self) -> &ExternalScheme {
        &self.scheme
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_scheme(&self, scheme: &ExternalScheme) -> bool {
        &self.scheme == scheme
    }

    /// Wrap this identifier in a single-element bundle.
    pub fn to_bundle(&self) -> ExternalIdBundle {
        ExternalIdBundle::of([self.clone()])
    }
}

impl Display for ExternalId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.scheme, self.value)
    }
}

impl FromStr for ExternalId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for ExternalId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ExternalId> for String {
    fn from(value: ExternalId) -> Self {
        value.to_string()
    }
}

/// Set of external identifiers that all refer to the same subject.
///
/// Iteration order is the identifiers' natural (scheme, value) order, so
/// "first match" lookups over a bundle are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalIdBundle(BTreeSet<ExternalId>);

impl ExternalIdBundle {
    pub fn of(ids: impl IntoIterator<Item = ExternalId>) -> Self {
        Self(ids.into_iter().collect())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: ExternalId) -> Self {
        self.0.insert(id);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExternalId> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: &ExternalId) -> bool {
        self.0.contains(id)
    }

    /// First identifier of the given scheme, if any.
    pub fn get(&self, scheme: &ExternalScheme) -> Option<&ExternalId> {
        self.0.iter().find(|id| id.is_scheme(scheme))
    }
}

impl FromIterator<ExternalId> for ExternalIdBundle {
    fn from_iter<I: IntoIterator<Item = ExternalId>>(iter: I) -> Self {
        Self::of(iter)
    }
}

impl<'a> IntoIterator for &'a ExternalIdBundle {
    type Item = &'a ExternalId;
    type IntoIter = std::collections::btree_set::Iter<'a, ExternalId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for ExternalIdBundle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Bundle[")?;
        for (index, id) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{id}")?;
        }
        f.write_str("]")
    }
}

/// Platform-internal identity of a computation target, `SCHEME~VALUE[~VERSION]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UniqueId {
    scheme: ExternalScheme,
    value: String,
    version: Option<String>,
}

impl UniqueId {
    pub fn of(scheme: &str, value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::EmptyIdentifierValue);
        }
        Ok(Self {
            scheme: ExternalScheme::parse(scheme)?,
            value,
            version: None,
        })
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Result<Self, ValidationError> {
        let version = version.into();
        if version.is_empty() {
            return Err(ValidationError::EmptyVersion);
        }
        self.version = Some(version);
        Ok(self)
    }

    /// Parse the `SCHEME~VALUE[~VERSION]` form.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let malformed = || ValidationError::MalformedUniqueId {
            value: trimmed.to_owned(),
        };

        let mut parts = trimmed.split(SEPARATOR);
        let scheme = parts.next().ok_or_else(malformed)?;
        let value = parts.next().ok_or_else(malformed)?;
        let version = parts.next();
        if parts.next().is_some() {
            return Err(malformed());
        }

        let unique_id = Self::of(scheme, value)?;
        match version {
            Some(version) => unique_id.with_version(version),
            None => Ok(unique_id),
        }
    }

    /// Unique identifier mirroring an external identifier's scheme and value.
    pub fn from_external_id(id: &ExternalId) -> Self {
        Self {
            scheme: id.scheme().clone(),
            value: id.value().to_owned(),
            version: None,
        }
    }

    pub fn scheme(&self) -> &ExternalScheme {
        &self.scheme
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

impl Display for UniqueId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.scheme, self.value)?;
        if let Some(version) = &self.version {
            write!(f, "{SEPARATOR}{version}")?;
        }
        Ok(())
    }
}

impl FromStr for UniqueId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for UniqueId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<UniqueId> for String {
    fn from(value: UniqueId) -> Self {
        value.to_string()
    }
}
