//! Declarative market data source configuration.
//!
//! A source federation is described as JSON and built into a provider tree:
//!
//! ```json
//! {
//!   "type": "union",
//!   "sources": [
//!     { "type": "domain", "schemes": ["BLOOMBERG_TICKER"], "names": ["Market_Value"], "data_source": "BLOOMBERG" },
//!     { "type": "fixed", "entries": [{ "id": "OG_SYNTHETIC~USD3M", "value_name": "Market_Value" }] }
//!   ]
//! }
//! ```
//!
//! | `type` | Builds |
//! |--------|--------|
//! | `domain` | [`DomainFilter`] paired with a [`MarketDataSpecificationProvider`] |
//! | `fixed` | [`FixedProvider`] |
//! | `permissive` | [`PermissiveProvider`] |
//! | `union` | [`UnionProvider`] over the built members |
//!
//! The configuration is plain data; reading it from wherever it is stored is
//! left to the caller.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::filter::AvailabilityFilterExt;
use crate::provider::{
    AvailabilityProvider, MarketDataSpecificationProvider, PermissiveProvider,
    MARKET_DATA_SOURCING_FUNCTION,
};
use crate::{
    ComputationTargetSpecification, ComputationTargetType, ConfigError, DomainFilter, ExternalId,
    ExternalScheme, FixedProvider, UniqueId, UnionProvider, ValueProperties, ValueSpecification,
    FUNCTION,
};

/// One market data source, or a union of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceConfig {
    Domain {
        schemes: Vec<ExternalScheme>,
        names: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data_source: Option<String>,
    },
    Fixed {
        #[serde(default)]
        entries: Vec<FixedEntryConfig>,
    },
    Permissive {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data_source: Option<String>,
    },
    Union {
        sources: Vec<SourceConfig>,
    },
}

/// Entry of a `fixed` source: the identifier and the value it supplies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedEntryConfig {
    pub id: ExternalId,
    pub value_name: String,
    #[serde(default)]
    pub properties: ValueProperties,
}

impl FixedEntryConfig {
    /// Specification supplied for this entry, targeting a primitive named by
    /// the identifier. The sourcing function is added unless configured.
    pub fn specification(&self) -> Result<ValueSpecification, ConfigError> {
        let target = ComputationTargetSpecification::of(
            ComputationTargetType::Primitive,
            UniqueId::from_external_id(&self.id),
        );
        let properties = self
            .properties
            .clone()
            .with_default(FUNCTION, MARKET_DATA_SOURCING_FUNCTION);
        Ok(ValueSpecification::new(
            self.value_name.as_str(),
            target,
            properties,
        )?)
    }
}

impl SourceConfig {
    /// Parse and validate a configuration document.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config = serde_json::from_str::<Self>(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check structural constraints without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Domain { schemes, names, .. } => {
                if schemes.is_empty() {
                    return Err(ConfigError::EmptySchemes);
                }
                if names.is_empty() || names.iter().any(|name| name.trim().is_empty()) {
                    return Err(ConfigError::EmptyNames);
                }
                Ok(())
            }
            Self::Fixed { entries } => {
                for entry in entries {
                    entry.specification()?;
                }
                Ok(())
            }
            Self::Permissive { .. } => Ok(()),
            Self::Union { sources } => {
                if sources.is_empty() {
                    return Err(ConfigError::EmptyUnion);
                }
                sources.iter().try_for_each(Self::validate)
            }
        }
    }

    /// Build the provider tree described by this configuration.
    pub fn build(&self) -> Result<Arc<dyn AvailabilityProvider>, ConfigError> {
        self.validate()?;
        let provider = self.build_unchecked()?;
        debug!(hint_key = ?provider.hint_key(), "built market data availability provider");
        Ok(provider)
    }

    fn build_unchecked(&self) -> Result<Arc<dyn AvailabilityProvider>, ConfigError> {
        let provider: Arc<dyn AvailabilityProvider> = match self {
            Self::Domain {
                schemes,
                names,
                data_source,
            } => {
                let filter = DomainFilter::new(schemes.iter().cloned(), names.iter().cloned());
                Arc::new(filter.with_provider(specification_provider(data_source.as_deref())))
            }
            Self::Fixed { entries } => {
                let mut builder = FixedProvider::builder();
                for entry in entries {
                    builder.add(entry.id.clone(), entry.specification()?);
                }
                Arc::new(builder.build())
            }
            Self::Permissive { data_source } => Arc::new(PermissiveProvider::new(
                specification_provider(data_source.as_deref()),
            )),
            Self::Union { sources } => Arc::new(UnionProvider::new(
                sources
                    .iter()
                    .map(Self::build_unchecked)
                    .collect::<Result<Vec<_>, _>>()?,
            )),
        };
        Ok(provider)
    }
}

fn specification_provider(data_source: Option<&str>) -> MarketDataSpecificationProvider {
    let provider = MarketDataSpecificationProvider::new();
    match data_source {
        Some(data_source) => provider.with_data_source(data_source),
        None => provider,
    }
}
