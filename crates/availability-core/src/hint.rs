//! Configuration identity of filters and providers.
//!
//! Filters and providers are often rebuilt from configuration on every call,
//! so object identity says nothing about whether two instances behave alike.
//! A [`HintKey`] describes the configuration itself: two instances built from
//! the same configuration produce equal keys, and caches of compiled
//! dependency graphs key on it to notice when the set of available market
//! data sources has changed.

use serde::Serialize;

use crate::{ExternalId, ExternalScheme, ValueSpecification};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HintKey {
    /// Scheme/name matcher; both lists sorted.
    Domain {
        schemes: Vec<ExternalScheme>,
        names: Vec<String>,
    },
    /// Filter answering available for everything.
    Optimistic,
    /// Detail provider synthesizing market-data specifications.
    Specification {
        function_id: String,
        data_source: Option<String>,
    },
    /// Filter paired with a detail provider.
    Filtered {
        filter: Box<HintKey>,
        detail: Box<HintKey>,
    },
    /// Filter view over a provider.
    ProviderFilter { provider: Box<HintKey> },
    /// Static identifier table, in identifier order.
    Fixed {
        entries: Vec<(ExternalId, ValueSpecification)>,
    },
    /// Ordered union members.
    Union { members: Vec<HintKey> },
    /// Implementations outside this crate.
    Named { name: String },
}

impl HintKey {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named { name: name.into() }
    }

    pub fn filtered(filter: HintKey, detail: HintKey) -> Self {
        Self::Filtered {
            filter: Box::new(filter),
            detail: Box::new(detail),
        }
    }

    pub fn provider_filter(provider: HintKey) -> Self {
        Self::ProviderFilter {
            provider: Box::new(provider),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
