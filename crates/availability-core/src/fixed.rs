//! Provider backed by a static identifier table.

use std::collections::BTreeMap;

use crate::identification::identify;
use crate::provider::{AvailabilityProvider, ProviderResult};
use crate::{
    Availability, ComputationTargetSpecification, ExternalId, HintKey, ResolutionContext, Target,
    ValueRequirement, ValueSpecification,
};

/// Source that knows a small fixed inventory of values.
///
/// Entries are keyed by identifier and value name. A single-identifier target
/// is looked up directly; a bundle answers with the first identifier, in
/// bundle order, holding a value of the requested name. Never fails and
/// never defers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedProvider {
    available: BTreeMap<ExternalId, BTreeMap<String, ValueSpecification>>,
}

impl FixedProvider {
    pub fn builder() -> FixedProviderBuilder {
        FixedProviderBuilder::default()
    }

    /// Number of (identifier, value name) entries.
    pub fn len(&self) -> usize {
        self.available.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }

    pub fn get(&self, id: &ExternalId, value_name: &str) -> Option<&ValueSpecification> {
        self.available.get(id)?.get(value_name)
    }
}

impl AvailabilityProvider for FixedProvider {
    fn get_availability(
        &self,
        _ctx: &ResolutionContext,
        target_spec: &ComputationTargetSpecification,
        target: &Target,
        desired: &ValueRequirement,
    ) -> ProviderResult {
        let found = identify(target_spec, target)
            .ids()
            .find_map(|id| self.get(id, desired.value_name()));

        Ok(match found {
            Some(spec) => Availability::Available(spec.clone()),
            None => Availability::Unavailable,
        })
    }

    fn hint_key(&self) -> HintKey {
        HintKey::Fixed {
            entries: self
                .available
                .iter()
                .flat_map(|(id, values)| values.values().map(move |spec| (id.clone(), spec.clone())))
                .collect(),
        }
    }
}

/// Setup phase of a [`FixedProvider`]; the table is frozen by
/// [`build`](FixedProviderBuilder::build) before the provider is shared.
#[derive(Debug, Clone, Default)]
pub struct FixedProviderBuilder {
    available: BTreeMap<ExternalId, BTreeMap<String, ValueSpecification>>,
}

impl FixedProviderBuilder {
    /// Register `spec` as available for `id`, replacing any earlier entry
    /// with the same value name.
    pub fn with(mut self, id: ExternalId, spec: ValueSpecification) -> Self {
        self.add(id, spec);
        self
    }

    pub fn add(&mut self, id: ExternalId, spec: ValueSpecification) -> &mut Self {
        self.available
            .entry(id)
            .or_default()
            .insert(spec.value_name().to_owned(), spec);
        self
    }

    pub fn build(self) -> FixedProvider {
        FixedProvider {
            available: self.available,
        }
    }
}
