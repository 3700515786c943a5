//! Scheme and value-name matcher.

use std::collections::HashSet;

use tracing::trace;

use crate::filter::{AvailabilityFilter, FilterResult};
use crate::identification::{identify, Identification};
use crate::{
    Availability, ComputationTargetSpecification, ExternalScheme, HintKey, ResolutionContext,
    Target, ValueRequirement,
};

/// Filter accepting requirements whose value name is recognized, about
/// targets carrying an identifier of a recognized scheme.
///
/// The check is local and synchronous: it never fails and never defers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainFilter {
    schemes: HashSet<ExternalScheme>,
    names: HashSet<String>,
}

impl DomainFilter {
    pub fn new<S, N>(schemes: S, names: N) -> Self
    where
        S: IntoIterator<Item = ExternalScheme>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        Self {
            schemes: schemes.into_iter().collect(),
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn schemes(&self) -> &HashSet<ExternalScheme> {
        &self.schemes
    }

    pub fn names(&self) -> &HashSet<String> {
        &self.names
    }

    /// Whether `desired` could be supplied for `target`.
    pub fn accepts(
        &self,
        target_spec: &ComputationTargetSpecification,
        target: &Target,
        desired: &ValueRequirement,
    ) -> bool {
        if !self.names.contains(desired.value_name()) {
            trace!(value_name = desired.value_name(), "value name not recognized");
            return false;
        }

        match identify(target_spec, target) {
            Identification::None => false,
            Identification::Single(id) => self.schemes.contains(id.scheme()),
            identification @ Identification::Bundle(_) => identification.has_scheme_in(&self.schemes),
        }
    }
}

impl AvailabilityFilter for DomainFilter {
    fn is_available(
        &self,
        _ctx: &ResolutionContext,
        target_spec: &ComputationTargetSpecification,
        target: &Target,
        desired: &ValueRequirement,
    ) -> FilterResult {
        Ok(Availability::from_bool(
            self.accepts(target_spec, target, desired),
        ))
    }

    fn hint_key(&self) -> HintKey {
        let mut schemes = self.schemes.iter().cloned().collect::<Vec<_>>();
        schemes.sort();
        let mut names = self.names.iter().cloned().collect::<Vec<_>>();
        names.sort();
        HintKey::Domain { schemes, names }
    }
}
