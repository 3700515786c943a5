//! Availability filter contract.
//!
//! A filter is the cheap half of a market data source: it answers whether a
//! value could be supplied without building the full specification. The
//! graph compiler probes filters pervasively while exploring candidate
//! production paths and only asks a provider for the specification once a
//! candidate is chosen.

use std::fmt;
use std::sync::Arc;

use crate::provider::{AvailabilityProvider, FilteredProvider};
use crate::{
    Availability, AvailabilityError, ComputationTargetSpecification, HintKey, ResolutionContext,
    Target, ValueRequirement,
};

/// Verdict of a filter check.
pub type FilterResult = Result<Availability<()>, AvailabilityError>;

/// Cheap availability predicate over (target, requirement).
///
/// Implementations must be immutable after construction: they are shared
/// through `Arc` and queried concurrently from many exploration branches.
pub trait AvailabilityFilter: fmt::Debug + Send + Sync + 'static {
    /// Whether the value described by `desired` could be supplied for `target`.
    ///
    /// # Errors
    ///
    /// Returns [`AvailabilityError::NeverSatisfiable`] when the requirement
    /// is impossible in principle.
    fn is_available(
        &self,
        ctx: &ResolutionContext,
        target_spec: &ComputationTargetSpecification,
        target: &Target,
        desired: &ValueRequirement,
    ) -> FilterResult;

    /// Identity of this filter's configuration.
    fn hint_key(&self) -> HintKey;
}

/// Composition helpers for sized filters.
pub trait AvailabilityFilterExt: AvailabilityFilter + Sized {
    /// Pair this filter with a provider that builds the specification once
    /// the filter has answered available.
    fn with_provider<P>(self, detail: P) -> FilteredProvider
    where
        P: AvailabilityProvider,
    {
        FilteredProvider::new(Arc::new(self), Arc::new(detail))
    }
}

impl<F: AvailabilityFilter> AvailabilityFilterExt for F {}

/// Filter that answers available for every request.
///
/// Used when building graphs without any knowledge of market data coverage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimisticFilter;

impl AvailabilityFilter for OptimisticFilter {
    fn is_available(
        &self,
        _ctx: &ResolutionContext,
        _target_spec: &ComputationTargetSpecification,
        _target: &Target,
        _desired: &ValueRequirement,
    ) -> FilterResult {
        Ok(Availability::Available(()))
    }

    fn hint_key(&self) -> HintKey {
        HintKey::Optimistic
    }
}
