//! Availability provider contract and its filter-backed implementations.

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::filter::{AvailabilityFilter, FilterResult, OptimisticFilter};
use crate::{
    Availability, AvailabilityError, ComputationTargetSpecification, HintKey, ResolutionContext,
    Target, ValueProperties, ValueRequirement, ValueSpecification, DATA_SOURCE, FUNCTION,
};

/// Function identifier stamped on specifications of raw market data.
pub const MARKET_DATA_SOURCING_FUNCTION: &str = "MarketDataSourcingFunction";

/// Verdict of a provider check.
pub type ProviderResult = Result<Availability<ValueSpecification>, AvailabilityError>;

/// Market data source that, on "available", also describes exactly what it
/// would produce.
///
/// # Required Methods
///
/// | Method | Description |
/// |--------|-------------|
/// | [`get_availability`](AvailabilityProvider::get_availability) | Full check producing the specification |
/// | [`hint_key`](AvailabilityProvider::hint_key) | Configuration identity |
///
/// [`availability_filter`](AvailabilityProvider::availability_filter) has a
/// default that runs the full check and discards the specification; override
/// it when a cheaper equivalent exists.
pub trait AvailabilityProvider: fmt::Debug + Send + Sync + 'static {
    /// The specification this source would produce for `desired`, or
    /// [`Availability::Unavailable`] when another source must be tried.
    ///
    /// # Errors
    ///
    /// Returns [`AvailabilityError::NeverSatisfiable`] when the requirement
    /// is impossible in principle.
    fn get_availability(
        &self,
        ctx: &ResolutionContext,
        target_spec: &ComputationTargetSpecification,
        target: &Target,
        desired: &ValueRequirement,
    ) -> ProviderResult;

    /// Cheap filter agreeing with this provider on every input.
    fn availability_filter(self: Arc<Self>) -> Arc<dyn AvailabilityFilter> {
        Arc::new(ProviderFilter::new(self))
    }

    /// Identity of this provider's configuration.
    fn hint_key(&self) -> HintKey;
}

/// Filter view over a provider.
pub struct ProviderFilter<P: ?Sized> {
    provider: Arc<P>,
}

impl<P: ?Sized> ProviderFilter<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }
}

impl<P: fmt::Debug + ?Sized> fmt::Debug for ProviderFilter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderFilter")
            .field("provider", &self.provider)
            .finish()
    }
}

impl<P: AvailabilityProvider + ?Sized> AvailabilityFilter for ProviderFilter<P> {
    fn is_available(
        &self,
        ctx: &ResolutionContext,
        target_spec: &ComputationTargetSpecification,
        target: &Target,
        desired: &ValueRequirement,
    ) -> FilterResult {
        self.provider
            .get_availability(ctx, target_spec, target, desired)
            .map(|availability| availability.verdict())
    }

    fn hint_key(&self) -> HintKey {
        HintKey::provider_filter(self.provider.hint_key())
    }
}

/// Provider that runs a cheap filter first and only asks the detail provider
/// for a specification once the filter has answered available.
#[derive(Debug, Clone)]
pub struct FilteredProvider {
    filter: Arc<dyn AvailabilityFilter>,
    detail: Arc<dyn AvailabilityProvider>,
}

impl FilteredProvider {
    pub fn new(filter: Arc<dyn AvailabilityFilter>, detail: Arc<dyn AvailabilityProvider>) -> Self {
        Self { filter, detail }
    }

    pub fn filter(&self) -> &Arc<dyn AvailabilityFilter> {
        &self.filter
    }

    pub fn detail(&self) -> &Arc<dyn AvailabilityProvider> {
        &self.detail
    }
}

impl AvailabilityProvider for FilteredProvider {
    fn get_availability(
        &self,
        ctx: &ResolutionContext,
        target_spec: &ComputationTargetSpecification,
        target: &Target,
        desired: &ValueRequirement,
    ) -> ProviderResult {
        match self.filter.is_available(ctx, target_spec, target, desired)? {
            Availability::Available(()) => {
                let availability = self
                    .detail
                    .get_availability(ctx, target_spec, target, desired)?;
                if availability.is_unavailable() {
                    warn!(
                        requirement = %desired,
                        "detail provider refused a requirement its filter accepted"
                    );
                }
                Ok(availability)
            }
            Availability::Unavailable => Ok(Availability::Unavailable),
            Availability::Deferred => Ok(Availability::Deferred),
        }
    }

    fn availability_filter(self: Arc<Self>) -> Arc<dyn AvailabilityFilter> {
        Arc::clone(&self.filter)
    }

    fn hint_key(&self) -> HintKey {
        HintKey::filtered(self.filter.hint_key(), self.detail.hint_key())
    }
}

/// Detail provider describing raw market data for any requirement.
///
/// The specification names the requested value on the queried target, with
/// the sourcing function and, when configured, the data source as properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketDataSpecificationProvider {
    function_id: String,
    data_source: Option<String>,
}

impl Default for MarketDataSpecificationProvider {
    fn default() -> Self {
        Self {
            function_id: MARKET_DATA_SOURCING_FUNCTION.to_owned(),
            data_source: None,
        }
    }
}

impl MarketDataSpecificationProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data_source(mut self, data_source: impl Into<String>) -> Self {
        self.data_source = Some(data_source.into());
        self
    }

    pub fn with_function_id(mut self, function_id: impl Into<String>) -> Self {
        self.function_id = function_id.into();
        self
    }

    pub fn specification(
        &self,
        target_spec: &ComputationTargetSpecification,
        desired: &ValueRequirement,
    ) -> ValueSpecification {
        let mut properties = ValueProperties::new().with(FUNCTION, self.function_id.as_str());
        if let Some(data_source) = &self.data_source {
            properties = properties.with(DATA_SOURCE, data_source.as_str());
        }
        ValueSpecification::answering(desired, target_spec.clone(), properties)
    }
}

impl AvailabilityProvider for MarketDataSpecificationProvider {
    fn get_availability(
        &self,
        _ctx: &ResolutionContext,
        target_spec: &ComputationTargetSpecification,
        _target: &Target,
        desired: &ValueRequirement,
    ) -> ProviderResult {
        Ok(Availability::Available(
            self.specification(target_spec, desired),
        ))
    }

    fn availability_filter(self: Arc<Self>) -> Arc<dyn AvailabilityFilter> {
        Arc::new(OptimisticFilter)
    }

    fn hint_key(&self) -> HintKey {
        HintKey::Specification {
            function_id: self.function_id.clone(),
            data_source: self.data_source.clone(),
        }
    }
}

/// Provider claiming every requirement as raw market data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissiveProvider {
    detail: MarketDataSpecificationProvider,
}

impl PermissiveProvider {
    pub fn new(detail: MarketDataSpecificationProvider) -> Self {
        Self { detail }
    }
}

impl AvailabilityProvider for PermissiveProvider {
    fn get_availability(
        &self,
        ctx: &ResolutionContext,
        target_spec: &ComputationTargetSpecification,
        target: &Target,
        desired: &ValueRequirement,
    ) -> ProviderResult {
        self.detail.get_availability(ctx, target_spec, target, desired)
    }

    fn availability_filter(self: Arc<Self>) -> Arc<dyn AvailabilityFilter> {
        Arc::new(OptimisticFilter)
    }

    fn hint_key(&self) -> HintKey {
        HintKey::filtered(OptimisticFilter.hint_key(), self.detail.hint_key())
    }
}
