//! Federation of several market data sources into one.
//!
//! Members are consulted in the order supplied:
//!
//! - the first member answering available wins outright,
//! - a never-satisfiable error from any member propagates immediately,
//! - a deferred member is remembered and the remaining members are still
//!   consulted, since one of them may answer available without it,
//! - once every member has answered, the union defers if any member did and
//!   is unavailable otherwise.
//!
//! The outcome class therefore does not depend on member order; only which
//! member's specification wins, and how many members are consulted, does.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::filter::{AvailabilityFilter, FilterResult};
use crate::provider::{AvailabilityProvider, ProviderResult};
use crate::{
    Availability, AvailabilityError, ComputationTargetSpecification, HintKey, ResolutionContext,
    Target, ValueRequirement,
};

fn first_available<C, T, F>(members: &[C], mut probe: F) -> Result<Availability<T>, AvailabilityError>
where
    F: FnMut(&C) -> Result<Availability<T>, AvailabilityError>,
{
    let mut deferred = false;

    for (index, member) in members.iter().enumerate() {
        match probe(member)? {
            Availability::Available(value) => {
                trace!(member = index, "union member answered available");
                return Ok(Availability::Available(value));
            }
            Availability::Deferred => {
                trace!(member = index, "union member deferred; trying remaining members");
                deferred = true;
            }
            Availability::Unavailable => {
                trace!(member = index, "union member answered unavailable");
            }
        }
    }

    if deferred {
        debug!(
            members = members.len(),
            "no union member available; deferring resolution"
        );
        Ok(Availability::Deferred)
    } else {
        Ok(Availability::Unavailable)
    }
}

/// Union of availability filters.
#[derive(Debug, Clone, Default)]
pub struct UnionFilter {
    filters: Vec<Arc<dyn AvailabilityFilter>>,
}

impl UnionFilter {
    pub fn new(filters: Vec<Arc<dyn AvailabilityFilter>>) -> Self {
        Self { filters }
    }

    pub fn with(mut self, filter: impl AvailabilityFilter) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    pub fn filters(&self) -> &[Arc<dyn AvailabilityFilter>] {
        &self.filters
    }
}

impl AvailabilityFilter for UnionFilter {
    fn is_available(
        &self,
        ctx: &ResolutionContext,
        target_spec: &ComputationTargetSpecification,
        target: &Target,
        desired: &ValueRequirement,
    ) -> FilterResult {
        first_available(&self.filters, |filter| {
            filter.is_available(ctx, target_spec, target, desired)
        })
    }

    fn hint_key(&self) -> HintKey {
        HintKey::Union {
            members: self.filters.iter().map(|filter| filter.hint_key()).collect(),
        }
    }
}

/// Union of availability providers.
///
/// Its filter is the union of its members' filters, so the cheap check and
/// the full check agree member by member.
#[derive(Debug, Clone, Default)]
pub struct UnionProvider {
    providers: Vec<Arc<dyn AvailabilityProvider>>,
}

impl UnionProvider {
    pub fn new(providers: Vec<Arc<dyn AvailabilityProvider>>) -> Self {
        Self { providers }
    }

    pub fn with(mut self, provider: impl AvailabilityProvider) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    pub fn providers(&self) -> &[Arc<dyn AvailabilityProvider>] {
        &self.providers
    }
}

impl AvailabilityProvider for UnionProvider {
    fn get_availability(
        &self,
        ctx: &ResolutionContext,
        target_spec: &ComputationTargetSpecification,
        target: &Target,
        desired: &ValueRequirement,
    ) -> ProviderResult {
        first_available(&self.providers, |provider| {
            provider.get_availability(ctx, target_spec, target, desired)
        })
    }

    fn availability_filter(self: Arc<Self>) -> Arc<dyn AvailabilityFilter> {
        let filters = self
            .providers
            .iter()
            .map(|provider| Arc::clone(provider).availability_filter())
            .collect();
        Arc::new(UnionFilter::new(filters))
    }

    fn hint_key(&self) -> HintKey {
        HintKey::Union {
            members: self
                .providers
                .iter()
                .map(|provider| provider.hint_key())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::{DeferredResolution, OptimisticFilter};

    #[derive(Debug)]
    struct Scripted {
        verdict: Result<Availability<()>, AvailabilityError>,
        calls: AtomicUsize,
    }

    impl Scripted {
        fn new(verdict: Result<Availability<()>, AvailabilityError>) -> Arc<Self> {
            Arc::new(Self {
                verdict,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl AvailabilityFilter for Scripted {
        fn is_available(
            &self,
            _ctx: &ResolutionContext,
            _target_spec: &ComputationTargetSpecification,
            _target: &Target,
            _desired: &ValueRequirement,
        ) -> FilterResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.verdict.clone()
        }

        fn hint_key(&self) -> HintKey {
            HintKey::named("scripted")
        }
    }

    fn check(filter: &UnionFilter) -> FilterResult {
        let desired = ValueRequirement::new("Market_Value", ComputationTargetSpecification::null())
            .expect("valid requirement");
        filter.is_available(
            &ResolutionContext::default(),
            desired.target(),
            &Target::Null,
            &desired,
        )
    }

    fn union_of(members: &[Arc<Scripted>]) -> UnionFilter {
        UnionFilter::new(
            members
                .iter()
                .map(|member| Arc::clone(member) as Arc<dyn AvailabilityFilter>)
                .collect(),
        )
    }

    #[test]
    fn empty_union_is_unavailable() {
        assert_eq!(
            check(&UnionFilter::default()).expect("never fails"),
            Availability::Unavailable
        );
    }

    #[test]
    fn first_available_member_short_circuits() {
        let deferred = Scripted::new(Ok(DeferredResolution.into()));
        let available = Scripted::new(Ok(Availability::Available(())));
        let unreached = Scripted::new(Ok(Availability::Unavailable));

        let union = union_of(&[deferred.clone(), available.clone(), unreached.clone()]);

        assert!(check(&union).expect("never fails").is_available());
        assert_eq!(deferred.calls(), 1);
        assert_eq!(available.calls(), 1);
        assert_eq!(unreached.calls(), 0);
    }

    #[test]
    fn deferral_is_raised_only_after_all_members_answer() {
        let unavailable = Scripted::new(Ok(Availability::Unavailable));
        let deferred = Scripted::new(Ok(Availability::Deferred));
        let trailing = Scripted::new(Ok(Availability::Unavailable));

        let union = union_of(&[unavailable.clone(), deferred.clone(), trailing.clone()]);

        assert!(check(&union).expect("never fails").is_deferred());
        assert_eq!(trailing.calls(), 1);
    }

    #[test]
    fn never_satisfiable_propagates_immediately() {
        let deferred = Scripted::new(Ok(Availability::Deferred));
        let failing = Scripted::new(Err(AvailabilityError::never_satisfiable(
            "Market_Value",
            "malformed constraints",
        )));
        let available = Scripted::new(Ok(Availability::Available(())));

        let union = union_of(&[deferred, failing, available.clone()]);

        let err = check(&union).expect_err("must fail");
        assert!(matches!(err, AvailabilityError::NeverSatisfiable { .. }));
        assert_eq!(available.calls(), 0);
    }

    #[test]
    fn outcome_class_is_independent_of_member_order() {
        let verdicts = [
            Availability::Unavailable,
            Availability::Deferred,
            Availability::Available(()),
        ];
        let orders: [[usize; 3]; 6] = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];

        for subset in 0..verdicts.len() {
            let mut outcomes = orders
                .iter()
                .map(|order| {
                    let members = order
                        .iter()
                        .filter(|&&index| index != subset)
                        .map(|&index| Scripted::new(Ok(verdicts[index].clone())))
                        .collect::<Vec<_>>();
                    check(&union_of(&members)).expect("never fails").outcome()
                })
                .collect::<Vec<_>>();
            outcomes.dedup();
            assert_eq!(outcomes.len(), 1, "excluding member {subset}: {outcomes:?}");
        }
    }

    #[test]
    fn hint_key_lists_members_in_order() {
        let union = UnionFilter::default()
            .with(OptimisticFilter)
            .with(UnionFilter::default());

        assert_eq!(
            union.hint_key(),
            HintKey::Union {
                members: vec![HintKey::Optimistic, HintKey::Union { members: vec![] }],
            }
        );
    }
}
