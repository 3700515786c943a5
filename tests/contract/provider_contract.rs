use std::sync::Arc;
use std::thread;

use availability_core::{
    AvailabilityFilter, AvailabilityFilterExt, AvailabilityProvider,
    ComputationTargetSpecification, ComputationTargetType, DomainFilter, ExternalIdBundle,
    FixedProvider, MarketDataSpecificationProvider, Outcome, PermissiveProvider, Primitive,
    ResolutionContext, Security, Target, UniqueId, UnionProvider, ValueProperties,
    ValueRequirement, ValueSpecification, DATA_SOURCE,
};
use availability_tests::{id, scheme};

#[derive(Clone)]
struct ProviderCase {
    name: &'static str,
    provider: Arc<dyn AvailabilityProvider>,
}

struct Scenario {
    target_spec: ComputationTargetSpecification,
    target: Target,
    desired: ValueRequirement,
}

fn domain_source() -> DomainFilter {
    DomainFilter::new([scheme("Ticker")], ["Foo", "Bar"])
}

fn fixed_source() -> FixedProvider {
    let present = id("A~Present");
    let spec = ValueSpecification::new(
        "Foo",
        ComputationTargetSpecification::of(
            ComputationTargetType::Primitive,
            UniqueId::from_external_id(&present),
        ),
        ValueProperties::new(),
    )
    .expect("valid spec");
    FixedProvider::builder().with(present, spec).build()
}

fn provider_cases() -> Vec<ProviderCase> {
    let domain: Arc<dyn AvailabilityProvider> = Arc::new(
        domain_source()
            .with_provider(MarketDataSpecificationProvider::new().with_data_source("BLOOMBERG")),
    );
    let fixed: Arc<dyn AvailabilityProvider> = Arc::new(fixed_source());

    vec![
        ProviderCase {
            name: "domain",
            provider: domain.clone(),
        },
        ProviderCase {
            name: "fixed",
            provider: fixed.clone(),
        },
        ProviderCase {
            name: "permissive",
            provider: Arc::new(PermissiveProvider::default()),
        },
        ProviderCase {
            name: "union",
            provider: Arc::new(UnionProvider::new(vec![domain, fixed])),
        },
        ProviderCase {
            name: "empty_union",
            provider: Arc::new(UnionProvider::default()),
        },
    ]
}

fn scenarios() -> Vec<Scenario> {
    let security_uid = UniqueId::of("DbSec", "1").expect("valid uid");
    let security = Security::new(
        security_uid.clone(),
        ExternalIdBundle::of([id("Ticker~X"), id("BAD~Foo"), id("Ticker~Y")]),
    );
    let security_spec = security.specification();
    let primitive = Primitive::new(id("Ticker~Foo"));
    let primitive_spec = primitive.specification();

    let targets = vec![
        (ComputationTargetSpecification::null(), Target::from(id("Ticker~Foo"))),
        (ComputationTargetSpecification::null(), Target::from(id("A~Present"))),
        (ComputationTargetSpecification::null(), Target::from(id("A~Absent"))),
        (
            ComputationTargetSpecification::null(),
            Target::from(ExternalIdBundle::of([id("BAD~Foo"), id("ISIN~X")])),
        ),
        (security_spec, Target::object(security)),
        (primitive_spec, Target::object(primitive)),
        (
            ComputationTargetSpecification::of(ComputationTargetType::Security, security_uid.clone()),
            Target::from(security_uid),
        ),
        (ComputationTargetSpecification::null(), Target::Null),
    ];

    let mut scenarios = Vec::new();
    for (target_spec, target) in targets {
        for value_name in ["Foo", "Bar", "Cow"] {
            let desired = ValueRequirement::new(value_name, target_spec.clone())
                .expect("valid requirement");
            scenarios.push(Scenario {
                target_spec: target_spec.clone(),
                target: target.clone(),
                desired,
            });
        }
    }
    scenarios
}

fn provider_outcome(provider: &dyn AvailabilityProvider, scenario: &Scenario) -> Outcome {
    provider
        .get_availability(
            &ResolutionContext::default(),
            &scenario.target_spec,
            &scenario.target,
            &scenario.desired,
        )
        .expect("no provider in this contract fails")
        .outcome()
}

fn filter_outcome(filter: &dyn AvailabilityFilter, scenario: &Scenario) -> Outcome {
    filter
        .is_available(
            &ResolutionContext::default(),
            &scenario.target_spec,
            &scenario.target,
            &scenario.desired,
        )
        .expect("no filter in this contract fails")
        .outcome()
}

#[test]
fn filter_agrees_with_provider_for_all_providers() {
    let scenarios = scenarios();

    for case in provider_cases() {
        let filter = case.provider.clone().availability_filter();
        for scenario in &scenarios {
            assert_eq!(
                filter_outcome(filter.as_ref(), scenario),
                provider_outcome(case.provider.as_ref(), scenario),
                "provider '{}': {}",
                case.name,
                scenario.desired
            );
        }
    }
}

#[test]
fn available_specifications_name_the_requested_value() {
    let scenarios = scenarios();

    for case in provider_cases() {
        for scenario in &scenarios {
            let availability = case
                .provider
                .get_availability(
                    &ResolutionContext::default(),
                    &scenario.target_spec,
                    &scenario.target,
                    &scenario.desired,
                )
                .expect("no provider in this contract fails");
            if let Some(spec) = availability.available() {
                assert_eq!(
                    spec.value_name(),
                    scenario.desired.value_name(),
                    "provider '{}': {}",
                    case.name,
                    scenario.desired
                );
            }
        }
    }
}

#[test]
fn filter_paired_with_detail_provider_never_refuses_accepted_requirement() {
    let filter = domain_source();
    let provider = filter
        .clone()
        .with_provider(MarketDataSpecificationProvider::new());

    for scenario in &scenarios() {
        let accepted = filter_outcome(&filter, scenario) == Outcome::Available;
        let supplied = provider_outcome(&provider, scenario) == Outcome::Available;
        assert_eq!(accepted, supplied, "{}", scenario.desired);
    }
}

#[test]
fn repeated_calls_return_same_outcome_for_all_providers() {
    let scenarios = scenarios();

    for case in provider_cases() {
        for scenario in &scenarios {
            let first = provider_outcome(case.provider.as_ref(), scenario);
            for _ in 0..3 {
                assert_eq!(
                    provider_outcome(case.provider.as_ref(), scenario),
                    first,
                    "provider '{}': {}",
                    case.name,
                    scenario.desired
                );
            }
        }
    }
}

#[test]
fn providers_answer_identically_under_concurrent_reads() {
    let scenarios = scenarios();

    for case in provider_cases() {
        let expected = scenarios
            .iter()
            .map(|scenario| provider_outcome(case.provider.as_ref(), scenario))
            .collect::<Vec<_>>();

        thread::scope(|scope| {
            let workers = (0..4)
                .map(|_| {
                    let provider = Arc::clone(&case.provider);
                    let scenarios = &scenarios;
                    scope.spawn(move || {
                        scenarios
                            .iter()
                            .map(|scenario| provider_outcome(provider.as_ref(), scenario))
                            .collect::<Vec<_>>()
                    })
                })
                .collect::<Vec<_>>();

            for worker in workers {
                let observed = worker.join().expect("worker should not panic");
                assert_eq!(observed, expected, "provider '{}'", case.name);
            }
        });
    }
}

#[test]
fn domain_provider_describes_sourced_value() {
    let provider = domain_source()
        .with_provider(MarketDataSpecificationProvider::new().with_data_source("BLOOMBERG"));
    let target_spec = Primitive::new(id("Ticker~Foo")).specification();
    let desired = ValueRequirement::new("Foo", target_spec.clone()).expect("valid requirement");

    let spec = provider
        .get_availability(
            &ResolutionContext::default(),
            &target_spec,
            &Target::from(id("Ticker~Foo")),
            &desired,
        )
        .expect("domain provider never fails")
        .available()
        .expect("recognized scheme and name");

    assert_eq!(spec.value_name(), "Foo");
    assert_eq!(spec.target(), &target_spec);
    assert_eq!(spec.properties().single_value(DATA_SOURCE), Some("BLOOMBERG"));
}

#[test]
fn independently_built_providers_share_hint_keys() {
    let first = provider_cases();
    let second = provider_cases();

    for (left, right) in first.iter().zip(&second) {
        assert_eq!(
            left.provider.hint_key(),
            right.provider.hint_key(),
            "provider '{}'",
            left.name
        );
        assert_eq!(
            left.provider.clone().availability_filter().hint_key(),
            right.provider.clone().availability_filter().hint_key(),
            "provider '{}' filter",
            left.name
        );
    }
}
