//! # Availability Core
//!
//! Market data availability resolution for dependency-graph building.
//!
//! ## Overview
//!
//! Before committing to an expensive graph build, the graph compiler asks
//! whether the raw market data a computation needs can be obtained at all.
//! This crate answers that question across a federation of independently
//! configured market data sources:
//!
//! - **Filters** give a cheap yes / no / undecided verdict
//! - **Providers** additionally describe the concrete value they would produce
//! - **Unions** federate an ordered list of sources into one verdict
//! - **Deferred resolution** lets a synchronous call report "cannot decide
//!   yet" instead of blocking on an out-of-band lookup
//!
//! The crate does not fetch, cache or persist market data and performs no
//! I/O.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`availability`] | Tri-state [`Availability`] verdict |
//! | [`config`] | JSON source configuration building provider trees |
//! | [`deferred`] | Deferred resolution signal and [`ResolutionContext`] |
//! | [`domain`] | Identifiers, targets, requirements and specifications |
//! | [`domain_filter`] | Scheme and value-name matcher |
//! | [`error`] | Core error types |
//! | [`filter`] | [`AvailabilityFilter`] contract |
//! | [`fixed`] | Static identifier table provider |
//! | [`hint`] | Configuration identity ([`HintKey`]) |
//! | [`identification`] | Target identification resolver |
//! | [`provider`] | [`AvailabilityProvider`] contract and filter-backed providers |
//! | [`union`] | Union combinator |
//!
//! ## Quick Start
//!
//! ```rust
//! use availability_core::{
//!     AvailabilityFilterExt, AvailabilityProvider, ComputationTargetSpecification,
//!     DomainFilter, ExternalId, ExternalScheme, MarketDataSpecificationProvider,
//!     ResolutionContext, Target, ValueRequirement,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = DomainFilter::new([ExternalScheme::parse("Ticker")?], ["Market_Value"])
//!     .with_provider(MarketDataSpecificationProvider::new().with_data_source("BLOOMBERG"));
//!
//! let target = Target::from(ExternalId::parse("Ticker~AAPL")?);
//! let desired = ValueRequirement::new("Market_Value", ComputationTargetSpecification::null())?;
//!
//! let availability = provider.get_availability(
//!     &ResolutionContext::default(),
//!     desired.target(),
//!     &target,
//!     &desired,
//! )?;
//! assert!(availability.is_available());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ Graph compiler  │
//! └────────┬────────┘
//!          │ get_availability / is_available
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ UnionProvider   │────▶│ FilteredProvider │──▶ DomainFilter
//! └────────┬────────┘     └──────────────────┘   + MarketDataSpecificationProvider
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ FixedProvider   │
//! └─────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Three outcomes are kept apart:
//!
//! ```rust
//! use availability_core::{Availability, AvailabilityError, ValueSpecification};
//!
//! fn handle(result: Result<Availability<ValueSpecification>, AvailabilityError>) {
//!     match result {
//!         Ok(Availability::Available(_spec)) => {
//!             // Use this source
//!         }
//!         Ok(Availability::Unavailable) => {
//!             // Try another source or production path
//!         }
//!         Ok(Availability::Deferred) => {
//!             // Park the branch and retry later
//!         }
//!         Err(AvailabilityError::NeverSatisfiable { .. }) => {
//!             // Abandon the requirement
//!         }
//!     }
//! }
//! ```

pub mod availability;
pub mod config;
pub mod deferred;
pub mod domain;
pub mod domain_filter;
pub mod error;
pub mod filter;
pub mod fixed;
pub mod hint;
pub mod identification;
pub mod provider;
pub mod union;

// Re-export commonly used types at crate root for convenience

// Verdicts and deferral
pub use availability::{Availability, Outcome};
pub use deferred::{BlockingPolicy, DeferredResolution, ResolutionContext};

// Configuration
pub use config::{FixedEntryConfig, SourceConfig};

// Domain models
pub use domain::{
    ComputationTargetSpecification, ComputationTargetType, ExternalId, ExternalIdBundle,
    ExternalScheme, Primitive, Security, Target, TargetIdentification, UniqueId, ValueProperties,
    ValueRequirement, ValueSpecification, DATA_SOURCE, FUNCTION,
};

// Error types
pub use error::{AvailabilityError, ConfigError, ValidationError};

// Filters and providers
pub use domain_filter::DomainFilter;
pub use filter::{AvailabilityFilter, AvailabilityFilterExt, FilterResult, OptimisticFilter};
pub use fixed::{FixedProvider, FixedProviderBuilder};
pub use hint::HintKey;
pub use identification::{identify, Identification};
pub use provider::{
    AvailabilityProvider, FilteredProvider, MarketDataSpecificationProvider, PermissiveProvider,
    ProviderFilter, ProviderResult, MARKET_DATA_SOURCING_FUNCTION,
};
pub use union::{UnionFilter, UnionProvider};
