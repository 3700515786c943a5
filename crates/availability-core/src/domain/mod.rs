//! # Domain Models
//!
//! Data-model types the availability layer reasons about. They are owned by
//! the wider analytics platform and passed through this crate unchanged.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ExternalScheme`] | Identifier namespace (`TICKER`, `ISIN`, ...) |
//! | [`ExternalId`] | `SCHEME~VALUE` identifier of a real-world entity |
//! | [`ExternalIdBundle`] | Identifiers referring to the same subject |
//! | [`UniqueId`] | Platform-internal identity |
//! | [`ComputationTargetSpecification`] | Type-tagged identity of a subject |
//! | [`Target`] | Runtime subject of an availability check |
//! | [`ValueRequirement`] | A requested value with constraints |
//! | [`ValueSpecification`] | The concrete value a source would produce |
//!
//! All constructors validate their input and return [`ValidationError`](crate::ValidationError)
//! on empty schemes, values or names.

mod identifier;
mod target;
mod value;

pub use identifier::{ExternalId, ExternalIdBundle, ExternalScheme, UniqueId};
pub use target::{
    ComputationTargetSpecification, ComputationTargetType, Primitive, Security, Target,
    TargetIdentification,
};
pub use value::{ValueProperties, ValueRequirement, ValueSpecification, DATA_SOURCE, FUNCTION};
