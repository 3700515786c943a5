//! Resolution of a target's external identification.

use std::collections::HashSet;

use tracing::trace;

use crate::{ComputationTargetSpecification, ExternalId, ExternalIdBundle, ExternalScheme, Target};

/// External identification extracted from a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identification<'a> {
    None,
    Single(&'a ExternalId),
    Bundle(&'a ExternalIdBundle),
}

impl<'a> Identification<'a> {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Identifiers in lookup order: the single identifier, or the bundle in
    /// its iteration order.
    pub fn ids(&self) -> impl Iterator<Item = &'a ExternalId> + 'a {
        let (single, bundle) = match *self {
            Self::None => (None, None),
            Self::Single(id) => (Some(id), None),
            Self::Bundle(bundle) => (None, Some(bundle)),
        };
        single.into_iter().chain(bundle.into_iter().flatten())
    }

    /// Whether any identifier carries one of `schemes`.
    pub fn has_scheme_in(&self, schemes: &HashSet<ExternalScheme>) -> bool {
        self.ids().any(|id| schemes.contains(id.scheme()))
    }
}

/// Extract the external identification of `target`.
///
/// A target that is itself an identifier or bundle is used directly; an
/// object target is asked for its single-identifier view first, then its
/// bundle view. Anything else has no identification.
pub fn identify<'a>(
    target_spec: &ComputationTargetSpecification,
    target: &'a Target,
) -> Identification<'a> {
    let identification = match target {
        Target::ExternalId(id) => Identification::Single(id),
        Target::Bundle(bundle) => Identification::Bundle(bundle),
        Target::Object(object) => {
            if let Some(id) = object.external_id() {
                Identification::Single(id)
            } else if let Some(bundle) = object.external_id_bundle() {
                Identification::Bundle(bundle)
            } else {
                Identification::None
            }
        }
        Target::UniqueId(_) | Target::Null => Identification::None,
    };

    if identification.is_none() {
        trace!(target_spec = %target_spec, "target has no external identification");
    }
    identification
}
