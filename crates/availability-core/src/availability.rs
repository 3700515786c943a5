//! Tri-state verdict returned by filters and providers.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::DeferredResolution;

/// Verdict of an availability check.
///
/// Hard "never satisfiable" failures travel separately as
/// [`AvailabilityError`](crate::AvailabilityError) so the three outcomes
/// here can be folded without error bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[must_use]
pub enum Availability<T> {
    /// The source can supply the value; for providers this carries the
    /// concrete specification.
    Available(T),
    /// The source cannot supply the value; try another one.
    Unavailable,
    /// The source cannot decide without an out-of-band step.
    Deferred,
}

impl<T> Availability<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred)
    }

    pub fn outcome(&self) -> Outcome {
        match self {
            Self::Available(_) => Outcome::Available,
            Self::Unavailable => Outcome::Unavailable,
            Self::Deferred => Outcome::Deferred,
        }
    }

    pub fn as_ref(&self) -> Availability<&T> {
        match self {
            Self::Available(value) => Availability::Available(value),
            Self::Unavailable => Availability::Unavailable,
            Self::Deferred => Availability::Deferred,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Availability<U> {
        match self {
            Self::Available(value) => Availability::Available(f(value)),
            Self::Unavailable => Availability::Unavailable,
            Self::Deferred => Availability::Deferred,
        }
    }

    /// Drop the payload, keeping only the verdict.
    pub fn verdict(&self) -> Availability<()> {
        self.as_ref().map(|_| ())
    }

    /// The payload when available.
    pub fn available(self) -> Option<T> {
        match self {
            Self::Available(value) => Some(value),
            Self::Unavailable | Self::Deferred => None,
        }
    }
}

impl Availability<()> {
    pub fn from_bool(available: bool) -> Self {
        if available {
            Self::Available(())
        } else {
            Self::Unavailable
        }
    }
}

impl<T> From<DeferredResolution> for Availability<T> {
    fn from(_: DeferredResolution) -> Self {
        Self::Deferred
    }
}

/// Payload-free outcome class of an [`Availability`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Available,
    Unavailable,
    Deferred,
}

impl Outcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
            Self::Deferred => "deferred",
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
