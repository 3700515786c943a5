//! Deferred resolution signal and the per-call resolution context.
//!
//! A filter or provider that would need an out-of-band step (a remote
//! registry lookup, a not-yet-loaded snapshot) answers
//! [`Availability::Deferred`](crate::Availability::Deferred) instead of
//! blocking. The caller parks that exploration branch and asks again later.
//!
//! Whether an implementation may perform such a step synchronously is decided
//! by the [`BlockingPolicy`] carried in the [`ResolutionContext`] passed into
//! every call:
//!
//! ```rust
//! use availability_core::{Availability, BlockingPolicy, ResolutionContext};
//!
//! fn lookup(ctx: &ResolutionContext) -> Availability<()> {
//!     if let Err(signal) = ctx.block() {
//!         return signal.into();
//!     }
//!     // ... perform the blocking lookup ...
//!     Availability::Available(())
//! }
//!
//! assert!(lookup(&ResolutionContext::default()).is_deferred());
//! assert!(lookup(&ResolutionContext::new(BlockingPolicy::Permit)).is_available());
//! ```

use std::fmt::{Display, Formatter};

use tracing::trace;

use crate::Availability;

/// Control signal meaning "this branch needs an out-of-band lookup; treat it
/// as currently undecided".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DeferredResolution;

impl Display for DeferredResolution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("resolution deferred pending an out-of-band lookup")
    }
}

impl std::error::Error for DeferredResolution {}

/// Whether blocking out-of-band steps may run inside a resolution call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BlockingPolicy {
    /// The caller can park and retry; blocking steps answer deferred.
    #[default]
    Suspend,
    /// The caller cannot suspend; blocking steps run synchronously.
    Permit,
}

/// Execution context carried alongside each resolution call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ResolutionContext {
    blocking: BlockingPolicy,
}

impl ResolutionContext {
    pub const fn new(blocking: BlockingPolicy) -> Self {
        Self { blocking }
    }

    /// Context for callers that can park a branch and retry it.
    pub const fn suspending() -> Self {
        Self::new(BlockingPolicy::Suspend)
    }

    /// Context for callers that cannot suspend.
    pub const fn permitting() -> Self {
        Self::new(BlockingPolicy::Permit)
    }

    pub const fn blocking_policy(&self) -> BlockingPolicy {
        self.blocking
    }

    /// Announce a blocking step.
    ///
    /// Returns `Ok(())` when the step may run now, or the deferred signal when
    /// the caller must park the branch instead.
    pub fn block(&self) -> Result<(), DeferredResolution> {
        match self.blocking {
            BlockingPolicy::Permit => Ok(()),
            BlockingPolicy::Suspend => {
                trace!("blocking step requested under suspend policy; deferring");
                Err(DeferredResolution)
            }
        }
    }
}
