//! Exhaustion reporting and the pluggable exhaustion policy.
//!
//! Out-of-budget allocation is the one failure the arena does not treat
//! as a programmer error: it is routed to an [`ExhaustionHandler`]
//! injected at arena construction. The handler's `-> !` return type makes
//! "must not return into the engine" a compile-time contract rather than
//! a documentation note.

use std::error::Error;
use std::fmt;

/// An allocation request exceeded the arena's byte budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exhausted {
    /// Number of additional bytes requested.
    pub requested: usize,
    /// The configured budget in bytes.
    pub limit: usize,
}

impl fmt::Display for Exhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arena budget exhausted: requested {} additional bytes, limit {} bytes",
            self.requested, self.limit
        )
    }
}

impl Error for Exhausted {}

/// Policy invoked when an arena cannot satisfy an allocation.
///
/// Implementations may log, flush, or attempt last-resort recovery, but
/// they cannot return normally: the signature requires divergence
/// (terminate the process, or unwind past the arena call).
pub trait ExhaustionHandler {
    /// Handle an out-of-budget allocation. Never returns.
    fn exhausted(&self, info: &Exhausted) -> !;
}

/// The default exhaustion policy: print the diagnostic to stderr and
/// terminate the process with a non-zero status.
#[derive(Clone, Copy, Debug, Default)]
pub struct AbortHandler;

impl ExhaustionHandler for AbortHandler {
    fn exhausted(&self, info: &Exhausted) -> ! {
        eprintln!("{info}");
        std::process::exit(1);
    }
}
