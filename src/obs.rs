//! Optional observability helpers for strategy phases.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oxygen_hybrid.phase` with the `phase` and
//!   `stage` (call site) fields.
//! - Enable `metrics` to increment the `oxygen_hybrid_phase_total` counter for every
//!   attempt/success/failure, labeled by `phase` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Strategy phases observed by the transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseKind {
	/// Request phase building and dispatching the authentication request.
	Request,
	/// Callback phase validating the assertion and assembling the profile.
	Callback,
	/// Lazy OAuth hand-off exchanging the embedded request token.
	Handoff,
}
impl PhaseKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			PhaseKind::Request => "request",
			PhaseKind::Callback => "callback",
			PhaseKind::Handoff => "handoff",
		}
	}
}
impl Display for PhaseKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseOutcome {
	/// Entry to a phase helper.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure reported back to the caller (or contained, for the hand-off).
	Failure,
}
impl PhaseOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			PhaseOutcome::Attempt => "attempt",
			PhaseOutcome::Success => "success",
			PhaseOutcome::Failure => "failure",
		}
	}
}
impl Display for PhaseOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
