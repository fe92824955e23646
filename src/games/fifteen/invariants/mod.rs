//! Session-wide guarantees for sum-to-15.
//!
//! Three properties hold for every `SessionActive` the engine can reach:
//! the board is the opening plus the accepted placements in order, no
//! magnitude is both on the board and in a pool, and at most one negative
//! was ever placed. `EngineMoveContract::post` checks them after each of
//! the engine's own placements in debug builds.

/// A property of a session state.
pub trait Invariant<S> {
    /// Returns true if the property holds for `state`.
    fn holds(state: &S) -> bool;

    /// What the property guarantees, used in violation reports.
    fn description() -> &'static str;
}

/// A broken guarantee, named by its description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the broken invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a violation report.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Several invariants checked as one, reporting every failure.
pub trait InvariantSet<S> {
    /// Checks each member in order and collects the ones that fail.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect(checks: &[(bool, &'static str)]) -> Result<(), Vec<InvariantViolation>> {
    let violations: Vec<_> = checks
        .iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(*description))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, A: Invariant<S>, B: Invariant<S>> InvariantSet<S> for (A, B) {
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        collect(&[
            (A::holds(state), A::description()),
            (B::holds(state), B::description()),
        ])
    }
}

impl<S, A: Invariant<S>, B: Invariant<S>, C: Invariant<S>> InvariantSet<S> for (A, B, C) {
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        collect(&[
            (A::holds(state), A::description()),
            (B::holds(state), B::description()),
            (C::holds(state), C::description()),
        ])
    }
}

pub mod disjoint_pools;
pub mod monotonic_board;
pub mod single_negative;

pub use disjoint_pools::DisjointPoolsInvariant;
pub use monotonic_board::MonotonicBoardInvariant;
pub use single_negative::SingleNegativeInvariant;

/// All session invariants as a composable set.
pub type FifteenInvariants = (
    MonotonicBoardInvariant,
    DisjointPoolsInvariant,
    SingleNegativeInvariant,
);
