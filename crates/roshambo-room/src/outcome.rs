//! The pure rock/paper/scissors outcome function.
//!
//! The server never puts a [`RoundResult`] on the wire (`round-complete`
//! carries raw choices and each client resolves locally), but the rule
//! is part of the game's contract, so it lives here with the rest of
//! the core and is pinned by tests.

use roshambo_protocol::Choice;

/// The result of a round from the first argument's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundResult {
    Win,
    Lose,
    Draw,
}

/// Resolves a pair of choices from `a`'s perspective.
///
/// Total and pure: every pair of valid choices has exactly one result,
/// and `resolve(a, b) == Win` exactly when `resolve(b, a) == Lose`.
pub fn resolve(a: Choice, b: Choice) -> RoundResult {
    use Choice::*;
    if a == b {
        return RoundResult::Draw;
    }
    match (a, b) {
        (Rock, Scissors) | (Scissors, Paper) | (Paper, Rock) => RoundResult::Win,
        _ => RoundResult::Lose,
    }
}
