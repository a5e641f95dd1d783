//! Engine error types.
//!
//! Every entry point returns `Result<Match, ScoutError>`. A `Rejection` is a
//! normal, expected outcome (bad timing, illegal play) reported back to the
//! requesting client only. A `ContractViolation` means the caller broke the
//! engine's contract (indices that cannot exist, mismatched ids); correct
//! integrations never produce one.
//!
//! In both cases the input `Match` is left untouched.

use thiserror::Error;

use crate::core::{PhaseKind, Seat};

/// Rejection category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// Move shape is invalid.
    Structural,
    /// Issued by a player without the right to act.
    Turn,
    /// Well-formed and well-timed, but breaks a game rule.
    Rule,
    /// Not valid in the current phase.
    Phase,
}

/// A move or lifecycle request the rules refuse.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    // === Structural ===
    #[error("no cards selected")]
    EmptySelection,
    #[error("selected cards are not adjacent in hand")]
    NotContiguous,
    #[error("card {index} is not an end of the active set")]
    NotAnEnd { index: usize },

    // === Turn ===
    #[error("player {0} is not seated in this match")]
    UnknownPlayer(String),
    #[error("it is {holder}'s turn")]
    NotYourTurn { holder: Seat },
    #[error("only the host can do that")]
    NotHost,

    // === Rule ===
    #[error("selected cards do not form a set")]
    NotASet,
    #[error("selected cards do not beat the active set")]
    NotStronger,
    #[error("no active set to scout from")]
    NoActiveSet,
    #[error("cannot scout your own set")]
    ScoutOwnSet,
    #[error("no scout chips left")]
    NoScoutChips,
    #[error("already scouted during this scout & show")]
    AlreadyScouted,
    #[error("scout before showing during scout & show")]
    MustScoutFirst,
    #[error("scout & show already used this round")]
    ScoutAndShowUsed,
    #[error("scout & show already in progress")]
    ScoutAndShowPending,
    #[error("end turn is only allowed after scouting during scout & show")]
    CannotEndTurn,
    #[error("already ready")]
    AlreadyReady,
    #[error("every round has been played")]
    NoRoundsLeft,
    #[error("match already started")]
    AlreadyStarted,
    #[error("match is full ({max} players)")]
    MatchFull { max: usize },
    #[error("need at least {min} players, have {have}")]
    NotEnoughPlayers { min: usize, have: usize },
    #[error("player {0} already joined")]
    DuplicatePlayer(String),

    // === Phase ===
    #[error("not allowed during {actual:?} (needs {expected:?})")]
    WrongPhase {
        expected: PhaseKind,
        actual: PhaseKind,
    },
}

impl Rejection {
    /// Taxonomy bucket for this rejection.
    #[must_use]
    pub fn kind(&self) -> ViolationKind {
        use Rejection::*;
        match self {
            EmptySelection | NotContiguous | NotAnEnd { .. } => ViolationKind::Structural,
            UnknownPlayer(_) | NotYourTurn { .. } | NotHost => ViolationKind::Turn,
            WrongPhase { .. } => ViolationKind::Phase,
            NotASet | NotStronger | NoActiveSet | ScoutOwnSet | NoScoutChips | AlreadyScouted
            | MustScoutFirst | ScoutAndShowUsed | ScoutAndShowPending | CannotEndTurn
            | AlreadyReady | NoRoundsLeft | AlreadyStarted | MatchFull { .. }
            | NotEnoughPlayers { .. } | DuplicatePlayer(_) => ViolationKind::Rule,
        }
    }
}

/// Caller-side contract breach.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("hand index {index} out of range (hand has {len} cards)")]
    HandIndex { index: usize, len: usize },
    #[error("insert position {index} out of range (hand has {len} cards)")]
    InsertIndex { index: usize, len: usize },
    #[error("match {0} not found")]
    UnknownMatch(String),
    #[error("match {0} already exists")]
    MatchExists(String),
    #[error("player count {0} is outside 2..=5")]
    PlayerCount(usize),
}

/// Error returned by every engine entry point.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ScoutError {
    #[error(transparent)]
    Rejected(#[from] Rejection),
    #[error("contract violation: {0}")]
    Contract(#[from] ContractViolation),
}

impl ScoutError {
    /// The rejection, if this is one.
    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            ScoutError::Rejected(r) => Some(r),
            ScoutError::Contract(_) => None,
        }
    }

    /// Whether this error is a rejection of the given kind.
    #[must_use]
    pub fn is(&self, kind: ViolationKind) -> bool {
        self.rejection().is_some_and(|r| r.kind() == kind)
    }
}

/// Engine result alias.
pub type ScoutResult<T> = Result<T, ScoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_kinds() {
        assert_eq!(Rejection::NotContiguous.kind(), ViolationKind::Structural);
        assert_eq!(Rejection::NotAnEnd { index: 1 }.kind(), ViolationKind::Structural);
        assert_eq!(
            Rejection::NotYourTurn { holder: Seat::new(1) }.kind(),
            ViolationKind::Turn
        );
        assert_eq!(Rejection::NotStronger.kind(), ViolationKind::Rule);
        assert_eq!(Rejection::NoScoutChips.kind(), ViolationKind::Rule);
        assert_eq!(
            Rejection::WrongPhase {
                expected: PhaseKind::Playing,
                actual: PhaseKind::Scoring,
            }
            .kind(),
            ViolationKind::Phase
        );
    }

    #[test]
    fn test_scout_error_conversions() {
        let err: ScoutError = Rejection::ScoutOwnSet.into();
        assert!(err.is(ViolationKind::Rule));
        assert_eq!(err.to_string(), "cannot scout your own set");

        let err: ScoutError = ContractViolation::HandIndex { index: 9, len: 3 }.into();
        assert!(err.rejection().is_none());
        assert!(!err.is(ViolationKind::Structural));
        assert_eq!(
            err.to_string(),
            "contract violation: hand index 9 out of range (hand has 3 cards)"
        );
    }
}
