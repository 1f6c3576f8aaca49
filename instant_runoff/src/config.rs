use std::error::Error;
use std::fmt::Display;

// ******** Output data structures *********

/// The outcome of a tabulation: a single winning candidate, or no winner at all.
///
/// Ties and empty elections are legitimate outcomes and are reported as
/// `NoWinner`, never as errors.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum Decision<C> {
    Winner(C),
    NoWinner,
}

impl<C> Decision<C> {
    /// The winning candidate, if there is one.
    pub fn winner(&self) -> Option<&C> {
        match self {
            Decision::Winner(c) => Some(c),
            Decision::NoWinner => None,
        }
    }

    pub(crate) fn map<D>(self, f: impl FnOnce(C) -> D) -> Decision<D> {
        match self {
            Decision::Winner(c) => Decision::Winner(f(c)),
            Decision::NoWinner => Decision::NoWinner,
        }
    }
}

/// The reason why the round loop stopped.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Termination {
    /// One candidate holds strictly more than half of the continuing votes.
    Majority,
    /// Only one candidate is still active. It wins regardless of its count.
    SoleSurvivor,
    /// All the active candidates have the same count: nobody can be eliminated.
    Deadlock,
    /// No ballot survived sanitization.
    NoBallots,
    /// The round budget was spent without reaching a decision.
    RoundBudgetExhausted,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct EliminationStats<C> {
    pub candidate: C,
    /// Number of ballots moved to each continuing candidate.
    pub transfers: Vec<(C, u64)>,
    /// Number of ballots that had no continuing preference left.
    pub exhausted: u64,
}

/// Statistics for one round
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RoundStats<C> {
    pub round: u32,
    /// Count for every active candidate at the start of the round.
    pub tally: Vec<(C, u64)>,
    pub active_votes: u64,
    pub threshold: u64,
    pub elected: Option<C>,
    pub eliminated: Vec<EliminationStats<C>>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VotingResult<C> {
    pub decision: Decision<C>,
    pub termination: Termination,
    /// Winning threshold of the last round played (0 if no round was played).
    pub threshold: u64,
    pub round_stats: Vec<RoundStats<C>>,
}

/// Errors caused by an invalid election setup.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum VotingErrors {
    /// The declared candidates contain the same identifier twice.
    /// The position is the index of the repeated entry.
    DuplicateCandidate(usize),
    /// More distinct candidates than the count can identify (`u32::MAX`).
    TooManyCandidates,
}

impl Error for VotingErrors {}

impl Display for VotingErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VotingErrors::DuplicateCandidate(pos) => {
                write!(f, "candidate at position {} is declared more than once", pos)
            }
            VotingErrors::TooManyCandidates => {
                write!(f, "too many candidates (at most {})", u32::MAX)
            }
        }
    }
}

// ********* Configuration **********

/// What to do with a preference for a candidate that was not declared.
///
/// - Permissive admits such a candidate into the race when a ballot ranks it
/// first in the initial count. Lower-ranked undeclared candidates that never
/// got admitted are skipped.
///
/// - Strict removes undeclared candidates from every ballot before counting.
/// A ballot left with no preference is dropped.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum CandidateAdmission {
    Permissive,
    Strict,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VoteRules {
    pub admission: CandidateAdmission,
    /// Maximum number of rounds. Defaults to the number of declared
    /// (or discovered) candidates.
    pub max_rounds: Option<u32>,
}

impl VoteRules {
    pub const DEFAULT_RULES: VoteRules = VoteRules {
        admission: CandidateAdmission::Permissive,
        max_rounds: None,
    };
}

impl Default for VoteRules {
    fn default() -> Self {
        VoteRules::DEFAULT_RULES
    }
}
