use std::{fmt::Debug, hash::Hash};

pub use crate::config::*;
use crate::tally::CandidateRegistry;

/// A builder for adding ballots one at a time.
///
/// ```
/// pub use instant_runoff::builder::Builder;
/// pub use instant_runoff::{Decision, VoteRules};
/// # use instant_runoff::VotingErrors;
///
/// let mut builder = Builder::new(&VoteRules::DEFAULT_RULES)
///     .candidates(&["Anna".to_string(), "Bob".to_string()])?;
///
/// builder.add_ballot(&["Anna".to_string(), "Clara".to_string()]);
/// builder.add_ballot(&["Bob".to_string(), "Anna".to_string(), "Bob".to_string()]);
/// builder.add_ballot(&["Anna".to_string()]);
///
/// let res = builder.run()?;
/// assert_eq!(res.decision, Decision::Winner("Anna".to_string()));
/// # Ok::<(), VotingErrors>(())
/// ```
pub struct Builder<C> {
    pub(crate) _rules: VoteRules,
    pub(crate) _candidates: Option<Vec<C>>,
    pub(crate) _ballots: Vec<Vec<C>>,
}

impl<C: Clone + Eq + Hash + Debug> Builder<C> {
    pub fn new(rules: &VoteRules) -> Builder<C> {
        Builder {
            _rules: rules.clone(),
            _candidates: None,
            _ballots: Vec::new(),
        }
    }

    /// Declares the candidates eligible to win.
    ///
    /// Fails if the same candidate is declared twice.
    pub fn candidates(self, cands: &[C]) -> Result<Builder<C>, VotingErrors> {
        CandidateRegistry::new(cands)?;
        Ok(Builder {
            _candidates: Some(cands.to_vec()),
            ..self
        })
    }

    /// Adds a ballot to the builder.
    ///
    /// candidates: the choices made by the voter, in order. Choices do not need to be
    /// distinct, and the ballot may be empty.
    pub fn add_ballot(&mut self, candidates: &[C]) {
        self._ballots.push(candidates.to_vec());
    }

    pub fn num_ballots(&self) -> usize {
        self._ballots.len()
    }

    /// Runs the count over all the ballots added so far.
    pub fn run(&self) -> Result<VotingResult<C>, VotingErrors> {
        crate::run_election(&self._ballots, self._candidates.as_deref(), &self._rules)
    }
}
