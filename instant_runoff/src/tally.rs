use log::debug;

use std::{
    collections::{BTreeMap, HashMap},
    hash::Hash,
};

use crate::config::VotingErrors;

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub(crate) struct CandidateId(pub(crate) u32);

// Preferences in order, most preferred first.
// Invariant: never empty and no candidate appears twice.
pub(crate) type Ballot = Vec<CandidateId>;

// The identifier of the next interned candidate.
// At most u32::MAX candidates, so that a count of candidates always fits in a u32.
fn next_id(interned: usize) -> Result<CandidateId, VotingErrors> {
    match u32::try_from(interned) {
        Ok(n) if n < u32::MAX => Ok(CandidateId(n)),
        _ => Err(VotingErrors::TooManyCandidates),
    }
}

/// Maps the user-facing candidates to dense internal identifiers.
///
/// The declared candidates come first, in the order they were declared. Any other
/// candidate found in the ballots is appended in order of appearance.
pub(crate) struct CandidateRegistry<C> {
    names: Vec<C>,
    ids: HashMap<C, CandidateId>,
    declared: usize,
}

impl<C: Clone + Eq + Hash> CandidateRegistry<C> {
    pub(crate) fn new(universe: &[C]) -> Result<CandidateRegistry<C>, VotingErrors> {
        let mut reg = CandidateRegistry {
            names: Vec::with_capacity(universe.len()),
            ids: HashMap::with_capacity(universe.len()),
            declared: 0,
        };
        for (pos, c) in universe.iter().enumerate() {
            if reg.ids.contains_key(c) {
                return Err(VotingErrors::DuplicateCandidate(pos));
            }
            reg.intern(c)?;
        }
        reg.declared = reg.names.len();
        Ok(reg)
    }

    /// Builds the universe out of the candidates found in the ballots.
    pub(crate) fn discover(ballots: &[Vec<C>]) -> Result<CandidateRegistry<C>, VotingErrors> {
        let mut reg = CandidateRegistry {
            names: Vec::new(),
            ids: HashMap::new(),
            declared: 0,
        };
        for c in ballots.iter().flatten() {
            reg.intern(c)?;
        }
        reg.declared = reg.names.len();
        Ok(reg)
    }

    fn intern(&mut self, c: &C) -> Result<CandidateId, VotingErrors> {
        if let Some(cid) = self.ids.get(c) {
            return Ok(*cid);
        }
        let cid = next_id(self.names.len())?;
        self.names.push(c.clone());
        self.ids.insert(c.clone(), cid);
        Ok(cid)
    }

    pub(crate) fn encode(&mut self, ballot: &[C]) -> Result<Ballot, VotingErrors> {
        ballot.iter().map(|c| self.intern(c)).collect()
    }

    pub(crate) fn name(&self, cid: CandidateId) -> &C {
        &self.names[cid.0 as usize]
    }

    /// The size of the candidate universe.
    pub(crate) fn declared(&self) -> usize {
        self.declared
    }

    pub(crate) fn declared_ids(&self) -> impl Iterator<Item = CandidateId> {
        (0..self.declared as u32).map(CandidateId)
    }

    pub(crate) fn declared_names(&self) -> &[C] {
        &self.names[..self.declared]
    }
}

/// The state of the count, owned by the elimination loop.
///
/// The ballots themselves are never modified: each ballot has a cursor pointing to
/// its current top preference. A ballot whose cursor went past its last preference
/// is exhausted.
#[derive(Eq, PartialEq, Debug, Clone)]
pub(crate) struct RoundState {
    pub(crate) ballots: Vec<Ballot>,
    pub(crate) cursors: Vec<usize>,
    /// Active candidates and the indices of the ballots that currently rank them first.
    pub(crate) assignments: BTreeMap<CandidateId, Vec<usize>>,
    pub(crate) active_votes: u64,
}

impl RoundState {
    pub(crate) fn tally(&self) -> Vec<(CandidateId, u64)> {
        self.assignments
            .iter()
            .map(|(cid, bids)| (*cid, bids.len() as u64))
            .collect()
    }

    pub(crate) fn is_active(&self, cid: &CandidateId) -> bool {
        self.assignments.contains_key(cid)
    }

    pub(crate) fn top_choice(&self, ballot: usize) -> Option<CandidateId> {
        self.ballots[ballot].get(self.cursors[ballot]).copied()
    }

    /// Drops the current top preference of a ballot, then skips all the preferences
    /// for candidates that are not active anymore.
    ///
    /// Returns the new top preference, or None if the ballot is exhausted.
    pub(crate) fn advance(&mut self, ballot: usize) -> Option<CandidateId> {
        let prefs = &self.ballots[ballot];
        let mut cursor = self.cursors[ballot] + 1;
        while cursor < prefs.len() && !self.assignments.contains_key(&prefs[cursor]) {
            cursor += 1;
        }
        self.cursors[ballot] = cursor;
        prefs.get(cursor).copied()
    }

    pub(crate) fn recount(&mut self) {
        self.active_votes = self
            .assignments
            .values()
            .map(|bids| bids.len() as u64)
            .sum();
    }
}

/// Builds the initial state of the count.
///
/// Every candidate of the universe starts with an empty pile, even if no ballot ranks
/// it first. A ballot ranking first a candidate outside the universe brings that
/// candidate into the race.
pub(crate) fn build(
    ballots: Vec<Ballot>,
    universe: impl Iterator<Item = CandidateId>,
) -> RoundState {
    let mut assignments: BTreeMap<CandidateId, Vec<usize>> =
        universe.map(|cid| (cid, Vec::new())).collect();
    for (idx, ballot) in ballots.iter().enumerate() {
        if let Some(top) = ballot.first() {
            if !assignments.contains_key(top) {
                debug!("build: admitting candidate {:?} from ballot {}", top, idx);
            }
            assignments.entry(*top).or_default().push(idx);
        }
    }
    let mut state = RoundState {
        cursors: vec![0; ballots.len()],
        ballots,
        assignments,
        active_votes: 0,
    };
    state.recount();
    debug!(
        "build: {} active votes, tally: {:?}",
        state.active_votes,
        state.tally()
    );
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(xs: &[u32]) -> Vec<CandidateId> {
        xs.iter().map(|x| CandidateId(*x)).collect()
    }

    #[test]
    fn registry_declared_first() {
        let mut reg = CandidateRegistry::new(&["a", "b"]).unwrap();
        assert_eq!(reg.encode(&["c", "a"]).unwrap(), ids(&[2, 0]));
        assert_eq!(reg.declared(), 2);
        assert_eq!(*reg.name(CandidateId(2)), "c");
        assert_eq!(reg.declared_names(), &["a", "b"]);
    }

    #[test]
    fn registry_rejects_duplicates() {
        let res = CandidateRegistry::new(&[1, 2, 1]);
        assert_eq!(res.err(), Some(VotingErrors::DuplicateCandidate(2)));
    }

    #[test]
    fn candidate_ids_do_not_wrap() {
        assert_eq!(next_id(0), Ok(CandidateId(0)));
        assert_eq!(next_id(u32::MAX as usize - 1), Ok(CandidateId(u32::MAX - 1)));
        assert_eq!(next_id(u32::MAX as usize), Err(VotingErrors::TooManyCandidates));
    }

    #[test]
    fn registry_discovery_order() {
        let reg = CandidateRegistry::discover(&[vec![3, 1], vec![2, 3]]).unwrap();
        assert_eq!(reg.declared_names(), &[3, 1, 2]);
    }

    #[test]
    fn build_keeps_empty_candidates() {
        let state = build(vec![ids(&[0]), ids(&[0, 1])], ids(&[0, 1, 2]).into_iter());
        assert_eq!(
            state.tally(),
            vec![
                (CandidateId(0), 2),
                (CandidateId(1), 0),
                (CandidateId(2), 0)
            ]
        );
        assert_eq!(state.active_votes, 2);
    }

    #[test]
    fn build_admits_unknown_top_choice() {
        let state = build(vec![ids(&[7])], ids(&[0, 1]).into_iter());
        assert!(state.is_active(&CandidateId(7)));
        assert_eq!(state.active_votes, 1);
        assert_eq!(state.top_choice(0), Some(CandidateId(7)));
    }

    #[test]
    fn advance_skips_inactive() {
        let mut state = build(vec![ids(&[0, 3, 1, 2])], ids(&[0, 1]).into_iter());
        assert_eq!(state.advance(0), Some(CandidateId(1)));
        assert_eq!(state.top_choice(0), Some(CandidateId(1)));
        state.assignments.remove(&CandidateId(1));
        assert_eq!(state.advance(0), None);
        assert_eq!(state.top_choice(0), None);
    }
}
