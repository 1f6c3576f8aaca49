use log::{debug, info};

use std::collections::BTreeMap;

use crate::config::{Decision, Termination};
use crate::tally::{CandidateId, RoundState};

pub(crate) type RoundId = u32;

#[derive(Eq, PartialEq, Debug, Clone)]
pub(crate) struct Elimination {
    pub(crate) candidate: CandidateId,
    pub(crate) transfers: BTreeMap<CandidateId, u64>,
    pub(crate) exhausted: u64,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub(crate) struct RoundStatistics {
    pub(crate) round: RoundId,
    pub(crate) tally: Vec<(CandidateId, u64)>,
    pub(crate) active_votes: u64,
    pub(crate) threshold: u64,
    pub(crate) elected: Option<CandidateId>,
    pub(crate) eliminated: Vec<Elimination>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub(crate) struct EngineOutcome {
    pub(crate) decision: Decision<CandidateId>,
    pub(crate) termination: Termination,
    pub(crate) rounds: Vec<RoundStatistics>,
}

// Highest and lowest counts of a round, with all the candidates reaching them.
#[derive(Eq, PartialEq, Debug, Clone)]
struct Scan {
    max_count: u64,
    max_candidates: Vec<CandidateId>,
    min_count: u64,
    min_candidates: Vec<CandidateId>,
}

/// Smallest count that is strictly more than half of the active votes.
pub(crate) fn get_threshold(active_votes: u64) -> u64 {
    if active_votes == 0 {
        0
    } else {
        (active_votes / 2) + 1
    }
}

fn scan(tally: &[(CandidateId, u64)]) -> Option<Scan> {
    let max_count = tally.iter().map(|(_, vc)| *vc).max()?;
    let min_count = tally.iter().map(|(_, vc)| *vc).min()?;
    let holders = |count: u64| -> Vec<CandidateId> {
        tally
            .iter()
            .filter_map(|(cid, vc)| if *vc == count { Some(*cid) } else { None })
            .collect()
    };
    Some(Scan {
        max_count,
        max_candidates: holders(max_count),
        min_count,
        min_candidates: holders(min_count),
    })
}

/// Runs the elimination rounds until a decision is reached or the budget of rounds
/// is spent.
pub(crate) fn run(state: &mut RoundState, max_rounds: u32) -> EngineOutcome {
    let mut rounds: Vec<RoundStatistics> = Vec::new();
    for round in 1..=max_rounds {
        let tally = state.tally();
        let active_votes = state.active_votes;
        let threshold = get_threshold(active_votes);
        info!(
            "Round {} (winning threshold: {}, active votes: {})",
            round, threshold, active_votes
        );
        debug!("run: round {} tally: {:?}", round, tally);

        let mut stats = RoundStatistics {
            round,
            tally: tally.clone(),
            active_votes,
            threshold,
            elected: None,
            eliminated: Vec::new(),
        };

        // Only one candidate. It is the winner by any standard, even without a vote.
        if let [(cid, _)] = tally.as_slice() {
            debug!("run: only one candidate left, directly winning: {:?}", cid);
            stats.elected = Some(*cid);
            rounds.push(stats);
            return EngineOutcome {
                decision: Decision::Winner(*cid),
                termination: Termination::SoleSurvivor,
                rounds,
            };
        }

        let s = match scan(&tally) {
            Some(s) => s,
            None => {
                // Nothing left in the race.
                rounds.push(stats);
                return EngineOutcome {
                    decision: Decision::NoWinner,
                    termination: Termination::Deadlock,
                    rounds,
                };
            }
        };
        debug!("run: scan: {:?}", s);

        // At most one candidate can hold a strict majority.
        if s.max_count >= threshold && threshold > 0 {
            let winner = s.max_candidates[0];
            debug!(
                "run: {:?} has count {} over threshold {}, marking as winner",
                winner, s.max_count, threshold
            );
            stats.elected = Some(winner);
            rounds.push(stats);
            return EngineOutcome {
                decision: Decision::Winner(winner),
                termination: Termination::Majority,
                rounds,
            };
        }

        if s.max_count == s.min_count {
            info!(
                "Round {}: all {} candidates tied at {} votes",
                round,
                tally.len(),
                s.max_count
            );
            rounds.push(stats);
            return EngineOutcome {
                decision: Decision::NoWinner,
                termination: Termination::Deadlock,
                rounds,
            };
        }

        stats.eliminated = eliminate(state, &s.min_candidates);
        for e in stats.eliminated.iter() {
            info!(
                "Round {}: eliminated {:?} -> transfers: {:?}, exhausted: {}",
                round, e.candidate, e.transfers, e.exhausted
            );
        }
        assert!(
            state.active_votes <= active_votes,
            "The number of active votes increased: {} -> {}",
            active_votes,
            state.active_votes
        );
        rounds.push(stats);
    }
    info!("No decision after {} rounds", max_rounds);
    EngineOutcome {
        decision: Decision::NoWinner,
        termination: Termination::RoundBudgetExhausted,
        rounds,
    }
}

/// Removes all the given candidates at once and moves their ballots to the next
/// preference that is still in the race.
fn eliminate(state: &mut RoundState, losers: &[CandidateId]) -> Vec<Elimination> {
    // All the losers leave before any ballot moves: a ballot must not land on a
    // candidate eliminated in the same round.
    let piles: Vec<(CandidateId, Vec<usize>)> = losers
        .iter()
        .filter_map(|cid| state.assignments.remove(cid).map(|bids| (*cid, bids)))
        .collect();

    let mut res: Vec<Elimination> = Vec::with_capacity(piles.len());
    for (loser, ballot_ids) in piles {
        let mut elim = Elimination {
            candidate: loser,
            transfers: BTreeMap::new(),
            exhausted: 0,
        };
        for bid in ballot_ids {
            match state.advance(bid) {
                Some(next) => {
                    debug_assert!(state.is_active(&next));
                    debug!("eliminate: ballot {} moves to {:?}", bid, state.top_choice(bid));
                    if let Some(pile) = state.assignments.get_mut(&next) {
                        pile.push(bid);
                    }
                    *elim.transfers.entry(next).or_insert(0) += 1;
                }
                None => {
                    debug!("eliminate: ballot {} is exhausted", bid);
                    elim.exhausted += 1;
                }
            }
        }
        res.push(elim);
    }
    state.recount();
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tally::{build, Ballot};

    fn ballots(xs: &[&[u32]]) -> Vec<Ballot> {
        xs.iter()
            .map(|b| b.iter().map(|x| CandidateId(*x)).collect())
            .collect()
    }

    fn universe(n: u32) -> impl Iterator<Item = CandidateId> {
        (0..n).map(CandidateId)
    }

    #[test]
    fn threshold() {
        assert_eq!(get_threshold(0), 0);
        assert_eq!(get_threshold(1), 1);
        assert_eq!(get_threshold(4), 3);
        assert_eq!(get_threshold(5), 3);
    }

    #[test]
    fn scan_records_ties() {
        let tally = vec![
            (CandidateId(0), 2),
            (CandidateId(1), 0),
            (CandidateId(2), 2),
            (CandidateId(3), 0),
        ];
        let s = scan(&tally).unwrap();
        assert_eq!(s.max_count, 2);
        assert_eq!(s.max_candidates, vec![CandidateId(0), CandidateId(2)]);
        assert_eq!(s.min_count, 0);
        assert_eq!(s.min_candidates, vec![CandidateId(1), CandidateId(3)]);
        assert_eq!(scan(&[]), None);
    }

    #[test]
    fn majority_in_first_round() {
        let mut state = build(ballots(&[&[0], &[0], &[1]]), universe(3));
        let out = run(&mut state, 3);
        assert_eq!(out.decision, Decision::Winner(CandidateId(0)));
        assert_eq!(out.termination, Termination::Majority);
        assert_eq!(out.rounds.len(), 1);
        assert!(out.rounds[0].eliminated.is_empty());
    }

    #[test]
    fn half_is_not_a_majority() {
        let mut state = build(ballots(&[&[0], &[1]]), universe(2));
        let out = run(&mut state, 2);
        assert_eq!(out.decision, Decision::NoWinner);
        assert_eq!(out.termination, Termination::Deadlock);
    }

    #[test]
    fn sole_survivor_without_votes() {
        let mut state = build(Vec::new(), universe(1));
        let out = run(&mut state, 1);
        assert_eq!(out.decision, Decision::Winner(CandidateId(0)));
        assert_eq!(out.termination, Termination::SoleSurvivor);
    }

    #[test]
    fn eliminates_all_lowest_at_once() {
        // 0: 2 votes, 1 and 2: 1 vote each, 3: no vote.
        let mut state = build(
            ballots(&[&[0], &[0, 1], &[1, 2, 0], &[2, 1]]),
            universe(4),
        );
        let out = run(&mut state, 4);
        let r1 = &out.rounds[0];
        assert_eq!(r1.eliminated.len(), 1);
        assert_eq!(r1.eliminated[0].candidate, CandidateId(3));
        let r2 = &out.rounds[1];
        let losers: Vec<CandidateId> = r2.eliminated.iter().map(|e| e.candidate).collect();
        assert_eq!(losers, vec![CandidateId(1), CandidateId(2)]);
        // Ballot [1, 2, 0] skips 2, which left in the same round.
        let expected: BTreeMap<CandidateId, u64> = [(CandidateId(0), 1)].into_iter().collect();
        assert_eq!(r2.eliminated[0].transfers, expected);
        assert_eq!(r2.eliminated[1].exhausted, 1);
        assert_eq!(out.decision, Decision::Winner(CandidateId(0)));
        assert_eq!(out.termination, Termination::SoleSurvivor);
        assert_eq!(out.rounds[2].tally, vec![(CandidateId(0), 3)]);
        assert_eq!(out.rounds[2].active_votes, 3);
    }

    #[test]
    fn exhausted_ballots_lower_the_threshold() {
        // 0: 3, 1: 2, 2: 2 (both exhausted on elimination), 3: 0.
        let mut state = build(
            ballots(&[&[0], &[0], &[0], &[1, 0], &[1, 0], &[2], &[2]]),
            universe(4),
        );
        let out = run(&mut state, 4);
        let counts: Vec<u64> = out.rounds.iter().map(|r| r.active_votes).collect();
        assert!(counts.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(out.decision, Decision::Winner(CandidateId(0)));
        let last = out.rounds.last().unwrap();
        assert_eq!(last.active_votes, 5);
        assert_eq!(last.threshold, 3);
        assert_eq!(last.elected, Some(CandidateId(0)));
    }

    #[test]
    fn budget_exhausted() {
        let mut state = build(ballots(&[&[0], &[0], &[1], &[2]]), universe(3));
        let out = run(&mut state, 0);
        assert_eq!(out.decision, Decision::NoWinner);
        assert_eq!(out.termination, Termination::RoundBudgetExhausted);
        assert!(out.rounds.is_empty());

        let mut state = build(ballots(&[&[0], &[0], &[1], &[2]]), universe(3));
        let out = run(&mut state, 1);
        assert_eq!(out.termination, Termination::RoundBudgetExhausted);
        assert_eq!(out.rounds.len(), 1);
    }
}
