use std::hash::Hash;

use crate::config::{Decision, EliminationStats, RoundStats};
use crate::elimination::{RoundStatistics, RoundId};
use crate::tally::{CandidateId, CandidateRegistry};

/// Turns a decision into the winning candidate, or None when there is no winner.
///
/// ```
/// use instant_runoff::{resolve, Decision};
///
/// assert_eq!(resolve(Decision::Winner(3)), Some(3));
/// assert_eq!(resolve::<u32>(Decision::NoWinner), None);
/// ```
pub fn resolve<C>(decision: Decision<C>) -> Option<C> {
    match decision {
        Decision::Winner(c) => Some(c),
        Decision::NoWinner => None,
    }
}

pub(crate) fn round_results_to_stats<C: Clone + Eq + Hash>(
    results: &[RoundStatistics],
    registry: &CandidateRegistry<C>,
) -> Vec<RoundStats<C>> {
    results
        .iter()
        .map(|r| round_result_to_stat(r, r.round, registry))
        .collect()
}

fn round_result_to_stat<C: Clone + Eq + Hash>(
    stats: &RoundStatistics,
    round_id: RoundId,
    registry: &CandidateRegistry<C>,
) -> RoundStats<C> {
    let name = |cid: CandidateId| registry.name(cid).clone();
    RoundStats {
        round: round_id,
        tally: stats.tally.iter().map(|(cid, c)| (name(*cid), *c)).collect(),
        active_votes: stats.active_votes,
        threshold: stats.threshold,
        elected: stats.elected.map(name),
        eliminated: stats
            .eliminated
            .iter()
            .map(|e| EliminationStats {
                candidate: name(e.candidate),
                transfers: e
                    .transfers
                    .iter()
                    .map(|(cid, c)| (name(*cid), *c))
                    .collect(),
                exhausted: e.exhausted,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elimination::Elimination;

    #[test]
    fn maps_identifiers_back_to_candidates() {
        let registry = CandidateRegistry::new(&["Anna", "Bob", "Clara"]).unwrap();
        let internal = RoundStatistics {
            round: 2,
            tally: vec![(CandidateId(0), 3), (CandidateId(2), 1)],
            active_votes: 4,
            threshold: 3,
            elected: None,
            eliminated: vec![Elimination {
                candidate: CandidateId(2),
                transfers: [(CandidateId(0), 1)].into_iter().collect(),
                exhausted: 0,
            }],
        };
        let res = round_results_to_stats(&[internal], &registry);
        assert_eq!(
            res,
            vec![RoundStats {
                round: 2,
                tally: vec![("Anna", 3), ("Clara", 1)],
                active_votes: 4,
                threshold: 3,
                elected: None,
                eliminated: vec![EliminationStats {
                    candidate: "Clara",
                    transfers: vec![("Anna", 1)],
                    exhausted: 0,
                }],
            }]
        );
    }
}
