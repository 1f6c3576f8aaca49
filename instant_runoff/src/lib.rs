/*!
Instant-runoff (ranked-choice) vote tabulation.

Each ballot ranks candidates from most to least preferred. At every round, the
candidates with the fewest votes are all eliminated together and their ballots move
to the next preference that is still in the race. The count stops as soon as:
- one candidate holds strictly more than half of the continuing votes,
- only one candidate is left,
- all the remaining candidates are tied (no winner),
- or the budget of rounds is spent (no winner).

```
use instant_runoff::{run_election, Decision, VoteRules};

let ballots = vec![vec![1], vec![1], vec![2], vec![], vec![3, 4, 5]];
let res = run_election(&ballots, Some(&[1, 2, 3, 4, 5][..]), &VoteRules::DEFAULT_RULES)?;
assert_eq!(res.decision, Decision::Winner(1));
# Ok::<(), instant_runoff::VotingErrors>(())
```
*/

pub mod builder;
mod config;
mod elimination;
pub mod manual;
mod resolver;
mod sanitize;
mod tally;

use log::{debug, info};

use std::{collections::HashSet, fmt::Debug, hash::Hash};

pub use crate::config::*;
pub use crate::resolver::resolve;
pub use crate::sanitize::sanitize;

use crate::sanitize::sanitize_within;
use crate::tally::{Ballot, CandidateRegistry};

/// Runs the instant-runoff count over the given ballots.
///
/// Arguments:
/// * `ballots` the preferences of each voter, most preferred first. Ballots may be
/// empty or contain the same candidate several times.
/// * `candidates` the candidates eligible to win. If not provided, the
/// candidates will be inferred from the ballots.
/// * `rules` the rules that govern this election
///
/// Ties and empty elections are not errors: they produce `Decision::NoWinner`.
pub fn run_election<C>(
    ballots: &[Vec<C>],
    candidates: Option<&[C]>,
    rules: &VoteRules,
) -> Result<VotingResult<C>, VotingErrors>
where
    C: Clone + Eq + Hash + Debug,
{
    info!(
        "Processing {:?} ballots, candidates: {:?}, rules: {:?}",
        ballots.len(),
        candidates,
        rules
    );

    let declared = candidates.map(CandidateRegistry::new).transpose()?;

    let sanitized = match (candidates, rules.admission) {
        (Some(cands), CandidateAdmission::Strict) => {
            let universe: HashSet<C> = cands.iter().cloned().collect();
            sanitize_within(ballots, &universe)
        }
        _ => sanitize(ballots),
    };
    let sanitized = match sanitized {
        Some(s) => s,
        None => {
            info!("No ballot left after sanitization, no winner");
            return Ok(VotingResult {
                decision: Decision::NoWinner,
                termination: Termination::NoBallots,
                threshold: 0,
                round_stats: Vec::new(),
            });
        }
    };

    let mut registry = match declared {
        Some(reg) => reg,
        None => CandidateRegistry::discover(&sanitized)?,
    };
    let encoded = sanitized
        .iter()
        .map(|b| registry.encode(b))
        .collect::<Result<Vec<Ballot>, VotingErrors>>()?;
    info!("Processing {:?} sanitized ballots", encoded.len());
    for (idx, c) in registry.declared_names().iter().enumerate() {
        info!("Candidate: {}: {:?}", idx + 1, c);
    }

    let max_rounds = rules.max_rounds.unwrap_or(registry.declared() as u32);
    debug!("run_election: max_rounds: {}", max_rounds);

    let mut state = tally::build(encoded, registry.declared_ids());
    let outcome = elimination::run(&mut state, max_rounds);

    let round_stats = resolver::round_results_to_stats(&outcome.rounds, &registry);
    let threshold = round_stats.last().map(|rs| rs.threshold).unwrap_or(0);
    let decision = outcome.decision.map(|cid| registry.name(cid).clone());
    info!(
        "Outcome: {:?} ({:?}) after {} rounds",
        decision,
        outcome.termination,
        round_stats.len()
    );
    Ok(VotingResult {
        decision,
        termination: outcome.termination,
        threshold,
        round_stats,
    })
}
