use log::debug;

use std::{collections::HashSet, hash::Hash};

/// Cleans up raw ballots before counting.
///
/// Within a ballot, only the first occurrence of a candidate is kept and the
/// relative order of the remaining preferences is preserved. Ballots that end up
/// without any preference are dropped.
///
/// Returns `None` if no ballot survives. This is not an error: it simply means
/// that there is nothing to count.
///
/// ```
/// use instant_runoff::sanitize;
///
/// let cleaned = sanitize(&[vec![5, 5, 4, 4, 3, 4], vec![]]);
/// assert_eq!(cleaned, Some(vec![vec![5, 4, 3]]));
/// ```
pub fn sanitize<C: Eq + Hash + Clone>(ballots: &[Vec<C>]) -> Option<Vec<Vec<C>>> {
    sanitize_filtered(ballots, |_| true)
}

/// Same as `sanitize`, but also removes all the preferences outside of the
/// given universe.
pub(crate) fn sanitize_within<C: Eq + Hash + Clone>(
    ballots: &[Vec<C>],
    universe: &HashSet<C>,
) -> Option<Vec<Vec<C>>> {
    sanitize_filtered(ballots, |c| universe.contains(c))
}

fn sanitize_filtered<C: Eq + Hash + Clone>(
    ballots: &[Vec<C>],
    keep: impl Fn(&C) -> bool,
) -> Option<Vec<Vec<C>>> {
    let mut res: Vec<Vec<C>> = Vec::with_capacity(ballots.len());
    for ballot in ballots.iter() {
        let mut seen: HashSet<&C> = HashSet::new();
        let cleaned: Vec<C> = ballot
            .iter()
            .filter(|c| keep(*c) && seen.insert(*c))
            .cloned()
            .collect();
        if !cleaned.is_empty() {
            res.push(cleaned);
        }
    }
    debug!(
        "sanitize: kept {} ballots out of {}",
        res.len(),
        ballots.len()
    );
    if res.is_empty() {
        None
    } else {
        Some(res)
    }
}
