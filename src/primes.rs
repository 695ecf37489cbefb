//! Prime implicant generation (the Quine–McCluskey tabulation).
//!
//! Implicants are grouped by population count. Each round tries to merge
//! every implicant of group `k` with every implicant of group `k + 1`; two
//! implicants merge when they disagree in exactly one position. Implicants
//! that took part in no merge are prime. The merged implicants form the next
//! round, until a round produces nothing new.
//!
//! Every round adds one `-` to each surviving implicant, so there are at most
//! `width` rounds.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::error::{Error, Result};
use crate::implicant::{common_width, Implicant};

/// Groups of implicants keyed by population count.
type Groups = BTreeMap<usize, BTreeSet<Implicant>>;

fn group_by_ones<'a>(implicants: impl IntoIterator<Item = &'a Implicant>) -> Groups {
    let mut groups = Groups::new();
    for implicant in implicants {
        groups.entry(implicant.ones()).or_default().insert(implicant.clone());
    }
    groups
}

/// Finds all prime implicants derivable from `minterms` by repeated merging.
///
/// When don't-cares are used, pass the union of minterms and don't-cares.
///
/// # Errors
///
/// - [`Error::EmptyInput`] if `minterms` is empty.
/// - [`Error::InvalidInput`] if the implicants do not share one width.
pub fn generate_primes(minterms: &BTreeSet<Implicant>) -> Result<BTreeSet<Implicant>> {
    if common_width(minterms)?.is_none() {
        return Err(Error::EmptyInput);
    }

    let mut groups = group_by_ones(minterms);
    let mut primes = BTreeSet::new();
    let mut round = 0;

    loop {
        debug!(
            "round {}: {} implicants in {} groups",
            round,
            groups.values().map(|g| g.len()).sum::<usize>(),
            groups.len()
        );

        let mut next = Groups::new();
        let mut non_primes = BTreeSet::new();

        for (&k, lower) in &groups {
            let Some(upper) = groups.get(&(k + 1)) else {
                continue;
            };
            for a in lower {
                for b in upper {
                    if let Some(merged) = a.merge(b) {
                        next.entry(k).or_default().insert(merged);
                        non_primes.insert(a);
                        non_primes.insert(b);
                    }
                }
            }
        }

        for implicant in groups.values().flatten() {
            if !non_primes.contains(implicant) {
                primes.insert(implicant.clone());
            }
        }

        if next.is_empty() {
            debug!("found {} primes after {} rounds", primes.len(), round + 1);
            return Ok(primes);
        }
        groups = next;
        round += 1;
    }
}
