//! Minimal cover selection.
//!
//! Given the required minterms and the prime implicants, [`minimize_cover`]
//! picks a subset of primes covering every minterm:
//!
//! 1. Primes that cover only don't-cares are dropped.
//! 2. Essential primes (the only prime covering some minterm) are always taken,
//!    and everything they cover is removed from the work list.
//! 3. The remaining minterms are handed to [Petrick's method][crate::petrick],
//!    unless there are more candidates than [`Options::max_candidates`]: then
//!    all candidates are taken and the result is flagged as
//!    [`Outcome::Overcover`].

use std::collections::BTreeSet;
use std::fmt;

use log::{debug, info, warn};

use crate::cache::CoversCache;
use crate::error::{Error, InvalidInput, Result};
use crate::implicant::{common_width, Implicant};
use crate::petrick;
use crate::primes::generate_primes;
use crate::term::Term;

/// Default limit on the number of candidates handed to Petrick's method.
pub const DEFAULT_MAX_CANDIDATES: usize = 52;

/// Tuning knobs for [`minimize_cover`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Petrick's method is skipped when more non-essential candidates remain.
    pub max_candidates: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }
}

impl Options {
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    /// Never skip Petrick's method.
    pub fn unbounded() -> Self {
        Self {
            max_candidates: usize::MAX,
        }
    }
}

/// How a [`Cover`] was obtained.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Outcome {
    /// The cover has minimum cardinality.
    Optimal,
    /// Too many candidates for Petrick's method: every candidate was kept.
    /// The cover is still complete, but may not be minimal.
    Overcover { candidates: usize, limit: usize },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Optimal => write!(f, "optimal"),
            Outcome::Overcover { candidates, limit } => {
                write!(f, "overcover ({} candidates, limit {})", candidates, limit)
            }
        }
    }
}

/// The selected prime implicants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cover {
    essential: BTreeSet<Implicant>,
    selected: BTreeSet<Implicant>,
    outcome: Outcome,
}

impl Cover {
    /// Primes that are the only cover of some required minterm.
    pub fn essential(&self) -> &BTreeSet<Implicant> {
        &self.essential
    }

    /// Primes chosen in addition to the essential ones.
    pub fn selected(&self) -> &BTreeSet<Implicant> {
        &self.selected
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_optimal(&self) -> bool {
        self.outcome == Outcome::Optimal
    }

    /// All primes of the cover, in order.
    pub fn primes(&self) -> BTreeSet<Implicant> {
        self.essential.union(&self.selected).cloned().collect()
    }

    /// Number of primes in the cover.
    pub fn len(&self) -> usize {
        self.essential.len() + self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if some prime of the cover covers `minterm`.
    pub fn covers(&self, minterm: &Implicant) -> bool {
        self.essential.iter().chain(self.selected.iter()).any(|p| p.covers(minterm))
    }

    pub fn into_primes(self) -> BTreeSet<Implicant> {
        let mut primes = self.essential;
        primes.extend(self.selected);
        primes
    }
}

/// Covering predicate memoized for one call.
struct Coverage<'a> {
    primes: Vec<&'a Implicant>,
    minterms: Vec<&'a Implicant>,
    cache: CoversCache,
}

impl<'a> Coverage<'a> {
    fn new(primes: Vec<&'a Implicant>, minterms: Vec<&'a Implicant>) -> Self {
        let cache = CoversCache::for_pairs(primes.len(), minterms.len());
        Self { primes, minterms, cache }
    }

    fn covers(&mut self, p: usize, m: usize) -> bool {
        let (prime, minterm) = (self.primes[p], self.minterms[m]);
        self.cache.get_or_insert_with(p, m, || prime.covers(minterm))
    }

    /// Indices of the given primes covering minterm `m`.
    fn coverers(&mut self, m: usize, primes: &[usize]) -> Vec<usize> {
        primes.iter().copied().filter(|&p| self.covers(p, m)).collect()
    }
}

/// Selects a minimum set of `primes` covering all `minterms`.
///
/// Don't-cares only matter for pruning: a prime that covers no required
/// minterm is dropped. A value present in both `minterms` and `dont_cares`
/// is treated as required.
///
/// # Errors
///
/// - [`Error::EmptyInput`] if `minterms` is empty.
/// - [`Error::InvalidInput`] on mixed widths, on minterms or don't-cares
///   containing `-`, or when some minterm is not covered by any prime.
pub fn minimize_cover(
    minterms: &BTreeSet<Implicant>,
    primes: &BTreeSet<Implicant>,
    dont_cares: Option<&BTreeSet<Implicant>>,
    options: &Options,
) -> Result<Cover> {
    let width = common_width(minterms)?.ok_or(Error::EmptyInput)?;
    check_width(width, primes)?;
    check_minterms(minterms)?;
    if let Some(dc) = dont_cares {
        check_width(width, dc)?;
        check_minterms(dc)?;
    }

    let mut coverage = Coverage::new(primes.iter().collect(), minterms.iter().collect());
    let all_minterms: Vec<usize> = (0..coverage.minterms.len()).collect();
    let mut candidates: Vec<usize> = (0..coverage.primes.len()).collect();

    // Drop primes which cover don't-cares only.
    if dont_cares.is_some() {
        candidates.retain(|&p| all_minterms.iter().any(|&m| coverage.covers(p, m)));
        debug!("{} of {} primes cover a required minterm", candidates.len(), primes.len());
    }

    // Essential primes.
    let mut essential: BTreeSet<usize> = BTreeSet::new();
    for &m in &all_minterms {
        let coverers = coverage.coverers(m, &candidates);
        match coverers.as_slice() {
            [] => {
                return Err(InvalidInput::UncoveredMinterm {
                    minterm: coverage.minterms[m].to_string(),
                }
                .into());
            }
            [p] => {
                essential.insert(*p);
            }
            _ => {}
        }
    }
    let remaining: Vec<usize> = all_minterms
        .iter()
        .copied()
        .filter(|&m| !essential.iter().any(|&p| coverage.covers(p, m)))
        .collect();
    debug!(
        "{} essential primes, {} of {} minterms left uncovered",
        essential.len(),
        remaining.len(),
        all_minterms.len()
    );

    let essential_set = to_set(&coverage.primes, essential.iter().copied());

    if remaining.is_empty() {
        info!("cover: {} essential primes", essential_set.len());
        log_cache_stats(&coverage.cache);
        return Ok(Cover {
            essential: essential_set,
            selected: BTreeSet::new(),
            outcome: Outcome::Optimal,
        });
    }

    candidates.retain(|p| !essential.contains(p));
    if candidates.len() > options.max_candidates {
        warn!(
            "too many prime implicants left ({} > {}), skipping Petrick's method",
            candidates.len(),
            options.max_candidates
        );
        log_cache_stats(&coverage.cache);
        return Ok(Cover {
            essential: essential_set,
            selected: to_set(&coverage.primes, candidates.iter().copied()),
            outcome: Outcome::Overcover {
                candidates: candidates.len(),
                limit: options.max_candidates,
            },
        });
    }

    // Petrick's method: token i stands for candidates[i].
    let pos: Vec<Term> = remaining
        .iter()
        .map(|&m| {
            candidates
                .iter()
                .enumerate()
                .filter(|&(_, &p)| coverage.covers(p, m))
                .map(|(token, _)| token)
                .collect()
        })
        .collect();
    // Every remaining minterm has a covering candidate, otherwise it was rejected above
    // or covered by an essential prime.
    debug_assert!(pos.iter().all(|sum| !sum.is_empty()));
    let chosen = petrick_select(&pos, &remaining, &coverage.minterms)?;
    let selected = to_set(&coverage.primes, chosen.iter().map(|token| candidates[token]));

    info!(
        "cover: {} essential + {} selected primes",
        essential_set.len(),
        selected.len()
    );
    log_cache_stats(&coverage.cache);
    Ok(Cover {
        essential: essential_set,
        selected,
        outcome: Outcome::Optimal,
    })
}

fn check_width(expected: usize, implicants: &BTreeSet<Implicant>) -> Result<()> {
    match common_width(implicants)? {
        Some(found) if found != expected => Err(InvalidInput::WidthMismatch { expected, found }.into()),
        _ => Ok(()),
    }
}

/// Runs Petrick's method over the product of sums `pos`, where `pos[i]` lists
/// the tokens covering `minterms[remaining[i]]`.
fn petrick_select(pos: &[Term], remaining: &[usize], minterms: &[&Implicant]) -> Result<Term> {
    let sop = petrick::expand(pos);
    debug!("petrick: {} minimal products over {} sums", sop.len(), pos.len());
    match petrick::select_minimal(&sop) {
        Some(chosen) => Ok(chosen.clone()),
        None => {
            let i = pos.iter().position(Term::is_empty).unwrap_or_default();
            Err(InvalidInput::UncoveredMinterm {
                minterm: minterms[remaining[i]].to_string(),
            }
            .into())
        }
    }
}

fn check_minterms(minterms: &BTreeSet<Implicant>) -> Result<()> {
    for minterm in minterms {
        minterm.ensure_minterm()?;
    }
    Ok(())
}

fn to_set(primes: &[&Implicant], indices: impl IntoIterator<Item = usize>) -> BTreeSet<Implicant> {
    indices.into_iter().map(|p| primes[p].clone()).collect()
}

fn log_cache_stats(cache: &CoversCache) {
    debug!("covers cache: {} hits, {} misses", cache.hits(), cache.misses());
}

/// Runs both stages: prime generation over `minterms ∪ dont_cares`, then
/// cover selection over `minterms`.
pub fn minimize(
    minterms: &BTreeSet<Implicant>,
    dont_cares: Option<&BTreeSet<Implicant>>,
    options: &Options,
) -> Result<Cover> {
    if minterms.is_empty() {
        return Err(Error::EmptyInput);
    }
    check_minterms(minterms)?;
    if let Some(dc) = dont_cares {
        check_minterms(dc)?;
    }
    let primes = match dont_cares {
        Some(dc) if !dc.is_empty() => generate_primes(&minterms.union(dc).cloned().collect())?,
        _ => generate_primes(minterms)?,
    };
    debug!("{} prime implicants", primes.len());
    minimize_cover(minterms, &primes, dont_cares, options)
}
