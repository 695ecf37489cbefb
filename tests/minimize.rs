use std::collections::BTreeSet;

use test_log::test;

use qmp::convert::{cover_to_values, encode, to_implicants};
use qmp::cover::{minimize, minimize_cover, Cover, Options, Outcome, DEFAULT_MAX_CANDIDATES};
use qmp::error::{Error, InvalidInput};
use qmp::implicant::Implicant;
use qmp::primes::generate_primes;

fn set(items: &[&str]) -> BTreeSet<Implicant> {
    items.iter().map(|s| s.parse().unwrap()).collect()
}

fn values(width: usize, values: &[u64]) -> BTreeSet<Implicant> {
    to_implicants(values.iter().copied(), width).unwrap()
}

/// All minterms covered by a set of primes, as decimal values.
fn covered(primes: &BTreeSet<Implicant>) -> BTreeSet<u64> {
    cover_to_values(primes).into_iter().flatten().collect()
}

/// Size of the smallest subset of `primes` covering `minterms`, by exhaustive search.
fn brute_force_minimum(minterms: &BTreeSet<Implicant>, primes: &BTreeSet<Implicant>) -> usize {
    let primes: Vec<&Implicant> = primes.iter().collect();
    assert!(primes.len() < 20);
    (0u32..1 << primes.len())
        .filter(|mask| {
            minterms
                .iter()
                .all(|m| primes.iter().enumerate().any(|(i, p)| mask >> i & 1 == 1 && p.covers(m)))
        })
        .map(|mask| mask.count_ones() as usize)
        .min()
        .unwrap()
}

#[test]
fn test_scenario_cyclic() {
    let minterms = values(3, &[0, 1, 2, 5, 6, 7]);
    let primes = generate_primes(&minterms).unwrap();
    assert!(primes.contains(&"0-0".parse::<Implicant>().unwrap()));
    assert!(primes.contains(&"1-1".parse::<Implicant>().unwrap()));

    let cover = minimize_cover(&minterms, &primes, None, &Options::default()).unwrap();
    assert!(cover.is_optimal());
    assert!(cover.essential().is_empty());
    assert_eq!(cover.len(), 3);
    assert_eq!(covered(&cover.primes()), [0, 1, 2, 5, 6, 7].into_iter().collect());
}

#[test]
fn test_scenario_cyclic_is_deterministic() {
    let minterms = values(3, &[0, 1, 2, 5, 6, 7]);
    let first = minimize(&minterms, None, &Options::default()).unwrap();
    for _ in 0..5 {
        assert_eq!(minimize(&minterms, None, &Options::default()).unwrap(), first);
    }
    // Tokens follow the sorted primes -01, -10, 0-0, 00-, 1-1, 11-.
    assert_eq!(first.primes(), set(&["-01", "0-0", "11-"]));
}

#[test]
fn test_scenario_single() {
    let minterms = set(&["0"]);
    let primes = generate_primes(&minterms).unwrap();
    assert_eq!(primes, set(&["0"]));
    let cover = minimize_cover(&minterms, &primes, None, &Options::default()).unwrap();
    assert_eq!(cover.primes(), set(&["0"]));
    assert_eq!(cover.essential(), &set(&["0"]));
}

#[test]
fn test_scenario_full() {
    let minterms = values(2, &[0, 1, 2, 3]);
    let primes = generate_primes(&minterms).unwrap();
    assert_eq!(primes, set(&["--"]));
    let cover = minimize_cover(&minterms, &primes, None, &Options::default()).unwrap();
    assert_eq!(cover.into_primes(), set(&["--"]));
}

#[test]
fn test_scenario_dont_cares() {
    let (minterms, dont_cares) = encode(&[1, 3], &[5, 7]).unwrap();
    let cover = minimize(&minterms, Some(&dont_cares), &Options::default()).unwrap();
    assert_eq!(cover.primes(), set(&["--1"]));
    assert_eq!(covered(&cover.primes()), [1, 3, 5, 7].into_iter().collect());
}

#[test]
fn test_dont_care_only_prime_is_pruned() {
    // 110 and 111 merge into 11-, which covers don't-cares only.
    let (minterms, dont_cares) = encode(&[1], &[6, 7]).unwrap();
    let all: BTreeSet<Implicant> = minterms.union(&dont_cares).cloned().collect();
    let primes = generate_primes(&all).unwrap();
    assert_eq!(primes, set(&["001", "11-"]));

    let cover = minimize_cover(&minterms, &primes, Some(&dont_cares), &Options::default()).unwrap();
    assert_eq!(cover.primes(), set(&["001"]));
}

#[test]
fn test_minterm_also_dont_care_is_required() {
    let (minterms, dont_cares) = encode(&[1, 2], &[2, 3]).unwrap();
    let cover = minimize(&minterms, Some(&dont_cares), &Options::default()).unwrap();
    assert!(cover.covers(&"10".parse().unwrap()));
    assert!(cover.covers(&"01".parse().unwrap()));
    assert_eq!(cover.primes(), set(&["-1", "1-"]));
}

#[test]
fn test_essential_primes() {
    let minterms = values(3, &[0, 1, 2, 3, 7]);
    let cover = minimize(&minterms, None, &Options::default()).unwrap();
    assert_eq!(cover.essential(), &set(&["-11", "0--"]));
    assert!(cover.selected().is_empty());
}

#[test]
fn test_essential_primes_are_unique_coverers() {
    // f = m(0, 2, 5, 6, 7, 8, 10, 12, 13, 14, 15)
    let minterms = values(4, &[0, 2, 5, 6, 7, 8, 10, 12, 13, 14, 15]);
    let primes = generate_primes(&minterms).unwrap();
    let cover = minimize_cover(&minterms, &primes, None, &Options::default()).unwrap();
    assert!(!cover.essential().is_empty());
    for e in cover.essential() {
        let unique = minterms
            .iter()
            .any(|m| e.covers(m) && primes.iter().filter(|p| p.covers(m)).count() == 1);
        assert!(unique, "{} is not the only cover of any minterm", e);
    }
    assert_eq!(cover.len(), brute_force_minimum(&minterms, &primes));
}

#[test]
fn test_guard_returns_overcover() {
    let minterms = values(3, &[0, 1, 2, 5, 6, 7]);
    let options = Options::default().with_max_candidates(2);
    let cover = minimize(&minterms, None, &options).unwrap();
    assert_eq!(cover.outcome(), Outcome::Overcover { candidates: 6, limit: 2 });
    assert!(!cover.is_optimal());
    assert_eq!(cover.len(), 6);
    for m in &minterms {
        assert!(cover.covers(m));
    }
}

#[test]
fn test_guard_boundary() {
    // Six candidates, no essential primes.
    let minterms = values(3, &[0, 1, 2, 5, 6, 7]);

    let cover = minimize(&minterms, None, &Options::default().with_max_candidates(6)).unwrap();
    assert_eq!(cover.outcome(), Outcome::Optimal);
    assert_eq!(cover.len(), 3);

    let cover = minimize(&minterms, None, &Options::default().with_max_candidates(5)).unwrap();
    assert_eq!(cover.outcome(), Outcome::Overcover { candidates: 6, limit: 5 });
    assert_eq!(cover.len(), 6);
}

#[test]
fn test_guard_default_limit() {
    // 00000- and one of 000000/000001 cover each minterm; the rest covers nothing
    // but still counts as a candidate.
    let minterms = values(6, &[0, 1]);
    let mut primes = set(&["00000-"]);
    primes.extend(values(6, &(0..51).collect::<Vec<u64>>()));
    assert_eq!(primes.len(), DEFAULT_MAX_CANDIDATES);

    let cover = minimize_cover(&minterms, &primes, None, &Options::default()).unwrap();
    assert_eq!(cover.outcome(), Outcome::Optimal);
    assert_eq!(cover.primes(), set(&["00000-"]));

    primes.extend(values(6, &[51]));
    let cover = minimize_cover(&minterms, &primes, None, &Options::default()).unwrap();
    assert_eq!(
        cover.outcome(),
        Outcome::Overcover {
            candidates: DEFAULT_MAX_CANDIDATES + 1,
            limit: DEFAULT_MAX_CANDIDATES
        }
    );
    assert!(minterms.iter().all(|m| cover.covers(m)));
}

#[test]
fn test_guard_not_reached_with_essentials_only() {
    // Petrick's method is not needed, so even a zero limit is fine.
    let minterms = values(3, &[0, 1, 2, 3, 7]);
    let cover = minimize(&minterms, None, &Options::default().with_max_candidates(0)).unwrap();
    assert!(cover.is_optimal());
}

#[test]
fn test_unbounded() {
    let minterms = values(5, &[0, 1, 2, 5, 6, 7, 8, 9, 10, 14, 17, 18, 21, 23, 26, 29, 31]);
    let bounded = minimize(&minterms, None, &Options::default()).unwrap();
    let unbounded = minimize(&minterms, None, &Options::unbounded()).unwrap();
    assert_eq!(bounded, unbounded);
    assert!(minterms.iter().all(|m| unbounded.covers(m)));
}

#[test]
fn test_errors() {
    let options = Options::default();
    assert_eq!(minimize(&BTreeSet::new(), None, &options), Err(Error::EmptyInput));
    assert_eq!(
        minimize_cover(&BTreeSet::new(), &set(&["0-"]), None, &options),
        Err(Error::EmptyInput)
    );
    assert_eq!(
        minimize_cover(&set(&["01"]), &set(&["0-0"]), None, &options),
        Err(Error::InvalidInput(InvalidInput::WidthMismatch { expected: 2, found: 3 }))
    );
    assert_eq!(
        minimize_cover(&set(&["01", "11"]), &set(&["0-"]), None, &options),
        Err(Error::InvalidInput(InvalidInput::UncoveredMinterm {
            minterm: "11".to_string()
        }))
    );
    assert_eq!(
        minimize(&set(&["01"]), Some(&set(&["1"])), &options),
        Err(Error::InvalidInput(InvalidInput::WidthMismatch { expected: 2, found: 1 }))
    );
}

#[test]
fn test_dashed_minterms_rejected() {
    let options = Options::default();
    let dashed = |input: &str, position: usize| -> Result<Cover, Error> {
        Err(Error::InvalidInput(InvalidInput::InvalidChar {
            input: input.to_string(),
            position,
            ch: '-',
        }))
    };
    assert_eq!(
        minimize_cover(&set(&["0-", "11"]), &set(&["0-", "11"]), None, &options),
        dashed("0-", 1)
    );
    assert_eq!(
        minimize_cover(&set(&["01"]), &set(&["01"]), Some(&set(&["--"])), &options),
        dashed("--", 0)
    );
    assert_eq!(minimize(&set(&["1-0", "000"]), None, &options), dashed("1-0", 1));
    assert_eq!(minimize(&set(&["000"]), Some(&set(&["-11"])), &options), dashed("-11", 0));
}

/// Every nonempty 3-variable function: primes cover everything, cannot be
/// merged further, and the selected cover is complete and minimum.
#[test]
fn test_all_three_variable_functions() {
    for f in 1u32..256 {
        let ones: Vec<u64> = (0..8).filter(|i| f >> i & 1 == 1).collect();
        let minterms = values(3, &ones);
        let primes = generate_primes(&minterms).unwrap();

        // Totality.
        for m in &minterms {
            assert!(primes.iter().any(|p| p.covers(m)), "f = {:#010b}: {} uncovered", f, m);
        }
        // Maximality.
        for a in &primes {
            for b in &primes {
                assert_eq!(a.merge(b), None, "f = {:#010b}: {} and {} merge", f, a, b);
            }
        }
        // Soundness and optimality.
        let cover = minimize_cover(&minterms, &primes, None, &Options::default()).unwrap();
        assert!(cover.is_optimal());
        assert_eq!(covered(&cover.primes()), ones.iter().copied().collect());
        assert_eq!(cover.len(), brute_force_minimum(&minterms, &primes), "f = {:#010b}", f);
    }
}

/// With don't-cares, the cover hits every required minterm and never needs
/// more primes than the cover computed without them.
#[test]
fn test_dont_cares_never_hurt() {
    let cases: &[(&[u64], &[u64])] = &[
        (&[4, 8, 10, 11, 12, 15], &[9, 14]),
        (&[0, 2, 3, 4, 5, 7], &[1, 6]),
        (&[1, 3, 7, 11, 15], &[0, 2, 5]),
        (&[0, 1, 5, 7, 8, 10, 14, 15], &[3, 9]),
    ];
    for &(ones, dcs) in cases {
        let (minterms, dont_cares) = encode(ones, dcs).unwrap();
        let with = minimize(&minterms, Some(&dont_cares), &Options::default()).unwrap();
        let without = minimize(&minterms, None, &Options::default()).unwrap();
        assert!(minterms.iter().all(|m| with.covers(m)));
        assert!(with.len() <= without.len());
    }
}
