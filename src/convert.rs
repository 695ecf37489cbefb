//! Conversions between decimal minterms and implicants.

use std::collections::BTreeSet;

use crate::error::Result;
use crate::implicant::Implicant;

/// Number of bits needed to write the largest value (at least 1).
pub fn width_for(values: impl IntoIterator<Item = u64>) -> usize {
    let max = values.into_iter().max().unwrap_or(0);
    (u64::BITS - max.leading_zeros()).max(1) as usize
}

/// Encodes every value as a minterm of the given width.
pub fn to_implicants(values: impl IntoIterator<Item = u64>, width: usize) -> Result<BTreeSet<Implicant>> {
    values
        .into_iter()
        .map(|v| Implicant::from_value(v, width).map_err(Into::into))
        .collect()
}

/// Encodes minterms and don't-cares with one shared width, the bit length of
/// the largest value across both lists.
pub fn encode(minterms: &[u64], dont_cares: &[u64]) -> Result<(BTreeSet<Implicant>, BTreeSet<Implicant>)> {
    let width = width_for(minterms.iter().chain(dont_cares).copied());
    let minterms = to_implicants(minterms.iter().copied(), width)?;
    let dont_cares = to_implicants(dont_cares.iter().copied(), width)?;
    Ok((minterms, dont_cares))
}

/// Decimal minterms covered by each prime, e.g. `1-1` -> `[5, 7]`.
///
/// Primes wider than 64 bits are skipped without being expanded.
pub fn cover_to_values<'a>(primes: impl IntoIterator<Item = &'a Implicant>) -> Vec<Vec<u64>> {
    primes
        .into_iter()
        .filter(|p| p.width() <= 64)
        .map(|p| p.expand().iter().filter_map(Implicant::to_value).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_for() {
        assert_eq!(width_for([0]), 1);
        assert_eq!(width_for([1]), 1);
        assert_eq!(width_for([2, 1]), 2);
        assert_eq!(width_for([7, 0]), 3);
        assert_eq!(width_for([8]), 4);
        assert_eq!(width_for(Vec::new()), 1);
        assert_eq!(width_for([u64::MAX]), 64);
    }

    #[test]
    fn test_encode_shared_width() {
        // Don't-cares may be wider than the minterms.
        let (minterms, dont_cares) = encode(&[1, 3], &[5, 7]).unwrap();
        let m: Vec<String> = minterms.iter().map(|p| p.to_string()).collect();
        let d: Vec<String> = dont_cares.iter().map(|p| p.to_string()).collect();
        assert_eq!(m, vec!["001", "011"]);
        assert_eq!(d, vec!["101", "111"]);
    }

    #[test]
    fn test_to_implicants_too_wide() {
        assert!(to_implicants([4], 2).is_err());
    }

    #[test]
    fn test_cover_to_values() {
        let primes: BTreeSet<Implicant> = ["1-1", "0-0", "011"].iter().map(|s| s.parse().unwrap()).collect();
        assert_eq!(cover_to_values(&primes), vec![vec![0, 2], vec![3], vec![5, 7]]);
    }

    #[test]
    fn test_cover_to_values_skips_wide() {
        // 2^70 minterms: must be skipped before expansion.
        let wide: Implicant = "-".repeat(70).parse().unwrap();
        let narrow: Implicant = "1-".parse().unwrap();
        assert_eq!(cover_to_values([&wide, &narrow]), vec![vec![2, 3]]);
        assert!(cover_to_values([&wide]).is_empty());
    }
}
