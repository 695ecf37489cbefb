//! Petrick's method: symbolic algebra over candidate tokens.
//!
//! The covering problem is first written as a product of sums: for every
//! uncovered minterm, the sum of the tokens of the candidates covering it
//! ("at least one of these must be chosen"). Multiplying it out with the
//! distributive law gives a sum of products, in which every product term is
//! a set of candidates forming a complete cover. The absorption law
//! (`X + XY = X`) removes every term that is a superset of another.
//! Any shortest surviving term is a minimum cover.
//!
//! Sums of products are stored as `BTreeSet<Term>`, so duplicates collapse
//! and iteration is deterministic.

use std::collections::BTreeSet;

use log::debug;

use crate::term::Term;

/// A sum of products.
pub type Sop = BTreeSet<Term>;

/// Multiplies two sums of products: the union of every pair of terms.
pub fn distribute(a: &Sop, b: &Sop) -> Sop {
    let mut result = Sop::new();
    for x in a {
        for y in b {
            result.insert(x.union(y));
        }
    }
    result
}

/// Applies the absorption law until no term is a superset of another.
///
/// The result is a fixed point: absorbing it again changes nothing.
pub fn absorb(sop: &Sop) -> Sop {
    let mut terms: Vec<&Term> = sop.iter().collect();
    // A term can only absorb terms at least as long as itself.
    terms.sort_by_key(|t| t.len());

    let mut kept: Vec<&Term> = Vec::with_capacity(terms.len());
    for term in terms {
        if !kept.iter().any(|k| k.is_subset(term)) {
            kept.push(term);
        }
    }
    kept.into_iter().cloned().collect()
}

/// Expands a product of sums into an absorbed sum of products.
///
/// Each element of `pos` is one sum, given as the set of its tokens.
/// Absorption is applied after every multiplication step, which keeps the
/// intermediate expressions small without changing the final result.
/// An empty sum makes the whole product unsatisfiable, giving an empty result.
pub fn expand(pos: &[Term]) -> Sop {
    let unit: Sop = [Term::empty()].into_iter().collect();
    pos.iter().enumerate().fold(unit, |acc, (i, sum)| {
        let factor: Sop = sum.iter().map(|token| [token].into_iter().collect()).collect();
        let product = absorb(&distribute(&acc, &factor));
        debug!("petrick: step {}/{}, {} product terms", i + 1, pos.len(), product.len());
        product
    })
}

/// Picks a shortest term; among those, the one with the lexicographically
/// smallest token sequence.
pub fn select_minimal(sop: &Sop) -> Option<&Term> {
    sop.iter().min_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
}
