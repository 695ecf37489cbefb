//! # qmp-rs: Quine–McCluskey–Petrick logic minimization in Rust
//!
//! **`qmp-rs`** turns a single-output Boolean function, given as its set of
//! minterms (and optionally don't-cares), into a minimum sum-of-products cover.
//!
//! ## How it works
//!
//! Minimization runs in two stages:
//!
//! 1. **Prime implicant generation** ([`primes`]): minterms are grouped by the
//!    number of `1` bits and repeatedly merged pairwise (`001` + `011` → `0-1`)
//!    until nothing merges anymore. Whatever never merged is a *prime implicant*.
//! 2. **Cover selection** ([`cover`]): essential primes are taken first; the rest
//!    of the covering problem is solved exactly with Petrick's method
//!    ([`petrick`]), which multiplies out the product-of-sums covering formula
//!    and keeps the shortest product.
//!
//! Petrick's method is exponential in the worst case. When more candidates
//! remain than [`Options::max_candidates`][cover::Options], it is skipped and all
//! candidates are returned: still a complete cover, but flagged as
//! [`Outcome::Overcover`][cover::Outcome].
//!
//! ## Basic Usage
//!
//! ```rust
//! use qmp::convert::{cover_to_values, encode};
//! use qmp::cover::{minimize, Options};
//!
//! // f = m(1, 3) + d(5, 7)
//! let (minterms, dont_cares) = encode(&[1, 3], &[5, 7]).unwrap();
//! let cover = minimize(&minterms, Some(&dont_cares), &Options::default()).unwrap();
//!
//! assert!(cover.is_optimal());
//! assert_eq!(cover.len(), 1);
//! assert_eq!(cover_to_values(&cover.primes()), vec![vec![1, 3, 5, 7]]);
//! ```

pub mod cache;
pub mod convert;
pub mod cover;
pub mod error;
pub mod implicant;
pub mod petrick;
pub mod primes;
pub mod term;
