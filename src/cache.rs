//! Memo table for the covering predicate.
//!
//! [`CoversCache`] is a direct-mapped table keyed by a `(prime, minterm)` index
//! pair. Keys are combined with the [Szudzik pairing function][szudzik-pairing],
//! which is injective, so a stored key never aliases another pair; a slot that
//! is overwritten simply causes a recomputation later.
//!
//! A cache belongs to a single minimization call and is dropped with it.
//!
//! [szudzik-pairing]: https://en.wikipedia.org/wiki/Pairing_function#Other_pairing_functions

use std::cell::Cell;

/// Szudzik pairing function.
///
/// ```text
/// (a, b) -> if (a<b) then (b^2 + a) else (a^2 + a + b)
/// ```
pub fn pairing2(a: u64, b: u64) -> u64 {
    if a < b {
        b * b + a
    } else {
        a * a + a + b
    }
}

struct Entry {
    key: u64,
    value: bool,
}

pub struct CoversCache {
    data: Vec<Option<Entry>>,
    bitmask: u64,
    hits: Cell<usize>,
    misses: Cell<usize>,
}

impl CoversCache {
    /// Largest table size, in bits.
    pub const MAX_BITS: usize = 20;

    /// Create a new table of size `2^bits`.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Bits should be in the range 0..=31");

        let size = 1usize << bits;
        Self {
            data: std::iter::repeat_with(|| None).take(size).collect(),
            bitmask: (size - 1) as u64,
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    /// Create a table large enough to hold every pair of `primes × minterms`,
    /// capped at `2^MAX_BITS` slots.
    pub fn for_pairs(primes: usize, minterms: usize) -> Self {
        let pairs = primes.saturating_mul(minterms).max(1);
        let bits = (usize::BITS - (pairs - 1).leading_zeros()) as usize;
        Self::new(bits.min(Self::MAX_BITS))
    }

    /// Get the number of cache hits.
    pub fn hits(&self) -> usize {
        self.hits.get()
    }
    /// Get the number of cache misses.
    pub fn misses(&self) -> usize {
        self.misses.get()
    }

    fn key(prime: usize, minterm: usize) -> u64 {
        pairing2(prime as u64, minterm as u64)
    }

    fn index(&self, key: u64) -> usize {
        (key & self.bitmask) as usize
    }

    /// Get the cached result.
    pub fn get(&self, prime: usize, minterm: usize) -> Option<bool> {
        let key = Self::key(prime, minterm);
        match &self.data[self.index(key)] {
            Some(entry) if entry.key == key => {
                self.hits.set(self.hits.get() + 1);
                Some(entry.value)
            }
            _ => {
                self.misses.set(self.misses.get() + 1);
                None
            }
        }
    }

    /// Insert a result into the cache.
    pub fn insert(&mut self, prime: usize, minterm: usize, value: bool) {
        let key = Self::key(prime, minterm);
        let index = self.index(key);
        self.data[index] = Some(Entry { key, value });
    }

    /// Returns the cached result, computing and storing it on a miss.
    pub fn get_or_insert_with(&mut self, prime: usize, minterm: usize, f: impl FnOnce() -> bool) -> bool {
        if let Some(value) = self.get(prime, minterm) {
            return value;
        }
        let value = f();
        self.insert(prime, minterm, value);
        value
    }
}
