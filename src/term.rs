//! Product terms for Petrick's method.
//!
//! A [`Term`] is a set of tokens, each token standing for one candidate prime
//! implicant. It is a bit set backed by a vector of `u64` words which grows on
//! demand, so the number of tokens is not limited by the representation.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A set of tokens (small integers).
///
/// Equality, hashing and ordering only look at the set bits, never at the
/// allocated capacity. Terms are ordered lexicographically by their ascending
/// token sequence, so `{0, 5} < {1} < {1, 2}`.
#[derive(Debug, Clone, Default)]
pub struct Term {
    /// Storage: each u64 holds 64 tokens
    words: Vec<u64>,
    /// Number of set bits (cached for O(1) len())
    count: usize,
}

impl Term {
    /// Number of bits per word.
    const BITS_PER_WORD: usize = 64;

    /// Creates an empty term with no pre-allocated capacity.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the number of tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if there are no tokens.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    fn word_and_bit(token: usize) -> (usize, usize) {
        (token / Self::BITS_PER_WORD, token % Self::BITS_PER_WORD)
    }

    /// Returns true if the token is present.
    #[inline]
    pub fn contains(&self, token: usize) -> bool {
        let (word_idx, bit_idx) = Self::word_and_bit(token);
        match self.words.get(word_idx) {
            Some(word) => (word >> bit_idx) & 1 == 1,
            None => false,
        }
    }

    /// Adds a token. Returns true if it was not present before.
    pub fn insert(&mut self, token: usize) -> bool {
        let (word_idx, bit_idx) = Self::word_and_bit(token);

        // Grow if necessary
        if word_idx >= self.words.len() {
            self.words.resize(word_idx + 1, 0);
        }

        let mask = 1u64 << bit_idx;
        let was_clear = (self.words[word_idx] & mask) == 0;
        if was_clear {
            self.words[word_idx] |= mask;
            self.count += 1;
        }
        was_clear
    }

    /// Returns the union of two terms (the product of two products).
    pub fn union(&self, other: &Term) -> Term {
        let (long, short) = if self.words.len() >= other.words.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut words = long.words.clone();
        for (w, s) in words.iter_mut().zip(short.words.iter()) {
            *w |= s;
        }
        let count = words.iter().map(|w| w.count_ones() as usize).sum();
        Term { words, count }
    }

    /// Returns true if every token of `self` is also in `other`.
    pub fn is_subset(&self, other: &Term) -> bool {
        if self.count > other.count {
            return false;
        }
        self.words.iter().enumerate().all(|(i, &w)| {
            let o = other.words.get(i).copied().unwrap_or(0);
            w & !o == 0
        })
    }

    /// Returns an iterator over the tokens in ascending order.
    pub fn iter(&self) -> TermIter<'_> {
        TermIter {
            term: self,
            word_idx: 0,
            current_word: self.words.first().copied().unwrap_or(0),
        }
    }

    /// Words without trailing zeros.
    fn significant_words(&self) -> &[u64] {
        let end = self.words.iter().rposition(|&w| w != 0).map_or(0, |i| i + 1);
        &self.words[..end]
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.significant_words() == other.significant_words()
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant_words().hash(state);
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromIterator<usize> for Term {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut term = Term::empty();
        for token in iter {
            term.insert(token);
        }
        term
    }
}

/// Iterator over the tokens of a [`Term`].
pub struct TermIter<'a> {
    term: &'a Term,
    word_idx: usize,
    current_word: u64,
}

impl Iterator for TermIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current_word != 0 {
                let bit_idx = self.current_word.trailing_zeros() as usize;
                self.current_word &= self.current_word - 1; // Clear lowest set bit
                return Some(self.word_idx * Term::BITS_PER_WORD + bit_idx);
            }

            self.word_idx += 1;
            if self.word_idx >= self.term.words.len() {
                return None;
            }
            self.current_word = self.term.words[self.word_idx];
        }
    }
}
