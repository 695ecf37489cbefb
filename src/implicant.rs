//! Bit patterns with wildcard positions.
//!
//! An [`Implicant`] is a fixed-width sequence over `{0, 1, -}`.
//! A `-` at some position means "don't care about this bit": the implicant was
//! produced by merging two implicants which differed only there.
//! A minterm is simply an implicant without any `-`.
//!
//! Implicants are ordered exactly like their textual form (`-` < `0` < `1`),
//! so sets of implicants iterate in the same order as sorted strings.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;

use crate::error::InvalidInput;

/// A single position of an implicant.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Bit {
    Dash,
    Zero,
    One,
}

impl Bit {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '-' => Some(Bit::Dash),
            '0' => Some(Bit::Zero),
            '1' => Some(Bit::One),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Bit::Dash => '-',
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

impl From<bool> for Bit {
    fn from(b: bool) -> Self {
        if b {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

/// A fixed-width pattern over `{0, 1, -}`, most significant bit first.
///
/// # Invariants
///
/// - The width is at least 1.
/// - All implicants processed together have the same width (checked by the
///   entry points, see [`common_width`]).
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Implicant(Box<[Bit]>);

impl Implicant {
    /// Encodes `value` as a minterm of the given width, zero padded on the left.
    pub fn from_value(value: u64, width: usize) -> Result<Self, InvalidInput> {
        if width == 0 {
            return Err(InvalidInput::ZeroWidth);
        }
        if width < 64 && value >> width != 0 {
            return Err(InvalidInput::ValueTooWide { value, width });
        }
        let bits: Vec<Bit> = (0..width)
            .rev()
            .map(|i| Bit::from(i < 64 && (value >> i) & 1 == 1))
            .collect();
        Ok(Implicant(bits.into()))
    }

    /// Checks that this is a plain bit string, without `-` positions.
    pub fn ensure_minterm(&self) -> Result<(), InvalidInput> {
        if self.is_minterm() {
            return Ok(());
        }
        let position = self.0.iter().position(|&b| b == Bit::Dash).unwrap_or_default();
        Err(InvalidInput::InvalidChar {
            input: self.to_string(),
            position,
            ch: '-',
        })
    }

    pub fn width(&self) -> usize {
        self.0.len()
    }

    /// Population count: the number of `1` positions (`-` is not counted).
    pub fn ones(&self) -> usize {
        self.0.iter().filter(|&&b| b == Bit::One).count()
    }

    /// Number of `-` positions.
    pub fn dashes(&self) -> usize {
        self.0.iter().filter(|&&b| b == Bit::Dash).count()
    }

    /// Returns true if there are no `-` positions.
    pub fn is_minterm(&self) -> bool {
        self.0.iter().all(|&b| b != Bit::Dash)
    }

    /// Merges two implicants that disagree in exactly one position,
    /// replacing that position with `-`.
    ///
    /// Returns `None` if the implicants are identical, differ in more than one
    /// position, or have different widths.
    pub fn merge(&self, other: &Implicant) -> Option<Implicant> {
        if self.width() != other.width() {
            return None;
        }
        let mut diff = None;
        for (i, (a, b)) in self.0.iter().zip(other.0.iter()).enumerate() {
            if a != b {
                if diff.is_some() {
                    return None;
                }
                diff = Some(i);
            }
        }
        let i = diff?;
        let mut bits = self.0.clone();
        bits[i] = Bit::Dash;
        Some(Implicant(bits))
    }

    /// Returns true if every non-`-` position of `self` equals the
    /// corresponding position of `minterm`.
    pub fn covers(&self, minterm: &Implicant) -> bool {
        self.width() == minterm.width() && self.0.iter().zip(minterm.0.iter()).all(|(&p, &m)| p == Bit::Dash || p == m)
    }

    /// Number of minterms covered, `2^dashes`.
    pub fn minterm_count(&self) -> BigUint {
        BigUint::from(1u32) << self.dashes()
    }

    /// Enumerates all covered minterms in ascending order.
    ///
    /// The result has `2^dashes` elements, so this is meant for display only.
    pub fn expand(&self) -> Vec<Implicant> {
        let mut result = vec![self.0.clone()];
        for (i, &b) in self.0.iter().enumerate() {
            if b != Bit::Dash {
                continue;
            }
            result = result
                .into_iter()
                .flat_map(|bits| {
                    let mut zero = bits.clone();
                    zero[i] = Bit::Zero;
                    let mut one = bits;
                    one[i] = Bit::One;
                    [zero, one]
                })
                .collect();
        }
        result.into_iter().map(Implicant).collect()
    }

    /// Decodes a minterm back into its numeric value.
    ///
    /// Returns `None` for implicants with `-` positions or wider than 64 bits.
    pub fn to_value(&self) -> Option<u64> {
        if self.width() > 64 {
            return None;
        }
        self.0.iter().try_fold(0u64, |acc, &b| match b {
            Bit::Dash => None,
            Bit::Zero => Some(acc << 1),
            Bit::One => Some((acc << 1) | 1),
        })
    }
}

impl FromStr for Implicant {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(InvalidInput::ZeroWidth);
        }
        let bits = s
            .chars()
            .enumerate()
            .map(|(position, ch)| {
                Bit::from_char(ch).ok_or_else(|| InvalidInput::InvalidChar {
                    input: s.to_string(),
                    position,
                    ch,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Implicant(bits.into()))
    }
}

impl fmt::Display for Implicant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0.iter() {
            write!(f, "{}", b.to_char())?;
        }
        Ok(())
    }
}

/// Checks that all implicants share one width and returns it.
///
/// Returns `Ok(None)` for an empty iterator.
pub fn common_width<'a>(implicants: impl IntoIterator<Item = &'a Implicant>) -> Result<Option<usize>, InvalidInput> {
    let mut width = None;
    for implicant in implicants {
        match width {
            None => width = Some(implicant.width()),
            Some(expected) if expected != implicant.width() => {
                return Err(InvalidInput::WidthMismatch {
                    expected,
                    found: implicant.width(),
                });
            }
            Some(_) => {}
        }
    }
    Ok(width)
}
