//! Identities and subset descriptors.
//!
//! An [`Identity`] is a fixed-length bit string. A [`Pattern`] is a fixed-length
//! string over `{0, 1, *}` where `*` is a wildcard. A [`SubsetDescriptor`] pairs
//! a covered list (CL) with a revoked list (RL) of the same length.
//!
//! Positions are zero-based throughout the crate; position `i` here is position
//! `i + 1` in the usual one-based notation of the scheme.

use std::fmt;
use std::str::FromStr;

use crate::error::{InputError, Result};

/// A single identity bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    /// The opposite bit.
    pub fn flip(self) -> Bit {
        match self {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero,
        }
    }

    fn from_char(c: char) -> Option<Bit> {
        match c {
            '0' => Some(Bit::Zero),
            '1' => Some(Bit::One),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

/// A single position of a covered or revoked list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    Fixed(Bit),
    Wildcard,
}

impl Symbol {
    pub fn is_wildcard(self) -> bool {
        matches!(self, Symbol::Wildcard)
    }

    fn from_char(c: char) -> Option<Symbol> {
        match c {
            '*' => Some(Symbol::Wildcard),
            _ => Bit::from_char(c).map(Symbol::Fixed),
        }
    }

    fn as_char(self) -> char {
        match self {
            Symbol::Fixed(b) => b.as_char(),
            Symbol::Wildcard => '*',
        }
    }
}

/// A device identity, e.g. `"0110"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identity(Vec<Bit>);

impl Identity {
    pub fn new(bits: Vec<Bit>) -> Self {
        Identity(bits)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bits(&self) -> &[Bit] {
        &self.0
    }

    pub(crate) fn ensure_len(&self, expected: usize) -> Result<()> {
        ensure_len("identity", expected, self.len())
    }
}

impl FromStr for Identity {
    type Err = InputError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, character)| {
                Bit::from_char(character).ok_or(InputError::InvalidCharacter {
                    what: "identity",
                    position,
                    character,
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Identity)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|b| write!(f, "{}", b.as_char()))
    }
}

/// A ternary pattern over identities, e.g. `"*1*0"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pattern(Vec<Symbol>);

impl Pattern {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Pattern(symbols)
    }

    /// A pattern of `len` wildcards.
    pub fn wildcards(len: usize) -> Self {
        Pattern(vec![Symbol::Wildcard; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    /// Whether `id` agrees with every fixed position of this pattern.
    pub fn matches(&self, id: &Identity) -> bool {
        self.len() == id.len()
            && self.0.iter().zip(id.bits()).all(|(s, b)| match s {
                Symbol::Fixed(fixed) => fixed == b,
                Symbol::Wildcard => true,
            })
    }

    fn parse(what: &'static str, s: &str) -> std::result::Result<Self, InputError> {
        s.chars()
            .enumerate()
            .map(|(position, character)| {
                Symbol::from_char(character).ok_or(InputError::InvalidCharacter {
                    what,
                    position,
                    character,
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Pattern)
    }
}

impl FromStr for Pattern {
    type Err = InputError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Pattern::parse("pattern", s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|s| write!(f, "{}", s.as_char()))
    }
}

/// The `(CL, RL)` pair a header is encrypted under.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubsetDescriptor {
    covered: Pattern,
    revoked: Pattern,
}

impl SubsetDescriptor {
    pub fn new(covered: Pattern, revoked: Pattern) -> Result<Self> {
        ensure_len("revoked list", covered.len(), revoked.len())?;
        Ok(SubsetDescriptor { covered, revoked })
    }

    /// Parses a covered list and a revoked list from their string forms.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bestie::SubsetDescriptor;
    ///
    /// let subset = SubsetDescriptor::parse("***0", "*100").unwrap();
    /// assert_eq!(subset.len(), 4);
    /// assert!(SubsetDescriptor::parse("***0", "*10").is_err());
    /// assert!(SubsetDescriptor::parse("**?0", "*100").is_err());
    /// ```
    pub fn parse(covered: &str, revoked: &str) -> Result<Self> {
        let covered = Pattern::parse("covered list", covered)?;
        let revoked = Pattern::parse("revoked list", revoked)?;
        SubsetDescriptor::new(covered, revoked)
    }

    pub fn covered(&self) -> &Pattern {
        &self.covered
    }

    pub fn revoked(&self) -> &Pattern {
        &self.revoked
    }

    pub fn len(&self) -> usize {
        self.covered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.covered.is_empty()
    }

    pub(crate) fn ensure_len(&self, expected: usize) -> Result<()> {
        ensure_len("covered list", expected, self.covered.len())?;
        ensure_len("revoked list", expected, self.revoked.len())
    }

    /// Splits the fixed positions of the revoked list by whether `id` differs
    /// from (`p`) or equals (`q`) the revoked bit.
    pub fn coverage(&self, id: &Identity) -> Result<Coverage> {
        id.ensure_len(self.len())?;
        let mut coverage = Coverage::default();
        for (i, (s, b)) in self.revoked.symbols().iter().zip(id.bits()).enumerate() {
            match s {
                Symbol::Fixed(r) if r != b => coverage.p.push(i),
                Symbol::Fixed(_) => coverage.q.push(i),
                Symbol::Wildcard => {}
            }
        }
        Ok(coverage)
    }
}

/// The positions where an identity differs from (`p`) or matches (`q`) the
/// fixed positions of a revoked list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Coverage {
    pub p: Vec<usize>,
    pub q: Vec<usize>,
}

impl Coverage {
    /// `d = |P|`. An identity with `d = 0` is revoked.
    pub fn d(&self) -> usize {
        self.p.len()
    }

    pub fn is_revoked(&self) -> bool {
        self.p.is_empty()
    }
}

fn ensure_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(InputError::LengthMismatch {
            what,
            expected,
            actual,
        }
        .into());
    }
    Ok(())
}
