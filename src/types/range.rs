//! Port range specifications.
//!
//! A spec is a comma-separated sequence of blocks, each a single port or an
//! inclusive `min-max` pair. Parsing is deliberately permissive: values are
//! not clamped to 1-65535, an inverted pair is an empty block rather than an
//! error, and a block that fails to parse can be skipped by the caller
//! without invalidating the rest of the spec.

use crate::error::RangeParseError;
use std::fmt;

/// A raw port range specification string.
///
/// Block order and in-block order are significant and preserved in the
/// produced port sequence. Blocks are parsed lazily at production time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortRangeSpec(String);

impl PortRangeSpec {
    pub fn new(spec: impl Into<String>) -> Self {
        Self(spec.into())
    }

    /// The raw spec string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The comma-separated blocks of this spec, unparsed, in declared order.
    pub fn blocks(&self) -> impl Iterator<Item = &str> {
        self.0.split(',')
    }
}

impl From<&str> for PortRangeSpec {
    fn from(spec: &str) -> Self {
        Self::new(spec)
    }
}

impl fmt::Display for PortRangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One parsed block: an inclusive span of port numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortBlock {
    min: u32,
    max: u32,
}

impl PortBlock {
    /// Parse a single block.
    ///
    /// `"80"` is the span 80..=80, `"1000-1002"` the span 1000..=1002.
    /// Segments past the second are ignored. An inverted pair parses fine
    /// and simply yields no ports.
    pub fn parse(block: &str) -> Result<Self, RangeParseError> {
        let mut parts = block.split('-');
        let min = parts
            .next()
            .unwrap_or_default()
            .parse::<u32>()
            .map_err(|_| RangeParseError(block.to_string()))?;
        let max = match parts.next() {
            None => min,
            Some(part) => part
                .parse::<u32>()
                .map_err(|_| RangeParseError(block.to_string()))?,
        };
        Ok(Self { min, max })
    }

    pub const fn min(self) -> u32 {
        self.min
    }

    pub const fn max(self) -> u32 {
        self.max
    }

    /// All ports in the span, ascending. Empty when `min > max`.
    pub fn iter(self) -> impl Iterator<Item = u32> {
        self.min..=self.max
    }
}

impl fmt::Display for PortBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}
