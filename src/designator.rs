//! Addressing of sub-parts of structured values.
//!
//! A [`Part`] designates one step into a value: the value as a whole, a
//! [`Range`] of characters of a string, the n-th element of a list, or the
//! n-th input/output port of a function. A [`Designator`] chains parts,
//! starting with its *head* (the outermost step, typically a function port)
//! and narrowing down from there, so `out0/#2/I1-3` reads "characters 1 to 3
//! of element 2 of the first output".
//!
//! Designators are immutable and cheap to clone; the chain is shared behind
//! an `Arc`, which also lets callers observe that an operation returned the
//! very same designator it was given (see [`Designator::ptr_eq`]).

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{BreadcrumbError, Result};
use crate::value::Value;

// ------------- Range -------------
/// Contiguous, inclusive interval of character positions in a string.
///
/// The invariant `start <= end` is checked on construction and on
/// deserialization; a violating range is never clamped or swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct Range {
    start: i64,
    end: i64,
}

#[derive(Deserialize)]
struct RawRange {
    start: i64,
    end: i64,
}

impl TryFrom<RawRange> for Range {
    type Error = BreadcrumbError;
    fn try_from(raw: RawRange) -> Result<Self> {
        Range::new(raw.start, raw.end)
    }
}

impl Range {
    pub fn new(start: i64, end: i64) -> Result<Self> {
        if start > end {
            return Err(BreadcrumbError::MalformedRange { start, end });
        }
        Ok(Self { start, end })
    }
    pub fn start(&self) -> i64 {
        self.start
    }
    pub fn end(&self) -> i64 {
        self.end
    }
    /// Number of characters covered, failing only for ranges spanning more
    /// than `i64::MAX` positions.
    pub fn length(&self) -> Result<i64> {
        self.end
            .checked_sub(self.start)
            .and_then(|d| d.checked_add(1))
            .ok_or_else(|| BreadcrumbError::Overflow(format!("length of {self}")))
    }
    /// Moves both ends by `offset`, which may be negative.
    pub fn shift(&self, offset: i64) -> Result<Range> {
        match (self.start.checked_add(offset), self.end.checked_add(offset)) {
            (Some(start), Some(end)) => Ok(Self { start, end }),
            _ => Err(BreadcrumbError::Overflow(format!("{self} shifted by {offset}"))),
        }
    }
    pub fn overlaps(&self, other: &Range) -> bool {
        !(other.end < self.start || self.end < other.start)
    }
    /// Common part of two ranges, or `None` when they are disjoint.
    pub fn intersect(&self, other: &Range) -> Option<Range> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Self {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        })
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.start < self.end {
            write!(f, "I{}-{}", self.start, self.end)
        } else {
            write!(f, "I{}", self.start)
        }
    }
}

// ------------- Part -------------
/// What a part is being applied to.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    Value(&'a Value),
    Function,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Part {
    /// The whole object.
    Identity,
    Range(Range),
    NthElement(usize),
    NthInput(usize),
    NthOutput(usize),
}

impl Part {
    pub fn applies_to(&self, target: Target<'_>) -> bool {
        match (self, target) {
            (Part::Identity, _) => true,
            (Part::Range(_), Target::Value(Value::Str(_))) => true,
            (Part::NthElement(_), Target::Value(Value::List(_))) => true,
            (Part::NthInput(_), Target::Function) => true,
            (Part::NthOutput(_), Target::Function) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Part::Identity => write!(f, "*"),
            Part::Range(r) => write!(f, "{}", r),
            Part::NthElement(n) => write!(f, "#{}", n),
            Part::NthInput(n) => write!(f, "in{}", n),
            Part::NthOutput(n) => write!(f, "out{}", n),
        }
    }
}

lazy_static! {
    static ref PART: Regex =
        Regex::new(r"^(?:(\*)|I(-?\d+)(?:-(-?\d+))?|#(\d+)|in(\d+)|out(\d+))$").unwrap();
}

fn number<T: FromStr>(s: &str) -> Result<T> {
    s.parse::<T>()
        .map_err(|_| BreadcrumbError::Read(format!("not a valid index: {s}")))
}

impl FromStr for Part {
    type Err = BreadcrumbError;
    fn from_str(s: &str) -> Result<Part> {
        let caps = PART
            .captures(s.trim())
            .ok_or_else(|| BreadcrumbError::Read(format!("unknown designator part: {s}")))?;
        if caps.get(1).is_some() {
            return Ok(Part::Identity);
        }
        if let Some(start) = caps.get(2) {
            let start: i64 = number(start.as_str())?;
            let end = match caps.get(3) {
                Some(end) => number(end.as_str())?,
                None => start,
            };
            return Ok(Part::Range(Range::new(start, end)?));
        }
        if let Some(n) = caps.get(4) {
            return Ok(Part::NthElement(number(n.as_str())?));
        }
        if let Some(n) = caps.get(5) {
            return Ok(Part::NthInput(number(n.as_str())?));
        }
        match caps.get(6) {
            Some(n) => Ok(Part::NthOutput(number(n.as_str())?)),
            None => Err(BreadcrumbError::Read(format!("unknown designator part: {s}"))),
        }
    }
}

// ------------- Designator -------------
/// An ordered, immutable chain of parts, head first.
///
/// The empty chain is the identity designator. [`Part::Identity`] is a
/// no-op inside a chain and is dropped when composing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Part>", into = "Vec<Part>")]
pub struct Designator {
    parts: Arc<Vec<Part>>,
}

static IDENTITY: Part = Part::Identity;

impl Designator {
    pub fn identity() -> Self {
        Self {
            parts: Arc::new(Vec::new()),
        }
    }
    pub fn compose(parts: impl IntoIterator<Item = Part>) -> Self {
        let parts: Vec<Part> = parts
            .into_iter()
            .filter(|p| *p != Part::Identity)
            .collect();
        Self {
            parts: Arc::new(parts),
        }
    }
    /// `outer` parts followed by the whole of `inner`.
    pub fn nest(outer: impl IntoIterator<Item = Part>, inner: &Designator) -> Self {
        Self::compose(outer.into_iter().chain(inner.parts.iter().copied()))
    }
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }
    pub fn len(&self) -> usize {
        self.parts.len()
    }
    pub fn is_identity(&self) -> bool {
        self.parts.is_empty()
    }
    pub fn head(&self) -> &Part {
        self.parts.first().unwrap_or(&IDENTITY)
    }
    /// The chain without its head, or `None` when nothing remains.
    pub fn tail(&self) -> Option<Designator> {
        if self.parts.len() <= 1 {
            return None;
        }
        Some(Self::compose(self.parts[1..].iter().copied()))
    }
    /// Like [`Designator::tail`], with the identity standing in for nothing.
    pub fn rest(&self) -> Designator {
        self.tail().unwrap_or_else(Designator::identity)
    }
    pub fn applies_to(&self, target: Target<'_>) -> bool {
        self.head().applies_to(target)
    }
    /// Whether both designators share the very same chain.
    pub fn ptr_eq(a: &Designator, b: &Designator) -> bool {
        Arc::ptr_eq(&a.parts, &b.parts)
    }

    /// Range mentioned in the chain. When several are present, the one
    /// closest to the head wins.
    pub fn mentioned_range(&self) -> Option<Range> {
        let mut found = None;
        for part in self.parts.iter().rev() {
            if let Part::Range(r) = part {
                found = Some(*r);
            }
        }
        found
    }

    /// Chain with one range removed: the one closest to the tail.
    pub fn remove_range(&self) -> Designator {
        let mut kept = Vec::with_capacity(self.parts.len());
        let mut removed = false;
        for part in self.parts.iter().rev() {
            match part {
                Part::Range(_) if !removed => removed = true,
                _ => kept.push(*part),
            }
        }
        kept.reverse();
        Self::compose(kept)
    }

    /// Chain with the range closest to the head replaced by `to`. Returns
    /// `self` untouched (same chain) when no range is present.
    pub fn replace_range_by(&self, to: Part) -> Designator {
        let Some(pos) = self.parts.iter().position(|p| matches!(p, Part::Range(_))) else {
            return self.clone();
        };
        let mut parts = self.parts.as_ref().clone();
        parts[pos] = to;
        Self::compose(parts)
    }
}

impl Default for Designator {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Vec<Part>> for Designator {
    fn from(parts: Vec<Part>) -> Self {
        Self::compose(parts)
    }
}
impl From<Designator> for Vec<Part> {
    fn from(d: Designator) -> Self {
        d.parts.as_ref().clone()
    }
}
impl From<Part> for Designator {
    fn from(part: Part) -> Self {
        Self::compose([part])
    }
}

impl fmt::Display for Designator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.parts.is_empty() {
            return write!(f, "*");
        }
        let mut s = String::new();
        for part in self.parts.iter() {
            s += &(part.to_string() + "/");
        }
        s.pop();
        write!(f, "{}", s)
    }
}

impl FromStr for Designator {
    type Err = BreadcrumbError;
    fn from_str(s: &str) -> Result<Designator> {
        let parts = s
            .split('/')
            .map(Part::from_str)
            .collect::<Result<Vec<Part>>>()?;
        Ok(Self::compose(parts))
    }
}
