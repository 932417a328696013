//! The capability table shared by every iterator kind.
//!
//! [`IndexIterator`] lists every operation an iterator may support. Each method
//! has a default body reporting `NotSupported`, so an implementation only
//! provides the operations its algorithm allows. Built-in kinds implement the
//! same trait as user-defined ones, which is what lets a user kind participate
//! in every combinator identically.

use std::fmt;

use excit_common::{Error, Result};
use tinyvec::TinyVec;

use crate::{Excit, Kind};

/// Coordinate buffer with inline storage for the common low-dimension case.
pub type Coords = TinyVec<[i64; 8]>;

/// Creates a zero-filled coordinate buffer of the given dimension.
pub fn coords(dimension: usize) -> Coords {
    let mut buf = Coords::new();
    buf.resize(dimension, 0);
    buf
}

/// Outcome of a cursor-reading or cursor-moving operation.
///
/// Reaching the end of an iteration space is not an error: `next` and `peek`
/// report it as [`Step::Depleted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Step {
    /// An element was written to the output buffer.
    Yielded,
    /// The iteration space is exhausted; the output buffer is unspecified.
    Depleted,
}

impl Step {
    pub fn is_yielded(self) -> bool {
        self == Step::Yielded
    }

    pub fn is_depleted(self) -> bool {
        self == Step::Depleted
    }
}

/// Operation table of an index iterator.
///
/// Buffers handed to `peek`, `next` and `unrank`, and slices handed to `rank`,
/// always hold exactly [`dimension`](IndexIterator::dimension) values: the
/// [`Excit`] handle checks this before dispatching.
pub trait IndexIterator: fmt::Debug + Send + Sync {
    fn kind(&self) -> Kind {
        Kind::User
    }

    /// Number of coordinates produced per element.
    fn dimension(&self) -> usize;

    /// Deep copy, including the cursor.
    fn duplicate(&self) -> Box<dyn IndexIterator>;

    fn peek(&self, _out: &mut [i64]) -> Result<Step> {
        Err(Error::not_supported(self.kind().name(), "peek"))
    }

    fn next(&mut self, _out: &mut [i64]) -> Result<Step> {
        Err(Error::not_supported(self.kind().name(), "next"))
    }

    fn rewind(&mut self) -> Result<()> {
        Err(Error::not_supported(self.kind().name(), "rewind"))
    }

    /// Cardinality of the iteration space.
    fn size(&self) -> Result<u64> {
        Err(Error::not_supported(self.kind().name(), "size"))
    }

    /// Writes the coordinates of the element of rank `n`.
    fn unrank(&self, _n: u64, _out: &mut [i64]) -> Result<()> {
        Err(Error::not_supported(self.kind().name(), "unrank"))
    }

    /// Rank of the element with the given coordinates.
    fn rank(&self, _coords: &[i64]) -> Result<u64> {
        Err(Error::not_supported(self.kind().name(), "rank"))
    }

    /// Rank of the element under the cursor, `None` once depleted.
    fn pos(&self) -> Result<Option<u64>> {
        Err(Error::not_supported(self.kind().name(), "pos"))
    }

    /// Specialized splitter. Kinds without one keep this default and the
    /// handle falls back to the generic contiguous splitter.
    fn split(&self, _n: usize) -> Result<Vec<Excit>> {
        Err(Error::not_supported(self.kind().name(), "split"))
    }
}

/// Converts a coordinate produced by an indexer into a rank.
pub(crate) fn to_rank(value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| Error::out_of_domain("rank", format!("{value} < 0")))
}

/// Converts a rank into a coordinate value.
pub(crate) fn to_coord(rank: u64) -> Result<i64> {
    i64::try_from(rank)
        .map_err(|_| Error::out_of_domain("rank", format!("{rank} exceeds the coordinate range")))
}

pub(crate) fn checked_size_mul(a: u64, b: u64) -> Result<u64> {
    a.checked_mul(b)
        .ok_or_else(|| Error::out_of_domain("size", format!("{a} * {b} overflows")))
}
