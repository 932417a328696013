//! The `Excit` handle: a closed set of built-in iterator kinds plus an open
//! extension arm, and the generic algorithms built on the operation table.

use excit_common::{Error, Result, try_or_ret_some_err, verify_domain};

use crate::{
    Kind,
    composition::Composition,
    cons::Cons,
    hilbert2d::Hilbert2d,
    index::Index,
    looping::Loop,
    ops::{Coords, IndexIterator, Step, coords, to_coord},
    product::Product,
    range::Range,
    repeat::Repeat,
    tleaf::{Tleaf, TraversalPolicy},
};

/// Owning handle to an index iterator.
///
/// Combinators own their inner iterators exclusively: dropping a handle drops
/// the whole graph below it, and [`Clone`] deep-copies that graph including
/// every cursor.
#[derive(Debug)]
pub enum Excit {
    Range(Range),
    Index(Index),
    Hilbert2d(Hilbert2d),
    Product(Product),
    Composition(Composition),
    Cons(Cons),
    Repeat(Repeat),
    Loop(Loop),
    Tleaf(Tleaf),
    User(Box<dyn IndexIterator>),
}

impl Clone for Excit {
    fn clone(&self) -> Self {
        match self {
            Excit::Range(it) => Excit::Range(it.clone()),
            Excit::Index(it) => Excit::Index(it.clone()),
            Excit::Hilbert2d(it) => Excit::Hilbert2d(it.clone()),
            Excit::Product(it) => Excit::Product(it.clone()),
            Excit::Composition(it) => Excit::Composition(it.clone()),
            Excit::Cons(it) => Excit::Cons(it.clone()),
            Excit::Repeat(it) => Excit::Repeat(it.clone()),
            Excit::Loop(it) => Excit::Loop(it.clone()),
            Excit::Tleaf(it) => Excit::Tleaf(it.clone()),
            Excit::User(it) => Excit::User(it.duplicate()),
        }
    }
}

/// Construction.
impl Excit {
    /// Creates the zero state of `kind`.
    ///
    /// Only kinds that are meaningful without children or parameters have one:
    /// an empty [`Range`], an empty [`Index`], a [`Product`] without children
    /// and a depth-0 [`Tleaf`].
    pub fn create(kind: Kind) -> Result<Excit> {
        match kind {
            Kind::Range => Ok(Excit::Range(Range::empty())),
            Kind::Index => Ok(Excit::Index(Index::empty())),
            Kind::Product => Ok(Excit::Product(Product::new())),
            Kind::Tleaf => Ok(Excit::Tleaf(Tleaf::empty())),
            other => Err(Error::invalid_arg(
                "kind",
                format!("{other} iterators must be built with their constructor"),
            )),
        }
    }

    pub fn range(first: i64, last: i64, step: i64) -> Result<Excit> {
        Range::new(first, last, step).map(Excit::Range)
    }

    pub fn index(values: &[i64]) -> Result<Excit> {
        Index::new(values).map(Excit::Index)
    }

    pub fn hilbert2d(order: u32) -> Result<Excit> {
        Hilbert2d::new(order).map(Excit::Hilbert2d)
    }

    /// An empty product; children are appended with [`Excit::product_add`].
    pub fn product() -> Excit {
        Excit::Product(Product::new())
    }

    pub fn composition(source: Excit, indexer: Excit) -> Result<Excit> {
        Composition::new(source, indexer).map(Excit::Composition)
    }

    /// Restricts `source` to the ranks produced by `indexer`.
    pub fn slice(source: Excit, indexer: Excit) -> Result<Excit> {
        Excit::composition(source, indexer)
    }

    pub fn cons(source: Excit, window: usize) -> Result<Excit> {
        Cons::new(source, window).map(Excit::Cons)
    }

    pub fn repeat(source: Excit, count: u64) -> Result<Excit> {
        Repeat::new(source, count).map(Excit::Repeat)
    }

    pub fn loop_over(source: Excit, count: u64) -> Result<Excit> {
        Loop::new(source, count).map(Excit::Loop)
    }

    pub fn tleaf(
        depth: usize,
        arities: &[u64],
        level_indexers: Option<Vec<Excit>>,
        policy: TraversalPolicy,
    ) -> Result<Excit> {
        Tleaf::new(depth, arities, level_indexers, policy).map(Excit::Tleaf)
    }

    /// Wraps a user-defined iterator.
    pub fn user(it: impl IndexIterator + 'static) -> Excit {
        Excit::User(Box::new(it))
    }

    /// Deep, cursor-preserving copy. Same as [`Clone::clone`].
    pub fn duplicate(&self) -> Excit {
        self.clone()
    }
}

/// Operation dispatch.
impl Excit {
    fn ops(&self) -> &dyn IndexIterator {
        match self {
            Excit::Range(it) => it,
            Excit::Index(it) => it,
            Excit::Hilbert2d(it) => it,
            Excit::Product(it) => it,
            Excit::Composition(it) => it,
            Excit::Cons(it) => it,
            Excit::Repeat(it) => it,
            Excit::Loop(it) => it,
            Excit::Tleaf(it) => it,
            Excit::User(it) => it.as_ref(),
        }
    }

    fn ops_mut(&mut self) -> &mut dyn IndexIterator {
        match self {
            Excit::Range(it) => it,
            Excit::Index(it) => it,
            Excit::Hilbert2d(it) => it,
            Excit::Product(it) => it,
            Excit::Composition(it) => it,
            Excit::Cons(it) => it,
            Excit::Repeat(it) => it,
            Excit::Loop(it) => it,
            Excit::Tleaf(it) => it,
            Excit::User(it) => it.as_mut(),
        }
    }

    fn check_buffer(&self, len: usize) -> Result<()> {
        let dimension = self.dimension();
        if len != dimension {
            return Err(Error::invalid_arg(
                "coords",
                format!(
                    "buffer holds {len} values, {} iterator has dimension {dimension}",
                    self.kind()
                ),
            ));
        }
        Ok(())
    }

    pub fn kind(&self) -> Kind {
        self.ops().kind()
    }

    pub fn dimension(&self) -> usize {
        self.ops().dimension()
    }

    /// Writes the element under the cursor without moving it.
    pub fn peek(&self, out: &mut [i64]) -> Result<Step> {
        self.check_buffer(out.len())?;
        self.ops().peek(out)
    }

    /// Writes the element under the cursor and advances past it.
    pub fn next(&mut self, out: &mut [i64]) -> Result<Step> {
        self.check_buffer(out.len())?;
        self.ops_mut().next(out)
    }

    pub fn rewind(&mut self) -> Result<()> {
        self.ops_mut().rewind()
    }

    pub fn size(&self) -> Result<u64> {
        self.ops().size()
    }

    pub fn unrank(&self, n: u64, out: &mut [i64]) -> Result<()> {
        self.check_buffer(out.len())?;
        self.ops().unrank(n, out)
    }

    pub fn rank(&self, coords: &[i64]) -> Result<u64> {
        self.check_buffer(coords.len())?;
        self.ops().rank(coords)
    }

    /// Rank of the element under the cursor, `None` once depleted.
    pub fn pos(&self) -> Result<Option<u64>> {
        self.ops().pos()
    }

    /// Partitions the iteration space into `n` independent iterators whose
    /// concatenated outputs reproduce this iterator's sequence.
    ///
    /// Kinds without a specialized splitter fall back to
    /// [`split_contiguous`](Excit::split_contiguous).
    pub fn split(&self, n: usize) -> Result<Vec<Excit>> {
        verify_domain!(n, n != 0);
        match self.ops().split(n) {
            Err(e) if e.is_not_supported() => {
                log::debug!(
                    "{} has no specialized splitter, splitting by rank",
                    self.kind()
                );
                self.split_contiguous(n)
            }
            res => {
                log::trace!("split {} into {n} pieces", self.kind());
                res
            }
        }
    }

    /// Generic splitter: cuts `0..size` into `n` contiguous blocks and
    /// composes a copy of this iterator with each block.
    pub fn split_contiguous(&self, n: usize) -> Result<Vec<Excit>> {
        verify_domain!(n, n != 0);
        let size = self.size()?;
        let ranks = Range::new(0, to_coord(size)? - 1, 1)?;
        ranks
            .split_blocks(n)?
            .into_iter()
            .map(|block| Excit::composition(self.clone(), Excit::Range(block)))
            .collect()
    }

    /// Advances, wrapping around at the end.
    ///
    /// Returns `Some(looped)` where `looped` tells whether the iterator was
    /// rewound: either because it was depleted before this call, or because the
    /// element just written was its last one. Returns `None` when the iteration
    /// space is empty.
    ///
    /// Kinds without `peek` only notice the end on the following call, which
    /// then rewinds and reports `looped`.
    pub fn cyclic_next(&mut self, out: &mut [i64]) -> Result<Option<bool>> {
        self.check_buffer(out.len())?;
        let mut looped = false;
        if self.ops_mut().next(out)?.is_depleted() {
            self.rewind()?;
            looped = true;
            if self.ops_mut().next(out)?.is_depleted() {
                return Ok(None);
            }
        }
        let mut scratch = coords(self.dimension());
        match self.ops().peek(&mut scratch) {
            Ok(Step::Depleted) => {
                self.rewind()?;
                looped = true;
            }
            Ok(Step::Yielded) => {}
            Err(e) if e.is_not_supported() => {}
            Err(e) => return Err(e),
        }
        Ok(Some(looped))
    }

    /// Advances without reporting the element.
    pub fn skip(&mut self) -> Result<Step> {
        let mut scratch = coords(self.dimension());
        self.ops_mut().next(&mut scratch)
    }

    /// Std iterator over the remaining elements.
    pub fn coordinates(&mut self) -> Coordinates<'_> {
        Coordinates { excit: self }
    }
}

/// Kind-specific operations.
impl Excit {
    fn as_product(&self) -> Result<&Product> {
        match self {
            Excit::Product(it) => Ok(it),
            other => Err(Error::invalid_arg(
                "self",
                format!("expected a product, found {}", other.kind()),
            )),
        }
    }

    fn as_product_mut(&mut self) -> Result<&mut Product> {
        match self {
            Excit::Product(it) => Ok(it),
            other => Err(Error::invalid_arg(
                "self",
                format!("expected a product, found {}", other.kind()),
            )),
        }
    }

    /// Appends `child` as the new fastest-varying factor, taking ownership.
    pub fn product_add(&mut self, child: Excit) -> Result<()> {
        self.as_product_mut()?.add(child)
    }

    /// Appends a duplicate of `child`.
    pub fn product_add_copy(&mut self, child: &Excit) -> Result<()> {
        self.as_product_mut()?.add_copy(child)
    }

    pub fn product_count(&self) -> Result<usize> {
        Ok(self.as_product()?.count())
    }

    pub fn product_split_dim(&self, dim: usize, n: usize) -> Result<Vec<Excit>> {
        Ok(self
            .as_product()?
            .split_dim(dim, n)?
            .into_iter()
            .map(Excit::Product)
            .collect())
    }

    pub fn tleaf_split_at_level(&self, level: usize, n: usize) -> Result<Vec<Excit>> {
        match self {
            Excit::Tleaf(it) => Ok(it
                .split_at_level(level, n)?
                .into_iter()
                .map(Excit::Tleaf)
                .collect()),
            other => Err(Error::invalid_arg(
                "self",
                format!("expected a tleaf, found {}", other.kind()),
            )),
        }
    }
}

/// Iterator over the coordinates an [`Excit`] still has to produce.
///
/// Created by [`Excit::coordinates`].
pub struct Coordinates<'a> {
    excit: &'a mut Excit,
}

impl Iterator for Coordinates<'_> {
    type Item = Result<Coords>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = coords(self.excit.dimension());
        match try_or_ret_some_err!(self.excit.next(&mut buf)) {
            Step::Yielded => Some(Ok(buf)),
            Step::Depleted => None,
        }
    }
}
