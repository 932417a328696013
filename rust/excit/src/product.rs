//! Cartesian product combinator.

use excit_common::{Error, Result, verify_domain};

use crate::{
    Excit, Kind,
    ops::{IndexIterator, Step, checked_size_mul},
};

/// Cartesian product of its children, enumerated like an odometer: child 0
/// varies slowest and the last child fastest.
///
/// Coordinates are the concatenation of the children's coordinates.
#[derive(Debug, Clone, Default)]
pub struct Product {
    children: Vec<Excit>,
    dimension: usize,
}

impl Product {
    pub fn new() -> Product {
        Product::default()
    }

    /// Appends `child` as the new fastest-varying factor.
    pub fn add(&mut self, child: Excit) -> Result<()> {
        self.children.try_reserve(1)?;
        self.dimension += child.dimension();
        self.children.push(child);
        Ok(())
    }

    pub fn add_copy(&mut self, child: &Excit) -> Result<()> {
        self.add(child.clone())
    }

    pub fn count(&self) -> usize {
        self.children.len()
    }

    pub fn children(&self) -> &[Excit] {
        &self.children
    }

    /// Splits child `dim` into `n` pieces and returns `n` products that differ
    /// only in that child.
    ///
    /// Every piece starts rewound, so each product enumerates its whole
    /// sub-space.
    pub fn split_dim(&self, dim: usize, n: usize) -> Result<Vec<Product>> {
        verify_domain!(dim, dim < self.count());
        let pieces = self.children[dim].split(n)?;
        let mut products = Vec::with_capacity(pieces.len());
        for piece in pieces {
            let mut product = self.clone();
            product.children[dim] = piece;
            product.rewind()?;
            products.push(product);
        }
        Ok(products)
    }

    /// Splits `coords` into one slice per child.
    fn child_slices<'a>(&self, coords: &'a [i64]) -> Vec<&'a [i64]> {
        let mut offset = 0;
        self.children
            .iter()
            .map(|child| {
                let slice = &coords[offset..offset + child.dimension()];
                offset += child.dimension();
                slice
            })
            .collect()
    }

    /// Odometer step.
    ///
    /// Walks from the fastest child to the slowest. While the carry holds, the
    /// child is advanced cyclically and passes the carry on when it wraps;
    /// once the carry is absorbed the remaining children are only peeked.
    fn advance(&mut self, out: &mut [i64]) -> Result<Step> {
        if self.children.is_empty() {
            return Ok(Step::Depleted);
        }
        let mut carry = true;
        let mut end = self.dimension;
        for child in self.children[1..].iter_mut().rev() {
            let begin = end - child.dimension();
            let slot = &mut out[begin..end];
            if carry {
                match child.cyclic_next(slot)? {
                    Some(looped) => carry = looped,
                    None => return Ok(Step::Depleted),
                }
            } else if child.peek(slot)?.is_depleted() {
                return Ok(Step::Depleted);
            }
            end = begin;
        }
        let slowest = &mut self.children[0];
        if carry {
            slowest.next(&mut out[..end])
        } else {
            slowest.peek(&mut out[..end])
        }
    }
}

impl IndexIterator for Product {
    fn kind(&self) -> Kind {
        Kind::Product
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn duplicate(&self) -> Box<dyn IndexIterator> {
        Box::new(self.clone())
    }

    fn peek(&self, out: &mut [i64]) -> Result<Step> {
        if self.children.is_empty() {
            return Ok(Step::Depleted);
        }
        let mut end = self.dimension;
        for child in self.children.iter().rev() {
            let begin = end - child.dimension();
            if child.peek(&mut out[begin..end])?.is_depleted() {
                return Ok(Step::Depleted);
            }
            end = begin;
        }
        Ok(Step::Yielded)
    }

    fn next(&mut self, out: &mut [i64]) -> Result<Step> {
        self.advance(out)
    }

    fn rewind(&mut self) -> Result<()> {
        self.children.iter_mut().try_for_each(Excit::rewind)
    }

    fn size(&self) -> Result<u64> {
        if self.children.is_empty() {
            return Ok(0);
        }
        self.children
            .iter()
            .try_fold(1u64, |acc, child| checked_size_mul(acc, child.size()?))
    }

    fn unrank(&self, n: u64, out: &mut [i64]) -> Result<()> {
        let size = self.size()?;
        if n >= size {
            return Err(Error::out_of_domain(
                "n",
                format!("{n} >= product size {size}"),
            ));
        }
        let mut rest = n;
        let mut end = self.dimension;
        for child in self.children.iter().rev() {
            let child_size = child.size()?;
            let begin = end - child.dimension();
            child.unrank(rest % child_size, &mut out[begin..end])?;
            rest /= child_size;
            end = begin;
        }
        Ok(())
    }

    fn rank(&self, coords: &[i64]) -> Result<u64> {
        if self.children.is_empty() {
            return Err(Error::invalid_arg("self", "rank of an empty product"));
        }
        let mut rank = 0u64;
        for (child, slice) in self.children.iter().zip(self.child_slices(coords)) {
            let inner = child.rank(slice)?;
            rank = checked_size_mul(rank, child.size()?)? + inner;
        }
        Ok(rank)
    }

    fn pos(&self) -> Result<Option<u64>> {
        if self.children.is_empty() {
            return Ok(None);
        }
        let mut pos = 0u64;
        for child in &self.children {
            let Some(inner) = child.pos()? else {
                return Ok(None);
            };
            pos = checked_size_mul(pos, child.size()?)? + inner;
        }
        Ok(Some(pos))
    }
}
