//! Arithmetic progression leaf iterator.

use excit_common::{Error, Result, verify_arg, verify_domain};

use crate::{
    Excit, Kind,
    ops::{IndexIterator, Step},
};

/// Iterates `first, first + step, …` up to and including `last` (when reachable).
///
/// `step` may be negative, in which case `last` must not exceed `first` for the
/// range to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    first: i64,
    last: i64,
    step: i64,
    size: u64,
    /// Number of elements already emitted.
    cursor: u64,
}

impl Range {
    pub fn new(first: i64, last: i64, step: i64) -> Result<Range> {
        verify_arg!(step, step != 0);
        Ok(Range {
            first,
            last,
            step,
            size: Self::closed_form_size(first, last, step)?,
            cursor: 0,
        })
    }

    /// The zero state: `0..=-1` by `1`, holding no element.
    pub fn empty() -> Range {
        Range {
            first: 0,
            last: -1,
            step: 1,
            size: 0,
            cursor: 0,
        }
    }

    fn closed_form_size(first: i64, last: i64, step: i64) -> Result<u64> {
        let span = last as i128 - first as i128;
        let step = step as i128;
        if span != 0 && (span < 0) != (step < 0) {
            return Ok(0);
        }
        u64::try_from(span / step + 1).map_err(|_| {
            Error::out_of_domain(
                "range",
                format!("{first}..={last} holds more than u64::MAX elements"),
            )
        })
    }

    pub fn first(&self) -> i64 {
        self.first
    }

    pub fn last(&self) -> i64 {
        self.last
    }

    pub fn step(&self) -> i64 {
        self.step
    }

    pub fn len(&self) -> u64 {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Value of the element of rank `n`; the caller guarantees `n < size`.
    fn value_at(&self, n: u64) -> i64 {
        (self.first as i128 + n as i128 * self.step as i128) as i64
    }

    /// Splits the progression into `n` contiguous blocks.
    ///
    /// Blocks are built from the back: block `i` takes `ceil(remaining / (i + 1))`
    /// elements, so later blocks receive the remainder and every block is
    /// non-empty when `n <= size`.
    pub fn split_blocks(&self, n: usize) -> Result<Vec<Range>> {
        verify_domain!(n, n != 0);
        let parts = n as u64;
        if self.size < parts {
            return Err(Error::out_of_domain(
                "n",
                format!("cannot split {} elements into {n} parts", self.size),
            ));
        }
        let mut blocks = Vec::with_capacity(n);
        let mut remaining = self.size;
        let mut block_last = self.size;
        for i in (0..parts).rev() {
            let len = remaining.div_ceil(i + 1);
            let block_first = block_last - len;
            blocks.push(Range::new(
                self.value_at(block_first),
                self.value_at(block_last - 1),
                self.step,
            )?);
            block_last = block_first;
            remaining -= len;
        }
        blocks.reverse();
        Ok(blocks)
    }
}

impl IndexIterator for Range {
    fn kind(&self) -> Kind {
        Kind::Range
    }

    fn dimension(&self) -> usize {
        1
    }

    fn duplicate(&self) -> Box<dyn IndexIterator> {
        Box::new(self.clone())
    }

    fn peek(&self, out: &mut [i64]) -> Result<Step> {
        if self.cursor >= self.size {
            return Ok(Step::Depleted);
        }
        out[0] = self.value_at(self.cursor);
        Ok(Step::Yielded)
    }

    fn next(&mut self, out: &mut [i64]) -> Result<Step> {
        let step = self.peek(out)?;
        if step.is_yielded() {
            self.cursor += 1;
        }
        Ok(step)
    }

    fn rewind(&mut self) -> Result<()> {
        self.cursor = 0;
        Ok(())
    }

    fn size(&self) -> Result<u64> {
        Ok(self.size)
    }

    fn unrank(&self, n: u64, out: &mut [i64]) -> Result<()> {
        if n >= self.size {
            return Err(Error::out_of_domain(
                "n",
                format!("{n} >= range size {}", self.size),
            ));
        }
        out[0] = self.value_at(n);
        Ok(())
    }

    fn rank(&self, coords: &[i64]) -> Result<u64> {
        let value = coords[0];
        let offset = value as i128 - self.first as i128;
        let step = self.step as i128;
        let pos = offset / step;
        if offset % step != 0 || pos < 0 || pos >= self.size as i128 {
            return Err(Error::out_of_domain(
                "value",
                format!(
                    "{value} is not in range {}..={} by {}",
                    self.first, self.last, self.step
                ),
            ));
        }
        Ok(pos as u64)
    }

    fn pos(&self) -> Result<Option<u64>> {
        Ok((self.cursor < self.size).then_some(self.cursor))
    }

    fn split(&self, n: usize) -> Result<Vec<Excit>> {
        Ok(self
            .split_blocks(n)?
            .into_iter()
            .map(Excit::Range)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_form_size() {
        assert_eq!(Range::new(0, 3, 1).unwrap().len(), 4);
        assert_eq!(Range::new(0, 10, 3).unwrap().len(), 4);
        assert_eq!(Range::new(3, 0, -1).unwrap().len(), 4);
        assert_eq!(Range::new(0, 3, -1).unwrap().len(), 0);
        assert_eq!(Range::new(3, 0, 1).unwrap().len(), 0);
        assert_eq!(Range::new(5, 5, -7).unwrap().len(), 1);
        assert_eq!(Range::new(i64::MIN, i64::MAX, i64::MAX).unwrap().len(), 3);
        assert!(Range::empty().is_empty());
        assert!(
            Range::new(i64::MIN, i64::MAX, 1)
                .unwrap_err()
                .is_out_of_domain()
        );
    }

    #[test]
    fn test_zero_step() {
        let err = Range::new(0, 3, 0).unwrap_err();
        assert!(err.is_invalid_arg());
    }

    #[test]
    fn test_split_blocks_remainder_goes_last() {
        let range = Range::new(0, 9, 1).unwrap();
        let blocks = range.split_blocks(3).unwrap();
        let lens = blocks.iter().map(Range::len).collect::<Vec<_>>();
        assert_eq!(lens, vec![3, 3, 4]);
        assert_eq!((blocks[0].first(), blocks[0].last()), (0, 2));
        assert_eq!((blocks[1].first(), blocks[1].last()), (3, 5));
        assert_eq!((blocks[2].first(), blocks[2].last()), (6, 9));
    }

    #[test]
    fn test_split_blocks_unreachable_last() {
        // Elements are 0, 3, 6, 9; the bound 10 is never produced.
        let range = Range::new(0, 10, 3).unwrap();
        let blocks = range.split_blocks(2).unwrap();
        assert_eq!((blocks[0].first(), blocks[0].last()), (0, 3));
        assert_eq!((blocks[1].first(), blocks[1].last()), (6, 9));
    }

    #[test]
    fn test_split_blocks_too_many() {
        let range = Range::new(0, 2, 1).unwrap();
        assert!(range.split_blocks(4).unwrap_err().is_out_of_domain());
        assert!(range.split_blocks(0).unwrap_err().is_out_of_domain());
        assert_eq!(range.split_blocks(3).unwrap().len(), 3);
    }
}
