//! Stutter combinator.

use excit_common::{Error, Result, verify_arg};

use crate::{
    Excit, Kind,
    ops::{IndexIterator, Step, checked_size_mul},
};

/// Emits every element of `source` `count` times in a row.
#[derive(Debug, Clone)]
pub struct Repeat {
    source: Box<Excit>,
    count: u64,
    /// Copies of the current source element emitted so far.
    emitted: u64,
}

impl Repeat {
    pub fn new(source: Excit, count: u64) -> Result<Repeat> {
        verify_arg!(count, count != 0);
        Ok(Repeat {
            source: Box::new(source),
            count,
            emitted: 0,
        })
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

impl IndexIterator for Repeat {
    fn kind(&self) -> Kind {
        Kind::Repeat
    }

    fn dimension(&self) -> usize {
        self.source.dimension()
    }

    fn duplicate(&self) -> Box<dyn IndexIterator> {
        Box::new(self.clone())
    }

    fn peek(&self, out: &mut [i64]) -> Result<Step> {
        self.source.peek(out)
    }

    fn next(&mut self, out: &mut [i64]) -> Result<Step> {
        if self.emitted + 1 < self.count {
            let step = self.source.peek(out)?;
            if step.is_yielded() {
                self.emitted += 1;
            }
            return Ok(step);
        }
        self.emitted = 0;
        self.source.next(out)
    }

    fn rewind(&mut self) -> Result<()> {
        self.emitted = 0;
        self.source.rewind()
    }

    fn size(&self) -> Result<u64> {
        checked_size_mul(self.source.size()?, self.count)
    }

    fn unrank(&self, n: u64, out: &mut [i64]) -> Result<()> {
        let size = self.size()?;
        if n >= size {
            return Err(Error::out_of_domain(
                "n",
                format!("{n} >= repeat size {size}"),
            ));
        }
        self.source.unrank(n / self.count, out)
    }

    fn pos(&self) -> Result<Option<u64>> {
        let Some(inner) = self.source.pos()? else {
            return Ok(None);
        };
        Ok(Some(checked_size_mul(inner, self.count)? + self.emitted))
    }

    fn split(&self, n: usize) -> Result<Vec<Excit>> {
        self.source
            .split(n)?
            .into_iter()
            .map(|piece| Repeat::new(piece, self.count).map(Excit::Repeat))
            .collect()
    }
}
