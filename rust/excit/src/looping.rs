//! Bounded replay combinator.

use excit_common::{Error, Result, verify_arg};

use crate::{
    Excit, Kind,
    ops::{IndexIterator, Step, checked_size_mul},
};

/// Replays the whole of `source` `count` times.
#[derive(Debug, Clone)]
pub struct Loop {
    source: Box<Excit>,
    count: u64,
    /// Passes over the source completed so far.
    completed: u64,
}

impl Loop {
    pub fn new(source: Excit, count: u64) -> Result<Loop> {
        verify_arg!(count, count != 0);
        Ok(Loop {
            source: Box::new(source),
            count,
            completed: 0,
        })
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

impl IndexIterator for Loop {
    fn kind(&self) -> Kind {
        Kind::Loop
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
        // The last pass runs the source to depletion.
        if self.completed + 1 >= self.count {
            return self.source.next(out);
        }
        match self.source.cyclic_next(out)? {
            Some(looped) => {
                if looped {
                    self.completed += 1;
                }
                Ok(Step::Yielded)
            }
            None => Ok(Step::Depleted),
        }
    }

    fn rewind(&mut self) -> Result<()> {
        self.completed = 0;
        self.source.rewind()
    }

    fn size(&self) -> Result<u64> {
        checked_size_mul(self.source.size()?, self.count)
    }

    fn unrank(&self, n: u64, out: &mut [i64]) -> Result<()> {
        let source_size = self.source.size()?;
        let size = checked_size_mul(source_size, self.count)?;
        if n >= size {
            return Err(Error::out_of_domain(
                "n",
                format!("{n} >= loop size {size}"),
            ));
        }
        self.source.unrank(n % source_size, out)
    }

    fn pos(&self) -> Result<Option<u64>> {
        let Some(inner) = self.source.pos()? else {
            return Ok(None);
        };
        let source_size = self.source.size()?;
        Ok(Some(checked_size_mul(self.completed, source_size)? + inner))
    }
}
