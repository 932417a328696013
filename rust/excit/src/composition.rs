//! Composition (slice) combinator.

use excit_common::{Error, Result, verify_arg};

use crate::{
    Excit, Kind,
    ops::{IndexIterator, Step, to_coord, to_rank},
};

/// Enumerates `source` at the ranks produced by a one-dimensional `indexer`.
///
/// The cursor is the indexer's; the source is only ever accessed by rank.
#[derive(Debug, Clone)]
pub struct Composition {
    source: Box<Excit>,
    indexer: Box<Excit>,
}

impl Composition {
    pub fn new(source: Excit, indexer: Excit) -> Result<Composition> {
        verify_arg!(indexer, indexer.dimension() == 1);
        let indexer_size = indexer.size()?;
        let source_size = source.size()?;
        if indexer_size > source_size {
            return Err(Error::out_of_domain(
                "indexer",
                format!("indexer size {indexer_size} exceeds source size {source_size}"),
            ));
        }
        Ok(Composition {
            source: Box::new(source),
            indexer: Box::new(indexer),
        })
    }

    pub fn source(&self) -> &Excit {
        &self.source
    }

    pub fn indexer(&self) -> &Excit {
        &self.indexer
    }
}

impl IndexIterator for Composition {
    fn kind(&self) -> Kind {
        Kind::Composition
    }

    fn dimension(&self) -> usize {
        self.source.dimension()
    }

    fn duplicate(&self) -> Box<dyn IndexIterator> {
        Box::new(self.clone())
    }

    fn peek(&self, out: &mut [i64]) -> Result<Step> {
        let mut rank = [0];
        if self.indexer.peek(&mut rank)?.is_depleted() {
            return Ok(Step::Depleted);
        }
        self.source.unrank(to_rank(rank[0])?, out)?;
        Ok(Step::Yielded)
    }

    fn next(&mut self, out: &mut [i64]) -> Result<Step> {
        let mut rank = [0];
        if self.indexer.next(&mut rank)?.is_depleted() {
            return Ok(Step::Depleted);
        }
        self.source.unrank(to_rank(rank[0])?, out)?;
        Ok(Step::Yielded)
    }

    fn rewind(&mut self) -> Result<()> {
        self.indexer.rewind()
    }

    fn size(&self) -> Result<u64> {
        self.indexer.size()
    }

    fn unrank(&self, n: u64, out: &mut [i64]) -> Result<()> {
        let mut rank = [0];
        self.indexer.unrank(n, &mut rank)?;
        self.source.unrank(to_rank(rank[0])?, out)
    }

    fn rank(&self, coords: &[i64]) -> Result<u64> {
        let inner = self.source.rank(coords)?;
        self.indexer.rank(&[to_coord(inner)?])
    }

    fn pos(&self) -> Result<Option<u64>> {
        self.indexer.pos()
    }

    fn split(&self, n: usize) -> Result<Vec<Excit>> {
        Ok(self
            .indexer
            .split(n)?
            .into_iter()
            .map(|indexer| {
                Excit::Composition(Composition {
                    source: self.source.clone(),
                    indexer: Box::new(indexer),
                })
            })
            .collect())
    }
}
