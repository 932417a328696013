//! Explicit value-table leaf iterator.

use std::sync::Arc;

use excit_common::{Error, Result};

use crate::{
    Kind,
    ops::{IndexIterator, Step},
};

/// Enumerates a caller-supplied sequence of values in input order.
///
/// The tables are immutable once built and shared between duplicates; only
/// the cursor is per-instance.
#[derive(Debug, Clone)]
pub struct Index {
    values: Arc<[i64]>,
    /// `(value, input position)` pairs, stably sorted by value.
    sorted: Arc<[(i64, u64)]>,
    /// Whether every value is distinct, i.e. `rank` is well defined.
    invertible: bool,
    cursor: u64,
}

impl Index {
    pub fn new(values: &[i64]) -> Result<Index> {
        let mut owned = Vec::new();
        owned.try_reserve_exact(values.len())?;
        owned.extend_from_slice(values);

        let mut sorted = Vec::new();
        sorted.try_reserve_exact(values.len())?;
        sorted.extend(values.iter().enumerate().map(|(i, &v)| (v, i as u64)));
        sorted.sort_by_key(|&(v, _)| v);

        let invertible = sorted.windows(2).all(|w| w[0].0 != w[1].0);
        Ok(Index {
            values: owned.into(),
            sorted: sorted.into(),
            invertible,
            cursor: 0,
        })
    }

    /// The zero state: an empty table.
    pub fn empty() -> Index {
        Index {
            values: Arc::from([]),
            sorted: Arc::from([]),
            invertible: true,
            cursor: 0,
        }
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn is_invertible(&self) -> bool {
        self.invertible
    }

    fn len(&self) -> u64 {
        self.values.len() as u64
    }
}

impl IndexIterator for Index {
    fn kind(&self) -> Kind {
        Kind::Index
    }

    fn dimension(&self) -> usize {
        1
    }

    fn duplicate(&self) -> Box<dyn IndexIterator> {
        Box::new(self.clone())
    }

    fn peek(&self, out: &mut [i64]) -> Result<Step> {
        match self.values.get(self.cursor as usize) {
            Some(&value) => {
                out[0] = value;
                Ok(Step::Yielded)
            }
            None => Ok(Step::Depleted),
        }
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
        Ok(self.len())
    }

    fn unrank(&self, n: u64, out: &mut [i64]) -> Result<()> {
        let value = usize::try_from(n)
            .ok()
            .and_then(|i| self.values.get(i))
            .ok_or_else(|| {
                Error::out_of_domain("n", format!("{n} >= index size {}", self.len()))
            })?;
        out[0] = *value;
        Ok(())
    }

    fn rank(&self, coords: &[i64]) -> Result<u64> {
        if !self.invertible {
            return Err(Error::not_supported(
                self.kind().name(),
                "rank of a table holding duplicate values",
            ));
        }
        let value = coords[0];
        self.sorted
            .binary_search_by_key(&value, |&(v, _)| v)
            .map(|i| self.sorted[i].1)
            .map_err(|_| Error::out_of_domain("value", format!("{value} is not in the index")))
    }

    fn pos(&self) -> Result<Option<u64>> {
        Ok((self.cursor < self.len()).then_some(self.cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_table_is_stable() {
        let index = Index::new(&[5, 1, 5, 0]).unwrap();
        assert!(!index.is_invertible());
        assert_eq!(&index.sorted[..], &[(0, 3), (1, 1), (5, 0), (5, 2)]);
    }

    #[test]
    fn test_duplicates_share_tables() {
        let index = Index::new(&[3, 1, 2]).unwrap();
        let copy = index.clone();
        assert!(Arc::ptr_eq(&index.values, &copy.values));
        assert!(index.is_invertible());
        assert!(Index::empty().is_invertible());
    }
}
