//! Sliding-window combinator.

use excit_common::{Error, Result, verify_arg};

use crate::{
    Excit, Kind,
    ops::{IndexIterator, Step, coords},
    ring_buffer::RingBuffer,
};

/// Emits every window of `window` consecutive elements of `source`.
///
/// The last `window - 1` source elements already pulled are kept in a ring
/// buffer, so each step reads a single fresh element from the source.
#[derive(Debug, Clone)]
pub struct Cons {
    source: Box<Excit>,
    window: usize,
    history: RingBuffer<i64>,
}

impl Cons {
    pub fn new(source: Excit, window: usize) -> Result<Cons> {
        verify_arg!(window, window != 0);
        verify_arg!(source, source.dimension() != 0);
        let source_size = source.size()?;
        if source_size < window as u64 {
            return Err(Error::invalid_arg(
                "window",
                format!("window {window} exceeds source size {source_size}"),
            ));
        }
        let capacity = (window - 1) * source.dimension();
        let mut cons = Cons {
            source: Box::new(source),
            window,
            history: RingBuffer::with_capacity(capacity),
        };
        cons.rewind()?;
        Ok(cons)
    }

    pub fn window(&self) -> usize {
        self.window
    }

    fn lag(&self) -> u64 {
        self.window as u64 - 1
    }
}

impl IndexIterator for Cons {
    fn kind(&self) -> Kind {
        Kind::Cons
    }

    fn dimension(&self) -> usize {
        self.window * self.source.dimension()
    }

    fn duplicate(&self) -> Box<dyn IndexIterator> {
        Box::new(self.clone())
    }

    fn peek(&self, out: &mut [i64]) -> Result<Step> {
        let tail = self.history.capacity();
        self.history.copy_to(out);
        self.source.peek(&mut out[tail..])
    }

    fn next(&mut self, out: &mut [i64]) -> Result<Step> {
        let tail = self.history.capacity();
        self.history.copy_to(out);
        let step = self.source.next(&mut out[tail..])?;
        if step.is_yielded() {
            self.history.extend_from_slice(&out[tail..]);
        }
        Ok(step)
    }

    fn rewind(&mut self) -> Result<()> {
        self.source.rewind()?;
        self.history.clear();
        let mut element = coords(self.source.dimension());
        for _ in 1..self.window {
            if self.source.next(&mut element)?.is_depleted() {
                return Err(Error::out_of_domain(
                    "window",
                    "source depleted while filling the window",
                ));
            }
            self.history.extend_from_slice(&element);
        }
        Ok(())
    }

    fn size(&self) -> Result<u64> {
        Ok(self.source.size()?.saturating_sub(self.lag()))
    }

    fn unrank(&self, n: u64, out: &mut [i64]) -> Result<()> {
        let size = self.size()?;
        if n >= size {
            return Err(Error::out_of_domain(
                "n",
                format!("{n} >= cons size {size}"),
            ));
        }
        for (i, slot) in out.chunks_mut(self.source.dimension()).enumerate() {
            self.source.unrank(n + i as u64, slot)?;
        }
        Ok(())
    }

    fn rank(&self, coords: &[i64]) -> Result<u64> {
        let mut elements = coords.chunks(self.source.dimension());
        let first = match elements.next() {
            Some(element) => self.source.rank(element)?,
            None => return Err(Error::invalid_arg("coords", "empty window")),
        };
        let mut previous = first;
        for element in elements {
            let rank = self.source.rank(element)?;
            if rank != previous + 1 {
                return Err(Error::out_of_domain(
                    "coords",
                    "window elements are not consecutive in the source",
                ));
            }
            previous = rank;
        }
        Ok(first)
    }

    fn pos(&self) -> Result<Option<u64>> {
        Ok(self
            .source
            .pos()?
            .map(|pos| pos.saturating_sub(self.lag())))
    }
}
