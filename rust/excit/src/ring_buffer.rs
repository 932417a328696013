//! Fixed-capacity FIFO used by the sliding-window iterator.

/// Ring buffer of `Copy` items with a fixed capacity.
///
/// Pushing into a full buffer evicts the oldest item.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    buf: Vec<T>,
    head: usize,
    len: usize,
}

impl<T: Copy + Default> RingBuffer<T> {
    pub fn with_capacity(capacity: usize) -> RingBuffer<T> {
        RingBuffer {
            buf: vec![T::default(); capacity],
            head: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    pub fn push(&mut self, item: T) {
        let capacity = self.capacity();
        if capacity == 0 {
            return;
        }
        let tail = (self.head + self.len) % capacity;
        self.buf[tail] = item;
        if self.len == capacity {
            self.head = (self.head + 1) % capacity;
        } else {
            self.len += 1;
        }
    }

    pub fn extend_from_slice(&mut self, items: &[T]) {
        for &item in items {
            self.push(item);
        }
    }

    /// Copies the items, oldest first, into the front of `out`.
    ///
    /// `out` must hold at least [`len`](Self::len) items.
    pub fn copy_to(&self, out: &mut [T]) {
        let capacity = self.capacity();
        let first = self.len.min(capacity - self.head);
        out[..first].copy_from_slice(&self.buf[self.head..self.head + first]);
        out[first..self.len].copy_from_slice(&self.buf[..self.len - first]);
    }
}
