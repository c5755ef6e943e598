use thiserror::Error;

/// Ordering key for heap elements. The heap compares by this weight alone,
/// never by a full `Ord` on the payload, so equal-weight elements keep
/// their index order.
pub trait Weighted {
    fn weight(&self) -> u64;
}

impl Weighted for u64 {
    fn weight(&self) -> u64 {
        *self
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeapError {
    #[error("heap capacity must be greater than zero")]
    InvalidCapacity,
    #[error("heap is full (capacity {capacity})")]
    HeapFull { capacity: usize },
    #[error("heap is empty")]
    HeapEmpty,
    #[error("bulk load expects exactly {expected} items, got {actual}")]
    CapacityMismatch { expected: usize, actual: usize },
}

/// An array-backed binary min-heap with a fixed capacity, ordered by
/// [`Weighted::weight`].
///
/// Zero-indexed layout: `parent(i) = (i - 1) / 2`, children at `2i + 1`
/// and `2i + 2`.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    slots: Vec<T>,
    capacity: usize,
}

impl<T> MinHeap<T> {
    pub fn with_capacity(capacity: usize) -> Result<Self, HeapError> {
        if capacity == 0 {
            return Err(HeapError::InvalidCapacity);
        }
        Ok(MinHeap {
            slots: Vec::with_capacity(capacity),
            capacity,
        })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The builder's loop-termination probe.
    pub fn is_singleton(&self) -> bool {
        self.slots.len() == 1
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn parent(i: usize) -> usize {
        (i - 1) / 2
    }

    fn left(i: usize) -> usize {
        2 * i + 1
    }

    fn right(i: usize) -> usize {
        2 * i + 2
    }
}

impl<T: Weighted> MinHeap<T> {
    /// Installs exactly `capacity` items and restores the heap property
    /// with a bottom-up pass of sift-downs, O(n) rather than n inserts.
    ///
    /// Takes ownership of every item. The heap must be empty.
    pub fn build_from(&mut self, items: Vec<T>) -> Result<(), HeapError> {
        if !self.is_empty() {
            return Err(HeapError::HeapFull {
                capacity: self.capacity,
            });
        }
        if items.len() != self.capacity {
            return Err(HeapError::CapacityMismatch {
                expected: self.capacity,
                actual: items.len(),
            });
        }
        self.slots = items;
        let n = self.len();
        for i in (0..n / 2).rev() {
            self.sift_down(i);
        }
        Ok(())
    }

    pub fn insert(&mut self, item: T) -> Result<(), HeapError> {
        if self.len() == self.capacity {
            return Err(HeapError::HeapFull {
                capacity: self.capacity,
            });
        }
        self.slots.push(item);
        self.sift_up(self.len() - 1);
        Ok(())
    }

    /// Removes and returns the minimum-weight item.
    pub fn extract_min(&mut self) -> Result<T, HeapError> {
        if self.is_empty() {
            return Err(HeapError::HeapEmpty);
        }
        let last = self.len() - 1;
        self.slots.swap(0, last);
        let min = self.slots.remove(last);
        if !self.is_empty() {
            self.sift_down(0);
        }
        Ok(min)
    }

    pub fn peek(&self) -> Option<&T> {
        self.slots.first()
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let p = Self::parent(i);
            if self.slots[i].weight() < self.slots[p].weight() {
                self.slots.swap(i, p);
                i = p;
            } else {
                break;
            }
        }
    }

    /// Strict `<` against the running smallest, left child checked first,
    /// so an equal-weight right child never displaces the left one.
    fn sift_down(&mut self, i: usize) {
        let l = Self::left(i);
        let r = Self::right(i);
        let mut smallest = i;

        if l < self.len() && self.slots[l].weight() < self.slots[smallest].weight() {
            smallest = l;
        }
        if r < self.len() && self.slots[r].weight() < self.slots[smallest].weight() {
            smallest = r;
        }

        if smallest != i {
            self.slots.swap(i, smallest);
            self.sift_down(smallest);
        }
    }

    /// Full-array heap-property scan.
    pub fn is_valid(&self) -> bool {
        for i in 1..self.len() {
            if self.slots[Self::parent(i)].weight() > self.slots[i].weight() {
                return false;
            }
        }
        true
    }
}
