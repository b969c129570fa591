pub(crate) const DEFAULT_BUF_SIZE: usize = 16384;

/// Fixed capacity buffer with a live region `head..tail`.
///
/// Data is appended at `tail` and taken from `head`. Space freed at the front only becomes
/// writable again after [`compact`](Self::compact) or [`clear`](Self::clear).
#[derive(Debug)]
pub(crate) struct WorkingBuffer {
    buf: Box<[u8]>,
    head: usize,
    tail: usize,
}

impl WorkingBuffer {
    pub(crate) fn with_capacity(cap: usize) -> Self {
        Self {
            buf: vec![0; cap].into(),
            head: 0,
            tail: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes between `head` and `tail`.
    pub(crate) fn filled(&self) -> &[u8] {
        &self.buf[self.head..self.tail]
    }

    pub(crate) fn filled_len(&self) -> usize {
        self.tail - self.head
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Writable space after `tail`.
    pub(crate) fn unfilled_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.tail..]
    }

    pub(crate) fn unfilled_len(&self) -> usize {
        self.buf.len() - self.tail
    }

    /// Offset of `head` from the start of the allocation.
    pub(crate) fn head(&self) -> usize {
        self.head
    }

    pub(crate) fn fill(&mut self, amount: usize) {
        debug_assert!(
            amount <= self.unfilled_len(),
            "fill called with amount exceeding buffer capacity"
        );
        self.tail += amount;
    }

    pub(crate) fn consume(&mut self, amount: usize) {
        debug_assert!(
            amount <= self.filled_len(),
            "consume called with amount exceeding filled data"
        );
        self.head += amount;
    }

    /// Drop everything, returning how far `head` had advanced.
    pub(crate) fn clear(&mut self) -> usize {
        let head = self.head;
        self.head = 0;
        self.tail = 0;
        head
    }

    /// Shift the live region to index 0, returning how far `head` had advanced.
    pub(crate) fn compact(&mut self) -> usize {
        let head = self.head;
        if head != 0 {
            self.buf.copy_within(head..self.tail, 0);
            self.tail -= head;
            self.head = 0;
        }
        head
    }
}
