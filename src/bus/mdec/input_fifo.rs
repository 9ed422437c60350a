use std::collections::VecDeque;

pub struct InputFifo {
    words: VecDeque<u32>,
    capacity: usize,
}

impl InputFifo {
    pub fn new(capacity: usize) -> Self {
        Self {
            words: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns false and drops the word when the fifo is already full.
    pub fn push(&mut self, value: u32) -> bool {
        if self.is_full() {
            return false;
        }

        self.words.push_back(value);

        true
    }

    pub fn pop(&mut self) -> Option<u32> {
        self.words.pop_front()
    }

    pub fn is_full(&self) -> bool {
        self.words.len() >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }
}
