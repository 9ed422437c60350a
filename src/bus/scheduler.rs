use std::{cmp::Reverse, collections::BinaryHeap};

#[derive(Copy, Clone, PartialEq, Eq, Debug, PartialOrd, Ord)]
pub enum EventType {
    MdecStep,
    DmaStep,
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct Event {
    cycles: usize,
    // keeps events due on the same cycle in the order they were scheduled
    sequence: usize,
    event_type: EventType,
}

pub struct Scheduler {
    pub cycles: usize,
    queue: BinaryHeap<Reverse<Event>>,
    sequence: usize,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            cycles: 0,
            queue: BinaryHeap::new(),
            sequence: 0,
        }
    }

    pub fn schedule(&mut self, event_type: EventType, cycles: usize) {
        self.queue.push(Reverse(Event {
            cycles: self.cycles + cycles,
            sequence: self.sequence,
            event_type,
        }));

        self.sequence += 1;
    }

    pub fn tick(&mut self, cycles: usize) {
        self.cycles += cycles;
    }

    /// Pops the next due event along with how many cycles late it is.
    pub fn get_next_event(&mut self) -> Option<(EventType, usize)> {
        let Reverse(next) = self.queue.peek()?;

        if next.cycles > self.cycles {
            return None;
        }

        let Reverse(event) = self.queue.pop()?;

        Some((event.event_type, self.cycles - event.cycles))
    }

    pub fn cycles_until_next_event(&self) -> Option<usize> {
        self.queue
            .peek()
            .map(|Reverse(event)| event.cycles.saturating_sub(self.cycles))
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
