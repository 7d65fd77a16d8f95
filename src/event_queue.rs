//! Pending events, earliest first.

use crate::event::Event;

/// A binary min-heap of events keyed on time.
///
/// Events with equal times come out in no particular order. Nothing is ever cancelled, so only
/// insertion and removal of the minimum are supported.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    heap: Vec<Event>,
}

impl EventQueue {
    /// An empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether there are no pending events.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The earliest pending event, without removing it.
    pub fn peek(&self) -> Option<&Event> {
        self.heap.first()
    }

    /// Schedule an event.
    pub fn push(&mut self, event: Event) {
        self.heap.push(event);
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return the earliest event.
    pub fn pop(&mut self) -> Option<Event> {
        if self.heap.is_empty() {
            return None;
        }

        let event = self.heap.swap_remove(0);
        self.sift_down(0);
        Some(event)
    }

    fn sift_up(&mut self, mut child: usize) {
        while child > 0 {
            let parent = (child - 1) / 2;
            if self.heap[child].time >= self.heap[parent].time {
                break;
            }
            self.heap.swap(child, parent);
            child = parent;
        }
    }

    fn sift_down(&mut self, mut parent: usize) {
        let len = self.heap.len();

        loop {
            let left = 2 * parent + 1;
            if left >= len {
                break;
            }

            // The right child only wins if strictly earlier.
            let right = left + 1;
            let min = if right < len && self.heap[right].time < self.heap[left].time {
                right
            } else {
                left
            };

            if self.heap[parent].time <= self.heap[min].time {
                break;
            }

            self.heap.swap(parent, min);
            parent = min;
        }
    }
}
