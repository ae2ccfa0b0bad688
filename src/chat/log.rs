use std::collections::VecDeque;

use crate::models::ChatMessage;

/// Bounded chat history in arrival order.
///
/// Appending to a full log evicts the oldest message. Every appended
/// message gets a sequence number (0-based, since the last clear) so
/// readers can ask for what they have not seen yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLog {
    messages: VecDeque<ChatMessage>,
    capacity: usize,
    total: u64,
}

impl ChatLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            total: 0,
        }
    }

    /// Append at the end; returns the evicted message if the log was full.
    pub fn push(&mut self, message: ChatMessage) -> Option<ChatMessage> {
        let evicted = if self.messages.len() == self.capacity {
            self.messages.pop_front()
        } else {
            None
        };
        self.messages.push_back(message);
        self.total += 1;
        evicted
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.total = 0;
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Messages appended since the last clear, evicted ones included.
    pub fn total_received(&self) -> u64 {
        self.total
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.back()
    }

    pub fn to_vec(&self) -> Vec<ChatMessage> {
        self.messages.iter().cloned().collect()
    }

    /// Retained messages with sequence number `>= seen`.
    pub fn since(&self, seen: u64) -> impl Iterator<Item = &ChatMessage> {
        let first_seq = self.total - self.messages.len() as u64;
        let skip = seen.saturating_sub(first_seq).min(self.messages.len() as u64) as usize;
        self.messages.iter().skip(skip)
    }
}
