//! Bounded log of live socket events, oldest first.

use super::SocketMessage;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveEntry {
    pub seq: u64,
    pub received_at: DateTime<Utc>,
    pub message: SocketMessage,
}

#[derive(Debug, Clone)]
pub struct LiveEventLog {
    capacity: usize,
    entries: VecDeque<LiveEntry>,
    next_seq: u64,
}

impl LiveEventLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Append a message, evicting the oldest entries past capacity.
    /// Returns the sequence number assigned to the entry.
    pub fn push(&mut self, message: SocketMessage) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;

        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LiveEntry {
            seq,
            received_at: Utc::now(),
            message,
        });
        seq
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total messages ever appended, including evicted ones.
    pub fn total_received(&self) -> u64 {
        self.next_seq
    }

    pub fn iter(&self) -> impl Iterator<Item = &LiveEntry> {
        self.entries.iter()
    }

    /// Newest `n` entries, newest first.
    pub fn recent(&self, n: usize) -> Vec<&LiveEntry> {
        self.entries.iter().rev().take(n).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
