// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Topic-keyed publish/subscribe with bounded history.

use crate::event::Event;
use crate::topic::Topic;
use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

pub type Handler = Arc<dyn Fn(&Event) + Send + Sync>;

pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

struct Inner {
    by_topic: HashMap<Topic, Vec<Handler>>,
    wildcard: Vec<Handler>,
    history: VecDeque<Event>,
    history_capacity: usize,
}

/// In-process publish/subscribe bus. Handlers are invoked serially, outside
/// the bus's lock, in registration order.
pub struct EventBus {
    inner: RwLock<Inner>,
}

impl EventBus {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            inner: RwLock::new(Inner {
                by_topic: HashMap::new(),
                wildcard: Vec::new(),
                history: VecDeque::with_capacity(history_capacity),
                history_capacity,
            }),
        }
    }

    pub fn subscribe(&self, topic: Topic, handler: Handler) {
        self.inner.write().by_topic.entry(topic).or_default().push(handler);
    }

    pub fn subscribe_all(&self, handler: Handler) {
        self.inner.write().wildcard.push(handler);
    }

    /// Appends `event` to history, snapshots the matching handler lists, then
    /// invokes each handler with the lock released.
    pub fn publish(&self, event: Event) {
        let handlers: Vec<Handler> = {
            let mut inner = self.inner.write();
            if inner.history.len() >= inner.history_capacity {
                inner.history.pop_front();
            }
            inner.history.push_back(event.clone());

            let mut handlers = inner.by_topic.get(&event.topic).cloned().unwrap_or_default();
            handlers.extend(inner.wildcard.iter().cloned());
            handlers
        };

        for handler in handlers {
            handler(&event);
        }
    }

    pub fn recent(&self, n: usize) -> Vec<Event> {
        let inner = self.inner.read();
        inner.history.iter().rev().take(n).rev().cloned().collect()
    }

    pub fn recent_by_type(&self, topic: Topic, n: usize) -> Vec<Event> {
        let inner = self.inner.read();
        let mut matches: Vec<Event> = inner
            .history
            .iter()
            .rev()
            .filter(|e| e.topic == topic)
            .take(n)
            .cloned()
            .collect();
        matches.reverse();
        matches
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
