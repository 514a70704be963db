//! Flat registry of currently-resting order ids, supporting O(1) uniform
//! sampling and O(1) removal via swap-with-last.

use std::collections::HashMap;

use rand::Rng;

use crate::types::OrderId;

#[derive(Default)]
pub struct LiveIdRegistry {
    ids: Vec<OrderId>,
    pos: HashMap<OrderId, usize>,
}

impl LiveIdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: OrderId) {
        if self.pos.contains_key(&id) {
            return;
        }
        self.pos.insert(id, self.ids.len());
        self.ids.push(id);
    }

    pub fn remove(&mut self, id: OrderId) -> bool {
        let Some(idx) = self.pos.remove(&id) else {
            return false;
        };
        let last_idx = self.ids.len() - 1;
        self.ids.swap(idx, last_idx);
        self.ids.pop();
        if idx < self.ids.len() {
            self.pos.insert(self.ids[idx], idx);
        }
        true
    }

    pub fn contains(&self, id: OrderId) -> bool {
        self.pos.contains_key(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn sample_uniform(&self, rng: &mut impl Rng) -> Option<OrderId> {
        if self.ids.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.ids.len());
        Some(self.ids[idx])
    }
}
