use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use crate::matching::UserPosition;

/// A user's latest reported position and when it was last updated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoredPosition {
    pub user_id: i64,
    pub lat: f64,
    pub lng: f64,
    pub updated_at: DateTime<Utc>,
}

impl StoredPosition {
    pub fn position(&self) -> UserPosition {
        UserPosition {
            user_id: self.user_id,
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// In-memory registry of the latest position per user.
///
/// One slot per user: an update overwrites in place and keeps the user's
/// spot in iteration order, so listings come back in first-report order.
#[derive(Debug, Default)]
pub struct PositionStore {
    inner: RwLock<Slots>,
}

#[derive(Debug, Default)]
struct Slots {
    rows: Vec<StoredPosition>,
    index: HashMap<i64, usize>,
}

impl PositionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or refresh a user's position, returning the stored row.
    pub fn upsert(&self, user_id: i64, lat: f64, lng: f64) -> StoredPosition {
        let row = StoredPosition {
            user_id,
            lat,
            lng,
            updated_at: Utc::now(),
        };

        let mut slots = self.inner.write().unwrap();
        match slots.index.get(&user_id).copied() {
            Some(at) => slots.rows[at] = row,
            None => {
                let at = slots.rows.len();
                slots.rows.push(row);
                slots.index.insert(user_id, at);
            }
        }
        row
    }

    pub fn get(&self, user_id: i64) -> Option<StoredPosition> {
        let slots = self.inner.read().unwrap();
        slots.index.get(&user_id).map(|&at| slots.rows[at])
    }

    /// All positions in first-report order.
    pub fn all(&self) -> Vec<StoredPosition> {
        self.inner.read().unwrap().rows.clone()
    }

    /// All positions except `user_id`'s, in first-report order.
    pub fn all_except(&self, user_id: i64) -> Vec<StoredPosition> {
        self.inner
            .read()
            .unwrap()
            .rows
            .iter()
            .filter(|row| row.user_id != user_id)
            .copied()
            .collect()
    }
}
