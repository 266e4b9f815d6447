//! Order model: order records, edits, and the in-memory store.
//!
//! This module defines what an order is (`Order`, `OrderId`), the replacement
//! fields submitted by the edit form (`OrderEdit`), and the store that owns all
//! live orders and their column membership (`OrderStore`).
//!
//! Each column keeps its orders in arrival order. New, moved and edited orders
//! are appended to the end of their destination column, the same place the
//! page appends their cards.

#[cfg(test)]
#[path = "order_test.rs"]
mod order_test;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::consts::ORDER_ID_PREFIX;
use crate::error::BoardError;

/// Opaque order identifier, e.g. `order3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    fn from_seq(seq: u64) -> Self {
        Self(format!("{ORDER_ID_PREFIX}{seq}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for OrderId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// A customer order as stored and as handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Assigned at creation, never changes.
    pub id: OrderId,
    /// Free-form description of what was ordered.
    pub title: String,
    /// Table identifier as entered in the form.
    pub table: String,
    /// Milliseconds since the Unix epoch. Re-stamped on every edit.
    pub created: i64,
    /// The lane this order currently sits in.
    pub column: Column,
}

/// Replacement fields from the edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderEdit {
    pub title: String,
    pub table: String,
    pub column: Column,
}

/// Source of "now" in milliseconds since the Unix epoch.
pub type Clock = fn() -> i64;

/// Wall-clock time from the browser.
#[cfg(target_arch = "wasm32")]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn system_clock() -> i64 {
    js_sys::Date::now() as i64
}

/// Wall-clock time from the operating system. Clamps to 0 before the epoch.
#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub fn system_clock() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
}

/// In-memory store of orders.
///
/// Ids come from a sequence owned by the store, so two stores never
/// interfere with each other and a fresh store always starts at `order1`.
pub struct OrderStore {
    orders: HashMap<OrderId, Order>,
    lanes: [Vec<OrderId>; 3],
    last_seq: u64,
    clock: Clock,
}

impl OrderStore {
    /// Create an empty store stamped by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(system_clock)
    }

    /// Create an empty store with an injected clock.
    #[must_use]
    pub fn with_clock(clock: Clock) -> Self {
        Self { orders: HashMap::new(), lanes: [Vec::new(), Vec::new(), Vec::new()], last_seq: 0, clock }
    }

    /// Create a new order in the `ordered` column and return a copy of it.
    ///
    /// Title and table are taken as-is; empty strings are allowed.
    pub fn create_order(&mut self, title: impl Into<String>, table: impl Into<String>) -> Order {
        self.last_seq += 1;
        let order = Order {
            id: OrderId::from_seq(self.last_seq),
            title: title.into(),
            table: table.into(),
            created: (self.clock)(),
            column: Column::Ordered,
        };
        self.lanes[Column::Ordered.index()].push(order.id.clone());
        self.orders.insert(order.id.clone(), order.clone());
        order
    }

    /// Move an order to `target`, changing nothing but its column.
    ///
    /// Returns the column the order was in before the move.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is not in the store.
    pub fn move_to_column(&mut self, id: &OrderId, target: Column) -> Result<Column, BoardError> {
        let order = self.orders.get_mut(id).ok_or_else(|| BoardError::NotFound(id.clone()))?;
        let from = order.column;
        order.column = target;
        Self::relocate(&mut self.lanes, id, from, target);
        Ok(from)
    }

    /// Like [`move_to_column`](Self::move_to_column) with the column given by name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidColumn` if `target` is not a column name, and `NotFound`
    /// if `id` is not in the store. Either way the store is left unchanged.
    pub fn move_to_column_named(&mut self, id: &OrderId, target: &str) -> Result<Column, BoardError> {
        let target = target.parse::<Column>()?;
        self.move_to_column(id, target)
    }

    /// Replace title, table and column of an order. The id is kept and
    /// `created` is re-stamped to now.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is not in the store.
    pub fn update_order(&mut self, id: &OrderId, edit: OrderEdit) -> Result<Order, BoardError> {
        let now = (self.clock)();
        let order = self.orders.get_mut(id).ok_or_else(|| BoardError::NotFound(id.clone()))?;
        let from = order.column;
        order.title = edit.title;
        order.table = edit.table;
        order.column = edit.column;
        order.created = now;
        let updated = order.clone();
        Self::relocate(&mut self.lanes, id, from, edit.column);
        Ok(updated)
    }

    /// Remove an order, returning it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is not in the store.
    pub fn delete_order(&mut self, id: &OrderId) -> Result<Order, BoardError> {
        let order = self.orders.remove(id).ok_or_else(|| BoardError::NotFound(id.clone()))?;
        self.lanes[order.column.index()].retain(|lane_id| lane_id != id);
        Ok(order)
    }

    /// Return a reference to an order by id.
    #[must_use]
    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &OrderId) -> bool {
        self.orders.contains_key(id)
    }

    /// Orders in one column, top to bottom.
    #[must_use]
    pub fn column_orders(&self, column: Column) -> Vec<&Order> {
        self.lanes[column.index()].iter().filter_map(|id| self.orders.get(id)).collect()
    }

    /// All orders, column by column, top to bottom within each column.
    #[must_use]
    pub fn orders(&self) -> Vec<&Order> {
        Column::ALL.into_iter().flat_map(|column| self.column_orders(column)).collect()
    }

    /// Number of orders currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Returns `true` if the store holds no orders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    fn relocate(lanes: &mut [Vec<OrderId>; 3], id: &OrderId, from: Column, to: Column) {
        lanes[from.index()].retain(|lane_id| lane_id != id);
        lanes[to.index()].push(id.clone());
    }
}

impl Default for OrderStore {
    fn default() -> Self {
        Self::new()
    }
}
