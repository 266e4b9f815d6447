//! Drag session: the column under the pointer during a drag gesture.
//!
//! Drag-over fires continuously while the pointer moves; drag-end fires once.
//! `DragSession` decouples the two by remembering only the latest hovered
//! column. Each hover overwrites the last one, and ending the drag reads the
//! value and resets the session.
//!
//! ```text
//! Idle --hover(c)--> Hovering(c) --hover(d)--> Hovering(d) --end--> Idle
//! ```

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use crate::column::Column;
use crate::error::BoardError;
use crate::hit::{Containment, resolve_column};
use crate::order::OrderId;

/// Observable state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No column hovered.
    #[default]
    Idle,
    /// The pointer was last seen over this column.
    Hovering(Column),
}

/// Transient state of the drag in progress, if any.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    dragging_id: Option<OrderId>,
    over: Option<Column>,
}

impl DragSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember which order the gesture picked up.
    pub fn start_drag(&mut self, id: OrderId) {
        self.dragging_id = Some(id);
    }

    /// Record `column` as hovered, replacing any previous value.
    pub fn set_hovered_column(&mut self, column: Column) {
        self.over = Some(column);
    }

    /// Record a hovered column by name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidColumn` for a name outside the column set; the session
    /// is left as it was.
    pub fn set_hovered_column_named(&mut self, name: &str) -> Result<Column, BoardError> {
        let column = name.parse::<Column>()?;
        self.set_hovered_column(column);
        Ok(column)
    }

    /// Resolve a raw pointer target to its column and record it.
    ///
    /// Returns `Ok(None)` and changes nothing when the target has no tagged
    /// ancestor. A tag that is not a column name is rejected the same way
    /// [`set_hovered_column_named`](Self::set_hovered_column_named) rejects it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidColumn` when the nearest tag is not a column name.
    pub fn hover_target<T: Containment>(&mut self, tree: &T, target: &T::Node) -> Result<Option<Column>, BoardError> {
        let resolved = resolve_column(tree, target)?;
        if let Some(column) = resolved {
            self.set_hovered_column(column);
        }
        Ok(resolved)
    }

    /// Finish the drag: return the last hovered column and reset to idle.
    pub fn end_drag(&mut self, dragged_id: &OrderId) -> Option<Column> {
        if let Some(started) = self.dragging_id.take() {
            if &started != dragged_id {
                tracing::debug!(%started, ended = %dragged_id, "drag ended on a different order than it started");
            }
        }
        self.over.take()
    }

    /// The column currently hovered, if any.
    #[must_use]
    pub fn over(&self) -> Option<Column> {
        self.over
    }

    /// The order picked up by the current gesture, if drag-start reported it.
    #[must_use]
    pub fn dragging_id(&self) -> Option<&OrderId> {
        self.dragging_id.as_ref()
    }

    #[must_use]
    pub fn state(&self) -> DragState {
        self.over.map_or(DragState::Idle, DragState::Hovering)
    }
}
