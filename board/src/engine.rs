#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::Serialize;

use crate::column::Column;
use crate::drag::DragSession;
use crate::error::BoardError;
use crate::hit::Containment;
use crate::order::{Clock, Order, OrderEdit, OrderId, OrderStore};

/// The page overlays the engine opens and closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Overlay {
    Add,
    Edit,
    Help,
}

/// Actions returned from event handlers for the host to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    OrderCreated { order: Order },
    OrderMoved { id: OrderId, from: Column, to: Column },
    OrderUpdated { order: Order },
    OrderDeleted { id: OrderId },
    /// Hover styling should follow this column; `None` clears it.
    HoverChanged { column: Option<Column> },
    OverlayChanged { overlay: Overlay, open: bool },
}

/// The order an edit overlay was opened for.
///
/// Handed out by [`EngineCore::on_edit_toggle`] and passed back into
/// [`EngineCore::on_edit_submit`] and [`EngineCore::on_delete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    id: OrderId,
}

impl Selection {
    #[must_use]
    pub fn id(&self) -> &OrderId {
        &self.id
    }
}

/// Which overlays are open.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overlays {
    pub add: bool,
    pub edit: bool,
    pub help: bool,
}

impl Overlays {
    fn slot(&mut self, overlay: Overlay) -> &mut bool {
        match overlay {
            Overlay::Add => &mut self.add,
            Overlay::Edit => &mut self.edit,
            Overlay::Help => &mut self.help,
        }
    }

    #[must_use]
    pub fn is_open(self, overlay: Overlay) -> bool {
        match overlay {
            Overlay::Add => self.add,
            Overlay::Edit => self.edit,
            Overlay::Help => self.help,
        }
    }
}

/// One column of a [`BoardSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSnapshot {
    pub column: Column,
    pub orders: Vec<Order>,
}

/// The whole board, for a full render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub columns: Vec<ColumnSnapshot>,
    pub hovered: Option<Column>,
}

/// Engine state and event handlers, independent of the browser.
///
/// Every handler applies all of its mutations before returning, so a render
/// scheduled after the event never observes a half-applied change. Failed
/// operations (unknown ids, bad column names) are absorbed as no-ops.
#[derive(Default)]
pub struct EngineCore {
    pub store: OrderStore,
    pub drag: DragSession,
    pub overlays: Overlays,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine whose store is stamped by `clock`.
    #[must_use]
    pub fn with_clock(clock: Clock) -> Self {
        Self { store: OrderStore::with_clock(clock), ..Self::default() }
    }

    // --- Drag and drop ---

    pub fn on_drag_start(&mut self, id: OrderId) -> Vec<Action> {
        self.drag.start_drag(id);
        Vec::new()
    }

    /// Pointer moved over `target` during a drag.
    pub fn on_drag_over<T: Containment>(&mut self, tree: &T, target: &T::Node) -> Vec<Action> {
        let before = self.drag.over();
        match self.drag.hover_target(tree, target) {
            Ok(Some(column)) if before != Some(column) => {
                tracing::trace!(%column, "drag over column");
                vec![Action::HoverChanged { column: Some(column) }]
            }
            Ok(_) => Vec::new(),
            Err(e) => {
                absorb("drag_over", &e);
                Vec::new()
            }
        }
    }

    /// Drag released: move the order into the last hovered column, if any.
    pub fn on_drag_end(&mut self, id: &OrderId) -> Vec<Action> {
        let Some(to) = self.drag.end_drag(id) else {
            return Vec::new();
        };
        let mut actions = Vec::with_capacity(2);
        match self.store.move_to_column(id, to) {
            Ok(from) => actions.push(Action::OrderMoved { id: id.clone(), from, to }),
            Err(e) => absorb("drag_end", &e),
        }
        actions.push(Action::HoverChanged { column: None });
        actions
    }

    // --- Forms ---

    pub fn on_add_toggle(&mut self) -> Vec<Action> {
        vec![self.toggle(Overlay::Add)]
    }

    pub fn on_help_toggle(&mut self) -> Vec<Action> {
        vec![self.toggle(Overlay::Help)]
    }

    /// Add form submitted: create the order and close the form.
    pub fn on_add_submit(&mut self, title: &str, table: &str) -> Vec<Action> {
        let order = self.store.create_order(title, table);
        tracing::debug!(id = %order.id, "order created");
        vec![Action::OrderCreated { order }, self.set_overlay(Overlay::Add, false)]
    }

    /// A card was clicked: open the edit overlay bound to that order.
    ///
    /// Returns no selection, and does nothing, when the id is unknown.
    pub fn on_edit_toggle(&mut self, id: &OrderId) -> (Option<Selection>, Vec<Action>) {
        if !self.store.contains(id) {
            absorb("edit_toggle", &BoardError::NotFound(id.clone()));
            return (None, Vec::new());
        }
        let selection = Selection { id: id.clone() };
        (Some(selection), vec![self.set_overlay(Overlay::Edit, true)])
    }

    /// Edit overlay dismissed without submitting.
    pub fn on_edit_cancel(&mut self) -> Vec<Action> {
        vec![self.set_overlay(Overlay::Edit, false)]
    }

    /// Edit form submitted for `selection`.
    pub fn on_edit_submit(&mut self, selection: &Selection, title: &str, table: &str, column: &str) -> Vec<Action> {
        let result = column.parse::<Column>().and_then(|column| {
            let edit = OrderEdit { title: title.to_owned(), table: table.to_owned(), column };
            self.store.update_order(&selection.id, edit)
        });
        match result {
            Ok(order) => vec![Action::OrderUpdated { order }, self.set_overlay(Overlay::Edit, false)],
            Err(e) => {
                absorb("edit_submit", &e);
                Vec::new()
            }
        }
    }

    /// Delete pressed in the edit overlay. Consumes the selection.
    pub fn on_delete(&mut self, selection: Selection) -> Vec<Action> {
        match self.store.delete_order(&selection.id) {
            Ok(order) => vec![Action::OrderDeleted { id: order.id }, self.set_overlay(Overlay::Edit, false)],
            Err(e) => {
                absorb("delete", &e);
                Vec::new()
            }
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn order(&self, id: &OrderId) -> Option<&Order> {
        self.store.get(id)
    }

    #[must_use]
    pub fn hovered(&self) -> Option<Column> {
        self.drag.over()
    }

    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        let columns = Column::ALL
            .into_iter()
            .map(|column| ColumnSnapshot {
                column,
                orders: self.store.column_orders(column).into_iter().cloned().collect(),
            })
            .collect();
        BoardSnapshot { columns, hovered: self.drag.over() }
    }

    fn toggle(&mut self, overlay: Overlay) -> Action {
        let open = !self.overlays.is_open(overlay);
        self.set_overlay(overlay, open)
    }

    fn set_overlay(&mut self, overlay: Overlay, open: bool) -> Action {
        *self.overlays.slot(overlay) = open;
        Action::OverlayChanged { overlay, open }
    }
}

fn absorb(op: &'static str, err: &BoardError) {
    tracing::debug!(op, error = %err, "ignored board operation");
}
