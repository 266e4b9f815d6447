use std::cell::Cell;

use serde_json::json;

use super::*;
use crate::drag::DragState;
use crate::hit::{ElementTree, NodeId};

// =============================================================
// Helpers
// =============================================================

thread_local! {
    static NOW: Cell<i64> = const { Cell::new(10_000) };
}

fn test_clock() -> i64 {
    NOW.with(Cell::get)
}

fn set_now(ms: i64) {
    NOW.with(|now| now.set(ms));
}

fn core() -> EngineCore {
    set_now(10_000);
    EngineCore::with_clock(test_clock)
}

/// root > grid > section[column] > card > title, returning the title node.
fn card_title_in(column: &str) -> (ElementTree, NodeId) {
    ElementTree::from_path([None, None, Some(column), None])
}

fn add(core: &mut EngineCore, title: &str, table: &str) -> OrderId {
    let actions = core.on_add_submit(title, table);
    match &actions[0] {
        Action::OrderCreated { order } => order.id.clone(),
        other => panic!("expected OrderCreated, got {other:?}"),
    }
}

fn drag(core: &mut EngineCore, id: &OrderId, over: &[&str]) -> Vec<Action> {
    core.on_drag_start(id.clone());
    for column in over {
        let (tree, target) = card_title_in(column);
        core.on_drag_over(&tree, &target);
    }
    core.on_drag_end(id)
}

fn column_of(core: &EngineCore, id: &OrderId) -> Column {
    core.order(id).unwrap().column
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_core_is_empty_and_idle() {
    let core = EngineCore::new();
    assert!(core.store.is_empty());
    assert_eq!(core.hovered(), None);
    assert_eq!(core.overlays, Overlays::default());
}

// =============================================================
// Add flow
// =============================================================

#[test]
fn add_submit_creates_order_and_closes_overlay() {
    let mut core = core();
    core.on_add_toggle();
    assert!(core.overlays.add);

    let actions = core.on_add_submit("Burger", "4");
    assert_eq!(actions.len(), 2);
    let Action::OrderCreated { order } = &actions[0] else {
        panic!("expected OrderCreated, got {:?}", actions[0]);
    };
    assert_eq!(order.id.as_str(), "order1");
    assert_eq!(order.column, Column::Ordered);
    assert_eq!(order.created, 10_000);
    assert_eq!(actions[1], Action::OverlayChanged { overlay: Overlay::Add, open: false });
    assert!(!core.overlays.add);
}

#[test]
fn toggles_flip_overlays() {
    let mut core = core();
    assert_eq!(core.on_help_toggle(), vec![Action::OverlayChanged { overlay: Overlay::Help, open: true }]);
    assert_eq!(core.on_help_toggle(), vec![Action::OverlayChanged { overlay: Overlay::Help, open: false }]);
    assert_eq!(core.on_add_toggle(), vec![Action::OverlayChanged { overlay: Overlay::Add, open: true }]);
    assert!(core.overlays.is_open(Overlay::Add));
    assert!(!core.overlays.is_open(Overlay::Help));
}

// =============================================================
// Drag and drop
// =============================================================

#[test]
fn drag_over_reports_hover_change_once() {
    let mut core = core();
    let (tree, target) = card_title_in("preparing");
    assert_eq!(
        core.on_drag_over(&tree, &target),
        vec![Action::HoverChanged { column: Some(Column::Preparing) }]
    );
    assert!(core.on_drag_over(&tree, &target).is_empty());
    assert_eq!(core.hovered(), Some(Column::Preparing));
}

#[test]
fn drag_over_untagged_target_is_ignored() {
    let mut core = core();
    let (tree, target) = ElementTree::from_path([None::<&str>, None]);
    assert!(core.on_drag_over(&tree, &target).is_empty());
    assert_eq!(core.drag.state(), DragState::Idle);
}

#[test]
fn drag_over_bogus_column_is_ignored() {
    let mut core = core();
    let (tree, target) = card_title_in("bogus-column");
    assert!(core.on_drag_over(&tree, &target).is_empty());
    assert_eq!(core.hovered(), None);
}

#[test]
fn drag_end_moves_to_last_hovered_column() {
    let mut core = core();
    let id = add(&mut core, "Burger", "4");
    let actions = drag(&mut core, &id, &["preparing", "served"]);
    assert_eq!(
        actions,
        vec![
            Action::OrderMoved { id: id.clone(), from: Column::Ordered, to: Column::Served },
            Action::HoverChanged { column: None },
        ]
    );
    assert_eq!(column_of(&core, &id), Column::Served);
    assert_eq!(core.drag.state(), DragState::Idle);
}

#[test]
fn drag_end_without_hover_is_not_a_move() {
    let mut core = core();
    let id = add(&mut core, "Burger", "4");
    assert!(drag(&mut core, &id, &[]).is_empty());
    assert_eq!(column_of(&core, &id), Column::Ordered);
}

#[test]
fn drag_end_keeps_other_fields() {
    let mut core = core();
    let id = add(&mut core, "Burger", "4");
    let before = core.order(&id).unwrap().clone();
    set_now(99_000);
    drag(&mut core, &id, &["served"]);
    let after = core.order(&id).unwrap();
    assert_eq!(after.title, before.title);
    assert_eq!(after.table, before.table);
    assert_eq!(after.created, before.created);
}

#[test]
fn drag_end_for_unknown_order_only_clears_hover() {
    let mut core = core();
    add(&mut core, "Burger", "4");
    let ghost = OrderId::from("order42");
    let actions = drag(&mut core, &ghost, &["served"]);
    assert_eq!(actions, vec![Action::HoverChanged { column: None }]);
    assert!(core.store.column_orders(Column::Served).is_empty());
    assert_eq!(core.hovered(), None);
}

// =============================================================
// Edit flow
// =============================================================

#[test]
fn edit_toggle_opens_overlay_with_selection() {
    let mut core = core();
    let id = add(&mut core, "Burger", "4");
    let (selection, actions) = core.on_edit_toggle(&id);
    assert_eq!(selection.unwrap().id(), &id);
    assert_eq!(actions, vec![Action::OverlayChanged { overlay: Overlay::Edit, open: true }]);
    assert!(core.overlays.edit);
}

#[test]
fn edit_toggle_on_unknown_order_yields_nothing() {
    let mut core = core();
    let (selection, actions) = core.on_edit_toggle(&OrderId::from("order1"));
    assert!(selection.is_none());
    assert!(actions.is_empty());
    assert!(!core.overlays.edit);
}

#[test]
fn edit_submit_replaces_fields_and_restamps() {
    let mut core = core();
    let id = add(&mut core, "Burger", "4");
    let (selection, _) = core.on_edit_toggle(&id);
    let selection = selection.unwrap();
    set_now(20_000);

    let actions = core.on_edit_submit(&selection, "Fries", "6", "served");
    let expected = Order {
        id: id.clone(),
        title: "Fries".into(),
        table: "6".into(),
        created: 20_000,
        column: Column::Served,
    };
    assert_eq!(
        actions,
        vec![
            Action::OrderUpdated { order: expected.clone() },
            Action::OverlayChanged { overlay: Overlay::Edit, open: false },
        ]
    );
    assert_eq!(core.order(&id), Some(&expected));
}

#[test]
fn edit_submit_with_bad_column_is_a_no_op() {
    let mut core = core();
    let id = add(&mut core, "Burger", "4");
    let before = core.order(&id).unwrap().clone();
    let (selection, _) = core.on_edit_toggle(&id);

    let actions = core.on_edit_submit(&selection.unwrap(), "Fries", "6", "kitchen");
    assert!(actions.is_empty());
    assert_eq!(core.order(&id), Some(&before));
    assert!(core.overlays.edit);
}

#[test]
fn edit_cancel_closes_overlay() {
    let mut core = core();
    let id = add(&mut core, "Burger", "4");
    core.on_edit_toggle(&id);
    assert_eq!(core.on_edit_cancel(), vec![Action::OverlayChanged { overlay: Overlay::Edit, open: false }]);
    assert!(!core.overlays.edit);
}

// =============================================================
// Delete flow
// =============================================================

#[test]
fn delete_removes_selected_order() {
    let mut core = core();
    let keep = add(&mut core, "Soup", "1");
    let id = add(&mut core, "Burger", "4");
    let (selection, _) = core.on_edit_toggle(&id);

    let actions = core.on_delete(selection.unwrap());
    assert_eq!(
        actions,
        vec![
            Action::OrderDeleted { id: id.clone() },
            Action::OverlayChanged { overlay: Overlay::Edit, open: false },
        ]
    );
    assert!(core.order(&id).is_none());
    assert!(core.order(&keep).is_some());
}

#[test]
fn stale_selection_is_a_no_op() {
    let mut core = core();
    let id = add(&mut core, "Burger", "4");
    let (first, _) = core.on_edit_toggle(&id);
    let (second, _) = core.on_edit_toggle(&id);
    core.on_delete(first.unwrap());

    let second = second.unwrap();
    assert!(core.on_edit_submit(&second, "x", "1", "served").is_empty());
    assert!(core.on_delete(second).is_empty());
    assert!(core.store.is_empty());
}

// =============================================================
// Snapshot
// =============================================================

#[test]
fn snapshot_lists_every_column_in_order() {
    let mut core = core();
    let a = add(&mut core, "A", "1");
    add(&mut core, "B", "2");
    drag(&mut core, &a, &["preparing"]);

    let snapshot = core.snapshot();
    let columns: Vec<Column> = snapshot.columns.iter().map(|c| c.column).collect();
    assert_eq!(columns, Column::ALL);
    assert_eq!(snapshot.columns[0].orders.len(), 1);
    assert_eq!(snapshot.columns[1].orders[0].id, a);
    assert!(snapshot.columns[2].orders.is_empty());
    assert_eq!(snapshot.hovered, None);
}

// =============================================================
// Serialization for the page glue
// =============================================================

#[test]
fn actions_serialize_with_action_tag() {
    let action = Action::OrderMoved { id: OrderId::from("order1"), from: Column::Ordered, to: Column::Preparing };
    assert_eq!(
        serde_json::to_value(&action).unwrap(),
        json!({ "action": "order_moved", "id": "order1", "from": "ordered", "to": "preparing" })
    );

    let action = Action::OverlayChanged { overlay: Overlay::Help, open: true };
    assert_eq!(
        serde_json::to_value(&action).unwrap(),
        json!({ "action": "overlay_changed", "overlay": "help", "open": true })
    );

    let action = Action::HoverChanged { column: None };
    assert_eq!(serde_json::to_value(&action).unwrap(), json!({ "action": "hover_changed", "column": null }));
}

// =============================================================
// Scenario
// =============================================================

#[test]
fn burger_lifecycle() {
    let mut core = core();
    let id = add(&mut core, "Burger", "4");
    assert_eq!(id.as_str(), "order1");
    assert_eq!(column_of(&core, &id), Column::Ordered);

    drag(&mut core, &id, &["preparing"]);
    assert_eq!(column_of(&core, &id), Column::Preparing);

    let (selection, _) = core.on_edit_toggle(&id);
    core.on_delete(selection.unwrap());
    assert!(core.order(&id).is_none());
    assert!(core.store.is_empty());
}
