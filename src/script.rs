//! Event scripts: newline-delimited JSON UI events replayed through the engine.
//!
//! One event per line, tagged by `event`:
//!
//! ```text
//! {"event":"add","title":"Burger","table":"4"}
//! {"event":"drag_start","id":"order1"}
//! {"event":"drag_over","path":[null,"preparing",null]}
//! {"event":"drag_end","id":"order1"}
//! {"event":"edit_toggle","id":"order1"}
//! {"event":"edit","title":"Fries","table":"6","column":"served"}
//! {"event":"delete"}
//! ```
//!
//! `drag_over.path` is the event path innermost first: the column tag of the
//! target, then of each ancestor, `null` where an element carries none. Blank
//! lines and lines starting with `#` are skipped.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use board::consts::DEFAULT_TABLE;
use board::engine::{Action, EngineCore, Selection};
use board::hit::ElementTree;
use board::order::OrderId;
use serde::Deserialize;

/// One recorded UI event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    DragStart {
        id: String,
    },
    DragOver {
        path: Vec<Option<String>>,
    },
    DragEnd {
        id: String,
    },
    AddToggle,
    HelpToggle,
    Add {
        title: String,
        #[serde(default = "default_table")]
        table: String,
    },
    EditToggle {
        id: String,
    },
    EditCancel,
    Edit {
        title: String,
        table: String,
        column: String,
    },
    Delete,
}

fn default_table() -> String {
    DEFAULT_TABLE.to_owned()
}

/// Parse one script line. `Ok(None)` for blank and comment lines.
pub fn parse_line(line: &str) -> serde_json::Result<Option<ScriptEvent>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some)
}

/// Drives an engine from script events.
///
/// Holds the edit selection between `edit_toggle` and the `edit`, `delete` or
/// `edit_cancel` that consumes it, the way the page keeps the handle returned
/// by the web binding.
pub struct Replay {
    core: EngineCore,
    selection: Option<Selection>,
}

impl Replay {
    #[must_use]
    pub fn new(core: EngineCore) -> Self {
        Self { core, selection: None }
    }

    /// Apply one event and return the actions it produced.
    pub fn apply(&mut self, event: ScriptEvent) -> Vec<Action> {
        match event {
            ScriptEvent::DragStart { id } => self.core.on_drag_start(OrderId::from(id)),
            ScriptEvent::DragOver { path } => {
                let (tree, target) = ElementTree::from_path(path);
                self.core.on_drag_over(&tree, &target)
            }
            ScriptEvent::DragEnd { id } => self.core.on_drag_end(&OrderId::from(id)),
            ScriptEvent::AddToggle => self.core.on_add_toggle(),
            ScriptEvent::HelpToggle => self.core.on_help_toggle(),
            ScriptEvent::Add { title, table } => self.core.on_add_submit(&title, &table),
            ScriptEvent::EditToggle { id } => {
                let (selection, actions) = self.core.on_edit_toggle(&OrderId::from(id));
                self.selection = selection;
                actions
            }
            ScriptEvent::EditCancel => {
                self.selection = None;
                self.core.on_edit_cancel()
            }
            ScriptEvent::Edit { title, table, column } => {
                let Some(selection) = self.selection.take() else {
                    tracing::warn!("edit without a selected order; skipped");
                    return Vec::new();
                };
                let actions = self.core.on_edit_submit(&selection, &title, &table, &column);
                if actions.is_empty() {
                    // Rejected edits leave the overlay open on the same order.
                    self.selection = Some(selection);
                }
                actions
            }
            ScriptEvent::Delete => {
                let Some(selection) = self.selection.take() else {
                    tracing::warn!("delete without a selected order; skipped");
                    return Vec::new();
                };
                self.core.on_delete(selection)
            }
        }
    }

    #[must_use]
    pub fn core(&self) -> &EngineCore {
        &self.core
    }

    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }
}
