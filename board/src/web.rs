//! Browser bindings: `WebBoard` wraps [`EngineCore`] for the page glue.
//!
//! Handlers take raw DOM-origin values and return the resulting actions as a
//! JSON array string. The page applies them to its markup.

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::consts::COLUMN_TAG_ATTR;
use crate::engine::{Action, EngineCore, Selection};
use crate::hit::Containment;
use crate::order::OrderId;

/// The live DOM seen through parent links and `data-area` tags.
struct DomTree;

impl Containment for DomTree {
    type Node = Element;

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn column_tag(&self, node: &Element) -> Option<String> {
        node.get_attribute(COLUMN_TAG_ATTR)
    }
}

fn encode(actions: &[Action]) -> Result<String, JsError> {
    Ok(serde_json::to_string(actions)?)
}

/// Selection handed to the page when a card is clicked.
#[wasm_bindgen]
pub struct EditSelection {
    inner: Selection,
    actions: String,
}

#[wasm_bindgen]
impl EditSelection {
    /// Id of the selected order.
    #[must_use]
    #[wasm_bindgen(getter)]
    pub fn id(&self) -> String {
        self.inner.id().to_string()
    }

    /// Actions produced when the edit overlay opened.
    #[must_use]
    #[wasm_bindgen(getter)]
    pub fn actions(&self) -> String {
        self.actions.clone()
    }
}

/// The order board engine exported to JavaScript.
#[wasm_bindgen]
pub struct WebBoard {
    core: EngineCore,
}

impl Default for WebBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WebBoard {
    #[must_use]
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { core: EngineCore::new() }
    }

    /// Remember the order a drag gesture picked up.
    ///
    /// # Errors
    ///
    /// Returns a `JsError` if the actions cannot be encoded as JSON.
    #[wasm_bindgen(js_name = dragStart)]
    pub fn drag_start(&mut self, id: &str) -> Result<String, JsError> {
        encode(&self.core.on_drag_start(OrderId::from(id)))
    }

    /// Record the column under the pointer.
    ///
    /// # Errors
    ///
    /// Returns a `JsError` if the actions cannot be encoded as JSON.
    #[wasm_bindgen(js_name = dragOver)]
    pub fn drag_over(&mut self, target: &Element) -> Result<String, JsError> {
        encode(&self.core.on_drag_over(&DomTree, target))
    }

    /// Finish the drag, moving the order to the last hovered column.
    ///
    /// # Errors
    ///
    /// Returns a `JsError` if the actions cannot be encoded as JSON.
    #[wasm_bindgen(js_name = dragEnd)]
    pub fn drag_end(&mut self, id: &str) -> Result<String, JsError> {
        encode(&self.core.on_drag_end(&OrderId::from(id)))
    }

    /// Open or close the add overlay.
    ///
    /// # Errors
    ///
    /// Returns a `JsError` if the actions cannot be encoded as JSON.
    #[wasm_bindgen(js_name = addToggle)]
    pub fn add_toggle(&mut self) -> Result<String, JsError> {
        encode(&self.core.on_add_toggle())
    }

    /// Open or close the help overlay.
    ///
    /// # Errors
    ///
    /// Returns a `JsError` if the actions cannot be encoded as JSON.
    #[wasm_bindgen(js_name = helpToggle)]
    pub fn help_toggle(&mut self) -> Result<String, JsError> {
        encode(&self.core.on_help_toggle())
    }

    /// Create an order in the ordered column and close the add overlay.
    ///
    /// # Errors
    ///
    /// Returns a `JsError` if the actions cannot be encoded as JSON.
    #[wasm_bindgen(js_name = addSubmit)]
    pub fn add_submit(&mut self, title: &str, table: &str) -> Result<String, JsError> {
        encode(&self.core.on_add_submit(title, table))
    }

    /// Returns `undefined` when the clicked id is not a known order.
    ///
    /// # Errors
    ///
    /// Returns a `JsError` if the actions cannot be encoded as JSON.
    #[wasm_bindgen(js_name = editToggle)]
    pub fn edit_toggle(&mut self, id: &str) -> Result<Option<EditSelection>, JsError> {
        let (selection, actions) = self.core.on_edit_toggle(&OrderId::from(id));
        let Some(inner) = selection else {
            return Ok(None);
        };
        Ok(Some(EditSelection { inner, actions: encode(&actions)? }))
    }

    /// Close the edit overlay without changes.
    ///
    /// # Errors
    ///
    /// Returns a `JsError` if the actions cannot be encoded as JSON.
    #[wasm_bindgen(js_name = editCancel)]
    pub fn edit_cancel(&mut self) -> Result<String, JsError> {
        encode(&self.core.on_edit_cancel())
    }

    /// Apply an edit to the selected order.
    ///
    /// # Errors
    ///
    /// Returns a `JsError` if the actions cannot be encoded as JSON.
    #[wasm_bindgen(js_name = editSubmit)]
    pub fn edit_submit(
        &mut self,
        selection: &EditSelection,
        title: &str,
        table: &str,
        column: &str,
    ) -> Result<String, JsError> {
        encode(&self.core.on_edit_submit(&selection.inner, title, table, column))
    }

    /// Consumes the selection; the JS handle is invalid afterwards.
    ///
    /// # Errors
    ///
    /// Returns a `JsError` if the actions cannot be encoded as JSON.
    #[wasm_bindgen(js_name = deleteOrder)]
    pub fn delete_order(&mut self, selection: EditSelection) -> Result<String, JsError> {
        encode(&self.core.on_delete(selection.inner))
    }

    /// The full board as JSON, for the initial render.
    ///
    /// # Errors
    ///
    /// Returns a `JsError` if the snapshot cannot be encoded as JSON.
    pub fn snapshot(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.core.snapshot())?)
    }
}
