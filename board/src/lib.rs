//! Order state and column-transition engine for the restaurant order board.
//!
//! This crate is compiled to WebAssembly and runs in the browser, but every
//! module except [`web`] is plain Rust and is exercised natively by the test
//! suite and the `orderboard` command-line host. The page glue owns markup,
//! focus and overlay visibility; it forwards DOM events to the engine and
//! applies the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Event handlers over the store and drag session, emitting actions |
//! | [`order`] | Order records and the in-memory order store |
//! | [`column`] | The fixed column set |
//! | [`drag`] | Drag session tracker (which column is hovered) |
//! | [`hit`] | Ancestor lookup from a pointer target to its column |
//! | [`web`] | `wasm-bindgen` bindings for the browser page |
//! | [`error`] | Error type for absorbed operation failures |
//! | [`consts`] | Shared constants (marker attribute, id prefix, defaults) |

pub mod column;
pub mod consts;
pub mod drag;
pub mod engine;
pub mod error;
pub mod hit;
pub mod order;
pub mod web;
