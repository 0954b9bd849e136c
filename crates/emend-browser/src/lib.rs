//! Browser DOM layer for the emend admin panel.
//!
//! Implements the capability seams from `emend-core` against the live
//! document. It assumes a `wasm32-unknown-unknown` target environment;
//! the storage pieces fall back to an in-memory store off-target so the
//! crate stays testable natively.
//!
//! # Architecture
//!
//! - `page`: `PageChrome` over the host page (region, styles, mode chrome)
//! - `controls`: the floating admin controls bar
//! - `panels`: locating and toggling the editor's side panels
//! - `storage`: `ContentStore` impls for local storage and remote endpoints
//! - `events`: escape, click, and before-unload wiring
//!
//! # Re-exports
//!
//! This crate re-exports `emend-core` for convenience, so consumers only
//! need to depend on `emend-browser`.

// Re-export core crate
pub use emend_core;
pub use emend_core::*;

pub mod controls;
pub mod events;
pub mod page;
pub mod panels;
pub mod storage;

pub use controls::AdminControls;
pub use page::{DomPage, PageSelectors};
pub use storage::{LocalStore, RemoteStore, StrategyStore};
