//! Edit-session core for the emend admin panel.
//!
//! Everything here is browser-free and natively testable: the Idle/Editing
//! state machine, the auth gate derived from identity-widget events, the
//! typed editor configuration, and the capability traits the state machine
//! drives. Browser implementations of those traits live in `emend-browser`;
//! the wasm-bindgen surface lives in `emend-js`.
//!
//! # Architecture
//!
//! - `session`: the `EditSession` controller and its outcome types
//! - `auth`: `AuthGate`, `AuthProvider`, identity-widget event model
//! - `editor`: `EditorSurface` seam, panel ids, autosave stepping
//! - `page`: `PageChrome` seam, edit-mode chrome, user notices
//! - `store`: `ContentStore` seam and the in-memory implementation
//! - `config`: typed editor startup configuration

pub mod auth;
pub mod config;
pub mod editor;
pub mod error;
pub mod page;
pub mod session;
pub mod store;
pub mod types;

pub use auth::{AuthEvent, AuthGate, AuthProvider, UserInfo};
pub use config::{
    CustomProperty, DeviceSpec, EditorConfig, PanelButton, PanelLayout, PropertyKind, ResizeSpec,
    SelectOption, StorageStrategy, StyleSector,
};
pub use editor::{AutosavePolicy, EditorSurface, PanelId};
pub use error::{AdminError, StoreError};
pub use page::{EditMode, Notice, NoticeLevel, PageChrome};
pub use session::{
    AuthTransition, CancelOutcome, EditSession, EnterOutcome, SaveOutcome, Session, UNSAVED_WARNING,
};
pub use store::{ContentStore, LoadResponse, MemoryStore, parse_stored_payload};
pub use types::ContentSnapshot;
