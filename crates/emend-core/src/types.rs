//! Core value types shared across the admin panel.

use serde::{Deserialize, Serialize};

/// Markup and stylesheet pair extracted from the editor at save time.
///
/// Also the JSON body of the remote store request, so the field names are
/// part of the wire contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSnapshot {
    pub html: String,
    pub css: String,
}

impl ContentSnapshot {
    pub fn new(html: impl Into<String>, css: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            css: css.into(),
        }
    }
}
