//! Capability seam over the host page's chrome and content region.

use crate::error::AdminError;
use crate::types::ContentSnapshot;

/// Which face the page shows: the live region or the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Preview,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// User-visible message raised by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Operations the edit session drives against the page itself.
pub trait PageChrome {
    /// Current markup of the editable region.
    fn region_html(&self) -> Result<String, AdminError>;

    /// Concatenated text of the page's readable stylesheets.
    fn capture_styles(&self) -> Result<String, AdminError>;

    /// Write a snapshot into the page: the region's markup plus the single
    /// dynamically-owned stylesheet element (replaced, never duplicated).
    fn apply_snapshot(&self, snapshot: &ContentSnapshot) -> Result<(), AdminError>;

    /// Show or hide the editable region.
    fn set_region_visible(&self, visible: bool) -> Result<(), AdminError>;

    /// Swap the page chrome between preview and editing: button labels,
    /// body class, save control.
    fn set_mode(&self, mode: EditMode) -> Result<(), AdminError>;

    /// Raise a user-visible notice.
    fn notify(&self, notice: Notice);
}
