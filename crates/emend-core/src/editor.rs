//! Capability seam over the live visual-editor instance.

use serde::{Deserialize, Serialize};

use crate::config::StorageStrategy;
use crate::error::AdminError;
use crate::types::ContentSnapshot;

/// Side panels the editor hosts.
///
/// A closed set rather than free-form command strings; the command and
/// container names below stay wire-compatible with the page template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelId {
    Layers,
    Styles,
    Traits,
}

impl PanelId {
    pub const ALL: [PanelId; 3] = [PanelId::Layers, PanelId::Styles, PanelId::Traits];

    /// Class of the panel's container element. Looked up relative to the
    /// editor row, so a second instance on the page would not collide.
    pub fn container_class(self) -> &'static str {
        match self {
            PanelId::Layers => ".layers-container",
            PanelId::Styles => ".styles-container",
            PanelId::Traits => ".traits-container",
        }
    }

    /// Name the toggle command is registered under.
    pub fn command_name(self) -> &'static str {
        match self {
            PanelId::Layers => "show-layers",
            PanelId::Styles => "show-styles",
            PanelId::Traits => "show-traits",
        }
    }
}

/// Operations the edit session drives against the editor instance.
///
/// The instance is external and may never have loaded; implementations
/// report that as [`AdminError::Editor`] rather than panicking.
pub trait EditorSurface {
    /// Replace the editor's working document.
    fn load_content(&self, html: &str, css: &str) -> Result<(), AdminError>;

    /// Read back the current markup and stylesheet text.
    fn extract(&self) -> Result<ContentSnapshot, AdminError>;

    /// Show or hide the editor container.
    fn set_visible(&self, visible: bool) -> Result<(), AdminError>;

    /// Show or hide one side panel.
    fn set_panel_visible(&self, panel: PanelId, visible: bool) -> Result<(), AdminError>;
}

/// Change counter gating background stores for the local strategy.
///
/// Remote storage stores on explicit save only, so [`from_strategy`]
/// yields a policy for `LocalAutosave` alone.
///
/// [`from_strategy`]: AutosavePolicy::from_strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutosavePolicy {
    threshold: u32,
    pending: u32,
}

impl AutosavePolicy {
    pub fn new(steps_before_save: u32) -> Self {
        // Zero would never fire; treat it as save-every-change.
        Self {
            threshold: steps_before_save.max(1),
            pending: 0,
        }
    }

    pub fn from_strategy(strategy: &StorageStrategy) -> Option<Self> {
        match strategy {
            StorageStrategy::LocalAutosave { steps_before_save } => {
                Some(Self::new(*steps_before_save))
            }
            StorageStrategy::Remote { .. } => None,
        }
    }

    /// Record one editor change; true when the accumulated changes reach
    /// the threshold (the counter then resets).
    pub fn record_change(&mut self) -> bool {
        self.pending += 1;
        if self.pending >= self.threshold {
            self.pending = 0;
            true
        } else {
            false
        }
    }
}
