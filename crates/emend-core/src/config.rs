//! Typed configuration handed to the visual editor at startup.
//!
//! The defaults reproduce the page template this panel ships with: the
//! `#gjs-editor` mount point, three preview devices, a resizable right dock
//! with Layers/Styles/Settings toggles, and the Dimension/Extra style
//! sectors.

use serde::{Deserialize, Serialize};

use crate::editor::PanelId;

const CANVAS_FONT: &str =
    "https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700&display=swap";

/// Where edited content is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageStrategy {
    /// Persist into browser local storage, writing every
    /// `steps_before_save` changes while an edit session is active.
    LocalAutosave { steps_before_save: u32 },
    /// Load from and store to a remote endpoint pair.
    Remote { load_url: String, store_url: String },
}

impl StorageStrategy {
    pub const DEFAULT_LOAD_URL: &str = "/api/load-content";
    pub const DEFAULT_STORE_URL: &str = "/api/save-content";

    /// Remote strategy against the default endpoint pair.
    pub fn remote_defaults() -> Self {
        Self::Remote {
            load_url: Self::DEFAULT_LOAD_URL.into(),
            store_url: Self::DEFAULT_STORE_URL.into(),
        }
    }
}

impl Default for StorageStrategy {
    fn default() -> Self {
        Self::LocalAutosave {
            steps_before_save: 1,
        }
    }
}

/// Preview breakpoint shown in the editor's device toolbar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSpec {
    pub name: String,
    /// Canvas width; empty renders the full container width.
    pub width: String,
    /// Media-query width the breakpoint responds to.
    pub media_width: Option<String>,
}

impl DeviceSpec {
    pub fn desktop() -> Self {
        Self {
            name: "Desktop".into(),
            width: String::new(),
            media_width: None,
        }
    }

    pub fn tablet() -> Self {
        Self {
            name: "Tablet".into(),
            width: "768px".into(),
            media_width: Some("992px".into()),
        }
    }

    pub fn mobile() -> Self {
        Self {
            name: "Mobile".into(),
            width: "320px".into(),
            media_width: Some("768px".into()),
        }
    }
}

/// Resize bounds for the right dock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeSpec {
    pub min_dim: u32,
    pub max_dim: u32,
    /// CSS property the resizer drives.
    pub key_width: String,
}

/// One switcher button toggling a side panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelButton {
    pub panel: PanelId,
    pub label: String,
    pub active: bool,
}

/// Dock and switcher layout for the editor's side panels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelLayout {
    /// Selector of the resizable right dock.
    pub dock_selector: String,
    /// Selector of the strip the switcher buttons render into.
    pub switcher_selector: String,
    pub resize: ResizeSpec,
    pub buttons: Vec<PanelButton>,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self {
            dock_selector: ".panel__right".into(),
            switcher_selector: ".panel__switcher".into(),
            resize: ResizeSpec {
                min_dim: 200,
                max_dim: 350,
                key_width: "flex-basis".into(),
            },
            buttons: vec![
                PanelButton {
                    panel: PanelId::Layers,
                    label: "Layers".into(),
                    active: true,
                },
                PanelButton {
                    panel: PanelId::Styles,
                    label: "Styles".into(),
                    active: true,
                },
                PanelButton {
                    panel: PanelId::Traits,
                    label: "Settings".into(),
                    active: true,
                },
            ],
        }
    }
}

/// Option in a select-typed style property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub name: String,
}

/// Input widget for a custom style property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyKind {
    Integer { units: Vec<String>, min: i32 },
    Select { options: Vec<SelectOption> },
}

/// Style property with a custom input widget, overriding the stock one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomProperty {
    pub id: Option<String>,
    pub name: String,
    pub property: String,
    pub default: String,
    pub kind: PropertyKind,
}

/// Group of properties in the editor's style manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSector {
    pub name: String,
    pub open: bool,
    /// Properties the editor renders with stock widgets.
    pub build_props: Vec<String>,
    pub custom: Vec<CustomProperty>,
}

fn default_sectors() -> Vec<StyleSector> {
    vec![
        StyleSector {
            name: "Dimension".into(),
            open: false,
            build_props: vec!["width".into(), "min-height".into(), "padding".into()],
            custom: vec![CustomProperty {
                id: None,
                name: "The width".into(),
                property: "width".into(),
                default: "auto".into(),
                kind: PropertyKind::Integer {
                    units: vec!["px".into(), "%".into()],
                    min: 0,
                },
            }],
        },
        StyleSector {
            name: "Extra".into(),
            open: false,
            build_props: vec![
                "background-color".into(),
                "box-shadow".into(),
                "custom-prop".into(),
            ],
            custom: vec![CustomProperty {
                id: Some("custom-prop".into()),
                name: "Custom Label".into(),
                property: "font-size".into(),
                default: "32px".into(),
                kind: PropertyKind::Select {
                    options: vec![
                        SelectOption {
                            value: "12px".into(),
                            name: "Tiny".into(),
                        },
                        SelectOption {
                            value: "18px".into(),
                            name: "Medium".into(),
                        },
                        SelectOption {
                            value: "32px".into(),
                            name: "Big".into(),
                        },
                    ],
                },
            }],
        },
    ]
}

/// Full configuration handed to the visual editor exactly once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// CSS selector of the mount container.
    pub container: String,
    pub height: String,
    pub width: String,
    pub storage: StorageStrategy,
    pub devices: Vec<DeviceSpec>,
    pub panels: PanelLayout,
    pub sectors: Vec<StyleSector>,
    /// Extra stylesheets loaded into the editing canvas.
    pub canvas_styles: Vec<String>,
    /// Inline uploaded assets as base64 instead of uploading them.
    pub embed_assets: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            container: "#gjs-editor".into(),
            height: "100vh".into(),
            width: "100%".into(),
            storage: StorageStrategy::default(),
            devices: vec![
                DeviceSpec::desktop(),
                DeviceSpec::tablet(),
                DeviceSpec::mobile(),
            ],
            panels: PanelLayout::default(),
            sectors: default_sectors(),
            canvas_styles: vec![CANVAS_FONT.into()],
            embed_assets: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_page_template() {
        let config = EditorConfig::default();
        assert_eq!(config.container, "#gjs-editor");
        assert_eq!(config.height, "100vh");
        assert_eq!(config.devices.len(), 3);
        assert_eq!(config.devices[1].width, "768px");
        assert_eq!(config.devices[1].media_width.as_deref(), Some("992px"));
        assert_eq!(config.panels.buttons.len(), 3);
        assert_eq!(config.panels.resize.min_dim, 200);
        assert_eq!(config.panels.resize.max_dim, 350);
        assert_eq!(config.sectors[0].name, "Dimension");
        assert!(matches!(
            config.storage,
            StorageStrategy::LocalAutosave {
                steps_before_save: 1
            }
        ));
    }

    #[test]
    fn test_remote_defaults_use_api_endpoints() {
        let StorageStrategy::Remote {
            load_url,
            store_url,
        } = StorageStrategy::remote_defaults()
        else {
            panic!("expected remote strategy");
        };
        assert_eq!(load_url, "/api/load-content");
        assert_eq!(store_url, "/api/save-content");
    }
}
