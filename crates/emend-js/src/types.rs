//! Config types crossing the JS boundary.

use emend_core::{
    CustomProperty, DeviceSpec, EditorConfig, PanelId, PanelLayout, PropertyKind, SelectOption,
    StorageStrategy, StyleSector,
};
use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

// === Public config surface ===

/// Options accepted by the `JsAdmin` constructor.
///
/// Everything is optional; omitted fields fall back to the stock panel
/// defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsAdminConfig {
    /// CSS selector of the editor mount container.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<JsStorageStrategy>,
}

impl JsAdminConfig {
    /// Overlay these options onto the stock [`EditorConfig`].
    pub fn into_editor_config(self) -> EditorConfig {
        let mut config = EditorConfig::default();
        if let Some(container) = self.container {
            config.container = container;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(storage) = self.storage {
            config.storage = storage.into_strategy();
        }
        config
    }
}

/// Storage selection as written from JS: `{type: "local"}` or
/// `{type: "remote", loadUrl: ..., storeUrl: ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum JsStorageStrategy {
    #[serde(rename_all = "camelCase")]
    Local {
        #[serde(default = "default_steps")]
        steps_before_save: u32,
    },
    #[serde(rename_all = "camelCase")]
    Remote {
        #[serde(default = "default_load_url")]
        load_url: String,
        #[serde(default = "default_store_url")]
        store_url: String,
    },
}

fn default_steps() -> u32 {
    1
}

fn default_load_url() -> String {
    StorageStrategy::DEFAULT_LOAD_URL.into()
}

fn default_store_url() -> String {
    StorageStrategy::DEFAULT_STORE_URL.into()
}

impl JsStorageStrategy {
    fn into_strategy(self) -> StorageStrategy {
        match self {
            Self::Local { steps_before_save } => {
                StorageStrategy::LocalAutosave { steps_before_save }
            }
            Self::Remote {
                load_url,
                store_url,
            } => StorageStrategy::Remote {
                load_url,
                store_url,
            },
        }
    }
}

// === Editor library init mirror ===
//
// Serialized with serde-wasm-bindgen into the plain object the editor
// library's `init` expects. Field names follow that library's API, not
// ours.

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InitConfig {
    container: String,
    height: String,
    width: String,
    storage_manager: StorageManagerInit,
    device_manager: DeviceManagerInit,
    panels: PanelsInit,
    layer_manager: AppendToInit,
    selector_manager: AppendToInit,
    trait_manager: AppendToInit,
    style_manager: StyleManagerInit,
    rich_text_editor: RichTextInit,
    asset_manager: AssetManagerInit,
    canvas: CanvasInit,
}

impl InitConfig {
    pub(crate) fn from_config(config: &EditorConfig) -> Self {
        Self {
            container: config.container.clone(),
            height: config.height.clone(),
            width: config.width.clone(),
            // Persistence belongs to the panel's own store; the library's
            // storage layer stays off so the two never double-write.
            storage_manager: StorageManagerInit {
                kind: "none",
                autosave: false,
                autoload: false,
            },
            device_manager: DeviceManagerInit {
                devices: config.devices.iter().map(DeviceInit::from_spec).collect(),
            },
            panels: PanelsInit::from_layout(&config.panels),
            layer_manager: AppendToInit {
                append_to: PanelId::Layers.container_class(),
            },
            selector_manager: AppendToInit {
                append_to: PanelId::Styles.container_class(),
            },
            trait_manager: AppendToInit {
                append_to: PanelId::Traits.container_class(),
            },
            style_manager: StyleManagerInit {
                append_to: PanelId::Styles.container_class(),
                sectors: config.sectors.iter().map(SectorInit::from_sector).collect(),
            },
            rich_text_editor: RichTextInit { disable: false },
            asset_manager: AssetManagerInit {
                embed_as_base64: config.embed_assets,
            },
            canvas: CanvasInit {
                styles: config.canvas_styles.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct StorageManagerInit {
    #[serde(rename = "type")]
    kind: &'static str,
    autosave: bool,
    autoload: bool,
}

#[derive(Debug, Serialize)]
struct DeviceManagerInit {
    devices: Vec<DeviceInit>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeviceInit {
    name: String,
    width: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    width_media: Option<String>,
}

impl DeviceInit {
    fn from_spec(spec: &DeviceSpec) -> Self {
        Self {
            name: spec.name.clone(),
            width: spec.width.clone(),
            width_media: spec.media_width.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PanelsInit {
    defaults: Vec<PanelInit>,
}

impl PanelsInit {
    fn from_layout(layout: &PanelLayout) -> Self {
        let buttons = layout
            .buttons
            .iter()
            .map(|button| ButtonInit {
                id: button.panel.command_name(),
                active: button.active,
                label: button.label.clone(),
                command: button.panel.command_name(),
                togglable: false,
            })
            .collect();
        Self {
            defaults: vec![
                PanelInit {
                    id: "layers",
                    el: layout.dock_selector.clone(),
                    resizable: Some(ResizableInit {
                        max_dim: layout.resize.max_dim,
                        min_dim: layout.resize.min_dim,
                        tc: 0,
                        cl: 1,
                        cr: 0,
                        bc: 0,
                        key_width: layout.resize.key_width.clone(),
                    }),
                    buttons: None,
                },
                PanelInit {
                    id: "panel-switcher",
                    el: layout.switcher_selector.clone(),
                    resizable: None,
                    buttons: Some(buttons),
                },
            ],
        }
    }
}

#[derive(Debug, Serialize)]
struct PanelInit {
    id: &'static str,
    el: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    resizable: Option<ResizableInit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    buttons: Option<Vec<ButtonInit>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResizableInit {
    max_dim: u32,
    min_dim: u32,
    tc: u8,
    cl: u8,
    cr: u8,
    bc: u8,
    key_width: String,
}

#[derive(Debug, Serialize)]
struct ButtonInit {
    id: &'static str,
    active: bool,
    label: String,
    command: &'static str,
    togglable: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AppendToInit {
    append_to: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StyleManagerInit {
    append_to: &'static str,
    sectors: Vec<SectorInit>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SectorInit {
    name: String,
    open: bool,
    build_props: Vec<String>,
    properties: Vec<PropertyInit>,
}

impl SectorInit {
    fn from_sector(sector: &StyleSector) -> Self {
        Self {
            name: sector.name.clone(),
            open: sector.open,
            build_props: sector.build_props.clone(),
            properties: sector.custom.iter().map(PropertyInit::from_custom).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PropertyInit {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(rename = "type")]
    kind: &'static str,
    name: String,
    property: String,
    defaults: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    units: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<Vec<SelectOption>>,
}

impl PropertyInit {
    fn from_custom(custom: &CustomProperty) -> Self {
        let (kind, units, min, options) = match &custom.kind {
            PropertyKind::Integer { units, min } => {
                ("integer", Some(units.clone()), Some(*min), None)
            }
            PropertyKind::Select { options } => ("select", None, None, Some(options.clone())),
        };
        Self {
            id: custom.id.clone(),
            kind,
            name: custom.name.clone(),
            property: custom.property.clone(),
            defaults: custom.default.clone(),
            units,
            min,
            options,
        }
    }
}

#[derive(Debug, Serialize)]
struct RichTextInit {
    disable: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AssetManagerInit {
    embed_as_base64: bool,
}

#[derive(Debug, Serialize)]
struct CanvasInit {
    styles: Vec<String>,
}
