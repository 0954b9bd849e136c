//! Mounting and driving the visual editor library.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use emend_browser::panels;
use emend_core::{AdminError, ContentSnapshot, EditorConfig, EditorSurface, PanelId, PanelLayout};

use crate::bindings::{self, VisualEditor};
use crate::types::InitConfig;

/// Class the editor container gains while editing is live.
const ACTIVE_CLASS: &str = "active";

/// Owns the mounted editor instance plus the panel-toggle commands
/// registered on it.
///
/// Mounting degrades: on a page without the editor library the host still
/// constructs, and every surface operation reports the editor as
/// unavailable instead of panicking.
pub struct VisualEditorHost {
    instance: Option<VisualEditor>,
    _command_handlers: Vec<Closure<dyn FnMut(JsValue)>>,
}

impl VisualEditorHost {
    /// Mount the editor into the configured container.
    pub fn mount(config: &EditorConfig) -> Result<Self, AdminError> {
        if !bindings::visual_editor_available() {
            tracing::warn!("visual editor library not found, editing disabled");
            return Ok(Self {
                instance: None,
                _command_handlers: Vec::new(),
            });
        }

        let init = InitConfig::from_config(config);
        let value = serde_wasm_bindgen::to_value(&init)
            .map_err(|e| AdminError::Editor(format!("editor config not serializable: {e}")))?;
        let instance = bindings::editor_init(&value)
            .map_err(|e| AdminError::Editor(format!("editor init failed: {e:?}")))?;

        let handlers = register_panel_commands(&instance, &config.panels);

        tracing::debug!(container = %config.container, "visual editor mounted");
        Ok(Self {
            instance: Some(instance),
            _command_handlers: handlers,
        })
    }

    /// Whether an editor instance actually mounted.
    pub fn is_mounted(&self) -> bool {
        self.instance.is_some()
    }

    /// Subscribe to the editor's change feed.
    pub fn on_change(&self, callback: &js_sys::Function) {
        if let Some(instance) = &self.instance {
            instance.on("update", callback);
        }
    }

    fn instance(&self) -> Result<&VisualEditor, AdminError> {
        self.instance
            .as_ref()
            .ok_or_else(|| AdminError::Editor("editor library unavailable".into()))
    }

    fn container(&self) -> Result<web_sys::Element, AdminError> {
        self.instance()?
            .get_container()
            .ok_or_else(|| AdminError::MissingElement("editor container".into()))
    }
}

impl EditorSurface for VisualEditorHost {
    fn load_content(&self, html: &str, css: &str) -> Result<(), AdminError> {
        let instance = self.instance()?;
        instance
            .set_components(html)
            .map_err(|e| AdminError::Editor(format!("loading markup: {e:?}")))?;
        instance
            .set_style(css)
            .map_err(|e| AdminError::Editor(format!("loading styles: {e:?}")))?;
        Ok(())
    }

    fn extract(&self) -> Result<ContentSnapshot, AdminError> {
        let instance = self.instance()?;
        let html = instance
            .get_html()
            .map_err(|e| AdminError::Editor(format!("reading markup: {e:?}")))?;
        let css = instance
            .get_css()
            .map_err(|e| AdminError::Editor(format!("reading styles: {e:?}")))?;
        Ok(ContentSnapshot::new(html, css))
    }

    fn set_visible(&self, visible: bool) -> Result<(), AdminError> {
        let container = self.container()?;
        let result = if visible {
            container.class_list().add_1(ACTIVE_CLASS)
        } else {
            container.class_list().remove_1(ACTIVE_CLASS)
        };
        result.map_err(|e| AdminError::Dom(format!("toggling editor visibility: {e:?}")))
    }

    fn set_panel_visible(&self, panel: PanelId, visible: bool) -> Result<(), AdminError> {
        panels::set_panel_display(&self.container()?, panel, visible)
    }
}

/// Register one editor command per switcher button; running the command
/// shows the matching panel container and stopping it hides it again.
fn register_panel_commands(
    instance: &VisualEditor,
    panels: &PanelLayout,
) -> Vec<Closure<dyn FnMut(JsValue)>> {
    let mut handlers = Vec::with_capacity(panels.buttons.len() * 2);
    let commands = instance.commands();

    for button in &panels.buttons {
        let panel = button.panel;

        let run = Closure::<dyn FnMut(JsValue)>::new(move |editor: JsValue| {
            toggle_panel(&editor, panel, true);
        });
        let stop = Closure::<dyn FnMut(JsValue)>::new(move |editor: JsValue| {
            toggle_panel(&editor, panel, false);
        });

        let command = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&command, &JsValue::from_str("run"), run.as_ref());
        let _ = js_sys::Reflect::set(&command, &JsValue::from_str("stop"), stop.as_ref());
        commands.add(panel.command_name(), &command);

        handlers.push(run);
        handlers.push(stop);
    }

    handlers
}

// Commands receive the editor instance as their argument, so panel lookup
// starts from the container of whichever editor ran the command.
fn toggle_panel(editor: &JsValue, panel: PanelId, visible: bool) {
    let editor: &VisualEditor = editor.unchecked_ref();
    let Some(container) = editor.get_container() else {
        tracing::warn!(
            command = panel.command_name(),
            "panel command ran without an editor container"
        );
        return;
    };
    if let Err(e) = panels::set_panel_display(&container, panel, visible) {
        tracing::warn!(command = panel.command_name(), "panel toggle failed: {e}");
    }
}
