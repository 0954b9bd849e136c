//! Locating and toggling the editor's side panels.
//!
//! Panel containers are looked up relative to the editor's own row rather
//! than the whole document, so two editors on one page cannot grab each
//! other's panels.

use emend_core::{AdminError, PanelId};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

/// Row element holding the canvas and the panel dock.
pub const PANEL_ROW_SELECTOR: &str = ".editor-row";

/// Find a panel's container within the row the editor sits in.
pub fn panel_container(editor_container: &Element, panel: PanelId) -> Result<Element, AdminError> {
    let row = editor_container
        .closest(PANEL_ROW_SELECTOR)
        .map_err(|e| AdminError::Dom(format!("row lookup: {e:?}")))?
        .ok_or_else(|| AdminError::MissingElement(PANEL_ROW_SELECTOR.into()))?;
    row.query_selector(panel.container_class())
        .map_err(|e| AdminError::Dom(format!("panel lookup: {e:?}")))?
        .ok_or_else(|| AdminError::MissingElement(panel.container_class().into()))
}

/// Show or hide one panel's container.
pub fn set_panel_display(
    editor_container: &Element,
    panel: PanelId,
    visible: bool,
) -> Result<(), AdminError> {
    let container: HtmlElement = panel_container(editor_container, panel)?
        .dyn_into()
        .map_err(|_| AdminError::Dom("panel container is not an HTML element".into()))?;
    let display = if visible { "" } else { "none" };
    container
        .style()
        .set_property("display", display)
        .map_err(|e| AdminError::Dom(format!("setting panel display: {e:?}")))?;
    Ok(())
}
