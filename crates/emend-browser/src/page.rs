//! `PageChrome` implemented over the live document.

use emend_core::{AdminError, ContentSnapshot, EditMode, Notice, NoticeLevel, PageChrome};
use wasm_bindgen::JsCast;
use web_sys::{CssStyleSheet, Document, Element, HtmlElement};

/// Edit-button label while previewing.
pub const EDIT_LABEL: &str = "✏️ Edit Page";
/// Edit-button label while editing.
pub const PREVIEW_LABEL: &str = "👁️ Preview";

/// Where the panel finds its pieces in the page template.
#[derive(Debug, Clone)]
pub struct PageSelectors {
    /// Id of the editable content region.
    pub region_id: String,
    /// Id of the style element the panel owns. Replaced on every save,
    /// never duplicated.
    pub style_id: String,
    /// Id of the save button shown while editing.
    pub save_button_id: String,
    /// Selector for the edit/preview toggle button.
    pub edit_button: String,
    /// Class set on `<body>` while the editor is live.
    pub editing_class: String,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            region_id: "main-content".into(),
            style_id: "dynamic-styles".into(),
            save_button_id: "saveBtn".into(),
            edit_button: ".edit-btn".into(),
            editing_class: "editing-mode".into(),
        }
    }
}

/// The host page, addressed through [`PageSelectors`].
#[derive(Debug, Clone)]
pub struct DomPage {
    selectors: PageSelectors,
}

impl DomPage {
    pub fn new(selectors: PageSelectors) -> Self {
        Self { selectors }
    }

    fn document(&self) -> Result<Document, AdminError> {
        web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| AdminError::Dom("document unavailable".into()))
    }

    fn region(&self) -> Result<Element, AdminError> {
        self.document()?
            .get_element_by_id(&self.selectors.region_id)
            .ok_or_else(|| AdminError::MissingElement(format!("#{}", self.selectors.region_id)))
    }

    /// The single style element this panel owns, created in `<head>` on
    /// first use.
    fn style_element(&self, doc: &Document) -> Result<Element, AdminError> {
        if let Some(existing) = doc.get_element_by_id(&self.selectors.style_id) {
            return Ok(existing);
        }
        let created = doc
            .create_element("style")
            .map_err(|e| AdminError::Dom(format!("creating style element: {e:?}")))?;
        created.set_id(&self.selectors.style_id);
        let head = doc
            .head()
            .ok_or_else(|| AdminError::MissingElement("head".into()))?;
        head.append_child(&created)
            .map_err(|e| AdminError::Dom(format!("attaching style element: {e:?}")))?;
        Ok(created)
    }
}

impl Default for DomPage {
    fn default() -> Self {
        Self::new(PageSelectors::default())
    }
}

impl PageChrome for DomPage {
    fn region_html(&self) -> Result<String, AdminError> {
        Ok(self.region()?.inner_html())
    }

    fn capture_styles(&self) -> Result<String, AdminError> {
        let doc = self.document()?;
        let sheets = doc.style_sheets();
        let mut css = String::new();
        for i in 0..sheets.length() {
            let Some(sheet) = sheets.get(i) else {
                continue;
            };
            let Some(sheet) = sheet.dyn_ref::<CssStyleSheet>() else {
                continue;
            };
            // Cross-origin sheets throw on rule access.
            let rules = match sheet.css_rules() {
                Ok(rules) => rules,
                Err(_) => {
                    tracing::debug!(index = i, "skipping unreadable stylesheet");
                    continue;
                }
            };
            for j in 0..rules.length() {
                if let Some(rule) = rules.get(j) {
                    css.push_str(&rule.css_text());
                    css.push('\n');
                }
            }
        }
        Ok(css)
    }

    fn apply_snapshot(&self, snapshot: &ContentSnapshot) -> Result<(), AdminError> {
        let doc = self.document()?;
        // Locate both targets before writing either, so a failure leaves
        // the page as it was.
        let style = self.style_element(&doc)?;
        let region = self.region()?;
        region.set_inner_html(&snapshot.html);
        style.set_text_content(Some(&snapshot.css));
        Ok(())
    }

    fn set_region_visible(&self, visible: bool) -> Result<(), AdminError> {
        let region: HtmlElement = self
            .region()?
            .dyn_into()
            .map_err(|_| AdminError::Dom("content region is not an HTML element".into()))?;
        let display = if visible { "" } else { "none" };
        region
            .style()
            .set_property("display", display)
            .map_err(|e| AdminError::Dom(format!("setting region display: {e:?}")))?;
        Ok(())
    }

    fn set_mode(&self, mode: EditMode) -> Result<(), AdminError> {
        let doc = self.document()?;
        let body = doc
            .body()
            .ok_or_else(|| AdminError::MissingElement("body".into()))?;
        let editing = mode == EditMode::Editing;
        if editing {
            let _ = body.class_list().add_1(&self.selectors.editing_class);
        } else {
            let _ = body.class_list().remove_1(&self.selectors.editing_class);
        }

        // The buttons are optional chrome; a template without them still
        // gets the mode switch.
        match doc.query_selector(&self.selectors.edit_button) {
            Ok(Some(button)) => {
                let label = if editing { PREVIEW_LABEL } else { EDIT_LABEL };
                button.set_text_content(Some(label));
            }
            _ => tracing::debug!(selector = %self.selectors.edit_button, "edit button not on page"),
        }

        match doc.get_element_by_id(&self.selectors.save_button_id) {
            Some(save) => {
                if let Some(save) = save.dyn_ref::<HtmlElement>() {
                    let display = if editing { "inline-block" } else { "none" };
                    let _ = save.style().set_property("display", display);
                }
            }
            None => tracing::debug!(id = %self.selectors.save_button_id, "save button not on page"),
        }
        Ok(())
    }

    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => tracing::info!("{}", notice.message),
            NoticeLevel::Error => tracing::error!("{}", notice.message),
        }
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(&notice.message);
        }
    }
}
