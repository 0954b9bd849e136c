//! The floating admin controls bar.
//!
//! Hidden from anonymous visitors, revealed by a `show` class once an
//! admin session is active. The auth button doubles as login and logout.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

pub const LOGIN_LABEL: &str = "Login";
pub const LOGOUT_LABEL: &str = "Logout";
const LOGOUT_COLOR: &str = "#e74c3c";

#[derive(Debug, Clone)]
pub struct AdminControls {
    container_id: String,
    auth_button_id: String,
}

impl AdminControls {
    pub fn new() -> Self {
        Self {
            container_id: "adminControls".into(),
            auth_button_id: "authButton".into(),
        }
    }

    fn document(&self) -> Option<Document> {
        web_sys::window()?.document()
    }

    fn container(&self) -> Option<Element> {
        self.document()?.get_element_by_id(&self.container_id)
    }

    /// The auth button element, when the page has one.
    pub fn auth_button(&self) -> Option<Element> {
        self.document()?.get_element_by_id(&self.auth_button_id)
    }

    /// Reveal the controls bar. Safe to call repeatedly.
    pub fn show(&self) {
        let Some(container) = self.container() else {
            tracing::debug!(id = %self.container_id, "admin controls not on page");
            return;
        };
        let _ = container.class_list().add_1("show");
    }

    /// Hide the controls bar. Safe to call repeatedly.
    pub fn hide(&self) {
        let Some(container) = self.container() else {
            return;
        };
        let _ = container.class_list().remove_1("show");
    }

    /// Point the controls at the session: bar visibility plus the auth
    /// button's face.
    pub fn sync(&self, authenticated: bool) {
        if authenticated {
            self.show();
        } else {
            self.hide();
        }

        let Some(button) = self
            .document()
            .and_then(|doc| doc.get_element_by_id(&self.auth_button_id))
        else {
            tracing::debug!(id = %self.auth_button_id, "auth button not on page");
            return;
        };
        let (label, color) = if authenticated {
            (LOGOUT_LABEL, LOGOUT_COLOR)
        } else {
            (LOGIN_LABEL, "")
        };
        button.set_text_content(Some(label));
        if let Some(button) = button.dyn_ref::<HtmlElement>() {
            let _ = button.style().set_property("color", color);
        }
    }
}

impl Default for AdminControls {
    fn default() -> Self {
        Self::new()
    }
}
