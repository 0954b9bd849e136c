//! Hand-written bindings for the page-global editor and identity libraries.
//!
//! Both ship as plain script tags and hang plain objects off `window`, so
//! every method here is `structural`. Lookups go through `Reflect`, letting
//! a page that omits one of the libraries degrade instead of throwing
//! during module init.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use emend_core::UserInfo;

// === Visual editor binding ===
//
// The editor library registers itself as `window.grapesjs`. `init` goes
// through `catch` so calling it on a page without the library surfaces as
// an error value rather than an aborted module.

#[wasm_bindgen]
extern "C" {
    /// A mounted visual editor instance.
    pub type VisualEditor;

    #[wasm_bindgen(catch, js_namespace = grapesjs, js_name = init)]
    pub fn editor_init(config: &JsValue) -> Result<VisualEditor, JsValue>;

    #[wasm_bindgen(method, catch, structural, js_name = setComponents)]
    pub fn set_components(this: &VisualEditor, html: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, structural, js_name = setStyle)]
    pub fn set_style(this: &VisualEditor, css: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, structural, js_name = getHtml)]
    pub fn get_html(this: &VisualEditor) -> Result<String, JsValue>;

    #[wasm_bindgen(method, catch, structural, js_name = getCss)]
    pub fn get_css(this: &VisualEditor) -> Result<String, JsValue>;

    #[wasm_bindgen(method, structural, js_name = getContainer)]
    pub fn get_container(this: &VisualEditor) -> Option<web_sys::Element>;

    #[wasm_bindgen(method, structural)]
    pub fn on(this: &VisualEditor, event: &str, callback: &js_sys::Function);

    /// The editor's command registry.
    pub type EditorCommands;

    #[wasm_bindgen(method, getter, structural, js_name = Commands)]
    pub fn commands(this: &VisualEditor) -> EditorCommands;

    #[wasm_bindgen(method, structural)]
    pub fn add(this: &EditorCommands, name: &str, command: &JsValue);
}

// === Identity widget binding ===
//
// The auth widget lives at `window.netlifyIdentity` when the page loads
// it. Its absence reads as "auth unavailable", not as an error.

#[wasm_bindgen]
extern "C" {
    /// The page-global identity widget.
    #[derive(Clone)]
    pub type IdentityWidget;

    #[wasm_bindgen(method, structural)]
    pub fn on(this: &IdentityWidget, event: &str, callback: &js_sys::Function);

    #[wasm_bindgen(method, structural, js_name = currentUser)]
    pub fn current_user(this: &IdentityWidget) -> JsValue;

    #[wasm_bindgen(method, structural)]
    pub fn open(this: &IdentityWidget);

    #[wasm_bindgen(method, structural)]
    pub fn logout(this: &IdentityWidget);

    #[wasm_bindgen(method, structural)]
    pub fn init(this: &IdentityWidget);
}

/// Look up the identity widget, if the page loaded it.
pub fn identity_widget() -> Option<IdentityWidget> {
    let window = web_sys::window()?;
    let widget = js_sys::Reflect::get(&window, &JsValue::from_str("netlifyIdentity")).ok()?;
    if widget.is_undefined() || widget.is_null() {
        return None;
    }
    Some(widget.unchecked_into())
}

/// Whether the visual editor library made it onto the page.
pub fn visual_editor_available() -> bool {
    web_sys::window().is_some_and(|window| {
        js_sys::Reflect::has(&window, &JsValue::from_str("grapesjs")).unwrap_or(false)
    })
}

/// Read the fields the panel cares about out of a widget user object.
pub fn user_from_value(value: &JsValue) -> Option<UserInfo> {
    if value.is_undefined() || value.is_null() {
        return None;
    }
    let email = js_sys::Reflect::get(value, &JsValue::from_str("email"))
        .ok()
        .and_then(|v| v.as_string());
    Some(UserInfo { email })
}
