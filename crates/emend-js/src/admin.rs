//! The exported admin panel handle and its page wiring.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use emend_browser::{AdminControls, DomPage, PageSelectors, StrategyStore, events};
use emend_core::session::{EDIT_ERROR_NOTICE, SAVE_ERROR_NOTICE, SAVED_NOTICE};
use emend_core::{
    AuthEvent, AuthGate, AuthProvider, AuthTransition, AutosavePolicy, CancelOutcome,
    ContentStore, EditSession, EnterOutcome, Notice, SaveOutcome, UserInfo,
};

use crate::bindings::{self, IdentityWidget};
use crate::host::VisualEditorHost;
use crate::types::JsAdminConfig;

type SharedSession = Rc<RefCell<EditSession<WidgetAuth, VisualEditorHost, DomPage>>>;

/// [`AuthProvider`] over the page-global identity widget.
#[derive(Clone)]
pub struct WidgetAuth {
    widget: Option<IdentityWidget>,
}

impl WidgetAuth {
    fn new(widget: Option<IdentityWidget>) -> Self {
        Self { widget }
    }
}

impl AuthProvider for WidgetAuth {
    fn current_user(&self) -> Option<UserInfo> {
        let widget = self.widget.as_ref()?;
        bindings::user_from_value(&widget.current_user())
    }

    fn request_login(&self) {
        match &self.widget {
            Some(widget) => widget.open(),
            None => tracing::debug!("login requested without an identity widget"),
        }
    }

    fn request_logout(&self) {
        if let Some(widget) = &self.widget {
            widget.logout();
        }
    }
}

/// The admin panel, as seen from JavaScript.
///
/// Constructing it wires the whole panel: the identity widget feeds the
/// auth gate, the visual editor mounts into its container, and the page's
/// own buttons get their click handlers. The handle's methods mirror those
/// buttons so a page can also drive the panel programmatically.
#[wasm_bindgen]
pub struct JsAdmin {
    inner: SharedSession,
    store: Rc<StrategyStore>,
    auth: WidgetAuth,
    _listeners: Vec<EventListener>,
    _identity_callbacks: Vec<Closure<dyn FnMut(JsValue)>>,
    _editor_update: Option<Closure<dyn FnMut(JsValue)>>,
}

#[wasm_bindgen]
impl JsAdmin {
    /// Wire the panel to the current page.
    ///
    /// `config` may be `undefined`, or an options object; see
    /// [`JsAdminConfig`].
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsAdmin, JsError> {
        let js_config: JsAdminConfig = if config.is_undefined() || config.is_null() {
            JsAdminConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsError::new(&format!("invalid admin config: {e}")))?
        };
        let config = js_config.into_editor_config();

        let store = Rc::new(StrategyStore::from_strategy(&config.storage));
        let autosave =
            AutosavePolicy::from_strategy(&config.storage).map(|p| Rc::new(RefCell::new(p)));

        let host = VisualEditorHost::mount(&config)
            .map_err(|e| JsError::new(&format!("mounting editor failed: {e}")))?;

        let widget = bindings::identity_widget();
        if widget.is_none() {
            tracing::warn!("identity widget not loaded, admin login unavailable");
        }
        let gate = Rc::new(RefCell::new(match &widget {
            Some(_) => AuthGate::new(),
            None => AuthGate::unavailable(),
        }));

        let selectors = PageSelectors::default();
        let page = DomPage::new(selectors.clone());
        let inner: SharedSession = Rc::new(RefCell::new(EditSession::new(
            WidgetAuth::new(widget.clone()),
            host,
            page,
        )));
        let controls = AdminControls::new();

        {
            let inner = inner.clone();
            let controls = controls.clone();
            gate.borrow_mut().on_change(move |authenticated| {
                controls.sync(authenticated);
                let transition = inner.borrow_mut().handle_auth_change(authenticated);
                match transition {
                    Ok(AuthTransition::SignedOutDiscardedEdits) => {
                        tracing::info!("open edits discarded on logout");
                    }
                    Ok(_) => {}
                    Err(e) => tracing::error!("auth transition failed: {e}"),
                }
            });
        }

        let mut identity_callbacks: Vec<Closure<dyn FnMut(JsValue)>> = Vec::new();
        if let Some(widget) = &widget {
            let on_init = {
                let gate = gate.clone();
                let widget = widget.clone();
                Closure::<dyn FnMut(JsValue)>::new(move |user: JsValue| {
                    let user = bindings::user_from_value(&user);
                    let signed_in = {
                        let mut gate = gate.borrow_mut();
                        gate.apply(AuthEvent::Init(user));
                        gate.is_authenticated()
                    };
                    // Deep link straight to the login dialog: /#admin.
                    if !signed_in && admin_hash_requested() {
                        widget.open();
                    }
                })
            };
            widget.on("init", on_init.as_ref().unchecked_ref());
            identity_callbacks.push(on_init);

            let on_login = {
                let gate = gate.clone();
                Closure::<dyn FnMut(JsValue)>::new(move |user: JsValue| {
                    let Some(user) = bindings::user_from_value(&user) else {
                        return;
                    };
                    gate.borrow_mut().apply(AuthEvent::Login(user));
                })
            };
            widget.on("login", on_login.as_ref().unchecked_ref());
            identity_callbacks.push(on_login);

            let on_logout = {
                let gate = gate.clone();
                Closure::<dyn FnMut(JsValue)>::new(move |_user: JsValue| {
                    gate.borrow_mut().apply(AuthEvent::Logout);
                })
            };
            widget.on("logout", on_logout.as_ref().unchecked_ref());
            identity_callbacks.push(on_logout);

            widget.init();
        }

        controls.sync(inner.borrow().is_authenticated());

        {
            let inner = inner.clone();
            let store = store.clone();
            spawn_local(async move {
                match store.load().await {
                    Ok(Some(snapshot)) => {
                        if let Err(e) = inner.borrow().preload(&snapshot) {
                            tracing::warn!("applying stored content failed: {e}");
                        }
                    }
                    Ok(None) => tracing::debug!("no stored content to apply"),
                    Err(e) => tracing::warn!("loading stored content failed: {e}"),
                }
            });
        }

        let mut editor_update = None;
        if let Some(policy) = &autosave {
            let callback = {
                let policy = policy.clone();
                let inner = inner.clone();
                let store = store.clone();
                Closure::<dyn FnMut(JsValue)>::new(move |_: JsValue| {
                    if !policy.borrow_mut().record_change() {
                        return;
                    }
                    // Update events also fire while the session itself is
                    // writing into the editor; those are not user edits.
                    let Ok(session) = inner.try_borrow() else {
                        return;
                    };
                    let snapshot = match session.working_snapshot() {
                        Ok(Some(snapshot)) => snapshot,
                        Ok(None) => return,
                        Err(e) => {
                            tracing::debug!("autosave skipped: {e}");
                            return;
                        }
                    };
                    drop(session);
                    let store = store.clone();
                    spawn_local(async move {
                        if let Err(e) = store.store(&snapshot).await {
                            tracing::warn!("autosave failed: {e}");
                        }
                    });
                })
            };
            inner
                .borrow()
                .editor()
                .on_change(callback.as_ref().unchecked_ref());
            editor_update = Some(callback);
        }

        let document = web_sys::window().and_then(|w| w.document());
        let mut listeners = Vec::new();

        if let Some(doc) = &document {
            let escape = {
                let inner = inner.clone();
                events::on_escape(doc, move || {
                    let cancelled = inner.borrow_mut().cancel();
                    match cancelled {
                        Ok(CancelOutcome::Cancelled) => {
                            tracing::debug!("editing cancelled from keyboard");
                        }
                        Ok(CancelOutcome::NotEditing) => {}
                        Err(e) => tracing::error!("cancelling edit failed: {e}"),
                    }
                })
            };
            listeners.push(escape);

            if let Ok(Some(edit_button)) = doc.query_selector(&selectors.edit_button) {
                let inner = inner.clone();
                listeners.push(events::on_click(&edit_button, move || toggle_mode(&inner)));
            }

            if let Some(save_button) = doc.get_element_by_id(&selectors.save_button_id) {
                let inner = inner.clone();
                let store = store.clone();
                listeners.push(events::on_click(&save_button, move || {
                    persist_content(&inner, &store);
                }));
            }
        }

        let auth = WidgetAuth::new(widget);
        if let Some(auth_button) = controls.auth_button() {
            let auth = auth.clone();
            listeners.push(events::on_click(&auth_button, move || flip_auth(&auth)));
        }

        if let Some(window) = web_sys::window() {
            let inner = inner.clone();
            listeners.push(events::on_before_unload(&window, move || {
                inner.borrow().unload_prompt()
            }));
        }

        Ok(JsAdmin {
            inner,
            store,
            auth,
            _listeners: listeners,
            _identity_callbacks: identity_callbacks,
            _editor_update: editor_update,
        })
    }

    /// Open the editor over the page content.
    #[wasm_bindgen(js_name = startEditing)]
    pub fn start_editing(&self) {
        enter_editing(&self.inner);
    }

    /// Apply the editor content to the page and persist it.
    #[wasm_bindgen(js_name = saveContent)]
    pub fn save_content(&self) {
        persist_content(&self.inner, &self.store);
    }

    /// Drop open edits and return to preview.
    #[wasm_bindgen(js_name = cancelEditing)]
    pub fn cancel_editing(&self) {
        leave_editing(&self.inner);
    }

    /// Flip between editing and preview.
    #[wasm_bindgen(js_name = toggleEditMode)]
    pub fn toggle_edit_mode(&self) {
        toggle_mode(&self.inner);
    }

    /// Log out when signed in, open the login dialog otherwise.
    #[wasm_bindgen(js_name = toggleAuth)]
    pub fn toggle_auth(&self) {
        flip_auth(&self.auth);
    }

    #[wasm_bindgen(js_name = isEditing)]
    pub fn is_editing(&self) -> bool {
        self.inner.borrow().is_editing()
    }

    #[wasm_bindgen(js_name = isAuthenticated)]
    pub fn is_authenticated(&self) -> bool {
        self.inner.borrow().is_authenticated()
    }
}

fn enter_editing(inner: &SharedSession) {
    // A page without the editor library stays read-only; that is the
    // degraded mode, not a runtime failure worth an alert.
    if !inner.borrow().editor().is_mounted() {
        tracing::warn!("edit requested but the editor library never loaded");
        return;
    }
    let outcome = inner.borrow_mut().enter();
    match outcome {
        Ok(EnterOutcome::Entered) => {}
        Ok(EnterOutcome::AlreadyEditing) => tracing::debug!("editor already open"),
        Ok(EnterOutcome::LoginRequired) => tracing::debug!("login required before editing"),
        Err(e) => {
            tracing::error!("entering edit mode failed: {e}");
            inner.borrow().notify(Notice::error(EDIT_ERROR_NOTICE));
        }
    }
}

fn leave_editing(inner: &SharedSession) {
    let outcome = inner.borrow_mut().cancel();
    match outcome {
        Ok(CancelOutcome::Cancelled) => tracing::debug!("returned to preview without saving"),
        Ok(CancelOutcome::NotEditing) => {}
        Err(e) => tracing::error!("leaving edit mode failed: {e}"),
    }
}

fn toggle_mode(inner: &SharedSession) {
    let editing = inner.borrow().is_editing();
    if editing {
        leave_editing(inner);
    } else {
        enter_editing(inner);
    }
}

// Applies the edits to the page synchronously, then persists in the
// background and reports the outcome through the page chrome.
fn persist_content(inner: &SharedSession, store: &Rc<StrategyStore>) {
    let outcome = inner.borrow_mut().save();
    let snapshot = match outcome {
        Ok(SaveOutcome::Saved(snapshot)) => snapshot,
        Ok(SaveOutcome::NotEditing) => {
            tracing::debug!("save requested outside an edit session");
            return;
        }
        Err(e) => {
            tracing::error!("applying edited content failed: {e}");
            inner.borrow().notify(Notice::error(SAVE_ERROR_NOTICE));
            return;
        }
    };

    let inner = inner.clone();
    let store = store.clone();
    spawn_local(async move {
        match store.store(&snapshot).await {
            Ok(()) => inner.borrow().notify(Notice::info(SAVED_NOTICE)),
            Err(e) => {
                tracing::error!("persisting content failed: {e}");
                inner.borrow().notify(Notice::error(SAVE_ERROR_NOTICE));
            }
        }
    });
}

// The widget fires its own logout event, which reaches the session through
// the auth gate; driving the widget directly here keeps the session
// borrow out of that callback chain.
fn flip_auth(auth: &WidgetAuth) {
    if auth.current_user().is_some() {
        auth.request_logout();
    } else {
        auth.request_login();
    }
}

fn admin_hash_requested() -> bool {
    web_sys::window()
        .and_then(|window| window.location().hash().ok())
        .is_some_and(|hash| hash == "#admin")
}

#[cfg(test)]
mod tests {
    use super::*;

    // The auth button handler and the session each hold their own copy of
    // the provider, so it has to clone even when the widget never loaded.
    #[test]
    fn test_widget_auth_clone_without_widget() {
        let auth = WidgetAuth::new(None);
        let copy = auth.clone();

        assert!(auth.current_user().is_none());
        assert!(copy.current_user().is_none());
    }
}
