//! The edit session state machine.
//!
//! A page is either previewing (live region visible, editor hidden) or
//! editing (editor visible over the region's content). Every transition
//! between the two funnels through [`EditSession`], which owns the three
//! capability seams and keeps the recorded flags in step with what the page
//! actually shows.

use tracing::{debug, info, warn};

use crate::auth::AuthProvider;
use crate::editor::EditorSurface;
use crate::error::AdminError;
use crate::page::{EditMode, Notice, PageChrome};
use crate::types::ContentSnapshot;

/// Prompt shown when the page is about to unload with unsaved edits.
pub const UNSAVED_WARNING: &str = "You have unsaved changes. Are you sure you want to leave?";

/// Notice raised once edited content has been persisted.
pub const SAVED_NOTICE: &str = "Content saved successfully!";

/// Notice raised when persisting edited content fails.
pub const SAVE_ERROR_NOTICE: &str = "Error saving content. Please try again.";

/// Notice raised when switching into editing fails.
pub const EDIT_ERROR_NOTICE: &str = "Error entering edit mode. Please try again.";

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Session {
    pub authenticated: bool,
    pub editing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterOutcome {
    /// The editor is now live over the page content.
    Entered,
    /// Already editing; nothing changed.
    AlreadyEditing,
    /// No signed-in user; the login dialog was opened instead.
    LoginRequired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Content was applied to the page; the snapshot still needs persisting.
    Saved(ContentSnapshot),
    NotEditing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    Cancelled,
    NotEditing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthTransition {
    SignedIn,
    SignedOut,
    /// Signed out while editing; the open edits were dropped.
    SignedOutDiscardedEdits,
    Unchanged,
}

/// Drives the page between preview and editing.
pub struct EditSession<A, E, P> {
    auth: A,
    editor: E,
    page: P,
    session: Session,
}

impl<A: AuthProvider, E: EditorSurface, P: PageChrome> EditSession<A, E, P> {
    /// The authenticated flag is seeded from the widget so a page reload
    /// mid-session starts out signed in.
    pub fn new(auth: A, editor: E, page: P) -> Self {
        let authenticated = auth.current_user().is_some();
        Self {
            auth,
            editor,
            page,
            session: Session {
                authenticated,
                editing: false,
            },
        }
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn is_editing(&self) -> bool {
        self.session.editing
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.authenticated
    }

    /// The editor surface this session drives, for wiring that lives
    /// outside the session such as change subscriptions.
    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Switch the page into editing, loading the live region into the editor.
    ///
    /// Without a signed-in user this opens the login dialog instead of
    /// entering.
    pub fn enter(&mut self) -> Result<EnterOutcome, AdminError> {
        if self.session.editing {
            return Ok(EnterOutcome::AlreadyEditing);
        }
        if !self.session.authenticated {
            debug!("edit requested without a session, opening login");
            self.auth.request_login();
            return Ok(EnterOutcome::LoginRequired);
        }
        let html = self.page.region_html()?;
        let css = self.page.capture_styles()?;
        self.editor.load_content(&html, &css)?;
        self.page.set_region_visible(false)?;
        self.editor.set_visible(true)?;
        self.page.set_mode(EditMode::Editing)?;
        self.session.editing = true;
        info!(html_len = html.len(), "editing started");
        Ok(EnterOutcome::Entered)
    }

    /// Apply the editor's content back to the page and return to preview.
    ///
    /// Extraction and application run before anything else, so a failure in
    /// either leaves the session editing and the page untouched. A failure
    /// in the view swaps after them also keeps the session editing, with
    /// the new content already applied, so retrying the save is safe.
    pub fn save(&mut self) -> Result<SaveOutcome, AdminError> {
        if !self.session.editing {
            return Ok(SaveOutcome::NotEditing);
        }
        let snapshot = self.editor.extract()?;
        self.page.apply_snapshot(&snapshot)?;
        self.editor.set_visible(false)?;
        self.page.set_region_visible(true)?;
        self.page.set_mode(EditMode::Preview)?;
        self.session.editing = false;
        info!(
            html_len = snapshot.html.len(),
            css_len = snapshot.css.len(),
            "content applied to page"
        );
        Ok(SaveOutcome::Saved(snapshot))
    }

    /// Drop the open edits and return to preview.
    pub fn cancel(&mut self) -> Result<CancelOutcome, AdminError> {
        if !self.session.editing {
            return Ok(CancelOutcome::NotEditing);
        }
        // Leave the session first: even a failed restore must not keep a
        // cancelled edit alive.
        self.session.editing = false;
        self.restore_preview()?;
        info!("editing cancelled, edits dropped");
        Ok(CancelOutcome::Cancelled)
    }

    /// Fold an authentication change into the session.
    ///
    /// Signing out mid-edit force-closes the editor without a confirmation
    /// prompt; whoever ended the session decided the edits don't land.
    pub fn handle_auth_change(&mut self, authenticated: bool) -> Result<AuthTransition, AdminError> {
        if self.session.authenticated == authenticated {
            return Ok(AuthTransition::Unchanged);
        }
        self.session.authenticated = authenticated;
        if authenticated {
            return Ok(AuthTransition::SignedIn);
        }
        if self.session.editing {
            // Editing must never outlive the admin session.
            self.session.editing = false;
            warn!("signed out mid-edit, unsaved changes discarded");
            self.restore_preview()?;
            return Ok(AuthTransition::SignedOutDiscardedEdits);
        }
        Ok(AuthTransition::SignedOut)
    }

    /// Prime the page with a previously stored snapshot.
    ///
    /// Skipped while editing so a slow load cannot clobber open edits.
    pub fn preload(&self, snapshot: &ContentSnapshot) -> Result<(), AdminError> {
        if self.session.editing {
            debug!("stored content arrived mid-edit, ignored");
            return Ok(());
        }
        self.page.apply_snapshot(snapshot)
    }

    /// Current editor content, available only while editing.
    pub fn working_snapshot(&self) -> Result<Option<ContentSnapshot>, AdminError> {
        if !self.session.editing {
            return Ok(None);
        }
        self.editor.extract().map(Some)
    }

    /// Prompt to show before the page unloads, if edits would be lost.
    pub fn unload_prompt(&self) -> Option<&'static str> {
        self.session.editing.then_some(UNSAVED_WARNING)
    }

    /// Raise a notice through the page chrome.
    pub fn notify(&self, notice: Notice) {
        self.page.notify(notice);
    }

    fn restore_preview(&self) -> Result<(), AdminError> {
        self.editor.set_visible(false)?;
        self.page.set_region_visible(true)?;
        self.page.set_mode(EditMode::Preview)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::auth::UserInfo;
    use crate::editor::PanelId;
    use crate::page::NoticeLevel;

    #[derive(Clone, Default)]
    struct FakeAuth {
        user: Rc<RefCell<Option<UserInfo>>>,
        login_calls: Rc<Cell<u32>>,
    }

    impl FakeAuth {
        fn signed_in() -> Self {
            let auth = Self::default();
            *auth.user.borrow_mut() = Some(UserInfo {
                email: Some("admin@example.com".into()),
            });
            auth
        }
    }

    impl AuthProvider for FakeAuth {
        fn current_user(&self) -> Option<UserInfo> {
            self.user.borrow().clone()
        }

        fn request_login(&self) {
            self.login_calls.set(self.login_calls.get() + 1);
        }

        fn request_logout(&self) {}
    }

    #[derive(Clone, Default)]
    struct FakeEditor {
        content: Rc<RefCell<ContentSnapshot>>,
        visible: Rc<Cell<bool>>,
        fail_load: Rc<Cell<bool>>,
        fail_extract: Rc<Cell<bool>>,
    }

    impl EditorSurface for FakeEditor {
        fn load_content(&self, html: &str, css: &str) -> Result<(), AdminError> {
            if self.fail_load.get() {
                return Err(AdminError::Editor("editor rejected content".into()));
            }
            *self.content.borrow_mut() = ContentSnapshot::new(html, css);
            Ok(())
        }

        fn extract(&self) -> Result<ContentSnapshot, AdminError> {
            if self.fail_extract.get() {
                return Err(AdminError::Editor("editor detached".into()));
            }
            Ok(self.content.borrow().clone())
        }

        fn set_visible(&self, visible: bool) -> Result<(), AdminError> {
            self.visible.set(visible);
            Ok(())
        }

        fn set_panel_visible(&self, _panel: PanelId, _visible: bool) -> Result<(), AdminError> {
            Ok(())
        }
    }

    #[derive(Clone)]
    struct FakePage {
        html: Rc<RefCell<String>>,
        css: Rc<RefCell<String>>,
        region_visible: Rc<Cell<bool>>,
        mode: Rc<Cell<EditMode>>,
        fail_mode: Rc<Cell<bool>>,
        notices: Rc<RefCell<Vec<Notice>>>,
    }

    impl Default for FakePage {
        fn default() -> Self {
            Self {
                html: Rc::new(RefCell::new("<p>live</p>".into())),
                css: Rc::new(RefCell::new("p { color: blue; }".into())),
                region_visible: Rc::new(Cell::new(true)),
                mode: Rc::new(Cell::new(EditMode::Preview)),
                fail_mode: Rc::new(Cell::new(false)),
                notices: Rc::new(RefCell::new(Vec::new())),
            }
        }
    }

    impl PageChrome for FakePage {
        fn region_html(&self) -> Result<String, AdminError> {
            Ok(self.html.borrow().clone())
        }

        fn capture_styles(&self) -> Result<String, AdminError> {
            Ok(self.css.borrow().clone())
        }

        fn apply_snapshot(&self, snapshot: &ContentSnapshot) -> Result<(), AdminError> {
            *self.html.borrow_mut() = snapshot.html.clone();
            *self.css.borrow_mut() = snapshot.css.clone();
            Ok(())
        }

        fn set_region_visible(&self, visible: bool) -> Result<(), AdminError> {
            self.region_visible.set(visible);
            Ok(())
        }

        fn set_mode(&self, mode: EditMode) -> Result<(), AdminError> {
            if self.fail_mode.get() {
                return Err(AdminError::Dom("body class unwritable".into()));
            }
            self.mode.set(mode);
            Ok(())
        }

        fn notify(&self, notice: Notice) {
            self.notices.borrow_mut().push(notice);
        }
    }

    fn session() -> (EditSession<FakeAuth, FakeEditor, FakePage>, FakeAuth, FakeEditor, FakePage) {
        let auth = FakeAuth::signed_in();
        let editor = FakeEditor::default();
        let page = FakePage::default();
        let session = EditSession::new(auth.clone(), editor.clone(), page.clone());
        (session, auth, editor, page)
    }

    fn editing_session() -> (EditSession<FakeAuth, FakeEditor, FakePage>, FakeAuth, FakeEditor, FakePage) {
        let (mut session, auth, editor, page) = session();
        assert_eq!(session.enter().unwrap(), EnterOutcome::Entered);
        (session, auth, editor, page)
    }

    #[test]
    fn test_constructor_seeds_auth_from_widget() {
        let (session, ..) = session();
        assert!(session.is_authenticated());
        assert!(!session.is_editing());

        let signed_out =
            EditSession::new(FakeAuth::default(), FakeEditor::default(), FakePage::default());
        assert!(!signed_out.is_authenticated());
    }

    #[test]
    fn test_unauthenticated_enter_opens_login_once() {
        let auth = FakeAuth::default();
        let mut session =
            EditSession::new(auth.clone(), FakeEditor::default(), FakePage::default());

        assert_eq!(session.enter().unwrap(), EnterOutcome::LoginRequired);
        assert_eq!(auth.login_calls.get(), 1);
        assert!(!session.is_editing());
    }

    #[test]
    fn test_enter_loads_region_into_editor() {
        let (session, _auth, editor, page) = editing_session();

        assert!(session.is_editing());
        assert_eq!(editor.content.borrow().html, "<p>live</p>");
        assert_eq!(editor.content.borrow().css, "p { color: blue; }");
        assert!(editor.visible.get());
        assert!(!page.region_visible.get());
        assert_eq!(page.mode.get(), EditMode::Editing);
    }

    #[test]
    fn test_failed_editor_load_keeps_session_idle() {
        let (mut session, _auth, editor, page) = session();
        editor.fail_load.set(true);

        assert!(session.enter().is_err());
        assert!(!session.is_editing());
        assert!(page.region_visible.get());
        assert_eq!(page.mode.get(), EditMode::Preview);
    }

    #[test]
    fn test_enter_while_editing_is_noop() {
        let (mut session, _auth, editor, _page) = editing_session();
        *editor.content.borrow_mut() = ContentSnapshot::new("<p>edited</p>", "");

        assert_eq!(session.enter().unwrap(), EnterOutcome::AlreadyEditing);
        assert_eq!(editor.content.borrow().html, "<p>edited</p>");
    }

    #[test]
    fn test_save_applies_snapshot_and_returns_to_idle() {
        let (mut session, _auth, editor, page) = editing_session();
        *editor.content.borrow_mut() = ContentSnapshot::new("<p>edited</p>", "p { color: red; }");

        let outcome = session.save().unwrap();
        assert_eq!(
            outcome,
            SaveOutcome::Saved(ContentSnapshot::new("<p>edited</p>", "p { color: red; }"))
        );
        assert!(!session.is_editing());
        assert_eq!(*page.html.borrow(), "<p>edited</p>");
        assert_eq!(*page.css.borrow(), "p { color: red; }");
        assert!(page.region_visible.get());
        assert!(!editor.visible.get());
        assert_eq!(page.mode.get(), EditMode::Preview);
    }

    #[test]
    fn test_save_while_idle_touches_nothing() {
        let (mut session, _auth, _editor, page) = session();

        assert_eq!(session.save().unwrap(), SaveOutcome::NotEditing);
        assert_eq!(*page.html.borrow(), "<p>live</p>");
        assert!(page.notices.borrow().is_empty());
    }

    #[test]
    fn test_failed_extract_keeps_session_editing() {
        let (mut session, _auth, editor, page) = editing_session();
        editor.fail_extract.set(true);

        assert!(session.save().is_err());
        assert!(session.is_editing());
        assert_eq!(*page.html.borrow(), "<p>live</p>");
        assert!(!page.region_visible.get());
        assert_eq!(page.mode.get(), EditMode::Editing);
    }

    #[test]
    fn test_failed_view_swap_keeps_session_editing() {
        let (mut session, _auth, editor, page) = editing_session();
        *editor.content.borrow_mut() = ContentSnapshot::new("<p>edited</p>", "");
        page.fail_mode.set(true);

        assert!(session.save().is_err());
        assert!(session.is_editing());
        assert_eq!(*page.html.borrow(), "<p>edited</p>");

        page.fail_mode.set(false);
        assert!(matches!(session.save().unwrap(), SaveOutcome::Saved(_)));
        assert!(!session.is_editing());
    }

    #[test]
    fn test_cancel_discards_edits() {
        let (mut session, _auth, editor, page) = editing_session();
        *editor.content.borrow_mut() = ContentSnapshot::new("<p>edited</p>", "");

        assert_eq!(session.cancel().unwrap(), CancelOutcome::Cancelled);
        assert!(!session.is_editing());
        assert_eq!(*page.html.borrow(), "<p>live</p>");
        assert!(page.region_visible.get());
        assert!(!editor.visible.get());
        assert_eq!(page.mode.get(), EditMode::Preview);
    }

    #[test]
    fn test_cancel_while_idle_is_noop() {
        let (mut session, _auth, _editor, page) = session();

        assert_eq!(session.cancel().unwrap(), CancelOutcome::NotEditing);
        assert!(page.region_visible.get());
        assert_eq!(page.mode.get(), EditMode::Preview);
    }

    #[test]
    fn test_logout_mid_edit_discards_and_repairs_invariant() {
        let (mut session, _auth, editor, page) = editing_session();
        *editor.content.borrow_mut() = ContentSnapshot::new("<p>edited</p>", "");

        let transition = session.handle_auth_change(false).unwrap();
        assert_eq!(transition, AuthTransition::SignedOutDiscardedEdits);
        assert_eq!(session.session(), Session::default());
        assert_eq!(*page.html.borrow(), "<p>live</p>");
        assert!(page.region_visible.get());
        assert_eq!(page.mode.get(), EditMode::Preview);
    }

    #[test]
    fn test_auth_change_without_transition_is_unchanged() {
        let (mut session, ..) = session();

        assert_eq!(session.handle_auth_change(true).unwrap(), AuthTransition::Unchanged);
        assert_eq!(session.handle_auth_change(false).unwrap(), AuthTransition::SignedOut);
        assert_eq!(session.handle_auth_change(true).unwrap(), AuthTransition::SignedIn);
    }

    #[test]
    fn test_preload_skipped_while_editing() {
        let (editing, _auth, _editor, page) = editing_session();
        let stored = ContentSnapshot::new("<p>stored</p>", "");

        editing.preload(&stored).unwrap();
        assert_eq!(*page.html.borrow(), "<p>live</p>");

        let (idle, _auth, _editor, page) = session();
        idle.preload(&stored).unwrap();
        assert_eq!(*page.html.borrow(), "<p>stored</p>");
    }

    #[test]
    fn test_working_snapshot_only_while_editing() {
        let (session, ..) = session();
        assert_eq!(session.working_snapshot().unwrap(), None);

        let (session, _auth, editor, _page) = editing_session();
        *editor.content.borrow_mut() = ContentSnapshot::new("<p>draft</p>", "");
        assert_eq!(
            session.working_snapshot().unwrap(),
            Some(ContentSnapshot::new("<p>draft</p>", ""))
        );
    }

    #[test]
    fn test_unload_prompt_tracks_editing() {
        let (mut session, ..) = session();
        assert_eq!(session.unload_prompt(), None);

        session.enter().unwrap();
        assert_eq!(session.unload_prompt(), Some(UNSAVED_WARNING));

        session.cancel().unwrap();
        assert_eq!(session.unload_prompt(), None);
    }

    #[test]
    fn test_notify_reaches_page_chrome() {
        let (session, _auth, _editor, page) = session();

        session.notify(Notice::info(SAVED_NOTICE));
        let notices = page.notices.borrow();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Info);
        assert_eq!(notices[0].message, SAVED_NOTICE);
    }

    #[test]
    fn test_login_then_edit_then_save_scenario() {
        let auth = FakeAuth::default();
        let editor = FakeEditor::default();
        let page = FakePage::default();
        let mut session = EditSession::new(auth.clone(), editor.clone(), page.clone());

        // Visitor clicks edit before logging in.
        assert_eq!(session.enter().unwrap(), EnterOutcome::LoginRequired);

        // Widget reports a login.
        *auth.user.borrow_mut() = Some(UserInfo { email: None });
        assert_eq!(session.handle_auth_change(true).unwrap(), AuthTransition::SignedIn);

        // Now the edit goes through.
        assert_eq!(session.enter().unwrap(), EnterOutcome::Entered);
        *editor.content.borrow_mut() = ContentSnapshot::new("<p>hi</p>", "p{color:red}");

        let outcome = session.save().unwrap();
        assert_eq!(
            outcome,
            SaveOutcome::Saved(ContentSnapshot::new("<p>hi</p>", "p{color:red}"))
        );
        assert_eq!(*page.html.borrow(), "<p>hi</p>");
        assert_eq!(*page.css.borrow(), "p{color:red}");
        assert_eq!(
            session.session(),
            Session {
                authenticated: true,
                editing: false
            }
        );
    }
}
