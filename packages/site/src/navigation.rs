//! Keeps the open dialog, the active language and the browser URL in step.
//!
//! [`Navigator`] owns the navigation state and talks to the platform only
//! through [`HistoryApi`], [`PreferenceStore`] and [`DialogView`]. Every
//! operation returns a [`RenderRequest`] telling the caller which scopes
//! need their translations re-applied.

use crate::dialog_state::{DialogStateMachine, Transition};
use crate::dialogs::{self, DialogDefinition};
use crate::routing::{build_localized_path, path_for, split_localized_path, strip_lang_param};
use crate::types::{DialogKey, HistoryState, InitialState, Lang};

/// The browser history and location.
pub trait HistoryApi {
    fn pathname(&self) -> String;
    /// Query string without the leading `?`.
    fn search(&self) -> String;
    fn push(&mut self, path: &str, state: &HistoryState);
    fn replace(&mut self, path: &str, state: &HistoryState);
}

/// Persisted client-side language preference.
pub trait PreferenceStore {
    fn stored_lang(&self) -> Option<String>;
    fn store_lang(&mut self, lang: Lang);
}

/// Showing and hiding dialog elements, plus focus bookkeeping.
pub trait DialogView {
    type Focus;

    fn active_element(&self) -> Option<Self::Focus>;
    fn show(&mut self, dialog: &DialogDefinition);
    fn hide(&mut self, dialog: &DialogDefinition);
    /// Whether `target` is still attached and can take focus.
    fn is_focusable(&self, target: &Self::Focus) -> bool;
    fn focus(&mut self, target: &Self::Focus);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderRequest {
    Nothing,
    Page,
    Modal(DialogKey),
    PageAndModal(DialogKey),
}

impl RenderRequest {
    fn merge(self, other: RenderRequest) -> RenderRequest {
        use RenderRequest::*;
        match (self, other) {
            (Nothing, r) | (r, Nothing) => r,
            (PageAndModal(k), _) | (_, PageAndModal(k)) => PageAndModal(k),
            (Page, Modal(k)) | (Modal(k), Page) => PageAndModal(k),
            (Page, Page) => Page,
            (Modal(_), Modal(k)) => Modal(k),
        }
    }

    pub fn page(self) -> bool {
        matches!(self, RenderRequest::Page | RenderRequest::PageAndModal(_))
    }

    pub fn modal(self) -> Option<DialogKey> {
        match self {
            RenderRequest::Modal(k) | RenderRequest::PageAndModal(k) => Some(k),
            _ => None,
        }
    }
}

/// Language for the first paint: server handoff, URL path, `?lang=`,
/// stored preference, browser languages, then the default.
pub fn resolve_initial_lang(
    embedded: Option<Lang>,
    path_lang: Option<Lang>,
    query_lang: Option<Lang>,
    stored: Option<&str>,
    browser_langs: &[String],
) -> Lang {
    embedded
        .or(path_lang)
        .or(query_lang)
        .or_else(|| stored.and_then(Lang::from_code))
        .or_else(|| browser_langs.iter().find_map(|tag| Lang::from_preference(tag)))
        .unwrap_or(Lang::DEFAULT)
}

pub struct Navigator<H, P, V: DialogView> {
    history: H,
    prefs: P,
    view: V,
    dialogs: DialogStateMachine<V::Focus>,
    current_lang: Lang,
}

impl<H, P, V> Navigator<H, P, V>
where
    H: HistoryApi,
    P: PreferenceStore,
    V: DialogView,
{
    pub fn new(history: H, prefs: P, view: V) -> Self {
        Self {
            history,
            prefs,
            view,
            dialogs: DialogStateMachine::new(),
            current_lang: Lang::DEFAULT,
        }
    }

    pub fn current_lang(&self) -> Lang {
        self.current_lang
    }

    pub fn open_dialog(&self) -> Option<DialogKey> {
        self.dialogs.current()
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn prefs(&self) -> &P {
        &self.prefs
    }

    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn open(&mut self, key: DialogKey, sync_url: bool) -> RenderRequest {
        let Some(def) = dialogs::definition(key) else {
            return RenderRequest::Nothing;
        };
        let focused = self.view.active_element();
        let render = match self.dialogs.open(key, focused) {
            Transition::Opened { replaced, .. } => {
                if let Some(prev) = replaced.and_then(dialogs::definition) {
                    self.view.hide(prev);
                }
                self.view.show(def);
                RenderRequest::Modal(key)
            }
            _ => RenderRequest::Nothing,
        };
        if sync_url {
            self.push_path_for(key);
        }
        render
    }

    /// Open from an untrusted value such as a `data-open-dialog` attribute.
    pub fn open_code(&mut self, code: &str, sync_url: bool) -> RenderRequest {
        match DialogKey::from_code(code) {
            Some(key) => self.open(key, sync_url),
            None => RenderRequest::Nothing,
        }
    }

    pub fn close(&mut self, sync_url: bool) {
        let Transition::Closed { key, restore_focus } = self.dialogs.close() else {
            return;
        };
        if let Some(def) = dialogs::definition(key) {
            self.view.hide(def);
        }
        if let Some(target) = restore_focus {
            if self.view.is_focusable(&target) {
                self.view.focus(&target);
            }
        }
        if sync_url {
            self.replace_to_root_if_path_matches(key);
        }
    }

    /// Click on the dialog backdrop (outside the dialog content).
    pub fn handle_backdrop_click(&mut self, outside: bool) {
        if outside && self.dialogs.current().is_some() {
            self.close(true);
        }
    }

    /// Platform dismiss request (Escape). Routed through `close` so the URL
    /// follows.
    pub fn handle_cancel(&mut self) {
        self.close(true);
    }

    pub fn set_language(&mut self, lang: Lang, sync_url: bool) -> RenderRequest {
        self.current_lang = lang;
        self.prefs.store_lang(lang);
        if sync_url {
            let pathname = self.history.pathname();
            let base_path = split_localized_path(&pathname).base_path;
            let (_, search) = strip_lang_param(&self.history.search());
            let mut target = build_localized_path(lang, &base_path);
            if !search.is_empty() {
                target = format!("{target}?{search}");
            }
            let state = HistoryState {
                modal: self.dialogs.current(),
            };
            self.history.replace(&target, &state);
        }
        match self.dialogs.current() {
            Some(key) => RenderRequest::PageAndModal(key),
            None => RenderRequest::Page,
        }
    }

    /// Switch language from an untrusted code; unsupported codes are ignored.
    pub fn set_language_code(&mut self, code: &str, sync_url: bool) -> RenderRequest {
        match Lang::from_code(code) {
            Some(lang) => self.set_language(lang, sync_url),
            None => RenderRequest::Nothing,
        }
    }

    /// Back/forward navigation: re-derive state from the new URL without
    /// touching history.
    pub fn handle_popstate(&mut self) -> RenderRequest {
        let localized = split_localized_path(&self.history.pathname());
        let (query_lang, _) = strip_lang_param(&self.history.search());
        let mut render = RenderRequest::Nothing;

        let lang_changed = match localized.lang.or(query_lang) {
            Some(lang) if lang != self.current_lang => {
                self.set_language(lang, false);
                render = RenderRequest::Page;
                true
            }
            _ => false,
        };

        match dialogs::key_by_path(&localized.base_path) {
            Some(key) => {
                render = render.merge(self.open(key, false));
                if lang_changed {
                    render = render.merge(RenderRequest::Modal(key));
                }
            }
            None => self.close(false),
        }
        render
    }

    /// Passive sync on page load: apply language and dialog from the URL
    /// (or the server handoff) without creating a history entry.
    pub fn init_deep_link(
        &mut self,
        initial: Option<&InitialState>,
        browser_langs: &[String],
    ) -> RenderRequest {
        let localized = split_localized_path(&self.history.pathname());
        let (query_lang, _) = strip_lang_param(&self.history.search());
        let stored = self.prefs.stored_lang();
        let lang = resolve_initial_lang(
            initial.map(|s| s.lang),
            localized.lang,
            query_lang,
            stored.as_deref(),
            browser_langs,
        );
        self.set_language(lang, false);

        let key = initial
            .and_then(|s| s.dialog)
            .or_else(|| dialogs::key_by_path(&localized.base_path));
        match key {
            Some(key) => {
                self.open(key, false);
                RenderRequest::PageAndModal(key)
            }
            None => RenderRequest::Page,
        }
    }

    fn push_path_for(&mut self, key: DialogKey) {
        let target = path_for(self.current_lang, Some(key));
        if self.history.pathname() != target {
            self.history
                .push(&target, &HistoryState { modal: Some(key) });
        }
    }

    /// Skip the replace when the user already navigated away from the
    /// dialog's path (e.g. via the back button).
    fn replace_to_root_if_path_matches(&mut self, key: DialogKey) {
        let target = path_for(self.current_lang, Some(key));
        if self.history.pathname() == target {
            let root = path_for(self.current_lang, None);
            self.history.replace(&root, &HistoryState::default());
        }
    }
}
