#![cfg(test)]

use std::collections::HashSet;

use crate::dialogs::DialogDefinition;
use crate::navigation::{
    resolve_initial_lang, DialogView, HistoryApi, Navigator, PreferenceStore, RenderRequest,
};
use crate::types::{DialogKey, HistoryState, InitialState, Lang};

#[derive(Debug, Clone, PartialEq)]
enum Entry {
    Push(String, HistoryState),
    Replace(String, HistoryState),
}

#[derive(Default)]
struct FakeHistory {
    path: String,
    search: String,
    log: Vec<Entry>,
}

impl FakeHistory {
    fn at(path: &str) -> Self {
        Self {
            path: path.to_string(),
            ..Default::default()
        }
    }
}

impl HistoryApi for FakeHistory {
    fn pathname(&self) -> String {
        self.path.clone()
    }

    fn search(&self) -> String {
        self.search.clone()
    }

    fn push(&mut self, path: &str, state: &HistoryState) {
        self.path = path.to_string();
        self.log.push(Entry::Push(path.to_string(), state.clone()));
    }

    fn replace(&mut self, path: &str, state: &HistoryState) {
        let (path, search) = path.split_once('?').unwrap_or((path, ""));
        self.path = path.to_string();
        self.search = search.to_string();
        self.log.push(Entry::Replace(path.to_string(), state.clone()));
    }
}

#[derive(Default)]
struct FakePrefs {
    lang: Option<String>,
}

impl PreferenceStore for FakePrefs {
    fn stored_lang(&self) -> Option<String> {
        self.lang.clone()
    }

    fn store_lang(&mut self, lang: Lang) {
        self.lang = Some(lang.code().to_string());
    }
}

/// Elements are numbers; `attached` models which ones are still in the document.
#[derive(Default)]
struct FakeView {
    active: Option<u32>,
    attached: HashSet<u32>,
    shown: Vec<&'static str>,
    focused: Vec<u32>,
}

impl DialogView for FakeView {
    type Focus = u32;

    fn active_element(&self) -> Option<u32> {
        self.active
    }

    fn show(&mut self, dialog: &DialogDefinition) {
        self.shown.push(dialog.element_id);
    }

    fn hide(&mut self, dialog: &DialogDefinition) {
        self.shown.retain(|id| *id != dialog.element_id);
    }

    fn is_focusable(&self, target: &u32) -> bool {
        self.attached.contains(target)
    }

    fn focus(&mut self, target: &u32) {
        self.focused.push(*target);
    }
}

type TestNavigator = Navigator<FakeHistory, FakePrefs, FakeView>;

fn navigator_at(path: &str, lang: Lang) -> TestNavigator {
    let mut nav = Navigator::new(FakeHistory::at(path), FakePrefs::default(), FakeView::default());
    nav.set_language(lang, false);
    nav
}

#[test]
fn opening_pushes_localized_dialog_path() {
    let mut nav = navigator_at("/en/", Lang::En);
    let render = nav.open(DialogKey::About, true);
    assert_eq!(render, RenderRequest::Modal(DialogKey::About));
    assert_eq!(
        nav.history().log,
        vec![Entry::Push(
            "/en/about".to_string(),
            HistoryState {
                modal: Some(DialogKey::About)
            }
        )]
    );
    assert_eq!(nav.view().shown, vec!["about-dialog"]);
}

#[test]
fn opening_on_matching_path_does_not_duplicate_entry() {
    let mut nav = navigator_at("/de/imprint", Lang::De);
    nav.open(DialogKey::Imprint, true);
    assert!(nav.history().log.is_empty());
}

#[test]
fn closing_on_dialog_path_replaces_with_root() {
    let mut nav = navigator_at("/en/", Lang::En);
    nav.open(DialogKey::About, true);
    nav.close(true);
    assert_eq!(
        nav.history().log.last(),
        Some(&Entry::Replace("/en".to_string(), HistoryState::default()))
    );
    assert_eq!(nav.open_dialog(), None);
    assert!(nav.view().shown.is_empty());
}

#[test]
fn closing_after_navigating_away_skips_replace() {
    let mut nav = navigator_at("/en", Lang::En);
    nav.open(DialogKey::About, true);
    // user pressed back before the close affordance fired
    nav.history_mut().path = "/en".to_string();
    nav.close(true);
    assert_eq!(nav.history().log.len(), 1);
}

#[test]
fn close_restores_focus_only_to_attached_elements() {
    let mut nav = navigator_at("/en", Lang::En);
    nav.view_mut().active = Some(4);
    nav.view_mut().attached.insert(4);
    nav.open(DialogKey::About, false);
    nav.close(false);
    assert_eq!(nav.view().focused, vec![4]);

    nav.view_mut().active = Some(9);
    nav.open(DialogKey::About, false);
    nav.close(false);
    assert_eq!(nav.view().focused, vec![4], "detached element must not be focused");
}

#[test]
fn switching_language_keeps_open_dialog() {
    let mut nav = navigator_at("/en", Lang::En);
    nav.open(DialogKey::Imprint, true);
    let render = nav.set_language(Lang::De, true);
    assert_eq!(render, RenderRequest::PageAndModal(DialogKey::Imprint));
    assert_eq!(
        nav.history().log,
        vec![
            Entry::Push(
                "/en/imprint".to_string(),
                HistoryState {
                    modal: Some(DialogKey::Imprint)
                }
            ),
            Entry::Replace(
                "/de/imprint".to_string(),
                HistoryState {
                    modal: Some(DialogKey::Imprint)
                }
            ),
        ]
    );
    assert_eq!(nav.open_dialog(), Some(DialogKey::Imprint));
    assert_eq!(nav.prefs().lang.as_deref(), Some("de"));
}

#[test]
fn switching_language_preserves_unknown_base_path() {
    let mut nav = navigator_at("/en/does-not-exist", Lang::En);
    nav.set_language(Lang::De, true);
    assert_eq!(nav.history().path, "/de/does-not-exist");
}

#[test]
fn switching_language_drops_legacy_query_parameter() {
    let mut nav = navigator_at("/en", Lang::En);
    nav.history_mut().search = "lang=en&ref=x".to_string();
    nav.set_language(Lang::De, true);
    assert_eq!(nav.history().path, "/de");
    assert_eq!(nav.history().search, "ref=x");
}

#[test]
fn unsupported_language_code_is_ignored() {
    let mut nav = navigator_at("/en", Lang::En);
    assert_eq!(nav.set_language_code("fr", true), RenderRequest::Nothing);
    assert_eq!(nav.current_lang(), Lang::En);
    assert!(nav.history().log.is_empty());
}

#[test]
fn unknown_dialog_code_is_ignored() {
    let mut nav = navigator_at("/en", Lang::En);
    assert_eq!(nav.open_code("contact", true), RenderRequest::Nothing);
    assert_eq!(nav.open_dialog(), None);
    assert!(nav.history().log.is_empty());
}

#[test]
fn opening_second_dialog_replaces_first() {
    let mut nav = navigator_at("/en", Lang::En);
    nav.open(DialogKey::About, true);
    nav.open(DialogKey::Privacy, true);
    assert_eq!(nav.open_dialog(), Some(DialogKey::Privacy));
    assert_eq!(nav.view().shown, vec!["privacy-dialog"]);
    assert_eq!(nav.history().path, "/en/privacy");
}

#[test]
fn backdrop_and_cancel_close_with_url_sync() {
    let mut nav = navigator_at("/en", Lang::En);
    nav.open(DialogKey::About, true);
    nav.handle_backdrop_click(false);
    assert_eq!(nav.open_dialog(), Some(DialogKey::About));
    nav.handle_backdrop_click(true);
    assert_eq!(nav.open_dialog(), None);
    assert_eq!(nav.history().path, "/en");

    nav.open(DialogKey::Imprint, true);
    nav.handle_cancel();
    assert_eq!(nav.open_dialog(), None);
    assert_eq!(nav.history().path, "/en");
}

#[test]
fn popstate_to_dialog_path_opens_without_history() {
    let mut nav = navigator_at("/en", Lang::En);
    nav.history_mut().path = "/en/privacy".to_string();
    let render = nav.handle_popstate();
    assert_eq!(render, RenderRequest::Modal(DialogKey::Privacy));
    assert_eq!(nav.open_dialog(), Some(DialogKey::Privacy));
    assert!(nav.history().log.is_empty());
}

#[test]
fn popstate_with_language_change_rerenders_page_and_dialog() {
    let mut nav = navigator_at("/en/about", Lang::En);
    nav.open(DialogKey::About, false);
    nav.history_mut().path = "/de/about".to_string();
    let render = nav.handle_popstate();
    assert_eq!(render, RenderRequest::PageAndModal(DialogKey::About));
    assert_eq!(nav.current_lang(), Lang::De);
}

#[test]
fn popstate_to_root_closes_open_dialog() {
    let mut nav = navigator_at("/en", Lang::En);
    nav.open(DialogKey::About, true);
    nav.history_mut().path = "/en".to_string();
    let render = nav.handle_popstate();
    assert_eq!(render, RenderRequest::Nothing);
    assert_eq!(nav.open_dialog(), None);
    assert_eq!(nav.history().log.len(), 1);
}

#[test]
fn deep_link_applies_path_state_passively() {
    let mut nav = Navigator::new(
        FakeHistory::at("/de/imprint"),
        FakePrefs::default(),
        FakeView::default(),
    );
    let render = nav.init_deep_link(None, &[]);
    assert_eq!(render, RenderRequest::PageAndModal(DialogKey::Imprint));
    assert_eq!(nav.current_lang(), Lang::De);
    assert_eq!(nav.open_dialog(), Some(DialogKey::Imprint));
    assert!(nav.history().log.is_empty());
}

#[test]
fn deep_link_prefers_server_handoff() {
    let mut nav = Navigator::new(FakeHistory::at("/"), FakePrefs::default(), FakeView::default());
    let initial = InitialState {
        lang: Lang::De,
        dialog: Some(DialogKey::About),
        path: "/de/about".to_string(),
    };
    nav.init_deep_link(Some(&initial), &["en-US".to_string()]);
    assert_eq!(nav.current_lang(), Lang::De);
    assert_eq!(nav.open_dialog(), Some(DialogKey::About));
}

#[test]
fn deep_link_uses_stored_then_browser_language() {
    let mut prefs = FakePrefs::default();
    prefs.lang = Some("de".to_string());
    let mut nav = Navigator::new(FakeHistory::at("/"), prefs, FakeView::default());
    nav.init_deep_link(None, &["en".to_string()]);
    assert_eq!(nav.current_lang(), Lang::De);

    let mut nav = Navigator::new(FakeHistory::at("/"), FakePrefs::default(), FakeView::default());
    let render = nav.init_deep_link(None, &["fr-FR".to_string(), "de-AT".to_string()]);
    assert_eq!(render, RenderRequest::Page);
    assert_eq!(nav.current_lang(), Lang::De);
}

#[test]
fn initial_language_priority_order() {
    let browser = vec!["de-DE".to_string()];
    assert_eq!(
        resolve_initial_lang(None, Some(Lang::En), Some(Lang::De), Some("de"), &browser),
        Lang::En
    );
    assert_eq!(
        resolve_initial_lang(None, None, Some(Lang::En), Some("de"), &browser),
        Lang::En
    );
    assert_eq!(resolve_initial_lang(None, None, None, Some("xx"), &browser), Lang::De);
    assert_eq!(resolve_initial_lang(None, None, None, None, &[]), Lang::DEFAULT);
    assert_eq!(
        resolve_initial_lang(None, None, None, None, &["ja".to_string()]),
        Lang::DEFAULT
    );
}
