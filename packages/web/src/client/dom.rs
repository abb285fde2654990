//! Browser implementations of the navigation and rendering seams.

use site::dialogs::DialogDefinition;
use site::navigation::{DialogView, HistoryApi, PreferenceStore};
use site::render::{TranslationScope, I18N_ATTR, LANG_ATTR, LANG_TOGGLE_CLASS};
use site::{HistoryState, Lang};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlDialogElement, HtmlElement, Storage, Window};

const LANG_STORAGE_KEY: &str = "lang";

pub struct BrowserHistory {
    window: Window,
}

impl BrowserHistory {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn write(&self, path: &str, state: &HistoryState, push: bool) {
        let Ok(history) = self.window.history() else {
            return;
        };
        let state = serde_json::to_string(state)
            .ok()
            .and_then(|json| js_sys::JSON::parse(&json).ok())
            .unwrap_or(JsValue::NULL);
        let result = if push {
            history.push_state_with_url(&state, "", Some(path))
        } else {
            history.replace_state_with_url(&state, "", Some(path))
        };
        if let Err(err) = result {
            tracing::warn!("history update to {path} failed: {err:?}");
        }
    }
}

impl HistoryApi for BrowserHistory {
    fn pathname(&self) -> String {
        self.window.location().pathname().unwrap_or_default()
    }

    fn search(&self) -> String {
        let search = self.window.location().search().unwrap_or_default();
        search.trim_start_matches('?').to_string()
    }

    fn push(&mut self, path: &str, state: &HistoryState) {
        self.write(path, state, true);
    }

    fn replace(&mut self, path: &str, state: &HistoryState) {
        self.write(path, state, false);
    }
}

/// `localStorage`, when the browser allows it.
pub struct LocalPreferences {
    storage: Option<Storage>,
}

impl LocalPreferences {
    pub fn new(window: &Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
        }
    }
}

impl PreferenceStore for LocalPreferences {
    fn stored_lang(&self) -> Option<String> {
        self.storage.as_ref()?.get_item(LANG_STORAGE_KEY).ok().flatten()
    }

    fn store_lang(&mut self, lang: Lang) {
        if let Some(storage) = &self.storage {
            let _ = storage.set_item(LANG_STORAGE_KEY, lang.code());
        }
    }
}

pub struct DomDialogs {
    document: Document,
}

impl DomDialogs {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn element(&self, dialog: &DialogDefinition) -> Option<HtmlDialogElement> {
        self.document
            .get_element_by_id(dialog.element_id)?
            .dyn_into::<HtmlDialogElement>()
            .ok()
    }

    /// The server draws its own backdrop for dialogs it renders open.
    fn remove_manual_backdrop(&self, dialog: &DialogDefinition) {
        let selector = format!("[data-backdrop-for=\"{}\"]", dialog.element_id);
        if let Ok(Some(backdrop)) = self.document.query_selector(&selector) {
            backdrop.remove();
        }
    }
}

impl DialogView for DomDialogs {
    type Focus = HtmlElement;

    fn active_element(&self) -> Option<HtmlElement> {
        self.document.active_element()?.dyn_into().ok()
    }

    fn show(&mut self, dialog: &DialogDefinition) {
        self.remove_manual_backdrop(dialog);
        let Some(element) = self.element(dialog) else {
            tracing::warn!("dialog #{} is missing", dialog.element_id);
            return;
        };
        if element.open() {
            // Server-rendered open dialogs are not modal yet.
            element.close();
        }
        if let Err(err) = element.show_modal() {
            tracing::warn!("showModal on #{} failed: {err:?}", dialog.element_id);
        }
    }

    fn hide(&mut self, dialog: &DialogDefinition) {
        self.remove_manual_backdrop(dialog);
        if let Some(element) = self.element(dialog) {
            if element.open() {
                element.close();
            }
        }
    }

    fn is_focusable(&self, target: &HtmlElement) -> bool {
        target.is_connected()
    }

    fn focus(&mut self, target: &HtmlElement) {
        let _ = target.focus();
    }
}

/// A subtree of the live document.
pub struct DomScope {
    root: Element,
}

impl DomScope {
    pub fn page(document: &Document) -> Option<Self> {
        document.document_element().map(|root| Self { root })
    }

    pub fn dialog(document: &Document, dialog: &DialogDefinition) -> Option<Self> {
        document
            .get_element_by_id(dialog.element_id)
            .map(|root| Self { root })
    }

    fn select(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.root.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

impl TranslationScope for DomScope {
    type Node = Element;

    /// `<html>` for the page, the `<dialog>` element for a modal.
    fn set_lang(&mut self, lang: Lang) {
        let _ = self.root.set_attribute("lang", lang.code());
    }

    fn translatable_nodes(&self) -> Vec<(Element, String)> {
        self.select(&format!("[{I18N_ATTR}]"))
            .into_iter()
            .filter_map(|el| el.get_attribute(I18N_ATTR).map(|key| (el, key)))
            .collect()
    }

    fn set_text(&mut self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_markup(&mut self, node: &Element, markup: &str) {
        node.set_inner_html(markup);
    }

    fn lang_toggles(&self) -> Vec<(Element, Option<String>)> {
        self.select(&format!(".{LANG_TOGGLE_CLASS}"))
            .into_iter()
            .map(|el| {
                let lang = el.get_attribute(LANG_ATTR);
                (el, lang)
            })
            .collect()
    }

    fn set_pressed(&mut self, node: &Element, pressed: bool) {
        let _ = node.set_attribute("aria-pressed", if pressed { "true" } else { "false" });
    }

    fn links(&self) -> Vec<(Element, String)> {
        self.select("a[href]")
            .into_iter()
            .filter_map(|el| el.get_attribute("href").map(|href| (el, href)))
            .collect()
    }

    fn set_href(&mut self, node: &Element, href: &str) {
        let _ = node.set_attribute("href", href);
    }
}
