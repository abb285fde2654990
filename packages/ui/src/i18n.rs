use dioxus::prelude::*;
use site::routing::path_for;
use site::{DialogKey, Lang, Translator};

/// Everything a page needs to render, provided to the tree as context.
#[derive(Debug, Clone, PartialEq)]
pub struct PageModel {
    pub lang: Lang,
    pub dialog: Option<DialogKey>,
    /// Normalized base path of the request (may match no dialog on 404).
    pub base_path: String,
    pub not_found: bool,
    pub translator: Translator,
    pub site_url: String,
    pub build_id: String,
    pub script: String,
    pub css: Option<String>,
    pub inline_css: Option<String>,
    /// Embed the loaded dictionary so the client skips its first fetch.
    pub embed_locale: bool,
}

impl PageModel {
    pub fn t(&self, key: &str) -> String {
        self.translator.t(key)
    }

    /// Link to a dialog (or the root) in the page language.
    pub fn path_for(&self, key: Option<DialogKey>) -> String {
        path_for(self.lang, key)
    }

    /// Same dialog in another language.
    pub fn lang_path_for(&self, lang: Lang) -> String {
        path_for(lang, self.dialog)
    }
}

pub fn use_page() -> PageModel {
    use_context::<PageModel>()
}

/// Translated content for the dotted `path`, marked so the client can re-translate it.
/// Values containing markup are emitted unescaped.
#[component]
pub fn Text(path: String) -> Element {
    let page = use_page();
    let value = page.t(&path);
    if value.contains('<') {
        rsx! { span { "data-i18n": "{path}", dangerous_inner_html: "{value}" } }
    } else {
        rsx! { span { "data-i18n": "{path}", "{value}" } }
    }
}
