//! Applying a locale dictionary to a rendered document.

use crate::i18n::{get_translation_value, LocaleDictionary};
use crate::locale::{LocaleSource, LocaleStore};
use crate::routing::{localize_href, path_for};
use crate::types::{DialogKey, Lang};

/// Attribute marking a node whose content comes from the dictionary.
pub const I18N_ATTR: &str = "data-i18n";
/// Attribute on dialog openers naming the dialog key.
pub const OPEN_ATTR: &str = "data-open-dialog";
/// Class and data attribute of language toggle controls.
pub const LANG_TOGGLE_CLASS: &str = "lang-toggle";
pub const LANG_ATTR: &str = "data-lang";

/// A subtree of the document (whole page or a single dialog) that can be
/// re-translated in place.
pub trait TranslationScope {
    type Node;

    fn set_lang(&mut self, lang: Lang);
    /// Nodes carrying [`I18N_ATTR`], with the attribute value.
    fn translatable_nodes(&self) -> Vec<(Self::Node, String)>;
    fn set_text(&mut self, node: &Self::Node, text: &str);
    fn set_markup(&mut self, node: &Self::Node, markup: &str);
    /// Language toggles with their [`LANG_ATTR`] value.
    fn lang_toggles(&self) -> Vec<(Self::Node, Option<String>)>;
    fn set_pressed(&mut self, node: &Self::Node, pressed: bool);
    /// Anchors with their current `href`.
    fn links(&self) -> Vec<(Self::Node, String)>;
    fn set_href(&mut self, node: &Self::Node, href: &str);
}

/// Counts of what a render pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub translated: usize,
    pub missing: usize,
    pub links: usize,
}

/// Translate every marked node in `scope`. Values containing `<` are set as
/// markup, others as text. Missing keys leave the node as it is.
/// `dialog` is the open dialog, which language toggles link to.
pub fn apply_translations<S: TranslationScope>(
    scope: &mut S,
    dict: &LocaleDictionary,
    lang: Lang,
    dialog: Option<DialogKey>,
) -> RenderSummary {
    let mut summary = RenderSummary::default();
    scope.set_lang(lang);

    for (node, key) in scope.translatable_nodes() {
        match get_translation_value(dict, &key) {
            Some(value) if value.contains('<') => {
                scope.set_markup(&node, value);
                summary.translated += 1;
            }
            Some(value) => {
                scope.set_text(&node, value);
                summary.translated += 1;
            }
            None => summary.missing += 1,
        }
    }

    for (node, href) in scope.links() {
        if let Some(localized) = localize_href(&href, lang) {
            scope.set_href(&node, &localized);
            summary.links += 1;
        }
    }

    // After the link pass: toggles are anchors too but keep their own language.
    retarget_lang_toggles(scope, lang, dialog);

    summary
}

/// Mark the toggle for `lang` as pressed and point every toggle at `dialog`
/// (or the root) in its own language.
pub fn retarget_lang_toggles<S: TranslationScope>(
    scope: &mut S,
    lang: Lang,
    dialog: Option<DialogKey>,
) {
    for (node, toggle_lang) in scope.lang_toggles() {
        let toggle_lang = toggle_lang.as_deref().and_then(Lang::from_code);
        scope.set_pressed(&node, toggle_lang == Some(lang));
        if let Some(toggle_lang) = toggle_lang {
            scope.set_href(&node, &path_for(toggle_lang, dialog));
        }
    }
}

/// Load the dictionary for `lang` and apply it to `scope`.
pub async fn render_scope<L, S>(
    store: &LocaleStore<L>,
    lang: Lang,
    dialog: Option<DialogKey>,
    scope: &mut S,
) -> RenderSummary
where
    L: LocaleSource,
    S: TranslationScope,
{
    let dict = store.load(lang).await;
    let summary = apply_translations(scope, &dict, lang, dialog);
    if summary.missing > 0 {
        tracing::debug!(lang = %lang, missing = summary.missing, "untranslated nodes kept their content");
    }
    summary
}
