use serde::{Deserialize, Serialize};

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    De,
    En,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::De, Lang::En];
    pub const DEFAULT: Lang = Lang::En;

    pub fn code(self) -> &'static str {
        match self {
            Lang::De => "de",
            Lang::En => "en",
        }
    }

    /// Exact match against a language code as it appears in URLs and storage.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    /// Match a browser language tag (`de-AT`, `EN`) by case-insensitive prefix.
    pub fn from_preference(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| tag.starts_with(lang.code()))
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Identifies one of the site's modal content panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogKey {
    About,
    Imprint,
    Privacy,
}

impl DialogKey {
    pub const ALL: [DialogKey; 3] = [DialogKey::About, DialogKey::Imprint, DialogKey::Privacy];

    pub fn code(self) -> &'static str {
        match self {
            DialogKey::About => "about",
            DialogKey::Imprint => "imprint",
            DialogKey::Privacy => "privacy",
        }
    }

    /// Parse an untrusted value (DOM attribute, URL). Unknown values yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.code() == code)
    }
}

impl std::fmt::Display for DialogKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A pathname split into its optional language prefix and normalized base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedPath {
    pub lang: Option<Lang>,
    pub base_path: String,
}

/// State embedded by the server so the client can hydrate without
/// re-deriving it from a possibly redirected URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialState {
    pub lang: Lang,
    pub dialog: Option<DialogKey>,
    pub path: String,
}

/// State object attached to history entries pushed for an open dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modal: Option<DialogKey>,
}
