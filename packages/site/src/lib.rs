//! Localized routing, dialog state and translation logic shared by the
//! server renderer and the browser client.

pub mod a11y;
pub mod config;
pub mod dialog_state;
pub mod dialogs;
pub mod i18n;
pub mod locale;
pub mod navigation;
pub mod render;
pub mod routing;
pub mod sitemap;
pub mod types;

#[cfg(feature = "server")]
pub mod manifest;


#[cfg(test)]
mod navigation_tests;

pub use dialogs::{DialogDefinition, DIALOGS};
pub use i18n::{get_translation_value, LocaleDictionary, Translator};
pub use locale::{LocaleSource, LocaleStore};
pub use navigation::{Navigator, RenderRequest};
pub use routing::{build_localized_path, split_localized_path};
pub use types::{DialogKey, HistoryState, InitialState, Lang, LocalizedPath};
