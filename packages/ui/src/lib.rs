//! Page components shared by the server renderer.

mod i18n;
pub use i18n::{use_page, PageModel, Text};

mod lang_switch;
pub use lang_switch::LangSwitch;

mod landing;
pub use landing::{Landing, SiteFooter, SiteHeader};

mod dialog;
pub use dialog::DialogPanel;

mod not_found;
pub use not_found::NotFound;

mod document;
pub use document::render_document;
