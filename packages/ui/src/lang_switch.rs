use dioxus::prelude::*;
use site::render::LANG_TOGGLE_CLASS;
use site::Lang;

use crate::i18n::use_page;

/// One toggle per language; the client updates `aria-pressed` on switch.
#[component]
pub fn LangSwitch() -> Element {
    let page = use_page();
    let label = page.t("nav.language");

    rsx! {
        div { class: "lang-switch", role: "group", "aria-label": "{label}",
            for lang in Lang::ALL {
                a {
                    key: "{lang}",
                    class: LANG_TOGGLE_CLASS,
                    href: page.lang_path_for(lang),
                    "hreflang": lang.code(),
                    "lang": lang.code(),
                    "data-lang": lang.code(),
                    "aria-pressed": if lang == page.lang { "true" } else { "false" },
                    {lang.code().to_uppercase()}
                }
            }
        }
    }
}
