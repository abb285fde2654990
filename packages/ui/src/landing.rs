use dioxus::prelude::*;
use site::DialogKey;

use crate::i18n::{use_page, Text};
use crate::lang_switch::LangSwitch;

#[component]
pub fn SiteHeader() -> Element {
    let page = use_page();
    rsx! {
        header { class: "site-header",
            a { class: "brand", href: page.path_for(None), Text { path: "site.name" } }
            LangSwitch {}
        }
    }
}

#[component]
pub fn Landing() -> Element {
    rsx! {
        main { id: "main", class: "hero",
            h1 { Text { path: "hero.title" } }
            p { class: "hero-intro", Text { path: "hero.intro" } }
        }
    }
}

/// Footer toolbar: dialog openers plus contact links.
#[component]
pub fn SiteFooter() -> Element {
    let page = use_page();
    let label = page.t("footer.label");

    rsx! {
        footer { class: "site-footer",
            nav { class: "contact", role: "toolbar", "aria-label": "{label}",
                a { href: "mailto:hello@nemetz.de", Text { path: "footer.email" } }
                a { href: "https://github.com/nemetz", rel: "me noopener", Text { path: "footer.github" } }
                for dialog in DialogKey::ALL {
                    a {
                        key: "{dialog}",
                        href: page.path_for(Some(dialog)),
                        "data-open-dialog": dialog.code(),
                        Text { path: "nav.{dialog}" }
                    }
                }
            }
        }
    }
}
