use dioxus::prelude::*;

use crate::i18n::{use_page, Text};

#[component]
pub fn NotFound() -> Element {
    let page = use_page();
    rsx! {
        main { id: "main", class: "not-found",
            img { src: "/404-logo.svg", alt: "", width: "120", height: "120" }
            h1 { Text { path: "notFound.title" } }
            p { Text { path: "notFound.body" } }
            a { class: "btn", href: page.path_for(None), Text { path: "notFound.back" } }
        }
    }
}
