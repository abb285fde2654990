use dioxus::prelude::*;
use site::dialogs;
use site::DialogKey;

use crate::i18n::{use_page, Text};

/// A modal panel. Rendered open (with a manual backdrop the client removes
/// once it takes over) when it is the page's initial dialog.
#[component]
pub fn DialogPanel(dialog: DialogKey) -> Element {
    let page = use_page();
    let Some(def) = dialogs::definition(dialog) else {
        return rsx! {};
    };
    let id = def.element_id;

    if page.dialog == Some(dialog) {
        rsx! {
            dialog { id: "{id}", class: "dialog", "aria-labelledby": "{id}-title", open: true,
                DialogContent { dialog }
            }
            div { class: "dialog-backdrop", "data-backdrop-for": "{id}" }
        }
    } else {
        rsx! {
            dialog { id: "{id}", class: "dialog", "aria-labelledby": "{id}-title",
                DialogContent { dialog }
            }
        }
    }
}

#[component]
fn DialogContent(dialog: DialogKey) -> Element {
    let page = use_page();
    let id = dialogs::definition(dialog)
        .map(|def| def.element_id)
        .unwrap_or_default();
    let close_label = page.t("dialog.close");

    rsx! {
        div { class: "dialog-content",
            header { class: "dialog-header",
                h2 { id: "{id}-title", Text { path: "{dialog}.title" } }
                form { method: "dialog",
                    button {
                        r#type: "submit",
                        value: "close",
                        class: "dialog-close",
                        "aria-label": "{close_label}",
                        "×"
                    }
                }
            }
            div { class: "dialog-body", Text { path: "{dialog}.body" } }
        }
    }
}
