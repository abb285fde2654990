use site::a11y::{next_toolbar_index, ToolbarKey};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, Window};

const ITEMS: &str = "button:not([disabled]), a[href]";

/// Arrow, Home and End keys move focus between the items of every
/// `[role="toolbar"]` in the document.
pub fn init(window: &Window, document: &Document) {
    let Ok(toolbars) = document.query_selector_all("[role=\"toolbar\"]") else {
        return;
    };
    for i in 0..toolbars.length() {
        let Some(toolbar) = toolbars.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let window = window.clone();
        let document = document.clone();
        let root = toolbar.clone();
        let handler = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            let rtl = is_rtl(&window, &document);
            let Some(key) = ToolbarKey::from_key(&event.key(), rtl) else {
                return;
            };
            let items = focusable_items(&window, &root);
            let active = document.active_element();
            let current = active
                .as_ref()
                .and_then(|active| items.iter().position(|item| item.is_same_node(Some(&**active))));
            if let Some(next) = next_toolbar_index(key, current, items.len()) {
                event.prevent_default();
                let _ = items[next].focus();
            }
        });
        let _ = toolbar.add_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref());
        handler.forget();
    }
}

fn is_rtl(window: &Window, document: &Document) -> bool {
    document
        .document_element()
        .and_then(|root| window.get_computed_style(&root).ok().flatten())
        .and_then(|style| style.get_property_value("direction").ok())
        .is_some_and(|direction| direction == "rtl")
}

fn focusable_items(window: &Window, toolbar: &Element) -> Vec<HtmlElement> {
    let Ok(list) = toolbar.query_selector_all(ITEMS) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .filter(|el| el.tab_index() != -1 && is_visible(window, el))
        .collect()
}

fn is_visible(window: &Window, el: &HtmlElement) -> bool {
    let Ok(Some(style)) = window.get_computed_style(el) else {
        return true;
    };
    let display = style.get_property_value("display").unwrap_or_default();
    let visibility = style.get_property_value("visibility").unwrap_or_default();
    display != "none" && visibility != "hidden"
}
