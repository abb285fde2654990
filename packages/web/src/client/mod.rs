//! Browser entry: binds the server-rendered document to the navigator.

mod dom;
mod fetch;
mod toolbar;

use std::cell::RefCell;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use site::navigation::Navigator;
use site::render::{render_scope, retarget_lang_toggles, LANG_ATTR, LANG_TOGGLE_CLASS, OPEN_ATTR};
use site::{dialogs, InitialState, LocaleDictionary, LocaleStore, RenderRequest, DIALOGS};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, NodeList, Window};

use dom::{BrowserHistory, DomDialogs, DomScope, LocalPreferences};
use fetch::HttpLocaleSource;

type WebNavigator = Navigator<BrowserHistory, LocalPreferences, DomDialogs>;

struct ClientApp {
    document: Document,
    nav: RefCell<WebNavigator>,
    locales: LocaleStore<HttpLocaleSource>,
}

pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let initial: Option<InitialState> = read_json_script(&document, "initial-state");
    let locales = LocaleStore::new(HttpLocaleSource::new("/i18n"));
    if let Some(state) = &initial {
        if let Some(dict) = read_json_script::<LocaleDictionary>(&document, "locale-data") {
            locales.prime(state.lang, dict);
        }
    }

    let nav = Navigator::new(
        BrowserHistory::new(window.clone()),
        LocalPreferences::new(&window),
        DomDialogs::new(document.clone()),
    );
    let app = Rc::new(ClientApp {
        document: document.clone(),
        nav: RefCell::new(nav),
        locales,
    });

    bind_openers(&app);
    bind_dialogs(&app);
    bind_lang_toggles(&app);
    bind_popstate(&app, &window);
    toolbar::init(&window, &document);

    let render = app
        .nav
        .borrow_mut()
        .init_deep_link(initial.as_ref(), &browser_languages(&window));
    app.schedule(render);
}

impl ClientApp {
    /// Keep toggle links on the open dialog, then re-translate what changed.
    fn schedule(self: &Rc<Self>, request: RenderRequest) {
        self.sync_toggles();
        if request == RenderRequest::Nothing {
            return;
        }
        let app = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move { app.render(request).await });
    }

    fn sync_toggles(&self) {
        let (lang, dialog) = {
            let nav = self.nav.borrow();
            (nav.current_lang(), nav.open_dialog())
        };
        if let Some(mut scope) = DomScope::page(&self.document) {
            retarget_lang_toggles(&mut scope, lang, dialog);
        }
    }

    async fn render(&self, request: RenderRequest) {
        let (lang, dialog) = {
            let nav = self.nav.borrow();
            (nav.current_lang(), nav.open_dialog())
        };
        let scope = if request.page() {
            DomScope::page(&self.document)
        } else {
            request
                .modal()
                .and_then(dialogs::definition)
                .and_then(|def| DomScope::dialog(&self.document, def))
        };
        if let Some(mut scope) = scope {
            let summary = render_scope(&self.locales, lang, dialog, &mut scope).await;
            tracing::debug!(?request, translated = summary.translated, "rendered");
        }
    }
}

fn read_json_script<T: DeserializeOwned>(document: &Document, id: &str) -> Option<T> {
    let raw = document.get_element_by_id(id)?.text_content()?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!("ignoring #{id}: {err}");
            None
        }
    }
}

fn browser_languages(window: &Window) -> Vec<String> {
    let navigator = window.navigator();
    let mut langs: Vec<String> = navigator
        .languages()
        .iter()
        .filter_map(|value| value.as_string())
        .collect();
    if let Some(lang) = navigator.language() {
        langs.push(lang);
    }
    langs
}

fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn elements(list: Result<NodeList, JsValue>) -> Vec<Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn bind_openers(app: &Rc<ClientApp>) {
    for opener in elements(app.document.query_selector_all(&format!("[{OPEN_ATTR}]"))) {
        let code = opener.get_attribute(OPEN_ATTR).unwrap_or_default();
        let app = Rc::clone(app);
        listen(&opener, "click", move |event| {
            event.prevent_default();
            let render = app.nav.borrow_mut().open_code(&code, true);
            app.schedule(render);
        });
    }
}

fn bind_dialogs(app: &Rc<ClientApp>) {
    for def in DIALOGS.iter() {
        let Some(dialog) = app.document.get_element_by_id(def.element_id) else {
            continue;
        };

        let handle = Rc::clone(app);
        listen(&dialog, "cancel", move |event| {
            event.prevent_default();
            handle.nav.borrow_mut().handle_cancel();
            handle.schedule(RenderRequest::Nothing);
        });

        // Clicks on the ::backdrop hit the dialog element itself.
        let handle = Rc::clone(app);
        let element = dialog.clone();
        listen(&dialog, "click", move |event| {
            let outside = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .is_some_and(|target| target == element);
            handle.nav.borrow_mut().handle_backdrop_click(outside);
            handle.schedule(RenderRequest::Nothing);
        });

        for button in elements(dialog.query_selector_all("button[value=\"close\"]")) {
            let handle = Rc::clone(app);
            listen(&button, "click", move |event| {
                event.prevent_default();
                handle.nav.borrow_mut().close(true);
                handle.schedule(RenderRequest::Nothing);
            });
        }

        let backdrop = format!("[data-backdrop-for=\"{}\"]", def.element_id);
        for backdrop in elements(app.document.query_selector_all(&backdrop)) {
            let handle = Rc::clone(app);
            listen(&backdrop, "click", move |_| {
                handle.nav.borrow_mut().close(true);
                handle.schedule(RenderRequest::Nothing);
            });
        }
    }
}

fn bind_lang_toggles(app: &Rc<ClientApp>) {
    for toggle in elements(app.document.query_selector_all(&format!(".{LANG_TOGGLE_CLASS}"))) {
        let Some(code) = toggle.get_attribute(LANG_ATTR) else {
            continue;
        };
        let app = Rc::clone(app);
        listen(&toggle, "click", move |event| {
            event.prevent_default();
            let render = app.nav.borrow_mut().set_language_code(&code, true);
            app.schedule(render);
        });
    }
}

fn bind_popstate(app: &Rc<ClientApp>, window: &Window) {
    let app = Rc::clone(app);
    listen(window, "popstate", move |_| {
        let render = app.nav.borrow_mut().handle_popstate();
        app.schedule(render);
    });
}
