//! Server-side rendering of the full HTML document.

use dioxus::prelude::*;
use site::routing::build_localized_path;
use site::{DialogKey, InitialState, Lang};

use crate::dialog::DialogPanel;
use crate::i18n::{PageModel, Text};
use crate::landing::{Landing, SiteFooter, SiteHeader};
use crate::not_found::NotFound;

impl PageModel {
    /// Handoff blob for client hydration.
    pub fn initial_state(&self) -> InitialState {
        let base_path = if self.not_found { "/" } else { &self.base_path };
        InitialState {
            lang: self.lang,
            dialog: self.dialog,
            path: build_localized_path(self.lang, base_path),
        }
    }

    fn absolute(&self, lang: Lang) -> String {
        format!(
            "{}{}",
            self.site_url,
            build_localized_path(lang, &self.base_path)
        )
    }

    /// `(hreflang, url)` pairs including `x-default`; empty for 404 pages.
    pub fn alternates(&self) -> Vec<(String, String)> {
        if self.not_found {
            return Vec::new();
        }
        Lang::ALL
            .into_iter()
            .map(|lang| (lang.code().to_string(), self.absolute(lang)))
            .chain(std::iter::once((
                "x-default".to_string(),
                self.absolute(Lang::DEFAULT),
            )))
            .collect()
    }

    pub fn canonical_url(&self) -> String {
        format!("{}{}", self.site_url, self.initial_state().path)
    }
}

pub fn render_document(model: &PageModel) -> String {
    let mut head = VirtualDom::new_with_props(
        PageHead,
        PageHeadProps {
            model: model.clone(),
        },
    );
    head.rebuild_in_place();
    let mut body = VirtualDom::new_with_props(
        PageBody,
        PageBodyProps {
            model: model.clone(),
        },
    );
    body.rebuild_in_place();

    format!(
        "<!DOCTYPE html>\n<html lang=\"{}\" data-build=\"{}\">\n<head>{}</head>\n<body>{}</body>\n</html>\n",
        model.lang.code(),
        escape_attr(&model.build_id),
        dioxus_ssr::render(&head),
        dioxus_ssr::render(&body),
    )
}

/// JSON is embedded raw inside `<script>`; keep `</script>` from closing it.
fn script_json(json: &str) -> String {
    json.replace('<', "\\u003c")
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

#[component]
fn PageHead(model: PageModel) -> Element {
    let title = model.t("meta.title");
    let description = model.t("meta.description");
    let canonical = model.canonical_url();
    let alternates = model.alternates();
    let initial_state = serde_json::to_string(&model.initial_state())
        .map(|json| script_json(&json))
        .unwrap_or_else(|_| "null".to_string());
    let locale_json = model
        .embed_locale
        .then(|| script_json(&model.translator.primary().to_json()));
    let inline_css = model.inline_css.clone();
    let css_href = model.css.clone().filter(|_| inline_css.is_none());
    let script = model.script.clone();

    rsx! {
        meta { "charset": "utf-8" }
        meta { name: "viewport", content: "width=device-width, initial-scale=1" }
        title { "{title}" }
        meta { name: "description", content: "{description}" }
        if model.not_found {
            meta { name: "robots", content: "noindex" }
        }
        link { rel: "canonical", href: "{canonical}" }
        for (hreflang, href) in alternates {
            link { key: "{hreflang}", rel: "alternate", "hreflang": "{hreflang}", href: "{href}" }
        }
        link { rel: "icon", href: "/favicon.ico" }
        if let Some(css) = inline_css {
            style { dangerous_inner_html: "{css}" }
        }
        if let Some(href) = css_href {
            link { rel: "stylesheet", href: "{href}" }
        }
        script { r#type: "application/json", id: "initial-state", dangerous_inner_html: "{initial_state}" }
        if let Some(json) = locale_json {
            script { r#type: "application/json", id: "locale-data", dangerous_inner_html: "{json}" }
        }
        if !script.is_empty() {
            script { r#type: "module", src: "{script}" }
        }
    }
}

#[component]
fn PageBody(model: PageModel) -> Element {
    use_context_provider(|| model.clone());

    rsx! {
        a { class: "skip-link", href: "#main", Text { path: "nav.skip" } }
        SiteHeader {}
        if model.not_found {
            NotFound {}
        } else {
            Landing {}
        }
        SiteFooter {}
        for dialog in DialogKey::ALL {
            DialogPanel { key: "{dialog}", dialog }
        }
    }
}
