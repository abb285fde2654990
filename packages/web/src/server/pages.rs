use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use site::routing::canonicalize_request;
use site::sitemap::generate_sitemap;
use site::{dialogs, DialogKey, Lang, LocaleDictionary, Translator};
use ui::PageModel;

use super::SharedState;

const DEV_CACHE: &str = "no-store";
const PAGE_CACHE: &str = "public, max-age=60, stale-while-revalidate=30";
const NOT_FOUND_CACHE: &str = "public, max-age=300, s-maxage=300, stale-while-revalidate=60";

/// Every request that is not a static file or the sitemap.
pub async fn page(State(state): State<SharedState>, uri: Uri) -> Response {
    let target = canonicalize_request(uri.path(), uri.query());
    if let Some(location) = target.redirect {
        tracing::debug!(from = %uri, to = %location, "redirect to canonical path");
        return (StatusCode::FOUND, [(header::LOCATION, location)]).into_response();
    }

    let dialog = dialogs::key_by_path(&target.base_path);
    let not_found = target.base_path != "/" && dialog.is_none();
    let status = if not_found {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };

    let html = render(&state, target.lang, dialog, target.base_path, not_found).await;
    (
        status,
        [(header::CACHE_CONTROL, cache_control(&state, status))],
        Html(html),
    )
        .into_response()
}

pub async fn sitemap(State(state): State<SharedState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        generate_sitemap(&state.config.site_url),
    )
}

fn cache_control(state: &SharedState, status: StatusCode) -> &'static str {
    if state.is_dev() {
        return DEV_CACHE;
    }
    if status == StatusCode::NOT_FOUND {
        NOT_FOUND_CACHE
    } else {
        PAGE_CACHE
    }
}

async fn render(
    state: &SharedState,
    lang: Lang,
    dialog: Option<DialogKey>,
    base_path: String,
    not_found: bool,
) -> String {
    let exact = state.locales.load_exact(lang).await;
    let fallback = match (&exact, lang == Lang::DEFAULT) {
        (Some(dict), true) => dict.clone(),
        (None, true) => Arc::new(LocaleDictionary::default()),
        (_, false) => state.locales.load(Lang::DEFAULT).await,
    };
    let primary = exact.clone().unwrap_or_else(|| fallback.clone());
    let assets = state.assets().await;
    let inline_css = state.inline_css(&assets).await;

    let model = PageModel {
        lang,
        dialog,
        base_path,
        not_found,
        translator: Translator::new(primary, fallback),
        site_url: state.config.site_url.clone(),
        build_id: state.config.build_id.clone(),
        script: assets.script,
        css: assets.css,
        inline_css,
        // Only a dictionary that really is `lang` may seed the client cache.
        embed_locale: !state.is_dev() && !not_found && exact.is_some(),
    };
    ui::render_document(&model)
}
