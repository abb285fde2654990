//! Conversion between raw URL pathnames and `{lang, base_path}` pairs.

use crate::dialogs;
use crate::types::{DialogKey, Lang, LocalizedPath};

/// Collapse to `/` when empty, ensure a leading slash, drop empty segments
/// and any trailing slash.
pub fn normalize_base_path(pathname: &str) -> String {
    let segments: Vec<&str> = pathname.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return "/".to_string();
    }
    format!("/{}", segments.join("/"))
}

pub fn split_localized_path(pathname: &str) -> LocalizedPath {
    let mut segments = pathname.split('/').filter(|s| !s.is_empty()).peekable();
    let lang = segments.peek().and_then(|first| Lang::from_code(first));
    if lang.is_some() {
        segments.next();
    }
    let rest: Vec<&str> = segments.collect();
    LocalizedPath {
        lang,
        base_path: normalize_base_path(&rest.join("/")),
    }
}

pub fn build_localized_path(lang: Lang, base_path: &str) -> String {
    let normalized = normalize_base_path(base_path);
    if normalized == "/" {
        format!("/{}", lang.code())
    } else {
        format!("/{}{}", lang.code(), normalized)
    }
}

/// Localized path for a dialog (or the root page when `key` is `None`).
pub fn path_for(lang: Lang, key: Option<DialogKey>) -> String {
    build_localized_path(lang, dialogs::base_path_for_key(key))
}

/// Rewrite an internal link whose first segment is a language code so it
/// points at `lang`. Returns `None` when the link must stay untouched.
pub fn localize_href(href: &str, lang: Lang) -> Option<String> {
    // external, protocol-relative, anchors, mailto:, tel: and relative links
    if !href.starts_with('/') || href.starts_with("//") {
        return None;
    }
    let split_at = href.find(['?', '#']).unwrap_or(href.len());
    let (path, suffix) = href.split_at(split_at);
    let localized = split_localized_path(path);
    let current = localized.lang?;
    if current == lang {
        return None;
    }
    Some(format!(
        "{}{}",
        build_localized_path(lang, &localized.base_path),
        suffix
    ))
}

/// Outcome of canonicalizing an incoming request URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    pub lang: Lang,
    pub base_path: String,
    /// Query string without the `lang` parameter, no leading `?`.
    pub search: String,
    /// Canonical location to redirect to, when the request is not canonical.
    pub redirect: Option<String>,
}

/// Resolve language and base path for a request, detecting the legacy
/// `?lang=` parameter and missing language prefixes.
pub fn canonicalize_request(pathname: &str, query: Option<&str>) -> RequestTarget {
    let LocalizedPath {
        lang: path_lang,
        base_path,
    } = split_localized_path(pathname);
    let raw_query = query.unwrap_or("");
    let (query_lang, search) = strip_lang_param(raw_query);
    let lang = path_lang.or(query_lang).unwrap_or(Lang::DEFAULT);

    let canonical = build_localized_path(lang, &base_path);
    let redirect = (pathname != canonical || search != raw_query).then(|| {
        if search.is_empty() {
            canonical.clone()
        } else {
            format!("{canonical}?{search}")
        }
    });

    RequestTarget {
        lang,
        base_path,
        search,
        redirect,
    }
}

/// Remove every `lang` parameter from a raw query string. The first `lang`
/// value is returned when it names a supported language. Remaining pairs
/// keep their order and encoding.
pub fn strip_lang_param(query: &str) -> (Option<Lang>, String) {
    let mut lang = None;
    let mut seen_lang = false;
    let mut kept = Vec::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        if decode_component(name) == "lang" {
            if !seen_lang {
                seen_lang = true;
                lang = Lang::from_code(&decode_component(value));
            }
            continue;
        }
        kept.push(pair);
    }
    (lang, kept.join("&"))
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}
