use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use site::{Lang, LocaleDictionary, LocaleSource};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{RequestCache, RequestInit, Response};

/// Fetches `{base}/{lang}.json` from the site itself.
pub struct HttpLocaleSource {
    base: String,
}

impl HttpLocaleSource {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

fn js_error(value: JsValue) -> anyhow::Error {
    anyhow!("{value:?}")
}

#[async_trait(?Send)]
impl LocaleSource for HttpLocaleSource {
    async fn fetch(&self, lang: Lang) -> Result<LocaleDictionary> {
        let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
        let url = format!("{}/{}.json", self.base, lang.code());

        let init = RequestInit::new();
        init.set_cache(RequestCache::NoCache);
        let response: Response = JsFuture::from(window.fetch_with_str_and_init(&url, &init))
            .await
            .map_err(js_error)?
            .dyn_into()
            .map_err(js_error)?;
        if !response.ok() {
            bail!("i18n load failed: {} {}", response.status(), url);
        }

        let text = JsFuture::from(response.text().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        let raw = text
            .as_string()
            .ok_or_else(|| anyhow!("{url} did not return text"))?;
        LocaleDictionary::from_json(&raw)
    }
}
