use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use anyhow::Result;
use async_trait::async_trait;

use crate::i18n::LocaleDictionary;
use crate::types::Lang;

#[cfg(feature = "server")]
pub mod filesystem;

/// Where locale documents come from (disk on the server, HTTP in the browser).
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait LocaleSource {
    async fn fetch(&self, lang: Lang) -> Result<LocaleDictionary>;
}

/// Cache-on-read loader of per-language dictionaries.
///
/// Load failures fall back once to [`Lang::DEFAULT`] and then to an empty
/// dictionary; callers never see an error. Concurrent first loads of the
/// same language may both fetch, the later write replaces an equal value.
pub struct LocaleStore<S> {
    source: S,
    cache: RwLock<HashMap<Lang, Arc<LocaleDictionary>>>,
    caching: bool,
}

impl<S> std::fmt::Debug for LocaleStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleStore")
            .field("caching", &self.caching)
            .finish_non_exhaustive()
    }
}

impl<S: LocaleSource> LocaleStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: RwLock::new(HashMap::new()),
            caching: true,
        }
    }

    /// Re-read from the source on every load (development mode).
    pub fn without_cache(source: S) -> Self {
        Self {
            caching: false,
            ..Self::new(source)
        }
    }

    pub async fn load(&self, lang: Lang) -> Arc<LocaleDictionary> {
        if let Some(dict) = self.load_exact(lang).await {
            return dict;
        }
        if lang != Lang::DEFAULT {
            if let Some(dict) = self.load_exact(Lang::DEFAULT).await {
                return dict;
            }
        }
        Arc::new(LocaleDictionary::default())
    }

    /// Seed the cache with a dictionary obtained elsewhere (server handoff).
    pub fn prime(&self, lang: Lang, dict: LocaleDictionary) {
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(lang, Arc::new(dict));
        }
    }

    pub fn cached(&self, lang: Lang) -> Option<Arc<LocaleDictionary>> {
        if !self.caching {
            return None;
        }
        self.cache
            .read()
            .ok()
            .and_then(|cache| cache.get(&lang).cloned())
    }

    /// The dictionary for exactly `lang`, without falling back. `None` when
    /// it could not be loaded.
    pub async fn load_exact(&self, lang: Lang) -> Option<Arc<LocaleDictionary>> {
        if let Some(dict) = self.cached(lang) {
            return Some(dict);
        }
        match self.source.fetch(lang).await {
            Ok(dict) => {
                let dict = Arc::new(dict);
                if self.caching {
                    if let Ok(mut cache) = self.cache.write() {
                        cache.insert(lang, dict.clone());
                    }
                }
                Some(dict)
            }
            Err(err) => {
                tracing::warn!(lang = %lang, "locale load failed: {err:#}");
                None
            }
        }
    }
}
