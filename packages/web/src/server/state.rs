use std::path::Path;
use std::sync::Arc;

use site::config::ServerConfig;
use site::locale::filesystem::FilesystemLocaleSource;
use site::manifest::{AssetManifest, Assets};
use site::LocaleStore;
use tokio::sync::OnceCell;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: ServerConfig,
    pub locales: LocaleStore<FilesystemLocaleSource>,
    assets: OnceCell<Assets>,
    inline_css: OnceCell<Option<String>>,
}

impl AppState {
    /// Development re-reads locale files on every request.
    pub fn new(config: ServerConfig) -> Self {
        let source = FilesystemLocaleSource::new(config.locale_dir());
        let locales = if config.mode.is_dev() {
            LocaleStore::without_cache(source)
        } else {
            LocaleStore::new(source)
        };
        Self {
            config,
            locales,
            assets: OnceCell::new(),
            inline_css: OnceCell::new(),
        }
    }

    pub fn is_dev(&self) -> bool {
        self.config.mode.is_dev()
    }

    /// Entry script and stylesheet, resolved from the build manifest once.
    pub async fn assets(&self) -> Assets {
        if self.is_dev() {
            return Assets::dev();
        }
        self.assets
            .get_or_init(|| async {
                AssetManifest::load(&self.config.dist_dir())
                    .await
                    .map(|manifest| manifest.entry_assets())
                    .unwrap_or_default()
            })
            .await
            .clone()
    }

    /// Contents of the entry stylesheet for inlining in production pages.
    pub async fn inline_css(&self, assets: &Assets) -> Option<String> {
        if self.is_dev() {
            return None;
        }
        let css = assets.css.as_deref()?;
        self.inline_css
            .get_or_init(|| read_css(self.config.dist_dir(), css))
            .await
            .clone()
    }
}

async fn read_css(dist_dir: impl AsRef<Path>, href: &str) -> Option<String> {
    let path = dist_dir.as_ref().join(href.trim_start_matches('/'));
    match tokio::fs::read_to_string(&path).await {
        Ok(css) => Some(css),
        Err(err) => {
            tracing::warn!("Could not inline {}: {err}", path.display());
            None
        }
    }
}
