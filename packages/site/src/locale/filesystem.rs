use super::LocaleSource;
use crate::i18n::LocaleDictionary;
use crate::types::Lang;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

/// Reads `{dir}/{lang}.json` from disk.
#[derive(Debug, Clone)]
pub struct FilesystemLocaleSource {
    dir: PathBuf,
}

impl FilesystemLocaleSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl LocaleSource for FilesystemLocaleSource {
    async fn fetch(&self, lang: Lang) -> Result<LocaleDictionary> {
        let file_path = self.dir.join(format!("{}.json", lang.code()));
        let raw = fs::read_to_string(&file_path)
            .await
            .with_context(|| format!("reading {}", file_path.display()))?;
        let dict = LocaleDictionary::from_json(&raw)
            .with_context(|| format!("parsing {}", file_path.display()))?;
        tracing::debug!("Loaded locale {}", file_path.display());
        Ok(dict)
    }
}
