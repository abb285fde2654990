use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;

/// One chunk of the bundler manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestChunk {
    pub file: String,
    #[serde(default)]
    pub css: Vec<String>,
    #[serde(default)]
    pub is_entry: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AssetManifest {
    chunks: BTreeMap<String, ManifestChunk>,
}

/// Script and stylesheet URLs for the page shell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assets {
    pub script: String,
    pub css: Option<String>,
}

impl Assets {
    /// Development serves the client entry directly, styles come with it.
    pub fn dev() -> Self {
        Self {
            script: "/app.js".to_string(),
            css: None,
        }
    }
}

impl AssetManifest {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Look for `.vite/manifest.json`, then `manifest.json`, under `dist_dir`.
    /// A missing or unreadable manifest is logged and yields `None`.
    pub async fn load(dist_dir: &Path) -> Option<Self> {
        let candidates = [
            dist_dir.join(".vite").join("manifest.json"),
            dist_dir.join("manifest.json"),
        ];
        for path in candidates {
            if !fs::try_exists(&path).await.unwrap_or(false) {
                continue;
            }
            match Self::read(&path).await {
                Ok(manifest) => return Some(manifest),
                Err(err) => {
                    tracing::error!("Failed to load manifest: {err:#}");
                    return None;
                }
            }
        }
        tracing::warn!("Manifest not found in {}", dist_dir.display());
        None
    }

    async fn read(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn entry_assets(&self) -> Assets {
        let Some(entry) = self.chunks.values().find(|chunk| chunk.is_entry) else {
            return Assets::default();
        };
        Assets {
            script: format!("/{}", entry.file),
            css: entry.css.first().map(|css| format!("/{css}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "src/vendor.js": { "file": "assets/vendor-1.js" },
        "src/app.ts": {
            "file": "assets/app-abc.js",
            "css": ["assets/app-def.css"],
            "isEntry": true,
            "src": "src/app.ts"
        }
    }"#;

    #[test]
    fn entry_chunk_provides_script_and_css() {
        let manifest = AssetManifest::from_json(MANIFEST).unwrap();
        assert_eq!(
            manifest.entry_assets(),
            Assets {
                script: "/assets/app-abc.js".to_string(),
                css: Some("/assets/app-def.css".to_string()),
            }
        );
    }

    #[test]
    fn no_entry_chunk_yields_empty_assets() {
        let manifest = AssetManifest::from_json(r#"{"x":{"file":"a.js"}}"#).unwrap();
        assert_eq!(manifest.entry_assets(), Assets::default());
    }

    #[tokio::test]
    async fn loads_vite_manifest_location_first() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".vite")).unwrap();
        std::fs::write(dir.path().join(".vite/manifest.json"), MANIFEST).unwrap();
        std::fs::write(dir.path().join("manifest.json"), "{}").unwrap();
        let manifest = AssetManifest::load(dir.path()).await.unwrap();
        assert_eq!(manifest.entry_assets().script, "/assets/app-abc.js");
    }

    #[tokio::test]
    async fn missing_or_broken_manifest_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AssetManifest::load(dir.path()).await.is_none());
        std::fs::write(dir.path().join("manifest.json"), "{ nope").unwrap();
        assert!(AssetManifest::load(dir.path()).await.is_none());
    }
}
