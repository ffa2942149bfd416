use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::ScrapeResult;

/// Where JSON documents and downloaded assets are written.
pub struct ContentStore {
    content_dir: PathBuf,
    assets_dir: PathBuf,
}

impl ContentStore {
    pub fn new(content_dir: impl Into<PathBuf>, assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            assets_dir: assets_dir.into(),
        }
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    pub async fn prepare(&self) -> ScrapeResult<()> {
        tokio::fs::create_dir_all(&self.content_dir).await?;
        tokio::fs::create_dir_all(&self.assets_dir).await?;
        Ok(())
    }

    /// Pretty-printed (2-space indent) UTF-8 JSON; non-ASCII text is written as is.
    pub async fn write_json<T: Serialize>(&self, file_name: &str, value: &T) -> ScrapeResult<PathBuf> {
        let path = self.content_dir.join(file_name);
        let json = serde_json::to_string_pretty(value)?;
        tokio::fs::write(&path, json.as_bytes()).await?;
        info!("Wrote {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn writes_unescaped_pretty_json() {
        let root = tempfile::tempdir().unwrap();
        let store = ContentStore::new(root.path().join("content"), root.path().join("public/assets"));
        store.prepare().await.unwrap();
        assert!(root.path().join("public/assets").is_dir());

        let path = store
            .write_json("modules.json", &json!({ "title": "Модули" }))
            .await
            .unwrap();

        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text, "{\n  \"title\": \"Модули\"\n}");
    }
}
