use std::path::{Component, Path, PathBuf};

use axum::body::Bytes;
use uuid::Uuid;

/// Public prefix of every stored image, served from `<static_dir>/uploads`.
pub const UPLOAD_URL_PREFIX: &str = "/static/uploads/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Faction,
    Hero,
}

impl ImageKind {
    fn dir(&self) -> &'static str {
        match self {
            ImageKind::Faction => "factions",
            ImageKind::Hero => "heroes",
        }
    }
}

/// File received from a form, only built when the browser sent a file name.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub data: Bytes,
}

#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(static_dir: impl AsRef<Path>) -> Self {
        Self {
            root: static_dir.as_ref().join("uploads"),
        }
    }

    pub async fn init(&self) -> std::io::Result<()> {
        for kind in [ImageKind::Faction, ImageKind::Hero] {
            tokio::fs::create_dir_all(self.root.join(kind.dir())).await?;
        }

        Ok(())
    }

    /// Writes the upload under a random name keeping its extension and returns its public URL.
    pub async fn save(&self, kind: ImageKind, upload: &Upload) -> std::io::Result<String> {
        let ext = Path::new(&upload.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();

        let name = format!("{}{ext}", Uuid::new_v4().simple());
        let dir = self.root.join(kind.dir());

        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&name), &upload.data).await?;

        tracing::debug!(file = %name, size = upload.data.len(), "image stored");

        Ok(format!("{UPLOAD_URL_PREFIX}{}/{name}", kind.dir()))
    }

    /// Maps a stored URL back to an existing file inside the upload root.
    pub fn disk_path(&self, url: &str) -> Option<PathBuf> {
        let relative = Path::new(url.strip_prefix(UPLOAD_URL_PREFIX)?);

        let mut components = relative.components().peekable();
        components.peek()?;

        if !components.all(|c| matches!(c, Component::Normal(_))) {
            return None;
        }

        let path = self.root.join(relative);

        path.is_file().then_some(path)
    }

    /// Deletes the file behind `url`, failures are logged and ignored.
    pub async fn remove(&self, url: Option<&str>) {
        let Some(url) = url else {
            return;
        };

        let Some(path) = self.disk_path(url) else {
            tracing::debug!(url, "no stored image to remove");
            return;
        };

        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!(url, "failed to remove image: {e}");
        }
    }
}
