/// Media storage for uploaded images.
///
/// Files live on local disk under a configurable root, namespaced by the
/// owning article's slug: featured images under
/// `<slug>/featured_image/<filename>`, gallery images under
/// `<slug>/<filename>`. When an article has no slug yet, a slugified title
/// is used instead.
use std::path::{Path, PathBuf};

use crate::error::Result;

/// An uploaded file already extracted from the multipart request: where
/// its bytes sit on disk and the name the client gave it.
#[derive(Debug)]
pub struct UploadedFile {
    pub path: PathBuf,
    pub filename: String,
}

/// Build a URL-safe slug: lowercase, alphanumerics kept, everything else
/// collapsed into single hyphens.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for ch in input.chars() {
        if ch.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Strip any path components from a client-supplied filename
fn sanitize_filename(filename: &str) -> String {
    let name = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        "upload".to_string()
    } else {
        name.to_string()
    }
}

/// Local-disk media store rooted at a configurable directory
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Folder name for an article: its slug, or its slugified title when
    /// the slug is empty.
    fn article_folder(slug: &str, title: &str) -> String {
        if slug.is_empty() {
            slugify(title)
        } else {
            slug.to_string()
        }
    }

    /// Relative storage path for an article's featured image
    pub fn featured_image_path(slug: &str, title: &str, filename: &str) -> String {
        format!(
            "{}/featured_image/{}",
            Self::article_folder(slug, title),
            sanitize_filename(filename)
        )
    }

    /// Relative storage path for an article gallery image
    pub fn news_image_path(slug: &str, title: &str, filename: &str) -> String {
        format!(
            "{}/{}",
            Self::article_folder(slug, title),
            sanitize_filename(filename)
        )
    }

    /// Copy an uploaded temp file into the store at `relative_path`.
    /// Returns the relative path, which is what gets persisted on the row.
    pub async fn store(&self, relative_path: &str, src: &Path) -> Result<String> {
        let dest = self.root.join(relative_path);
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::copy(src, &dest).await?;

        Ok(relative_path.to_string())
    }

    /// Remove a stored file. Missing files are not an error; the row is the
    /// source of truth.
    pub async fn remove(&self, relative_path: &str) {
        let path = self.root.join(relative_path);
        if let Err(err) = tokio::fs::remove_file(&path).await {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), "failed to remove media file: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Breaking News!"), "breaking-news");
        assert_eq!(slugify("  Rust 1.75 released  "), "rust-1-75-released");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn featured_image_path_uses_slug() {
        assert_eq!(
            MediaStore::featured_image_path("city-vote", "City Vote", "hero.jpg"),
            "city-vote/featured_image/hero.jpg"
        );
    }

    #[test]
    fn falls_back_to_slugified_title() {
        assert_eq!(
            MediaStore::news_image_path("", "City Vote!", "a.png"),
            "city-vote/a.png"
        );
    }

    #[test]
    fn filenames_lose_path_components() {
        assert_eq!(
            MediaStore::news_image_path("s", "t", "../../etc/passwd"),
            "s/passwd"
        );
        assert_eq!(MediaStore::news_image_path("s", "t", ""), "s/upload");
    }

    #[tokio::test]
    async fn store_and_remove_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let src = dir.path().join("src.bin");
        tokio::fs::write(&src, b"jpeg bytes").await.expect("write");

        let store = MediaStore::new(dir.path().join("media"));
        let rel = store.store("a-slug/img.bin", &src).await.expect("store");
        assert_eq!(rel, "a-slug/img.bin");
        assert!(dir.path().join("media/a-slug/img.bin").exists());

        store.remove(&rel).await;
        assert!(!dir.path().join("media/a-slug/img.bin").exists());
        // Second removal of a missing file is silent
        store.remove(&rel).await;
    }
}
