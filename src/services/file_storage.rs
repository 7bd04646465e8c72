use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Writes uploaded files under a configured storage root, returning the
/// collision-free name a record can reference. Names are prefixed with a
/// fresh UUID so no write can ever overwrite an earlier one.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persists `data` under `{uuid}_{sanitized original name}` and returns
    /// the unique name. A failed write must not be referenced by any record.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> io::Result<String> {
        let unique_name = format!("{}_{}", Uuid::new_v4(), sanitize_file_name(original_name));

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(&unique_name), data).await?;

        Ok(unique_name)
    }
}

/// Keeps only the final path component and drops characters that are unsafe
/// in file names.
fn sanitize_file_name(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name);

    let cleaned: String = base
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();

    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_directories() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name(r"C:\temp\photo.jpg"), "photo.jpg");
    }

    #[test]
    fn sanitize_keeps_plain_names() {
        assert_eq!(sanitize_file_name("john.jpg"), "john.jpg");
        assert_eq!(sanitize_file_name("avatar-2024_v1.png"), "avatar-2024_v1.png");
    }

    #[test]
    fn sanitize_never_returns_empty() {
        assert_eq!(sanitize_file_name("///"), "file");
        assert_eq!(sanitize_file_name(""), "file");
    }

    #[tokio::test]
    async fn save_writes_bytes_under_unique_name() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        let name = storage.save("john.jpg", b"image-bytes").await.unwrap();
        assert!(name.ends_with("_john.jpg"));

        let stored = tokio::fs::read(dir.path().join(&name)).await.unwrap();
        assert_eq!(stored, b"image-bytes");

        // A second upload of the same original name gets a different stored name
        let other = storage.save("john.jpg", b"other").await.unwrap();
        assert_ne!(name, other);
    }

    #[tokio::test]
    async fn save_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested/images"));

        let name = storage.save("pic.png", b"x").await.unwrap();
        assert!(storage.root().join(name).exists());
    }
}
