use crate::core::Storage;
use crate::utils::error::Result;
use glob::MatchOptions;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn full_path(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }
}

impl Storage for LocalStorage {
    async fn list_files(&self, pattern: &str) -> Result<Vec<String>> {
        let matcher = glob::Pattern::new(pattern)?;
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: true,
        };

        let mut entries = match tokio::fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Directory {} does not exist", self.base_path);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                tracing::warn!("Skipping {} - file name is not valid UTF-8", path.display());
                continue;
            };
            if !matcher.matches_with(&name, options) {
                continue;
            }
            // Follows symlinks, so a link to a regular file is listed.
            match tokio::fs::metadata(&path).await {
                Ok(meta) if meta.is_file() => files.push(name),
                _ => tracing::debug!("Ignoring non-file match: {}", path.display()),
            }
        }
        files.sort();
        Ok(files)
    }

    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = tokio::fs::read(self.full_path(path)).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_files_matches_pattern_only() {
        let dir = TempDir::new().unwrap();
        for name in ["b.json", "a.json", ".hidden.json", "notes.txt"] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }
        std::fs::create_dir(dir.path().join("folder.json")).unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("c.json"), "{}").unwrap();

        let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
        let files = storage.list_files("*.json").await.unwrap();

        assert_eq!(files, vec!["a.json", "b.json"]);
    }

    #[tokio::test]
    async fn test_list_files_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");

        let storage = LocalStorage::new(missing.to_str().unwrap().to_string());
        let files = storage.list_files("*.json").await.unwrap();

        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn test_list_files_base_directory_with_glob_chars() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("data [v1]");
        std::fs::create_dir(&base).unwrap();
        std::fs::write(base.join("beat.json"), "{}").unwrap();

        let storage = LocalStorage::new(base.to_str().unwrap().to_string());
        let files = storage.list_files("*.json").await.unwrap();

        assert_eq!(files, vec!["beat.json"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_list_files_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("beat.json"), "{}").unwrap();
        let invalid = OsStr::from_bytes(b"bad\xff.json");
        std::fs::write(dir.path().join(invalid), "{}").unwrap();

        let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
        let files = storage.list_files("*.json").await.unwrap();

        assert_eq!(files, vec!["beat.json"]);
    }

    #[tokio::test]
    async fn test_read_write_roundtrip() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());

        storage.write_file("beat.json", b"{\"a\": 1}").await.unwrap();
        let data = storage.read_file("beat.json").await.unwrap();

        assert_eq!(data, b"{\"a\": 1}");
        assert!(storage.read_file("missing.json").await.is_err());
    }
}
