// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File,
    Dir,
}

/// In-memory filesystem for exercising path resolution without touching disk.
///
/// Paths are expected to be absolute. Symlinks are modelled as prefix
/// rewrites: everything under `link` resolves to the same place under
/// `target`.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
    links: Arc<Mutex<Vec<(PathBuf, PathBuf)>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        let mut files = HashMap::new();
        files.insert(PathBuf::from("/"), MockEntry::Dir);

        Self {
            files: Arc::new(Mutex::new(files)),
            links: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn add_file(&self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        let mut files = self.files.lock().unwrap();
        if let Some(parent) = path.parent() {
            Self::ensure_dir_entry(&mut files, parent);
        }
        files.insert(path, MockEntry::File);
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut files = self.files.lock().unwrap();
        Self::ensure_dir_entry(&mut files, path.as_ref());
    }

    /// Make `link` behave like a symlink pointing at `target`.
    pub fn add_symlink(&self, link: impl AsRef<Path>, target: impl AsRef<Path>) {
        self.links
            .lock()
            .unwrap()
            .push((link.as_ref().to_path_buf(), target.as_ref().to_path_buf()));
    }

    fn ensure_dir_entry(files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        if path.as_os_str().is_empty() || files.contains_key(path) {
            return;
        }
        files.insert(path.to_path_buf(), MockEntry::Dir);
        if let Some(parent) = path.parent() {
            if parent != path {
                Self::ensure_dir_entry(files, parent);
            }
        }
    }

    /// Lexically fold `.` and `..`, then follow the first matching link.
    fn resolve(&self, path: &Path) -> PathBuf {
        let mut out = PathBuf::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    out.pop();
                }
                other => out.push(other.as_os_str()),
            }
        }

        let links = self.links.lock().unwrap();
        for (link, target) in links.iter() {
            if let Ok(rest) = out.strip_prefix(link) {
                return target.join(rest);
            }
        }
        out
    }

    fn entry(&self, path: &Path) -> Option<MockEntry> {
        let resolved = self.resolve(path);
        self.files.lock().unwrap().get(&resolved).cloned()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.entry(path).is_some()
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.entry(path), Some(MockEntry::Dir))
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        if !path.is_absolute() {
            return Err(anyhow!("mock filesystem expects absolute paths: {:?}", path));
        }
        let resolved = self.resolve(path);
        if self.files.lock().unwrap().contains_key(&resolved) {
            Ok(resolved)
        } else {
            Err(anyhow!("No such file or directory: {:?}", path))
        }
    }
}
