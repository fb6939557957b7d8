use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// File system abstraction for document storage and testing
pub trait FileSystem {
    /// Check if a file exists
    fn exists(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8
    fn read_to_string(&self, path: &Path) -> Result<String, std::io::Error>;

    /// Write a whole file, creating parent directories as needed
    fn write(&self, path: &Path, contents: &str) -> Result<(), std::io::Error>;
}

/// Real file system implementation
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> Result<String, std::io::Error> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)
    }
}

/// Mock file system for testing
///
/// Writes go through a `RefCell` so the mock can be shared behind `&self`
/// the same way the real file system is.
pub struct MockFileSystem {
    pub files: std::cell::RefCell<HashMap<PathBuf, String>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self {
            files: std::cell::RefCell::new(HashMap::new()),
        }
    }

    pub fn add_file(&mut self, path: PathBuf, contents: impl Into<String>) {
        self.files.get_mut().insert(path, contents.into());
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String, std::io::Error> {
        self.files.borrow().get(path).cloned().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), std::io::Error> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}
