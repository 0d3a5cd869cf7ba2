use std::io;
use std::path::{Path, PathBuf};

/// Supplies document bytes by filename.
pub trait ContentProvider {
    fn fetch(&self, filename: &str) -> io::Result<Vec<u8>>;
}

impl<F> ContentProvider for F
where
    F: Fn(&str) -> io::Result<Vec<u8>>,
{
    fn fetch(&self, filename: &str) -> io::Result<Vec<u8>> {
        self(filename)
    }
}

/// Reads documents from a directory, e.g. the working storage of a batch.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    root: PathBuf,
}

impl DirectoryProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryProvider { root: root.into() }
    }
}

impl ContentProvider for DirectoryProvider {
    fn fetch(&self, filename: &str) -> io::Result<Vec<u8>> {
        // Only the final component is honoured so lookups stay under `root`.
        let name = Path::new(filename)
            .file_name()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty filename"))?;
        std::fs::read(self.root.join(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_files_under_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cv.pdf"), b"bytes").unwrap();

        let provider = DirectoryProvider::new(dir.path());
        assert_eq!(provider.fetch("cv.pdf").unwrap(), b"bytes");
        assert_eq!(
            provider.fetch("missing.pdf").unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
    }

    #[test]
    fn traversal_is_confined_to_root() {
        let outer = tempfile::tempdir().unwrap();
        let root = outer.path().join("root");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(outer.path().join("secret.pdf"), b"outside").unwrap();
        std::fs::write(root.join("secret.pdf"), b"inside").unwrap();

        let provider = DirectoryProvider::new(&root);
        assert_eq!(provider.fetch("../secret.pdf").unwrap(), b"inside");
        assert!(provider.fetch("..").is_err());
    }
}
