//! File system probes used by the resolver
//!
//! Every lookup is a read-only probe and nothing is cached; repeated queries
//! for the same path simply hit the file system again.

use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// File extensions treated as headers when expanding a directory
const HEADER_EXTENSIONS: [&str; 5] = ["h", "hh", "hpp", "hxx", "inc"];

/// Identity of an underlying file, independent of the path spelling used
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileId {
    /// Device and inode numbers
    Inode { dev: u64, ino: u64 },
    /// Canonical path, where inode numbers are unavailable
    Canonical(PathBuf),
}

/// Host file abstraction consumed by the resolution pipeline
pub trait FileSystem {
    /// Whether `path` names an existing regular file (following symlinks)
    fn is_file(&self, path: &Path) -> bool;

    /// Whether `path` names an existing directory (following symlinks)
    fn is_dir(&self, path: &Path) -> bool;

    /// Make `path` absolute against the current directory without touching symlinks
    fn make_absolute(&self, path: &Path) -> PathBuf;

    /// Resolve `path` to the identity of the file it names
    fn file_id(&self, path: &Path) -> Option<FileId>;

    /// Every header file under `dir`, sorted
    fn enumerate_headers(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// [`FileSystem`] backed by the real operating system
#[derive(Debug, Clone, Default)]
pub struct HostFileSystem {
    working_dir: Option<PathBuf>,
}

impl HostFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `dir` instead of the process directory
    pub fn with_working_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: Some(dir.into()),
        }
    }

    fn anchor(&self, path: &Path) -> PathBuf {
        match &self.working_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl FileSystem for HostFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        self.anchor(path).is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.anchor(path).is_dir()
    }

    fn make_absolute(&self, path: &Path) -> PathBuf {
        let anchored = self.anchor(path);
        if anchored.is_absolute() {
            return anchored;
        }
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(anchored),
            Err(_) => anchored,
        }
    }

    fn file_id(&self, path: &Path) -> Option<FileId> {
        identify(&self.anchor(path))
    }

    fn enumerate_headers(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let root = self.anchor(dir);
        let mut headers = Vec::new();

        for entry in WalkDir::new(&root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if is_stale_link(&err) => {
                    debug!(path = ?err.path(), error = %err, "skipping stale directory entry");
                    continue;
                }
                Err(err) => return Err(io::Error::from(err)),
            };
            if entry.file_type().is_file() && is_header_file(entry.path()) {
                headers.push(entry.into_path());
            }
        }

        headers.sort();
        Ok(headers)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(self.anchor(path))
    }
}

#[cfg(unix)]
fn identify(path: &Path) -> Option<FileId> {
    use std::os::unix::fs::MetadataExt;
    let meta = std::fs::metadata(path).ok()?;
    Some(FileId::Inode {
        dev: meta.dev(),
        ino: meta.ino(),
    })
}

#[cfg(not(unix))]
fn identify(path: &Path) -> Option<FileId> {
    std::fs::canonicalize(path).ok().map(FileId::Canonical)
}

/// Dangling symlinks and symlink loops below the root; the root itself stays fatal
fn is_stale_link(err: &walkdir::Error) -> bool {
    if err.depth() == 0 {
        return false;
    }
    err.loop_ancestor().is_some()
        || err
            .io_error()
            .map_or(false, |e| e.kind() == io::ErrorKind::NotFound)
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn is_header_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| HEADER_EXTENSIONS.iter().any(|h| ext == *h))
        .unwrap_or(false)
}
