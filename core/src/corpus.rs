use crate::error::{Error, Result};
use crate::DocId;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// A directory of HTML documents.
///
/// The inclusion rule is the file extension: only `.html` files belong to the
/// corpus. A document's identifier is its path relative to the root, so the
/// same corpus enumerated twice yields the same identifiers.
#[derive(Debug, Clone)]
pub struct FsCorpus {
    root: PathBuf,
}

impl FsCorpus {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Enumerate corpus document identifiers, sorted for determinism.
    pub fn ids(&self) -> Vec<DocId> {
        let mut ids: Vec<DocId> = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry.file_type().is_file()
                    && entry.path().extension().and_then(|e| e.to_str()) == Some("html")
            })
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(&self.root)
                    .ok()
                    .map(|rel| rel.to_string_lossy().into_owned())
            })
            .collect();
        ids.sort();
        ids
    }

    /// Resolve an identifier to a path strictly inside the corpus root.
    ///
    /// Identifiers with absolute or parent components are refused outright,
    /// so a request can never escape the root.
    pub fn resolve(&self, id: &str) -> Result<PathBuf> {
        let escapes = Path::new(id).components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if id.is_empty() || escapes {
            return Err(Error::IdentifierOutsideCorpus { id: id.to_string() });
        }
        Ok(self.root.join(id))
    }

    /// Read a document's raw content by identifier.
    pub fn read(&self, id: &str) -> Result<String> {
        let path = self.resolve(id)?;
        fs::read_to_string(path).map_err(|source| Error::DocumentUnreadable {
            id: id.to_string(),
            source,
        })
    }
}
