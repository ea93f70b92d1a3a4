use crate::search::SearchHit;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only record of executed queries.
///
/// One block per query: the query text, then either each matching identifier
/// with its score or a no-match line. Purely observational; an append failure
/// is logged and never fails the query itself.
pub struct QueryLog {
    path: PathBuf,
}

impl QueryLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn append(&self, query: &str, hits: &[SearchHit]) {
        let mut entry = format!("Query: {query}\n");
        if hits.is_empty() {
            entry.push_str("No matches found.\n");
        } else {
            entry.push_str("Results:\n");
            for hit in hits {
                entry.push_str(&format!("  {} (score: {})\n", hit.doc_id, hit.score));
            }
        }
        entry.push('\n');

        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut f| f.write_all(entry.as_bytes()));
        if let Err(err) = result {
            tracing::warn!(path = %self.path.display(), error = %err, "cannot append query log");
        }
    }
}
