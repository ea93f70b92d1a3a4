use crate::corpus::FsCorpus;
use crate::extract::extract;
use crate::stopwords::StopwordSet;
use crate::tokenizer::tokenize;
use crate::{DocId, Term};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocMeta {
    pub title: String,
    pub description: String,
}

/// In-memory inverted index over one corpus snapshot.
///
/// `postings[term][doc]` is the number of times `term` occurs in `doc`; an
/// entry exists iff the count is at least one. Read-only after `build`, so
/// an `Arc<Index>` can be shared freely across threads. Rebuilding means
/// building a fresh `Index` and swapping it in whole.
pub struct Index {
    postings: HashMap<Term, HashMap<DocId, u32>>,
    metadata: HashMap<DocId, DocMeta>,
    stopwords: Arc<StopwordSet>,
    corpus: FsCorpus,
    // Lazy per-document token cache for snippet extraction. Lives and dies
    // with this Index, so a rebuild starts from an empty cache.
    token_cache: Mutex<HashMap<DocId, Arc<Vec<Term>>>>,
}

impl Index {
    /// Build the index from every HTML document in the corpus.
    ///
    /// A document that cannot be read is logged and skipped; it never aborts
    /// the rest of the build.
    pub fn build(corpus: FsCorpus, stopwords: Arc<StopwordSet>) -> Self {
        let mut postings: HashMap<Term, HashMap<DocId, u32>> = HashMap::new();
        let mut metadata: HashMap<DocId, DocMeta> = HashMap::new();

        for id in corpus.ids() {
            let raw = match corpus.read(&id) {
                Ok(raw) => raw,
                Err(err) => {
                    tracing::warn!(doc = %id, error = %err, "skipping unreadable document");
                    continue;
                }
            };
            let doc = extract(&raw);
            for term in tokenize(&doc.text, &stopwords) {
                *postings
                    .entry(term)
                    .or_default()
                    .entry(id.clone())
                    .or_insert(0) += 1;
            }
            metadata.insert(
                id.clone(),
                DocMeta {
                    title: doc.title.unwrap_or_else(|| id.clone()),
                    description: doc.description.unwrap_or_default(),
                },
            );
        }

        tracing::info!(
            num_docs = metadata.len(),
            num_terms = postings.len(),
            "index built"
        );
        Self {
            postings,
            metadata,
            stopwords,
            corpus,
            token_cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn postings(&self, term: &str) -> Option<&HashMap<DocId, u32>> {
        self.postings.get(term)
    }

    pub fn meta(&self, id: &str) -> Option<&DocMeta> {
        self.metadata.get(id)
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    pub fn num_docs(&self) -> usize {
        self.metadata.len()
    }

    pub fn num_terms(&self) -> usize {
        self.postings.len()
    }

    /// Tokenized full text of one document, re-derived from the corpus on
    /// first use and cached for the lifetime of this index.
    pub(crate) fn doc_tokens(&self, id: &str) -> Option<Arc<Vec<Term>>> {
        if let Some(tokens) = self.token_cache.lock().get(id) {
            return Some(tokens.clone());
        }
        let raw = match self.corpus.read(id) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(doc = %id, error = %err, "cannot re-read document for snippet");
                return None;
            }
        };
        let tokens = Arc::new(tokenize(&extract(&raw).text, &self.stopwords));
        self.token_cache
            .lock()
            .insert(id.to_string(), tokens.clone());
        Some(tokens)
    }
}
