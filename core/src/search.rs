use crate::highlight::highlight;
use crate::index::Index;
use crate::tokenizer::tokenize;
use crate::DocId;
use serde::Serialize;
use std::collections::HashMap;

/// Context tokens kept on each side of the matched term in a snippet.
const SNIPPET_WINDOW: usize = 5;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub score: u32,
    /// Document title with query terms wrapped in `<mark>` tags.
    pub title: String,
    /// Context window around the first matched term, highlighted. Empty when
    /// the document text cannot be re-read.
    pub snippet: String,
}

impl Index {
    /// Rank documents for a free-text query by summed term frequency.
    ///
    /// The query goes through the same tokenizer and stopword set as the
    /// indexed text. Each query term occurrence adds the term's per-document
    /// count to that document's score. Results are ordered by score
    /// descending, then doc id ascending so equal scores rank
    /// deterministically. A query with no surviving terms returns no results.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let terms = tokenize(query, self.stopwords());

        let mut scores: HashMap<&str, u32> = HashMap::new();
        // First query term (in query order) that matched each document;
        // that term anchors the document's snippet.
        let mut anchor: HashMap<&str, &str> = HashMap::new();
        for term in &terms {
            let Some(postings) = self.postings(term) else {
                continue;
            };
            for (doc, freq) in postings {
                *scores.entry(doc.as_str()).or_insert(0) += freq;
                anchor.entry(doc.as_str()).or_insert(term.as_str());
            }
        }

        let mut ranked: Vec<(&str, u32)> = scores.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        // Highlight each distinct term once; a repeated query term must not
        // re-wrap text already inside a marker.
        let mut distinct: Vec<String> = Vec::new();
        for term in &terms {
            if !distinct.contains(term) {
                distinct.push(term.clone());
            }
        }

        ranked
            .into_iter()
            .map(|(doc, score)| {
                let snippet = anchor
                    .get(doc)
                    .and_then(|term| self.snippet(doc, term))
                    .unwrap_or_default();
                let title = self
                    .meta(doc)
                    .map(|m| m.title.as_str())
                    .unwrap_or(doc);
                SearchHit {
                    doc_id: doc.to_string(),
                    score,
                    title: highlight(title, &distinct),
                    snippet: highlight(&snippet, &distinct),
                }
            })
            .collect()
    }

    /// Context window around the first occurrence of `term` in the document's
    /// tokenized text, joined by spaces with a trailing ellipsis.
    fn snippet(&self, doc: &str, term: &str) -> Option<String> {
        let tokens = self.doc_tokens(doc)?;
        let hit = tokens.iter().position(|t| t == term)?;
        let start = hit.saturating_sub(SNIPPET_WINDOW);
        let end = (hit + SNIPPET_WINDOW + 1).min(tokens.len());
        Some(format!("{}...", tokens[start..end].join(" ")))
    }
}
