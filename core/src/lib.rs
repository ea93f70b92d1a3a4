pub mod corpus;
pub mod error;
pub mod extract;
pub mod highlight;
pub mod index;
pub mod log;
pub mod search;
pub mod stopwords;
pub mod tokenizer;

/// Document identifier: path of the source file relative to the corpus root.
pub type DocId = String;
/// Normalized index term: lowercased, punctuation-free, purely alphabetic.
pub type Term = String;

pub use corpus::FsCorpus;
pub use error::{Error, Result};
pub use extract::{extract, ExtractedDoc};
pub use highlight::highlight;
pub use index::{DocMeta, Index};
pub use log::QueryLog;
pub use search::SearchHit;
pub use stopwords::StopwordSet;
pub use tokenizer::tokenize;
