use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The stopword file could not be loaded. Fatal: tokenization has no
    /// defined exclusion set without it.
    #[error("cannot load stopword file {path}: {source}")]
    MissingStopwords {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A corpus entry could not be read. Recoverable during a build (the
    /// document is skipped), terminal when a single document is requested.
    #[error("cannot read document {id}: {source}")]
    DocumentUnreadable { id: String, source: std::io::Error },

    /// The identifier would resolve outside the corpus root. Always refused.
    #[error("identifier {id:?} resolves outside the corpus root")]
    IdentifierOutsideCorpus { id: String },
}

pub type Result<T> = std::result::Result<T, Error>;
