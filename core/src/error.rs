use crate::DocId;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read corpus {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read corpus: {0}")]
    Read(#[from] std::io::Error),
    #[error("document {0} matched but has no registry entry")]
    MissingDocument(DocId),
}
