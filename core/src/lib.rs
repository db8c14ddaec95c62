//! Boolean and phrase retrieval over a `plot.list` style movie corpus.
//!
//! The index is built once from the corpus file and is read-only afterwards:
//! queries take `&PlotIndex` and never mutate it, so one index can be shared
//! between any number of concurrent readers.

pub mod builder;
pub mod error;
pub mod eval;
pub mod index;
pub mod query;
pub mod registry;
pub mod scanner;
pub mod tokenizer;

pub use builder::IndexBuilder;
pub use error::{Error, Result};
pub use index::{CategoricalIndex, Field, PositionalIndex, Postings};
pub use query::{Clause, Query};
pub use registry::{Category, Document, DocumentRegistry};
pub use scanner::CorpusFormat;

use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::io::BufRead;
use std::path::Path;

pub type DocId = u32;
pub type Position = u32;

/// The five field indexes plus the document registry of one corpus.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PlotIndex {
    pub(crate) title: PositionalIndex,
    pub(crate) plot: PositionalIndex,
    pub(crate) episode_title: PositionalIndex,
    pub(crate) kind: CategoricalIndex,
    pub(crate) year: CategoricalIndex,
    pub(crate) registry: DocumentRegistry,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IndexStats {
    pub num_docs: u32,
    pub title_terms: usize,
    pub plot_terms: usize,
    pub episode_title_terms: usize,
    pub type_terms: usize,
    pub year_terms: usize,
}

impl PlotIndex {
    /// Build the index from a corpus file using the default corpus format.
    pub fn build<P: AsRef<Path>>(path: P) -> Result<Self> {
        IndexBuilder::default().build_path(path)
    }

    /// Build the index from an already opened corpus stream.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        IndexBuilder::default().build_reader(reader)
    }

    /// Parse and evaluate `query`, returning the verbatim title lines of every match.
    pub fn query(&self, query: &str) -> Result<BTreeSet<String>> {
        let parsed = Query::parse(query);
        let ids = self.matching_ids(&parsed);
        self.resolve(&ids)
    }

    /// Evaluate a parsed query into the set of matching document ids.
    pub fn matching_ids(&self, query: &Query) -> HashSet<DocId> {
        eval::evaluate(self, query)
    }

    /// Map document ids to their verbatim title lines.
    pub fn resolve(&self, ids: &HashSet<DocId>) -> Result<BTreeSet<String>> {
        ids.iter()
            .map(|&id| match self.registry.get(id) {
                Some(doc) => Ok(doc.line.clone()),
                None => Err(Error::MissingDocument(id)),
            })
            .collect()
    }

    pub fn document(&self, id: DocId) -> Option<&Document> {
        self.registry.get(id)
    }

    pub fn num_docs(&self) -> u32 {
        self.registry.len()
    }

    /// Positional index backing `field`, or `None` for categorical fields.
    pub fn positional(&self, field: Field) -> Option<&PositionalIndex> {
        match field {
            Field::Title => Some(&self.title),
            Field::Plot => Some(&self.plot),
            Field::EpisodeTitle => Some(&self.episode_title),
            Field::Type | Field::Year => None,
        }
    }

    /// Categorical index backing `field`, or `None` for positional fields.
    pub fn categorical(&self, field: Field) -> Option<&CategoricalIndex> {
        match field {
            Field::Type => Some(&self.kind),
            Field::Year => Some(&self.year),
            Field::Title | Field::Plot | Field::EpisodeTitle => None,
        }
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            num_docs: self.num_docs(),
            title_terms: self.title.num_terms(),
            plot_terms: self.plot.num_terms(),
            episode_title_terms: self.episode_title.num_terms(),
            type_terms: self.kind.num_terms(),
            year_terms: self.year.num_terms(),
        }
    }
}
