use crate::error::{Error, Result};
use crate::registry::{Category, Document};
use crate::scanner::{CorpusFormat, Line, Scanner};
use crate::tokenizer::{tokenize, tokenize_title};
use crate::{DocId, PlotIndex};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

lazy_static! {
    // "(1977", "(2004/I"; only the digits are kept.
    static ref YEAR: Regex = Regex::new(r"\(([12][0-9]+)").expect("valid regex");
}

/// Builds a [`PlotIndex`] in one pass over a corpus.
#[derive(Debug, Default, Clone)]
pub struct IndexBuilder {
    format: CorpusFormat,
}

impl IndexBuilder {
    pub fn new(format: CorpusFormat) -> Self {
        Self { format }
    }

    pub fn build_path<P: AsRef<Path>>(&self, path: P) -> Result<PlotIndex> {
        let path = path.as_ref();
        let io_err = |source| Error::Io { path: path.to_path_buf(), source };
        let file = File::open(path).map_err(io_err)?;
        tracing::info!(path = %path.display(), "building indices");
        self.build_reader(BufReader::new(file)).map_err(|e| match e {
            Error::Read(source) => io_err(source),
            other => other,
        })
    }

    /// Consume `reader` to the end. Any read error discards everything built so far.
    pub fn build_reader<R: BufRead>(&self, reader: R) -> Result<PlotIndex> {
        let start = Instant::now();
        let mut index = PlotIndex::default();
        let mut scanner = Scanner::new(reader, &self.format);
        let mut current: Option<DocId> = None;
        let mut plot_lines = 0usize;

        for line in scanner.by_ref() {
            match line? {
                Line::Title { raw, payload } => {
                    current = Some(add_title(&mut index, raw, &payload));
                }
                Line::Plot { payload } => {
                    // The scanner only yields plot lines after a retained title.
                    if let Some(doc_id) = current {
                        index.plot.insert_tokens(&tokenize(&payload), doc_id);
                        plot_lines += 1;
                    }
                }
            }
        }

        let stats = scanner.stats();
        tracing::info!(
            documents = index.num_docs(),
            plot_lines,
            withdrawn = stats.withdrawn,
            orphan_plots = stats.orphan_plots,
            ignored = stats.ignored,
            title_terms = index.title.num_terms(),
            plot_terms = index.plot.num_terms(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "index build complete"
        );
        Ok(index)
    }
}

/// Register a title line and index its title zone, year, type and episode title.
fn add_title(index: &mut PlotIndex, raw: String, payload: &str) -> DocId {
    let (title_zone, year) = match YEAR.captures(payload) {
        Some(caps) => {
            let whole = caps.get(0).map_or(payload.len(), |m| m.start());
            (&payload[..whole], caps.get(1).map(|m| m.as_str().to_string()))
        }
        None => (payload, None),
    };
    let category = Category::classify(payload);

    let doc_id = index.registry.register(Document { line: raw, category, year: year.clone() });

    if let Some(year) = &year {
        index.year.insert(year, doc_id);
    }
    index.kind.insert(category.as_str(), doc_id);
    if category == Category::Episode {
        index.episode_title.insert_tokens(&tokenize_title(episode_zone(payload)), doc_id);
    }
    index.title.insert_tokens(&tokenize_title(title_zone), doc_id);
    doc_id
}

/// Text between the first `{` and the last `}`; runs to the end if no `}` follows.
fn episode_zone(payload: &str) -> &str {
    let Some(open) = payload.find('{') else {
        return "";
    };
    let rest = &payload[open + 1..];
    match rest.rfind('}') {
        Some(close) => &rest[..close],
        None => rest,
    }
}
