use plotindex::{CorpusFormat, Error, IndexBuilder, PlotIndex};
use std::io::Write;
use tempfile::NamedTempFile;

fn corpus_file(bytes: &[u8]) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(bytes).unwrap();
    f.flush().unwrap();
    f
}

const CORPUS: &[u8] = b"header text\n\
===================\n\
MV: Alpha (1990)\n\
PL: first\n\
MV: Beta (1991) {{SUSPENDED}}\n\
PL: ignored\n\
MV: Gamma (1992)\n\
MV: Delta\n\
PL: last one\n";

#[test]
fn building_twice_is_identical() {
    let file = corpus_file(CORPUS);
    let a = PlotIndex::build(file.path()).unwrap();
    let b = PlotIndex::build(file.path()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn ids_are_dense_and_follow_file_order() {
    let file = corpus_file(CORPUS);
    let index = PlotIndex::build(file.path()).unwrap();
    let lines: Vec<_> = (1..=index.num_docs()).map(|id| index.document(id).unwrap().line.clone()).collect();
    assert_eq!(lines, vec!["MV: Alpha (1990)", "MV: Gamma (1992)", "MV: Delta"]);
    assert!(index.document(0).is_none());
    assert!(index.document(4).is_none());
}

#[test]
fn plot_lines_of_withdrawn_record_are_not_reassigned() {
    let file = corpus_file(CORPUS);
    let index = PlotIndex::build(file.path()).unwrap();
    assert!(index.query("plot:ignored").unwrap().is_empty());
    assert_eq!(index.query("plot:last").unwrap().into_iter().collect::<Vec<_>>(), vec!["MV: Delta"]);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plot.list");
    match PlotIndex::build(&path) {
        Err(Error::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn latin1_titles_are_searchable() {
    let file = corpus_file(b"===================\nMV: Le fabuleux destin d'Am\xe9lie Poulain (2001)\n");
    let index = PlotIndex::build(file.path()).unwrap();
    let hits = index.query("title:\"d'am\u{e9}lie poulain\"").unwrap();
    assert_eq!(hits.into_iter().next().unwrap(), "MV: Le fabuleux destin d'Am\u{e9}lie Poulain (2001)");
}

#[test]
fn custom_format() {
    let format = CorpusFormat { header_delimiter: "---".into(), withdrawal_marker: "[gone]".into(), ..CorpusFormat::default() };
    let file = corpus_file(b"---\nMV: One (2000)\nMV: Two (2001) [GONE]\n");
    let index = IndexBuilder::new(format).build_path(file.path()).unwrap();
    assert_eq!(index.num_docs(), 1);
    assert_eq!(index.stats().year_terms, 1);
}
