use crate::{DocId, Position};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

/// Searchable fields of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Plot,
    Type,
    Year,
    EpisodeTitle,
}

impl Field {
    /// Resolve a query field name, ignoring case.
    pub fn from_name(name: &str) -> Option<Field> {
        match name.to_lowercase().as_str() {
            "title" => Some(Field::Title),
            "plot" => Some(Field::Plot),
            "type" => Some(Field::Type),
            "year" => Some(Field::Year),
            "episodetitle" => Some(Field::EpisodeTitle),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Plot => "plot",
            Field::Type => "type",
            Field::Year => "year",
            Field::EpisodeTitle => "episodetitle",
        }
    }

    /// Whether the field keeps token positions (and therefore supports phrases).
    pub fn is_positional(&self) -> bool {
        matches!(self, Field::Title | Field::Plot | Field::EpisodeTitle)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Postings of one term: the positions it occupies in each document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Postings {
    docs: HashMap<DocId, BTreeSet<Position>>,
}

impl Postings {
    pub fn doc_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.docs.keys().copied()
    }

    pub fn contains_doc(&self, doc_id: DocId) -> bool {
        self.docs.contains_key(&doc_id)
    }

    pub fn positions(&self, doc_id: DocId) -> Option<&BTreeSet<Position>> {
        self.docs.get(&doc_id)
    }

    pub fn num_docs(&self) -> usize {
        self.docs.len()
    }
}

/// term -> doc -> positions, used for title, plot and episode title.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PositionalIndex {
    terms: HashMap<String, Postings>,
}

impl PositionalIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `term` at `position` in `doc_id`. Repeating a triple is a no-op.
    pub fn insert(&mut self, term: &str, doc_id: DocId, position: Position) {
        // Clone the term only the first time it is seen.
        if let Some(postings) = self.terms.get_mut(term) {
            postings.docs.entry(doc_id).or_default().insert(position);
            return;
        }
        let mut postings = Postings::default();
        postings.docs.insert(doc_id, BTreeSet::from([position]));
        self.terms.insert(term.to_string(), postings);
    }

    /// Insert a token sequence, numbering positions from 0.
    pub fn insert_tokens(&mut self, tokens: &[String], doc_id: DocId) {
        for (pos, token) in tokens.iter().enumerate() {
            self.insert(token, doc_id, pos as Position);
        }
    }

    /// `None` means the term never occurs in this field.
    pub fn lookup(&self, term: &str) -> Option<&Postings> {
        self.terms.get(term)
    }

    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }
}

/// term -> docs, used for type and year.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CategoricalIndex {
    terms: HashMap<String, HashSet<DocId>>,
}

impl CategoricalIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, term: &str, doc_id: DocId) {
        match self.terms.get_mut(term) {
            Some(docs) => {
                docs.insert(doc_id);
            }
            None => {
                self.terms.insert(term.to_string(), HashSet::from([doc_id]));
            }
        }
    }

    /// `None` means the term never occurs in this field.
    pub fn lookup(&self, term: &str) -> Option<&HashSet<DocId>> {
        self.terms.get(term)
    }

    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_insert_is_idempotent() {
        let mut idx = PositionalIndex::new();
        idx.insert("star", 1, 0);
        idx.insert("star", 1, 0);
        idx.insert("star", 1, 3);
        idx.insert("star", 2, 0);

        let postings = idx.lookup("star").unwrap();
        assert_eq!(postings.num_docs(), 2);
        let positions: Vec<_> = postings.positions(1).unwrap().iter().copied().collect();
        assert_eq!(positions, vec![0, 3]);
    }

    #[test]
    fn absent_term_is_none() {
        let mut idx = PositionalIndex::new();
        idx.insert_tokens(&["star".to_string(), "wars".to_string()], 1);
        assert!(idx.lookup("trek").is_none());
        assert_eq!(idx.lookup("wars").unwrap().positions(1).unwrap().len(), 1);

        let mut cat = CategoricalIndex::new();
        cat.insert("movie", 4);
        cat.insert("movie", 4);
        assert_eq!(cat.lookup("movie").unwrap().len(), 1);
        assert!(cat.lookup("series").is_none());
    }

    #[test]
    fn field_names_are_case_insensitive() {
        assert_eq!(Field::from_name("EpisodeTitle"), Some(Field::EpisodeTitle));
        assert_eq!(Field::from_name("TITLE"), Some(Field::Title));
        assert_eq!(Field::from_name("genre"), None);
        assert!(!Field::Year.is_positional());
    }
}
