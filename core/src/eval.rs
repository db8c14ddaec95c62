//! Conjunctive evaluation of parsed queries.
//!
//! The candidate set starts out undefined: the first constraining clause seeds
//! it, every later one narrows it. A term missing from its field's dictionary
//! ends the query with no results.

use crate::index::{Field, PositionalIndex, Postings};
use crate::query::{Clause, Query};
use crate::{DocId, PlotIndex};
use std::collections::HashSet;

pub fn evaluate(index: &PlotIndex, query: &Query) -> HashSet<DocId> {
    let mut candidates: Option<HashSet<DocId>> = None;

    for clause in &query.clauses {
        let satisfiable = match clause {
            Clause::Term { field, term } => match_term(index, *field, term, &mut candidates),
            Clause::Phrase { field, text, terms } => match index.positional(*field) {
                Some(positional) => match_phrase(positional, terms, &mut candidates),
                None => match_term(index, *field, text, &mut candidates),
            },
            Clause::UnknownField { name } => {
                tracing::warn!(field = %name, "unknown query field, clause ignored");
                true
            }
            Clause::Malformed { raw } => {
                tracing::warn!(clause = %raw, "clause without field, ignored");
                true
            }
        };
        if !satisfiable {
            return HashSet::new();
        }
    }

    candidates.unwrap_or_default()
}

/// Seed the candidate set from `seed` if undefined, otherwise keep only docs passing `keep`.
fn narrow<'c>(
    candidates: &'c mut Option<HashSet<DocId>>,
    seed: impl FnOnce() -> HashSet<DocId>,
    keep: impl Fn(DocId) -> bool,
) -> &'c mut HashSet<DocId> {
    match candidates {
        Some(set) => set.retain(|&d| keep(d)),
        None => *candidates = Some(seed()),
    }
    candidates.get_or_insert_with(HashSet::new)
}

/// Returns `false` when the term is absent from the field.
fn match_term(index: &PlotIndex, field: Field, term: &str, candidates: &mut Option<HashSet<DocId>>) -> bool {
    if let Some(positional) = index.positional(field) {
        let Some(postings) = positional.lookup(term) else {
            return false;
        };
        narrow(candidates, || postings.doc_ids().collect(), |d| postings.contains_doc(d));
        return true;
    }

    let Some(docs) = index.categorical(field).and_then(|c| c.lookup(term)) else {
        return false;
    };
    narrow(candidates, || docs.clone(), |d| docs.contains(&d));
    true
}

/// Each term must directly follow its predecessor somewhere in the document.
/// Pairs are checked independently, so a match for `a b c` only needs some
/// `a b` and some `b c`, not necessarily sharing the same `b`.
fn match_phrase(field: &PositionalIndex, terms: &[String], candidates: &mut Option<HashSet<DocId>>) -> bool {
    let Some((first, rest)) = terms.split_first() else {
        return false;
    };
    let Some(mut prev) = field.lookup(first) else {
        return false;
    };
    let set = narrow(candidates, || prev.doc_ids().collect(), |d| prev.contains_doc(d));

    for term in rest {
        let Some(next) = field.lookup(term) else {
            return false;
        };
        set.retain(|&d| next.contains_doc(d) && adjacent(prev, next, d));
        prev = next;
    }
    true
}

fn adjacent(prev: &Postings, next: &Postings, doc_id: DocId) -> bool {
    let (Some(before), Some(after)) = (prev.positions(doc_id), next.positions(doc_id)) else {
        return false;
    };
    after.iter().any(|&p| p > 0 && before.contains(&(p - 1)))
}
