//! Query syntax: `field:value` clauses joined by ` AND `.
//!
//! A value wrapped in double quotes is a phrase and is split with the same
//! rules as indexed text; anything else is a single lowercased term.

use crate::index::Field;
use crate::tokenizer::tokenize;

/// Literal connector between clauses. Case-sensitive, one space on each side.
pub const AND: &str = " AND ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    Term {
        field: Field,
        term: String,
    },
    Phrase {
        field: Field,
        /// Unquoted, lowercased interior; matched as-is against type and year.
        text: String,
        terms: Vec<String>,
    },
    /// Field name not recognised. Evaluated as a no-op.
    UnknownField { name: String },
    /// No `:` in the clause. Treated like an unknown field.
    Malformed { raw: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub clauses: Vec<Clause>,
}

impl Query {
    pub fn parse(input: &str) -> Query {
        Query { clauses: input.split(AND).map(parse_clause).collect() }
    }
}

fn parse_clause(raw: &str) -> Clause {
    let Some((name, value)) = raw.split_once(':') else {
        return Clause::Malformed { raw: raw.to_string() };
    };
    let Some(field) = Field::from_name(name) else {
        return Clause::UnknownField { name: name.to_lowercase() };
    };

    let value = value.to_lowercase();
    match strip_quotes(&value) {
        Some(inner) => Clause::Phrase { field, text: inner.to_string(), terms: tokenize(inner) },
        None => Clause::Term { field, term: value },
    }
}

fn strip_quotes(value: &str) -> Option<&str> {
    value.strip_prefix('"')?.strip_suffix('"')
}
