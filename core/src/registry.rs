use crate::DocId;
use serde::Serialize;
use std::fmt;

/// Kind of title a record describes. Exactly one per document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Episode,
    Television,
    Video,
    VideoGame,
    Series,
    Movie,
}

impl Category {
    /// Classify a lowercased title payload. Markers are checked in order:
    /// episode braces, `(tv)`, `(v)`, `(vg)`, a leading quote, then movie.
    pub fn classify(payload: &str) -> Category {
        if payload.contains('{') {
            Category::Episode
        } else if payload.contains("(tv)") {
            Category::Television
        } else if payload.contains("(v)") {
            Category::Video
        } else if payload.contains("(vg)") {
            Category::VideoGame
        } else if payload.starts_with('"') {
            Category::Series
        } else {
            Category::Movie
        }
    }

    /// The term stored in the type index.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Episode => "episode",
            Category::Television => "television",
            Category::Video => "video",
            Category::VideoGame => "videogame",
            Category::Series => "series",
            Category::Movie => "movie",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// The title line exactly as it appeared in the corpus, prefix included.
    pub line: String,
    pub category: Category,
    pub year: Option<String>,
}

/// Document id -> document. Ids are handed out densely starting at 1.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocumentRegistry {
    docs: Vec<Document>,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `doc` and return its newly assigned id.
    pub fn register(&mut self, doc: Document) -> DocId {
        self.docs.push(doc);
        self.docs.len() as DocId
    }

    pub fn get(&self, id: DocId) -> Option<&Document> {
        let idx = (id as usize).checked_sub(1)?;
        self.docs.get(idx)
    }

    pub fn len(&self) -> u32 {
        self.docs.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DocId, &Document)> {
        self.docs.iter().enumerate().map(|(i, d)| (i as DocId + 1, d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(line: &str) -> Document {
        Document { line: line.to_string(), category: Category::Movie, year: None }
    }

    #[test]
    fn ids_start_at_one_and_are_dense() {
        let mut reg = DocumentRegistry::new();
        assert_eq!(reg.register(doc("MV: A")), 1);
        assert_eq!(reg.register(doc("MV: B")), 2);
        assert_eq!(reg.get(0), None);
        assert_eq!(reg.get(2).unwrap().line, "MV: B");
        assert_eq!(reg.get(3), None);
        let ids: Vec<_> = reg.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn category_precedence() {
        assert_eq!(Category::classify("\"lost\" (2004) {pilot (#1.1)}"), Category::Episode);
        assert_eq!(Category::classify("\"lost\" (2004) {x} (tv)"), Category::Episode);
        assert_eq!(Category::classify("heidi (1978) (tv)"), Category::Television);
        assert_eq!(Category::classify("a clip (2001) (v)"), Category::Video);
        assert_eq!(Category::classify("grand theft auto (1997) (vg)"), Category::VideoGame);
        assert_eq!(Category::classify("\"lost\" (2004)"), Category::Series);
        assert_eq!(Category::classify("star wars (1977)"), Category::Movie);
    }
}
