//! Line classification for `plot.list` style corpora.
//!
//! The corpus is ISO-8859-1 text: a free-form preamble, a delimiter line, then
//! records made of one `MV:` title line followed by any number of `PL:` plot
//! lines. Every record line is `<2 letters>:<space><payload>`.

use std::io::{self, BufRead};

/// Corpus layout knobs. `Default` matches the IMDb `plot.list` distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusFormat {
    /// Line that ends the preamble. Compared exactly.
    pub header_delimiter: String,
    /// Suffix of a lowercased, trimmed title payload that withdraws the record.
    pub withdrawal_marker: String,
    pub title_prefix: String,
    pub plot_prefix: String,
}

impl Default for CorpusFormat {
    fn default() -> Self {
        Self {
            header_delimiter: "===================".into(),
            withdrawal_marker: "{{suspended}}".into(),
            title_prefix: "MV:".into(),
            plot_prefix: "PL:".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// A retained title line. `payload` is lowercased, `raw` is verbatim.
    Title { raw: String, payload: String },
    /// A plot line of the most recent retained title.
    Plot { payload: String },
}

/// Counters for lines the scanner dropped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    pub preamble: usize,
    pub withdrawn: usize,
    pub orphan_plots: usize,
    pub ignored: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Current {
    Nothing,
    Retained,
    Withdrawn,
}

pub struct Scanner<'a, R> {
    reader: R,
    format: &'a CorpusFormat,
    buf: Vec<u8>,
    passed_header: bool,
    current: Current,
    stats: ScanStats,
}

impl<'a, R: BufRead> Scanner<'a, R> {
    pub fn new(reader: R, format: &'a CorpusFormat) -> Self {
        Self {
            reader,
            format,
            buf: Vec::new(),
            passed_header: false,
            current: Current::Nothing,
            stats: ScanStats::default(),
        }
    }

    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        Ok(Some(decode_latin1(&self.buf)))
    }

    fn classify(&mut self, line: String) -> Option<Line> {
        let Some((prefix, payload)) = split_record(&line) else {
            if !line.is_empty() {
                self.stats.ignored += 1;
            }
            return None;
        };

        if prefix == self.format.title_prefix {
            let payload = payload.to_lowercase();
            if payload.trim().ends_with(self.format.withdrawal_marker.as_str()) {
                tracing::debug!(line = %line, "skipping withdrawn record");
                self.stats.withdrawn += 1;
                self.current = Current::Withdrawn;
                return None;
            }
            self.current = Current::Retained;
            return Some(Line::Title { raw: line, payload });
        }

        if prefix == self.format.plot_prefix {
            return match self.current {
                Current::Retained => Some(Line::Plot { payload: payload.to_lowercase() }),
                Current::Withdrawn => None,
                Current::Nothing => {
                    tracing::debug!(line = %line, "plot line before any title");
                    self.stats.orphan_plots += 1;
                    None
                }
            };
        }

        self.stats.ignored += 1;
        None
    }
}

impl<R: BufRead> Iterator for Scanner<'_, R> {
    type Item = io::Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(e) => return Some(Err(e)),
            };
            if !self.passed_header {
                self.passed_header = line == self.format.header_delimiter;
                self.stats.preamble += 1;
                continue;
            }
            if let Some(classified) = self.classify(line) {
                return Some(Ok(classified));
            }
        }
    }
}

/// Map each byte to the code point of the same value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Split a record line into its 3-character prefix and the payload after the
/// separator. Lines of 4 characters or fewer carry no record.
fn split_record(line: &str) -> Option<(&str, &str)> {
    let mut offsets = line.char_indices().map(|(i, _)| i);
    let separator = offsets.nth(3)?;
    let payload = offsets.next()?;
    Some((&line[..separator], &line[payload..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scan(input: &[u8]) -> (Vec<Line>, ScanStats) {
        let format = CorpusFormat::default();
        let mut scanner = Scanner::new(Cursor::new(input), &format);
        let lines = scanner.by_ref().collect::<io::Result<Vec<_>>>().unwrap();
        (lines, scanner.stats())
    }

    #[test]
    fn preamble_is_skipped() {
        let (lines, stats) = scan(b"MV: Not A Record (1900)\n===================\nMV: Real (2000)\n");
        assert_eq!(
            lines,
            vec![Line::Title { raw: "MV: Real (2000)".into(), payload: "real (2000)".into() }]
        );
        assert_eq!(stats.preamble, 2);
    }

    #[test]
    fn short_and_unknown_lines_are_ignored() {
        let (lines, stats) = scan(b"===================\n\nMV:\nPL: \nBY: someone\r\nMV: X (1999)\r\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(stats.ignored, 3);
    }

    #[test]
    fn withdrawn_record_drops_its_plot_lines() {
        let input = b"===================\n\
MV: Gone (2001) {{SUSPENDED}}\n\
PL: should vanish\n\
MV: Kept (2002)\n\
PL: stays\n";
        let (lines, stats) = scan(input);
        assert_eq!(stats.withdrawn, 1);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], Line::Plot { payload: "stays".into() });
    }

    #[test]
    fn orphan_plot_lines_are_counted() {
        let (lines, stats) = scan(b"===================\nPL: nobody owns me\nMV: A (1990)\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(stats.orphan_plots, 1);
    }

    #[test]
    fn latin1_bytes_decode_to_code_points() {
        assert_eq!(decode_latin1(b"Am\xe9lie"), "Am\u{e9}lie");
        let (lines, _) = scan(b"===================\nMV: Am\xc9lie (2001)\n");
        assert_eq!(
            lines,
            vec![Line::Title { raw: "MV: Am\u{c9}lie (2001)".into(), payload: "am\u{e9}lie (2001)".into() }]
        );
    }
}
