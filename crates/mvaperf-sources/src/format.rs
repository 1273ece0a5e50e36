use std::io::{BufRead, Lines};

use mvaperf_core::{Error, EventClass, Result};
use serde::{Deserialize, Serialize};

/// One classified score read from a file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredEvent {
    /// Classifier output
    pub score: f64,
    /// True class of the event
    pub class: EventClass,
}

/// Yields events from a score file. A line is parsed completely before it is
/// returned, so an error never leaves a half-counted event behind.
pub trait ScoreReader {
    /// Next event, `Ok(None)` at the end of the data.
    fn next_event(&mut self) -> Result<Option<ScoredEvent>>;
}

/// Score file layout, as written in report configs (`kind: labelled`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum ScoreFormat {
    /// `score label` pairs after a fixed header; label `1` is signal.
    Labelled {
        /// Lines skipped before the data
        #[serde(default = "default_header_lines")]
        header_lines: usize,
    },
    /// Background block followed by a signal block of equal size.
    SplitHalves {
        /// Events in each block
        #[serde(default = "default_events_per_class")]
        events_per_class: usize,
        /// Whitespace tokens per line
        #[serde(default = "default_columns")]
        columns: usize,
        /// Token holding the score
        #[serde(default)]
        score_column: usize,
    },
    /// `label,score` CSV.
    LabelFirstCsv {
        /// Label text marking signal events
        #[serde(default = "default_signal_label")]
        signal_label: String,
    },
}

fn default_header_lines() -> usize {
    2
}

fn default_events_per_class() -> usize {
    21158
}

fn default_columns() -> usize {
    1
}

fn default_signal_label() -> String {
    "1.0".to_string()
}

impl ScoreFormat {
    /// Labelled format with the usual two header lines.
    pub fn labelled() -> Self {
        ScoreFormat::Labelled { header_lines: default_header_lines() }
    }

    /// Single-column split-halves format.
    pub fn split_halves(events_per_class: usize) -> Self {
        ScoreFormat::SplitHalves {
            events_per_class,
            columns: default_columns(),
            score_column: 0,
        }
    }

    /// CSV format with `1.0` as the signal label.
    pub fn label_first_csv() -> Self {
        ScoreFormat::LabelFirstCsv { signal_label: default_signal_label() }
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ScoreFormat::Labelled { .. } => "labelled",
            ScoreFormat::SplitHalves { .. } => "split_halves",
            ScoreFormat::LabelFirstCsv { .. } => "label_first_csv",
        }
    }

    /// Check parameters that serde cannot.
    pub fn validate(&self) -> Result<()> {
        match self {
            ScoreFormat::Labelled { .. } => Ok(()),
            ScoreFormat::SplitHalves { events_per_class, columns, score_column } => {
                if *events_per_class == 0 {
                    return Err(Error::Validation("events_per_class must be > 0".into()));
                }
                if *columns == 0 || score_column >= columns {
                    return Err(Error::Validation(format!(
                        "score_column {score_column} out of range for {columns} columns"
                    )));
                }
                Ok(())
            }
            ScoreFormat::LabelFirstCsv { signal_label } => {
                if signal_label.trim().is_empty() {
                    return Err(Error::Validation("signal_label must not be empty".into()));
                }
                Ok(())
            }
        }
    }

    /// Wrap `input` in the reader for this layout. `path` only labels errors.
    pub fn reader<'a, R: BufRead + 'a>(
        &self,
        input: R,
        path: &str,
    ) -> Result<Box<dyn ScoreReader + 'a>> {
        self.validate()?;
        Ok(match self {
            ScoreFormat::Labelled { header_lines } => {
                Box::new(LabelledReader::new(input, path, *header_lines))
            }
            ScoreFormat::SplitHalves { events_per_class, columns, score_column } => Box::new(
                SplitHalvesReader::new(input, path, *events_per_class, *columns, *score_column),
            ),
            ScoreFormat::LabelFirstCsv { signal_label } => {
                Box::new(LabelFirstCsvReader::new(input, path, signal_label))
            }
        })
    }
}

/// Numbered line iterator shared by the readers.
struct NumberedLines<R> {
    lines: Lines<R>,
    path: String,
    line_no: usize,
}

impl<R: BufRead> NumberedLines<R> {
    fn new(input: R, path: &str) -> Self {
        Self { lines: input.lines(), path: path.to_string(), line_no: 0 }
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        let line = self.lines.next().transpose()?;
        if line.is_some() {
            self.line_no += 1;
        }
        Ok(line)
    }

    fn malformed(&self, reason: impl Into<String>, tokens: &[&str]) -> Error {
        Error::malformed(&self.path, self.line_no, reason, tokens)
    }

    fn score(&self, token: &str, tokens: &[&str]) -> Result<f64> {
        match token.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            Ok(v) => Err(self.malformed(format!("non-finite score {v}"), tokens)),
            Err(_) => Err(self.malformed(format!("cannot parse score `{token}`"), tokens)),
        }
    }
}

/// Reader for `score label` files.
///
/// Data ends at the first line that does not hold exactly two tokens, which
/// covers EOF, blank lines and trailers alike.
pub struct LabelledReader<R> {
    lines: NumberedLines<R>,
    header_lines: usize,
    finished: bool,
}

impl<R: BufRead> LabelledReader<R> {
    /// Reader skipping `header_lines` lines before the data.
    pub fn new(input: R, path: &str, header_lines: usize) -> Self {
        Self { lines: NumberedLines::new(input, path), header_lines, finished: false }
    }
}

impl<R: BufRead> ScoreReader for LabelledReader<R> {
    fn next_event(&mut self) -> Result<Option<ScoredEvent>> {
        if self.finished {
            return Ok(None);
        }
        while self.lines.line_no < self.header_lines {
            if self.lines.next_line()?.is_none() {
                self.finished = true;
                return Ok(None);
            }
        }

        let Some(line) = self.lines.next_line()? else {
            self.finished = true;
            return Ok(None);
        };
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 2 {
            self.finished = true;
            return Ok(None);
        }

        let score = self.lines.score(tokens[0], &tokens)?;
        let label: i64 = tokens[1].parse().map_err(|_| {
            self.lines.malformed(format!("cannot parse label `{}`", tokens[1]), &tokens)
        })?;
        let class = if label == 1 { EventClass::Signal } else { EventClass::Background };
        Ok(Some(ScoredEvent { score, class }))
    }
}

/// Reader for files holding `events_per_class` background lines followed by
/// as many signal lines.
pub struct SplitHalvesReader<R> {
    lines: NumberedLines<R>,
    events_per_class: usize,
    columns: usize,
    score_column: usize,
    read: usize,
}

impl<R: BufRead> SplitHalvesReader<R> {
    /// Reader for the given block size and line shape.
    pub fn new(
        input: R,
        path: &str,
        events_per_class: usize,
        columns: usize,
        score_column: usize,
    ) -> Self {
        Self {
            lines: NumberedLines::new(input, path),
            events_per_class,
            columns,
            score_column,
            read: 0,
        }
    }
}

impl<R: BufRead> ScoreReader for SplitHalvesReader<R> {
    fn next_event(&mut self) -> Result<Option<ScoredEvent>> {
        let expected = 2 * self.events_per_class;
        if self.read >= expected {
            return Ok(None);
        }

        let Some(line) = self.lines.next_line()? else {
            self.lines.line_no += 1;
            return Err(self.lines.malformed(
                format!("unexpected end of file after {} of {expected} events", self.read),
                &[],
            ));
        };
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != self.columns {
            return Err(self.lines.malformed(
                format!("wrong number of tokens, expected {}", self.columns),
                &tokens,
            ));
        }

        let score = self.lines.score(tokens[self.score_column], &tokens)?;
        let class = if self.read >= self.events_per_class {
            EventClass::Signal
        } else {
            EventClass::Background
        };
        self.read += 1;
        Ok(Some(ScoredEvent { score, class }))
    }
}

/// Reader for `label,score` CSV files.
pub struct LabelFirstCsvReader<R> {
    lines: NumberedLines<R>,
    signal_label: String,
}

impl<R: BufRead> LabelFirstCsvReader<R> {
    /// Reader treating `signal_label` as the signal class.
    pub fn new(input: R, path: &str, signal_label: &str) -> Self {
        Self { lines: NumberedLines::new(input, path), signal_label: signal_label.trim().into() }
    }
}

impl<R: BufRead> ScoreReader for LabelFirstCsvReader<R> {
    fn next_event(&mut self) -> Result<Option<ScoredEvent>> {
        loop {
            let Some(line) = self.lines.next_line()? else {
                return Ok(None);
            };
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() < 2 {
                return Err(self.lines.malformed("expected `label,score`", &fields));
            }
            let score = self.lines.score(fields[1], &fields)?;
            let class = if fields[0] == self.signal_label {
                EventClass::Signal
            } else {
                EventClass::Background
            };
            return Ok(Some(ScoredEvent { score, class }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn drain(r: &mut dyn ScoreReader) -> Result<Vec<ScoredEvent>> {
        let mut out = Vec::new();
        while let Some(ev) = r.next_event()? {
            out.push(ev);
        }
        Ok(out)
    }

    fn read(format: &ScoreFormat, text: &str) -> Result<Vec<ScoredEvent>> {
        let mut r = format.reader(Cursor::new(text.to_string()), "mem.txt")?;
        drain(r.as_mut())
    }

    #[test]
    fn labelled_skips_header_and_stops_at_trailer() {
        let text = "header one\nheader two\n0.8 1\n-0.3 0\n0.1 1\n\nsummary 1 2 3\n";
        let ev = read(&ScoreFormat::labelled(), text).unwrap();
        assert_eq!(ev.len(), 3);
        assert_eq!(ev[0], ScoredEvent { score: 0.8, class: EventClass::Signal });
        assert_eq!(ev[1].class, EventClass::Background);
    }

    #[test]
    fn labelled_non_one_labels_are_background() {
        let ev = read(&ScoreFormat::Labelled { header_lines: 0 }, "0.5 2\n0.5 -1\n").unwrap();
        assert!(ev.iter().all(|e| e.class == EventClass::Background));
    }

    #[test]
    fn labelled_bad_score_is_fatal() {
        let err = read(&ScoreFormat::labelled(), "h\nh\n0.5 1\nabc 1\n").unwrap_err();
        match err {
            Error::MalformedLine { line, tokens, .. } => {
                assert_eq!(line, 4);
                assert_eq!(tokens, vec!["abc", "1"]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn labelled_short_file_is_empty() {
        assert!(read(&ScoreFormat::labelled(), "only header\n").unwrap().is_empty());
    }

    #[test]
    fn split_halves_assigns_blocks() {
        let ev = read(&ScoreFormat::split_halves(2), "0.1\n0.2\n0.9\n0.8\n0.7\n").unwrap();
        let classes: Vec<EventClass> = ev.iter().map(|e| e.class).collect();
        assert_eq!(
            classes,
            vec![
                EventClass::Background,
                EventClass::Background,
                EventClass::Signal,
                EventClass::Signal
            ]
        );
    }

    #[test]
    fn split_halves_wrong_token_count_is_fatal() {
        let err = read(&ScoreFormat::split_halves(2), "0.1\n0.2 0.3\n0.9\n0.8\n").unwrap_err();
        assert!(matches!(err, Error::MalformedLine { line: 2, .. }));
    }

    #[test]
    fn split_halves_premature_eof_is_fatal() {
        let err = read(&ScoreFormat::split_halves(2), "0.1\n0.2\n0.9\n").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("unexpected end of file"), "{msg}");
        assert!(matches!(err, Error::MalformedLine { line: 4, .. }));
    }

    #[test]
    fn split_halves_score_column() {
        let fmt = ScoreFormat::SplitHalves { events_per_class: 1, columns: 3, score_column: 2 };
        let ev = read(&fmt, "a b 0.25\nc d 0.75\n").unwrap();
        assert_eq!(ev[0].score, 0.25);
        assert_eq!(ev[1], ScoredEvent { score: 0.75, class: EventClass::Signal });
    }

    #[test]
    fn split_halves_rejects_bad_column_setup() {
        let fmt = ScoreFormat::SplitHalves { events_per_class: 1, columns: 2, score_column: 2 };
        assert!(fmt.validate().is_err());
    }

    #[test]
    fn csv_matches_signal_label_exactly() {
        let ev = read(&ScoreFormat::label_first_csv(), "1.0,0.9\n0.0,0.2\n\n1,0.8\n").unwrap();
        assert_eq!(ev.len(), 3);
        assert_eq!(ev[0].class, EventClass::Signal);
        assert_eq!(ev[1].class, EventClass::Background);
        // "1" is not the configured "1.0"
        assert_eq!(ev[2].class, EventClass::Background);
    }

    #[test]
    fn csv_missing_field_is_fatal() {
        let err = read(&ScoreFormat::label_first_csv(), "1.0,0.9\n0.3\n").unwrap_err();
        assert!(matches!(err, Error::MalformedLine { line: 2, .. }));
    }

    #[test]
    fn non_finite_score_is_malformed() {
        let err = read(&ScoreFormat::label_first_csv(), "1.0,NaN\n").unwrap_err();
        assert!(matches!(err, Error::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn format_deserializes_with_defaults() {
        let f: ScoreFormat = serde_json::from_str(r#"{"kind":"split_halves"}"#).unwrap();
        assert_eq!(f, ScoreFormat::split_halves(21158));
        let f: ScoreFormat = serde_json::from_str(r#"{"kind":"labelled"}"#).unwrap();
        assert_eq!(f, ScoreFormat::labelled());
        let f: ScoreFormat =
            serde_json::from_str(r#"{"kind":"label_first_csv","signal_label":"s"}"#).unwrap();
        assert_eq!(f.kind(), "label_first_csv");
    }
}
