//! Delimited-text format sniffing over a bounded sample.
//!
//! # Design
//! - Sniffing never returns an error past its own boundary: IO and encoding
//!   failures are logged and reported as a non-tabular verdict, so callers
//!   always receive a decision.
//! - Each rejection site has its own variant, keeping every failure mode
//!   independently testable while the external contract stays a single
//!   tabular/non-tabular answer.
//! - The header-presence heuristic is advisory only and is logged at debug
//!   level; column-count consistency is the authoritative structural test.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use tracing::{debug, warn};

const SAMPLE_LEN: usize = 4096;
const ROW_SCAN_LIMIT: usize = 5000;
const DELIMITER_CANDIDATES: [char; 4] = [',', '\t', ';', '|'];

/// Verdict produced by [`sniff`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SniffOutcome {
    /// The source is plausibly delimited tabular text.
    Tabular(TableShape),
    /// The source is not tabular, with the failing site identified.
    NotTabular(SniffRejection),
}

impl SniffOutcome {
    /// Whether the source was judged tabular.
    #[must_use]
    pub const fn is_tabular(&self) -> bool {
        matches!(self, Self::Tabular(_))
    }
}

/// Structure observed in a tabular source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableShape {
    /// Delimiter the rows were parsed with.
    pub delimiter: char,
    /// Field count shared by every parsed row.
    pub columns: usize,
    /// Number of rows parsed, capped at the scan limit.
    pub rows: usize,
}

/// Reason a source was judged non-tabular.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SniffRejection {
    /// The source contained no bytes at all.
    EmptySource,
    /// The sampled prefix was entirely whitespace.
    BlankSample,
    /// No candidate delimiter occurred consistently across sample lines.
    NoConsistentDelimiter,
    /// Fewer than one row survived the scan.
    TooFewRows,
    /// A row's field count deviated from the established column count.
    InconsistentColumns {
        /// Column count established by the first parsed row.
        expected: usize,
        /// Column count of the deviating row.
        found: usize,
    },
    /// The content could not be read or decoded during sniffing.
    Unreadable,
}

impl SniffRejection {
    /// Stable label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptySource => "empty_source",
            Self::BlankSample => "blank_sample",
            Self::NoConsistentDelimiter => "no_consistent_delimiter",
            Self::TooFewRows => "too_few_rows",
            Self::InconsistentColumns { .. } => "inconsistent_columns",
            Self::Unreadable => "unreadable",
        }
    }
}

/// Decide whether the file at `path` is plausibly delimited tabular text.
///
/// Delimiter detection runs over a bounded prefix; the structural scan then
/// re-reads from the start, parsing at most the first few thousand rows so
/// cost stays independent of file size beyond that cap.
#[must_use]
pub fn sniff(path: &Path) -> SniffOutcome {
    match sniff_inner(path) {
        Ok(outcome) => {
            if let SniffOutcome::NotTabular(rejection) = &outcome {
                debug!(
                    path = %path.display(),
                    rejection = rejection.as_str(),
                    "source judged non-tabular"
                );
            }
            outcome
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "format sniff aborted; treating source as non-tabular"
            );
            SniffOutcome::NotTabular(SniffRejection::Unreadable)
        }
    }
}

fn sniff_inner(path: &Path) -> io::Result<SniffOutcome> {
    let mut file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(SniffOutcome::NotTabular(SniffRejection::EmptySource));
    }

    let mut sample_bytes = Vec::with_capacity(SAMPLE_LEN);
    file.by_ref()
        .take(SAMPLE_LEN as u64)
        .read_to_end(&mut sample_bytes)?;
    let truncated = sample_bytes.len() == SAMPLE_LEN;
    let sample = String::from_utf8_lossy(&sample_bytes);
    if sample.trim().is_empty() {
        return Ok(SniffOutcome::NotTabular(SniffRejection::BlankSample));
    }

    let Some(delimiter) = detect_delimiter(&sample, truncated) else {
        return Ok(SniffOutcome::NotTabular(
            SniffRejection::NoConsistentDelimiter,
        ));
    };
    if !likely_has_header(&sample, delimiter) {
        debug!(
            path = %path.display(),
            delimiter = %delimiter,
            "no header row detected; relying on column consistency"
        );
    }

    file.seek(SeekFrom::Start(0))?;
    scan_rows(BufReader::new(file), delimiter)
}

/// Pick a delimiter by consistency: the same non-zero occurrence count on
/// every non-blank sample line. Candidate order breaks ties.
fn detect_delimiter(sample: &str, truncated: bool) -> Option<char> {
    let mut lines: Vec<&str> = sample.lines().collect();
    if truncated && lines.len() > 1 {
        // The sample may end mid-record; a cut line would skew the counts.
        lines.pop();
    }
    lines.retain(|line| !line.trim().is_empty());
    let first = *lines.first()?;

    DELIMITER_CANDIDATES.into_iter().find(|&candidate| {
        let count = first.matches(candidate).count();
        count > 0
            && lines
                .iter()
                .all(|line| line.matches(candidate).count() == count)
    })
}

/// Advisory heuristic: a header is likely when the first row carries no
/// numeric cells but a later row does.
fn likely_has_header(sample: &str, delimiter: char) -> bool {
    let mut lines = sample.lines().filter(|line| !line.trim().is_empty());
    let Some(first) = lines.next() else {
        return false;
    };
    if first
        .split(delimiter)
        .any(|cell| cell.trim().parse::<f64>().is_ok())
    {
        return false;
    }
    lines.any(|line| {
        line.split(delimiter)
            .any(|cell| cell.trim().parse::<f64>().is_ok())
    })
}

fn scan_rows(reader: impl BufRead, delimiter: char) -> io::Result<SniffOutcome> {
    let mut rows = 0_usize;
    let mut columns: Option<usize> = None;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if index == 0 && line.trim().is_empty() {
            // Tolerate a single leading fully-empty row.
            continue;
        }
        // Cell whitespace is insignificant; only the trimmed field count
        // feeds the consistency check.
        let fields = line.split(delimiter).count();
        rows += 1;
        match columns {
            None => columns = Some(fields),
            Some(expected) if expected != fields => {
                return Ok(SniffOutcome::NotTabular(
                    SniffRejection::InconsistentColumns {
                        expected,
                        found: fields,
                    },
                ));
            }
            Some(_) => {}
        }
        if rows >= ROW_SCAN_LIMIT {
            break;
        }
    }

    columns.map_or(
        Ok(SniffOutcome::NotTabular(SniffRejection::TooFewRows)),
        |columns| {
            Ok(SniffOutcome::Tabular(TableShape {
                delimiter,
                columns,
                rows,
            }))
        },
    )
}
