//! Parser for the `_atom_site` loop of mmCIF files.
//!
//! Boltz-2 writes pLDDT into `_atom_site.B_iso_or_equiv`. Depending on the
//! provider the value is either a fraction in [0, 1] or already a percentage,
//! so readings are rescaled only when they are at most 1.0.
//!
//! Only the first `_atom_site` loop in the text is consumed. Data rows end at
//! the next loop, data block, save frame, item name, or `#` separator.

use crate::core::types::{PerResidueScores, ResidueIndex};
use crate::parsing::confidence::ConfidenceAccumulator;

/// Category prefix of the atom-site header lines
pub const ATOM_SITE_PREFIX: &str = "_atom_site.";
/// Column holding the residue sequence id
pub const RESIDUE_ID_FIELD: &str = "_atom_site.label_seq_id";
/// Column holding the per-atom confidence
pub const CONFIDENCE_FIELD: &str = "_atom_site.B_iso_or_equiv";

/// Reserved words and separators that end a loop's data rows
const LOOP_TERMINATORS: [&str; 6] = ["loop_", "data_", "save_", "global_", "stop_", "#"];

/// Convert an mmCIF `B_iso_or_equiv` reading to a percentage.
///
/// Fractions (at most 1.0) are multiplied by 100; larger values are already
/// percentages and pass through unchanged.
#[must_use]
pub fn mmcif_bfactor_to_percent(value: f64) -> f64 {
    if value <= 1.0 {
        value * 100.0
    } else {
        value
    }
}

/// Column positions of the two fields needed for scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomSiteColumns {
    pub residue: usize,
    pub confidence: usize,
}

impl AtomSiteColumns {
    /// Locate the residue and confidence columns by exact header name
    #[must_use]
    pub fn from_headers(headers: &[&str]) -> Option<Self> {
        let residue = headers.iter().position(|h| *h == RESIDUE_ID_FIELD)?;
        let confidence = headers.iter().position(|h| *h == CONFIDENCE_FIELD)?;
        Some(Self {
            residue,
            confidence,
        })
    }

    fn min_tokens(self) -> usize {
        self.residue.max(self.confidence) + 1
    }
}

/// Split an mmCIF data line into tokens.
///
/// Whitespace separates tokens; a token opening with `'` or `"` runs until the
/// matching quote that is followed by whitespace or the end of the line.
#[must_use]
pub fn tokenize(line: &str) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i].is_ascii_whitespace() {
            i += 1;
            continue;
        }

        let quote = bytes[i];
        if quote == b'\'' || quote == b'"' {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len()
                && !(bytes[end] == quote
                    && bytes.get(end + 1).map_or(true, u8::is_ascii_whitespace))
            {
                end += 1;
            }
            tokens.push(&line[start..end]);
            i = end + 1;
        } else {
            let start = i;
            while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            tokens.push(&line[start..i]);
        }
    }

    tokens
}

fn is_loop_terminator(trimmed: &str) -> bool {
    trimmed.starts_with('_')
        || LOOP_TERMINATORS
            .iter()
            .any(|marker| trimmed.starts_with(marker))
}

/// Parse one data row into its residue index and normalized score
fn parse_row(line: &str, columns: AtomSiteColumns) -> Option<(ResidueIndex, f64)> {
    let tokens = tokenize(line);
    if tokens.len() < columns.min_tokens() {
        return None;
    }

    let residue: i64 = tokens[columns.residue].parse().ok()?;
    let raw_score: f64 = tokens[columns.confidence].parse().ok()?;
    if !raw_score.is_finite() {
        return None;
    }

    Some((ResidueIndex(residue), mmcif_bfactor_to_percent(raw_score)))
}

/// Collect per-atom readings from the first `_atom_site` loop
#[must_use]
pub fn accumulate_mmcif(text: &str) -> ConfidenceAccumulator {
    let mut accumulator = ConfidenceAccumulator::new();
    let mut lines = text.lines().map(str::trim).peekable();

    // Skip ahead to the first atom-site header
    while lines
        .peek()
        .is_some_and(|line| !line.starts_with(ATOM_SITE_PREFIX))
    {
        lines.next();
    }

    let mut headers = Vec::new();
    while let Some(line) = lines.next_if(|line| line.starts_with(ATOM_SITE_PREFIX)) {
        if let Some(name) = line.split_whitespace().next() {
            headers.push(name);
        }
    }

    let Some(columns) = AtomSiteColumns::from_headers(&headers) else {
        if !headers.is_empty() {
            tracing::debug!(
                "atom_site loop lacks {} or {}; no confidence available",
                RESIDUE_ID_FIELD,
                CONFIDENCE_FIELD
            );
        }
        return accumulator;
    };

    let mut skipped = 0usize;
    for line in lines {
        if line.is_empty() {
            continue;
        }
        if is_loop_terminator(line) {
            break;
        }
        match parse_row(line, columns) {
            Some((residue, score)) => accumulator.push(residue, score),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!("Skipped {} atom_site rows without numeric scores", skipped);
    }

    accumulator
}

/// Per-residue pLDDT from mmCIF text, ascending by residue id
#[must_use]
pub fn extract_mmcif_confidence(text: &str) -> PerResidueScores {
    accumulate_mmcif(text).finish()
}
