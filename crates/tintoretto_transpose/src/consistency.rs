//! Lexical consistency validation.
//!
//! The validator scans generated prose for banned source-work terms. It is
//! the enforcement half of the scene prompt's constraint rules: the prompt
//! tells the provider what to avoid, the validator proves whether it did.

use regex::Regex;
use tintoretto_error::{TransposeError, TransposeErrorKind};
use tintoretto_interface::{ConsistencyReport, Violation};

/// Number of violations stored on a report. The total count is unaffected.
const MAX_STORED_VIOLATIONS: usize = 10;

/// Characters of context captured on each side of a match.
const CONTEXT_CHARS: usize = 30;

/// A banned-term scanner compiled from a term list.
///
/// Matching is case-insensitive and word-boundary anchored, so `sword`
/// never fires inside `swordsmanship` but does fire in `sword-arm`.
/// Terms are trimmed, lowercased, and deduplicated at construction and
/// reported in that form; contexts preserve the original casing of the
/// text.
///
/// # Examples
///
/// ```
/// use tintoretto_transpose::ConsistencyValidator;
///
/// let terms = vec!["dagger".to_string(), "thou".to_string()];
/// let validator = ConsistencyValidator::new(&terms).unwrap();
///
/// let report = validator.check("Thou hast seen the admin key.");
/// assert!(!report.passed);
/// assert_eq!(report.violations[0].word, "thou");
/// ```
#[derive(Debug, Clone)]
pub struct ConsistencyValidator {
    terms: Vec<String>,
    patterns: Vec<Regex>,
}

impl ConsistencyValidator {
    /// Compile a validator from a banned-term list.
    ///
    /// Entries that normalize to the same term keep only their first
    /// occurrence, so repeats neither inflate counts nor repeat in the
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns an error when the list is empty, a term is blank after
    /// trimming, or a term cannot be compiled into a match pattern.
    pub fn new(terms: &[String]) -> Result<Self, TransposeError> {
        if terms.is_empty() {
            return Err(TransposeError::new(TransposeErrorKind::EmptyBannedTerms));
        }

        let mut normalized: Vec<String> = Vec::with_capacity(terms.len());
        let mut patterns = Vec::with_capacity(terms.len());
        for term in terms {
            let lowered = term.trim().to_lowercase();
            if lowered.is_empty() {
                return Err(TransposeError::new(TransposeErrorKind::UnmatchableTerm {
                    term: term.clone(),
                    message: "empty after trimming whitespace".to_string(),
                }));
            }
            if normalized.contains(&lowered) {
                continue;
            }
            let pattern = format!(r"(?i)\b{}\b", regex::escape(&lowered));
            let compiled = Regex::new(&pattern).map_err(|e| {
                TransposeError::new(TransposeErrorKind::UnmatchableTerm {
                    term: term.clone(),
                    message: e.to_string(),
                })
            })?;
            normalized.push(lowered);
            patterns.push(compiled);
        }

        Ok(Self {
            terms: normalized,
            patterns,
        })
    }

    /// Number of distinct terms the validator checks.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Scan `text` and report every banned-term match.
    ///
    /// Terms are scanned in list order and matches within a term in text
    /// order. Every match counts toward the total; only the first ten
    /// carry context windows.
    #[tracing::instrument(skip_all, fields(text_length = text.len(), terms = self.terms.len()))]
    pub fn check(&self, text: &str) -> ConsistencyReport {
        let mut violations = Vec::new();
        let mut total = 0;
        let mut offenders: Vec<&str> = Vec::new();

        for (term, pattern) in self.terms.iter().zip(&self.patterns) {
            let mut matched = false;
            for found in pattern.find_iter(text) {
                total += 1;
                matched = true;
                if violations.len() < MAX_STORED_VIOLATIONS {
                    violations.push(Violation {
                        word: term.clone(),
                        context: context_window(text, found.start(), found.end()),
                    });
                }
            }
            if matched {
                offenders.push(term);
            }
        }

        let passed = total == 0;
        let warning = if passed {
            None
        } else {
            Some(format!(
                "CONSISTENCY WARNING: found {} anachronistic term(s) from the original text. \
                 The following words should be replaced with their modern equivalents from \
                 the world bible: {}",
                total,
                offenders.join(", ")
            ))
        };

        ConsistencyReport {
            passed,
            violation_count: total,
            violations,
            warning,
        }
    }
}

/// Slice a context window around a byte range, counting characters rather
/// than bytes so multibyte text never splits a boundary. Newlines flatten
/// to spaces to keep report lines single-line.
fn context_window(text: &str, start: usize, end: usize) -> String {
    let from = text[..start]
        .char_indices()
        .rev()
        .nth(CONTEXT_CHARS - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let to = text[end..]
        .char_indices()
        .nth(CONTEXT_CHARS)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());

    format!("...{}...", text[from..to].replace('\n', " "))
}
