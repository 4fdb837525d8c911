//! Query classification for the tool-routing agent.
//!
//! Heuristic, keyword-driven: good enough to route tutor-style questions
//! ("solve x**2 - 4", "complexity of merge sort") to the right tool. The
//! router never errors — anything unclassifiable becomes `Unknown`.

use mathtutor_tools::complexity::known_algorithms;
use mathtutor_tools::expr;

use crate::extract_numbers;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Intent {
    Solve { equation: String },
    Statistics { numbers: Vec<f64> },
    Complexity { algorithm: String },
    Plot { function: String },
    Unknown,
}

const STATS_KEYWORDS: &[&str] = &[
    "statistic",
    "stats",
    "mean",
    "median",
    "average",
    "standard deviation",
    "std dev",
];

impl Intent {
    pub(crate) fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();

        if lower.contains("plot") || lower.contains("graph of") {
            if let Some(function) = expression_after(text, &["plot", "graph of"]) {
                return Intent::Plot { function };
            }
        }

        if lower.contains("solve") || lower.contains("roots of") {
            let equation = expression_after(text, &["solve", "roots of"])
                .unwrap_or_else(|| remainder_after(text, &["solve", "roots of"]));
            return Intent::Solve { equation };
        }

        if let Some(algorithm) = find_algorithm(&lower) {
            return Intent::Complexity { algorithm };
        }

        if STATS_KEYWORDS.iter().any(|k| lower.contains(k)) {
            let numbers = extract_numbers(&lower);
            if numbers.len() >= 2 {
                return Intent::Statistics { numbers };
            }
        }

        Intent::Unknown
    }
}

/// Find a known algorithm mentioned in the text, tolerating spaces in
/// place of underscores ("merge sort" → "merge_sort").
fn find_algorithm(lower: &str) -> Option<String> {
    known_algorithms()
        .iter()
        .find(|name| lower.contains(*name) || lower.contains(&name.replace('_', " ")))
        .map(|name| name.to_string())
}

/// Word windows are scanned over at most this many leading words; tutor
/// queries put the expression right after the trigger.
const MAX_SCAN_WORDS: usize = 32;

/// Take the text after the first matched trigger and find the longest
/// word window that parses as an expression ("the equation x**2 - 4
/// please" → "x**2 - 4").
fn expression_after(text: &str, triggers: &[&str]) -> Option<String> {
    let candidate = remainder_after(text, triggers);
    let words: Vec<&str> = candidate
        .split_whitespace()
        .take(MAX_SCAN_WORDS)
        .collect();
    for start in 0..words.len() {
        for end in (start + 1..=words.len()).rev() {
            let attempt = words[start..end].join(" ");
            if expr::parse(&attempt).is_ok() {
                return Some(attempt);
            }
        }
    }
    None
}

/// Raw text after the first matched trigger, trimmed of punctuation.
fn remainder_after(text: &str, triggers: &[&str]) -> String {
    let start = triggers
        .iter()
        .filter_map(|t| find_ascii_ci(text, t).map(|pos| pos + t.len()))
        .min()
        .unwrap_or(0);
    text[start..].trim().trim_end_matches(['?', '.', '!']).trim().to_string()
}

/// Case-insensitive search for an ASCII needle, returning a byte offset
/// into `text`. An ASCII byte in UTF-8 is always its own char, so a
/// match can only start and end on char boundaries.
fn find_ascii_ci(text: &str, needle: &str) -> Option<usize> {
    text.as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solve_with_filler_words() {
        match Intent::classify("can you solve the equation x**2 - 4 please?") {
            Intent::Solve { equation } => assert_eq!(equation, "x**2 - 4"),
            other => panic!("Expected Solve, got {:?}", other),
        }
    }

    #[test]
    fn solve_simple() {
        match Intent::classify("solve x**2 - 4") {
            Intent::Solve { equation } => assert_eq!(equation, "x**2 - 4"),
            other => panic!("Expected Solve, got {:?}", other),
        }
    }

    #[test]
    fn plot_extracts_function() {
        match Intent::classify("plot x**2 + 1") {
            Intent::Plot { function } => assert_eq!(function, "x**2 + 1"),
            other => panic!("Expected Plot, got {:?}", other),
        }
    }

    #[test]
    fn complexity_by_name() {
        match Intent::classify("what is the complexity of binary search?") {
            Intent::Complexity { algorithm } => assert_eq!(algorithm, "binary_search"),
            other => panic!("Expected Complexity, got {:?}", other),
        }
    }

    #[test]
    fn statistics_needs_numbers() {
        assert_eq!(Intent::classify("what's the mean?"), Intent::Unknown);
        match Intent::classify("mean of 1 2 3") {
            Intent::Statistics { numbers } => assert_eq!(numbers, vec![1.0, 2.0, 3.0]),
            other => panic!("Expected Statistics, got {:?}", other),
        }
    }

    #[test]
    fn unmatched_text_is_unknown() {
        assert_eq!(Intent::classify("tell me a joke"), Intent::Unknown);
    }

    #[test]
    fn unsolvable_equation_still_routes_to_solve() {
        match Intent::classify("solve world hunger") {
            Intent::Solve { equation } => assert_eq!(equation, "world hunger"),
            other => panic!("Expected Solve, got {:?}", other),
        }
    }

    #[test]
    fn uppercase_trigger_matches() {
        match Intent::classify("SOLVE x**2 - 4") {
            Intent::Solve { equation } => assert_eq!(equation, "x**2 - 4"),
            other => panic!("Expected Solve, got {:?}", other),
        }
    }

    #[test]
    fn mixed_width_unicode_does_not_split_chars() {
        // 'İ' lowercases to two chars and '²' is multi-byte; trigger
        // offsets must stay valid in the original text.
        match Intent::classify("İsolve²") {
            Intent::Solve { equation } => assert_eq!(equation, "²"),
            other => panic!("Expected Solve, got {:?}", other),
        }
        match Intent::classify("İİİ solve x**2 - 4") {
            Intent::Solve { equation } => assert_eq!(equation, "x**2 - 4"),
            other => panic!("Expected Solve, got {:?}", other),
        }
    }

    #[test]
    fn expression_scan_is_bounded_on_long_messages() {
        let tail = "lorem ".repeat(5000);
        match Intent::classify(&format!("solve x**2 - 4 {tail}")) {
            Intent::Solve { equation } => assert_eq!(equation, "x**2 - 4"),
            other => panic!("Expected Solve, got {:?}", other),
        }

        // An expression past the scan window falls back to the raw
        // remainder instead of being searched for.
        let padding = "word ".repeat(MAX_SCAN_WORDS + 1);
        match Intent::classify(&format!("solve {padding}x**2 - 4")) {
            Intent::Solve { equation } => {
                assert!(equation.starts_with("word"));
            }
            other => panic!("Expected Solve, got {:?}", other),
        }
    }
}
