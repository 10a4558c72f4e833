//! # Header Detection Module
//!
//! Heuristics over the first few lines of a file: detecting an existing
//! license header, pulling the copyright year out of one, and rewriting that
//! year in place.
//!
//! These are deliberately approximate. Detection looks for a comment line
//! containing a license-ish indicator word, not for a well-formed header, and
//! year extraction takes the first 4-digit run it sees without validating
//! that it is a plausible calendar year. The windows and indicator list are
//! part of the tool's observable behavior and are kept literal.

use std::sync::LazyLock;

use regex::Regex;

/// Number of leading logical lines inspected by the header heuristics.
const HEADER_WINDOW: usize = 10;

/// Substrings whose presence on a comment line marks it as a license header.
const LICENSE_INDICATORS: [&str; 6] = ["license", "copyright", "mit", "gpl", "apache", "©"];

static YEAR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{4}\b").expect("year regex must compile"));

/// Checks whether content already carries a license header.
///
/// Inspects at most the first 10 lines; returns `true` if any of them both
/// starts with the comment-start marker (case-insensitive) and contains one
/// of the indicator substrings. This is a presence heuristic, not a
/// verification of which license the header carries.
pub fn has_license_header(content: &str, comment_start: &str) -> bool {
  let marker = comment_start.to_lowercase();

  content.lines().take(HEADER_WINDOW).any(|line| {
    let lowercase_line = line.to_lowercase();
    lowercase_line.starts_with(&marker) && LICENSE_INDICATORS.iter().any(|ind| lowercase_line.contains(ind))
  })
}

/// Extracts the year from an existing license header.
///
/// Scans the first 10 lines for lines starting with the exact comment-start
/// marker and returns the first 4-digit run found. Year ranges like
/// `2020-2023` therefore yield the first year.
pub fn extract_year(content: &str, comment_start: &str) -> Option<i32> {
  content
    .lines()
    .take(HEADER_WINDOW)
    .filter(|line| line.starts_with(comment_start))
    .find_map(|line| YEAR_REGEX.find(line).and_then(|m| m.as_str().parse().ok()))
}

/// Rewrites the year in an existing license header.
///
/// For each of the first 10 lines starting with the comment-start marker, the
/// first 4-digit run on the line is replaced with `new_year`. Lines without
/// the marker or without a 4-digit run are left untouched, as is everything
/// past the window. Returns the full rewritten content.
pub fn rewrite_year(content: &str, comment_start: &str, new_year: i32) -> String {
  let replacement = new_year.to_string();
  let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();

  for line in lines.iter_mut().take(HEADER_WINDOW) {
    if line.starts_with(comment_start) {
      *line = YEAR_REGEX.replace(line, replacement.as_str()).into_owned();
    }
  }

  lines.join("\n")
}
