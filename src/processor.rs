//! # Processor Module
//!
//! This module contains the core functionality for applying license headers
//! to files and trees, updating copyright years, and verifying that files
//! carry the expected license.
//!
//! The [`Processor`] owns a [`LicenseConfig`] and exposes the four public
//! operations:
//! - [`apply`](Processor::apply) - insert headers across a file or tree
//! - [`update_year`](Processor::update_year) - rewrite the year in existing headers
//! - [`verify`](Processor::verify) - count files carrying the expected license
//! - [`create_license_file`](Processor::create_license_file) - write a plain `LICENSE` file
//!
//! All operations are total over a tree: per-file I/O failures are logged and
//! absorbed into skip/zero outcomes so one unreadable file never aborts a
//! run. Only a template placeholder mistake propagates, since that is a
//! caller configuration error and would fail identically for every file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, error, info};
use walkdir::WalkDir;

use crate::config::LicenseConfig;
use crate::detect;
use crate::filter::is_binary;
use crate::templates::{self, TemplateError};

/// Extensions whose leading XML/doctype declarations must stay above the
/// inserted header.
const XML_PREAMBLE_EXTENSIONS: [&str; 5] = ["ui", "qrc", "xml", "svg", "html"];

/// Line prefixes recognized as XML-preamble declarations.
const XML_DECLARATION_PREFIXES: [&str; 2] = ["<?xml", "<!DOCTYPE"];

/// Number of leading lines inspected during license verification.
const VERIFY_WINDOW: usize = 20;

static WHITESPACE_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex must compile"));

/// Processor for license operations on files and directory trees.
///
/// Construction is cheap; the processor holds only the configuration value
/// and no per-run state, so one instance can serve any number of operations.
#[derive(Debug, Default)]
pub struct Processor {
  config: LicenseConfig,
}

impl Processor {
  /// Creates a processor with the given configuration.
  pub const fn new(config: LicenseConfig) -> Self {
    Self { config }
  }

  /// The configuration this processor consults.
  pub const fn config(&self) -> &LicenseConfig {
    &self.config
  }

  /// Applies a license header to a file or to every eligible file under a
  /// directory.
  ///
  /// `template` is either a registered template name or literal license
  /// text; `year` defaults to the current calendar year. Returns the number
  /// of files modified. A nonexistent path is logged and yields 0.
  ///
  /// # Errors
  ///
  /// Returns [`TemplateError`] when the template body references a
  /// placeholder not covered by `year`, `author`, or `custom_vars`.
  pub fn apply(
    &self,
    path: &Path,
    template: &str,
    author: &str,
    year: Option<i32>,
    custom_vars: Option<&HashMap<String, String>>,
    force: bool,
  ) -> Result<usize, TemplateError> {
    let body = self.config.template_body(template);
    let year = year.unwrap_or_else(templates::current_year);

    if path.is_file() {
      if is_binary(path, &self.config) {
        debug!("Skipping binary file: {}", path.display());
        return Ok(0);
      }
      let modified = self.process_file(path, body, author, Some(year), custom_vars, force)?;
      return Ok(usize::from(modified));
    }

    if !path.is_dir() {
      error!("Path does not exist: {}", path.display());
      return Ok(0);
    }

    let mut processed = 0;
    for file in self.walk(path) {
      if is_binary(&file, &self.config) {
        debug!("Skipping binary file: {}", file.display());
        continue;
      }
      if self.process_file(&file, body, author, Some(year), custom_vars, force)? {
        processed += 1;
      }
    }

    Ok(processed)
  }

  /// Processes a single file, inserting a license header when appropriate.
  ///
  /// Returns `Ok(true)` only when the file was modified. Unsupported file
  /// types, files that already carry a header (unless `force`), and files
  /// that fail to read or write are all reported as `Ok(false)` with a debug
  /// log, never as errors.
  ///
  /// # Errors
  ///
  /// Returns [`TemplateError`] for placeholder mistakes in `template_body`.
  pub fn process_file(
    &self,
    path: &Path,
    template_body: &str,
    author: &str,
    year: Option<i32>,
    custom_vars: Option<&HashMap<String, String>>,
    force: bool,
  ) -> Result<bool, TemplateError> {
    let Some(style) = self.config.comment_style_for(path) else {
      debug!("Skipping unsupported file type: {}", path.display());
      return Ok(false);
    };

    let content = match read_text(path) {
      Ok(content) => content,
      Err(e) => {
        debug!("Failed to read {}: {}", path.display(), e);
        return Ok(false);
      }
    };

    if detect::has_license_header(&content, &style.start) && !force {
      debug!("File already has license header: {}", path.display());
      return Ok(false);
    }

    let rendered = templates::render(template_body, author, year, custom_vars)?;
    let header = templates::build_header(&rendered, &style);
    let new_content = insert_header(path, &content, &header, force);

    if let Err(e) = fs::write(path, new_content) {
      debug!("Failed to write {}: {}", path.display(), e);
      return Ok(false);
    }

    info!("Added license header to: {}", path.display());
    Ok(true)
  }

  /// Rewrites the copyright year in existing license headers.
  ///
  /// A file is only rewritten when it has a detectable header with an
  /// extractable year that differs from the target year; `new_year` defaults
  /// to the current calendar year. Returns the number of files updated. A
  /// nonexistent path is logged and yields 0.
  pub fn update_year(&self, path: &Path, new_year: Option<i32>) -> usize {
    let new_year = new_year.unwrap_or_else(templates::current_year);

    if path.is_file() {
      return self.update_file_year(path, new_year);
    }

    if !path.is_dir() {
      error!("Path does not exist: {}", path.display());
      return 0;
    }

    self.walk(path).map(|file| self.update_file_year(&file, new_year)).sum()
  }

  fn update_file_year(&self, path: &Path, new_year: i32) -> usize {
    if is_binary(path, &self.config) {
      return 0;
    }
    let Some(style) = self.config.comment_style_for(path) else {
      return 0;
    };

    let content = match read_text(path) {
      Ok(content) => content,
      Err(e) => {
        debug!("Failed to read {}: {}", path.display(), e);
        return 0;
      }
    };

    if !detect::has_license_header(&content, &style.start) {
      return 0;
    }
    let Some(current_year) = detect::extract_year(&content, &style.start) else {
      return 0;
    };
    if current_year == new_year {
      return 0;
    }

    let updated = detect::rewrite_year(&content, &style.start, new_year);
    match fs::write(path, updated) {
      Ok(()) => {
        info!("Updated license year in: {}", path.display());
        1
      }
      Err(e) => {
        debug!("Failed to write {}: {}", path.display(), e);
        0
      }
    }
  }

  /// Verifies that files carry the expected license.
  ///
  /// Eligibility means not binary and having a resolvable comment style.
  /// Returns `(files_with_expected_license, total_eligible_files)` over the
  /// scanned tree. Verification never fails per file; a missing root path is
  /// logged and yields `(0, 0)`.
  pub fn verify(&self, path: &Path, template: &str) -> (usize, usize) {
    let phrases = self.config.key_phrases_for(template);

    if path.is_file() {
      if is_binary(path, &self.config) || self.config.comment_style_for(path).is_none() {
        return (0, 0);
      }
      return (usize::from(self.check_file_license(path, phrases)), 1);
    }

    if !path.is_dir() {
      error!("Path does not exist: {}", path.display());
      return (0, 0);
    }

    let mut files_with_license = 0;
    let mut total_files = 0;

    for file in self.walk(path) {
      if is_binary(&file, &self.config) || self.config.comment_style_for(&file).is_none() {
        continue;
      }

      total_files += 1;
      if self.check_file_license(&file, phrases) {
        files_with_license += 1;
      }
    }

    (files_with_license, total_files)
  }

  /// Checks a single file against a template's key phrases.
  ///
  /// The first 20 lines are lowercased and whitespace-collapsed, then each
  /// phrase is looked up as a substring. The file matches when at least half
  /// of the phrases are found. Approximate on purpose: it tolerates
  /// reflowed or slightly edited headers that exact matching would reject.
  fn check_file_license(&self, path: &Path, phrases: &[String]) -> bool {
    let Some(style) = self.config.comment_style_for(path) else {
      return false;
    };

    let content = match read_text(path) {
      Ok(content) => content,
      Err(e) => {
        debug!("Failed to read {}: {}", path.display(), e);
        return false;
      }
    };

    if !detect::has_license_header(&content, &style.start) {
      return false;
    }

    let window = content.lines().take(VERIFY_WINDOW).collect::<Vec<_>>().join("\n");
    let lowered = window.to_lowercase();
    let normalized = WHITESPACE_REGEX.replace_all(&lowered, " ");

    let phrase_matches = phrases.iter().filter(|phrase| normalized.contains(phrase.as_str())).count();
    phrase_matches * 2 >= phrases.len()
  }

  /// Creates a `LICENSE` file containing the formatted (non-commented)
  /// license body in the given directory.
  ///
  /// Returns `Ok(false)` when the target is not an existing directory or the
  /// write fails, both logged as errors.
  ///
  /// # Errors
  ///
  /// Returns [`TemplateError`] for placeholder mistakes in the template.
  pub fn create_license_file(
    &self,
    dir: &Path,
    template: &str,
    author: &str,
    year: Option<i32>,
    custom_vars: Option<&HashMap<String, String>>,
  ) -> Result<bool, TemplateError> {
    if !dir.is_dir() {
      error!("Path is not a directory: {}", dir.display());
      return Ok(false);
    }

    let body = self.config.template_body(template);
    let rendered = templates::render(body, author, year, custom_vars)?;

    let license_path = dir.join("LICENSE");
    match fs::write(&license_path, rendered) {
      Ok(()) => {
        info!("Created LICENSE file at: {}", license_path.display());
        Ok(true)
      }
      Err(e) => {
        error!("Failed to create LICENSE file: {}", e);
        Ok(false)
      }
    }
  }

  /// Recursively enumerates regular files under `root`, pruning ignored
  /// directories before descending into them.
  ///
  /// Unreadable entries are logged and skipped; symlinks are not followed.
  fn walk(&self, root: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    WalkDir::new(root)
      .into_iter()
      .filter_entry(|entry| {
        entry.depth() == 0
          || !entry.file_type().is_dir()
          || entry
            .file_name()
            .to_str()
            .is_none_or(|name| !self.config.is_ignored_dir(name))
      })
      .filter_map(|entry| match entry {
        Ok(entry) if entry.file_type().is_file() => Some(entry.into_path()),
        Ok(_) => None,
        Err(e) => {
          debug!("Skipping unreadable entry: {}", e);
          None
        }
      })
  }
}

/// Reads file content, trying strict UTF-8 first and falling back to lossy
/// decoding for other encodings. Only an I/O error is reported to the caller.
fn read_text(path: &Path) -> std::io::Result<String> {
  let bytes = fs::read(path)?;
  match String::from_utf8(bytes) {
    Ok(text) => Ok(text),
    Err(e) => {
      debug!("Content of {} is not valid UTF-8, decoding lossily", path.display());
      Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
    }
  }
}

/// Builds the new file content with the header block inserted.
///
/// Insertion strategy, in priority order: empty file, shebang preservation,
/// XML-preamble preservation for declaration-bearing markup files, then
/// plain prepending. The `force` branch also prepends rather than replacing
/// the old header; keeping both branches equivalent matches the tool's
/// long-standing observable behavior.
fn insert_header(path: &Path, content: &str, header: &[String], force: bool) -> String {
  let lines: Vec<&str> = content.lines().collect();
  let header_text = header.join("\n");

  if lines.is_empty() {
    return format!("{header_text}\n");
  }

  if lines[0].starts_with("#!") {
    return format!("{}\n{}\n\n{}", lines[0], header_text, lines[1..].join("\n"));
  }

  if is_xml_preamble_file(path) && lines.iter().take(2).any(|line| is_declaration_line(line)) {
    let declaration_count = lines.iter().take_while(|line| is_declaration_line(line)).count();
    return format!(
      "{}\n{}\n\n{}",
      lines[..declaration_count].join("\n"),
      header_text,
      lines[declaration_count..].join("\n")
    );
  }

  if force {
    return format!("{header_text}\n\n{}", lines.join("\n"));
  }

  format!("{header_text}\n\n{content}")
}

fn is_declaration_line(line: &str) -> bool {
  let trimmed = line.trim_start();
  XML_DECLARATION_PREFIXES.iter().any(|prefix| trimmed.starts_with(prefix))
}

fn is_xml_preamble_file(path: &Path) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| XML_PREAMBLE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn header() -> Vec<String> {
    vec!["# Copyright (c) 2023 Test".to_string()]
  }

  #[test]
  fn test_insert_header_empty_file() {
    let result = insert_header(Path::new("empty.py"), "", &header(), false);
    assert_eq!(result, "# Copyright (c) 2023 Test\n");
  }

  #[test]
  fn test_insert_header_plain_file() {
    let result = insert_header(Path::new("plain.py"), "x = 1\n", &header(), false);
    assert_eq!(result, "# Copyright (c) 2023 Test\n\nx = 1\n");
  }

  #[test]
  fn test_insert_header_preserves_shebang() {
    let result = insert_header(Path::new("run.sh"), "#!/bin/bash\necho hi\n", &header(), false);
    assert_eq!(result, "#!/bin/bash\n# Copyright (c) 2023 Test\n\necho hi");
  }

  #[test]
  fn test_insert_header_preserves_xml_declaration() {
    let content = "<?xml version=\"1.0\"?>\n<root/>\n";
    let result = insert_header(Path::new("data.xml"), content, &header(), false);
    assert_eq!(result, "<?xml version=\"1.0\"?>\n# Copyright (c) 2023 Test\n\n<root/>");
  }

  #[test]
  fn test_insert_header_consumes_contiguous_declarations() {
    let content = "<?xml version=\"1.0\"?>\n<!DOCTYPE html>\n<html/>\n";
    let result = insert_header(Path::new("page.html"), content, &header(), false);
    assert!(result.starts_with("<?xml version=\"1.0\"?>\n<!DOCTYPE html>\n# Copyright"));
    assert!(result.ends_with("<html/>"));
  }

  #[test]
  fn test_insert_header_xml_rules_only_for_markup_extensions() {
    // A declaration-looking first line in a .py file is plain content
    let content = "<?xml version=\"1.0\"?>\nx = 1\n";
    let result = insert_header(Path::new("odd.py"), content, &header(), false);
    assert!(result.starts_with("# Copyright"));
  }

  #[test]
  fn test_insert_header_force_also_prepends() {
    let content = "# Copyright (c) 2020 Old\nx = 1\n";
    let result = insert_header(Path::new("old.py"), content, &header(), true);

    // Force does not strip the previous header, it prepends like the
    // default branch does
    assert!(result.starts_with("# Copyright (c) 2023 Test\n\n"));
    assert!(result.contains("# Copyright (c) 2020 Old"));
  }
}
