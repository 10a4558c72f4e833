//! # Configuration Module
//!
//! This module holds the configuration value consumed by the
//! [`Processor`](crate::processor::Processor): the ordered file-pattern
//! registry mapping extensions to comment styles, the named license template
//! bodies, the per-template key-phrase lists used for verification, and the
//! ignored-directory and binary-extension sets consulted during traversal.
//!
//! Everything here is plain data constructed once per invocation. There is no
//! process-wide registry: callers either use [`LicenseConfig::default`] or
//! build a customized value with the `add_*` methods and hand it to the
//! processor.

use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Comment delimiters for a family of file types.
///
/// `end` is empty for line-oriented comment styles (`#`, `//`) and non-empty
/// for block styles (`<!-- -->`, `/* */`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentStyle {
  /// Marker that opens a comment (e.g. `#`, `//`, `<!--`).
  pub start: String,

  /// Marker that closes a block comment, or empty for line comments.
  pub end: String,
}

impl CommentStyle {
  /// Create a line-comment style (no closing marker).
  pub fn line(start: &str) -> Self {
    Self {
      start: start.to_string(),
      end: String::new(),
    }
  }

  /// Create a block-comment style.
  pub fn block(start: &str, end: &str) -> Self {
    Self {
      start: start.to_string(),
      end: end.to_string(),
    }
  }

  /// Whether this style wraps the header in an opening and closing delimiter.
  pub fn is_block(&self) -> bool {
    !self.end.is_empty()
  }
}

/// A set of file extensions sharing one comment style.
///
/// Extensions carry their leading dot and are matched as case-insensitive
/// path suffixes. The registry consults patterns in declared order, so the
/// first pattern listing a matching extension wins.
#[derive(Debug, Clone)]
pub struct FilePattern {
  /// Extensions covered by this pattern, with leading dots (e.g. `.py`).
  pub extensions: Vec<String>,

  /// The comment style shared by these extensions.
  pub style: CommentStyle,
}

impl FilePattern {
  /// Creates a pattern from extension strings and comment delimiters.
  ///
  /// An empty `comment_end` selects line-comment style.
  pub fn new(extensions: &[&str], comment_start: &str, comment_end: &str) -> Self {
    Self {
      extensions: extensions.iter().map(|ext| ext.to_lowercase()).collect(),
      style: if comment_end.is_empty() {
        CommentStyle::line(comment_start)
      } else {
        CommentStyle::block(comment_start, comment_end)
      },
    }
  }

  fn matches(&self, lowercase_path: &str) -> bool {
    self.extensions.iter().any(|ext| lowercase_path.ends_with(ext.as_str()))
  }
}

/// Configuration for license operations.
///
/// Holds the template registry, the file-pattern registry, and the traversal
/// skip sets. The [`Default`] value carries the built-in tables; callers can
/// register additional entries before handing the config to a processor.
#[derive(Debug, Clone)]
pub struct LicenseConfig {
  templates: HashMap<String, String>,
  key_phrases: HashMap<String, Vec<String>>,
  generic_key_phrases: Vec<String>,
  patterns: Vec<FilePattern>,
  ignored_dirs: HashSet<String>,
  binary_extensions: HashSet<String>,
}

impl Default for LicenseConfig {
  fn default() -> Self {
    let mut templates = HashMap::new();
    templates.insert("mit".to_string(), MIT_TEMPLATE.to_string());
    templates.insert("gpl3".to_string(), GPL3_TEMPLATE.to_string());
    templates.insert("apache2".to_string(), APACHE2_TEMPLATE.to_string());

    let mut key_phrases = HashMap::new();
    key_phrases.insert("mit".to_string(), to_strings(&MIT_KEY_PHRASES));
    key_phrases.insert("gpl3".to_string(), to_strings(&GPL3_KEY_PHRASES));
    key_phrases.insert("apache2".to_string(), to_strings(&APACHE2_KEY_PHRASES));

    let patterns = vec![
      FilePattern::new(&[".py", ".sh", ".bash", ".ps1"], "#", ""),
      FilePattern::new(&[".js", ".jsx", ".tsx", ".ts", ".c", ".cpp", ".h", ".hpp"], "//", ""),
      FilePattern::new(&[".html", ".xml", ".svg", ".ui", ".qrc"], "<!--", "-->"),
      FilePattern::new(&[".css", ".scss", ".less"], "/*", "*/"),
      FilePattern::new(&[".java", ".kt", ".scala"], "//", ""),
      FilePattern::new(&[".rb", ".rake"], "#", ""),
      FilePattern::new(&[".rs", ".go"], "//", ""),
      FilePattern::new(&[".php"], "//", ""),
    ];

    let ignored_dirs = [
      "__pycache__",
      "node_modules",
      ".git",
      ".hg",
      ".svn",
      "venv",
      ".venv",
      "build",
      "dist",
      ".pytest_cache",
      ".coverage",
      ".idea",
      ".vscode",
    ]
    .iter()
    .map(|dir| dir.to_string())
    .collect();

    let binary_extensions = [
      ".exe", ".dll", ".so", ".dylib", ".bin", ".dat", ".png", ".jpg", ".jpeg", ".gif", ".ico", ".mp3", ".mp4",
      ".mkv", ".qm",
    ]
    .iter()
    .map(|ext| ext.to_string())
    .collect();

    Self {
      templates,
      key_phrases,
      generic_key_phrases: to_strings(&GENERIC_KEY_PHRASES),
      patterns,
      ignored_dirs,
      binary_extensions,
    }
  }
}

impl LicenseConfig {
  /// Returns the comment style for the first pattern matching the path, or
  /// `None` if no registered extension matches.
  ///
  /// Matching is a case-insensitive suffix check against the full path. A
  /// `None` result means the file type is unsupported and must not be
  /// touched by any operation.
  pub fn comment_style_for(&self, path: &Path) -> Option<CommentStyle> {
    let lowercase_path = path.to_string_lossy().to_lowercase();
    self
      .patterns
      .iter()
      .find(|pattern| pattern.matches(&lowercase_path))
      .map(|pattern| pattern.style.clone())
  }

  /// Resolves a template identifier to a template body.
  ///
  /// A registered template name yields its stored body; anything else is
  /// treated literally as custom license text, which lets callers pass ad hoc
  /// bodies without registering them first.
  pub fn template_body<'a>(&'a self, name_or_text: &'a str) -> &'a str {
    self.templates.get(name_or_text).map_or(name_or_text, String::as_str)
  }

  /// Returns the verification key phrases for a template name.
  ///
  /// Unknown names fall back to the generic two-phrase list
  /// (`"copyright"`, `"license"`).
  pub fn key_phrases_for(&self, template_name: &str) -> &[String] {
    self.key_phrases.get(template_name).unwrap_or(&self.generic_key_phrases)
  }

  /// Exact-match membership test for directory basenames pruned during
  /// traversal.
  pub fn is_ignored_dir(&self, dir_name: &str) -> bool {
    self.ignored_dirs.contains(dir_name)
  }

  /// Whether the path's extension is in the known binary-extension set.
  pub fn is_binary_extension(&self, path: &Path) -> bool {
    path
      .extension()
      .and_then(|ext| ext.to_str())
      .is_some_and(|ext| self.binary_extensions.contains(&format!(".{}", ext.to_lowercase())))
  }

  /// Registers a custom license template.
  ///
  /// The body may reference `{year}` and `{author}` placeholders, plus any
  /// custom placeholders the caller plans to supply at apply time.
  pub fn add_template(&mut self, name: &str, body: &str) {
    self.templates.insert(name.to_string(), body.to_string());
  }

  /// Registers verification key phrases for a template name.
  ///
  /// Phrases should be lowercase with single-space word separation, since
  /// verification normalizes file content that way before substring matching.
  pub fn add_key_phrases(&mut self, name: &str, phrases: Vec<String>) {
    self.key_phrases.insert(name.to_string(), phrases);
  }

  /// Appends a custom file pattern to the registry.
  ///
  /// New patterns are consulted after the built-in ones, so they cannot
  /// shadow extensions the defaults already claim.
  pub fn add_pattern(&mut self, extensions: &[&str], comment_start: &str, comment_end: &str) {
    self.patterns.push(FilePattern::new(extensions, comment_start, comment_end));
  }

  /// Adds a directory basename to the traversal ignore set.
  pub fn add_ignored_dir(&mut self, dir_name: &str) {
    self.ignored_dirs.insert(dir_name.to_string());
  }

  /// Removes a directory basename from the ignore set.
  ///
  /// Returns `true` if the name was present.
  pub fn remove_ignored_dir(&mut self, dir_name: &str) -> bool {
    self.ignored_dirs.remove(dir_name)
  }
}

fn to_strings(phrases: &[&str]) -> Vec<String> {
  phrases.iter().map(|phrase| phrase.to_string()).collect()
}

const MIT_KEY_PHRASES: [&str; 4] = [
  "mit license",
  "permission is hereby granted",
  "without restriction",
  "the software is provided as is",
];

const GPL3_KEY_PHRASES: [&str; 4] = [
  "free software",
  "gnu general public license",
  "without warranty",
  "see the gnu general public license",
];

const APACHE2_KEY_PHRASES: [&str; 4] = [
  "apache license",
  "licensed under the apache license",
  "without warranties or conditions",
  "licenses this file",
];

const GENERIC_KEY_PHRASES: [&str; 2] = ["copyright", "license"];

const MIT_TEMPLATE: &str = r#"The MIT License (MIT)

Copyright (c) {year} {author}

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE."#;

const GPL3_TEMPLATE: &str = r#"Copyright (C) {year} {author}

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>."#;

const APACHE2_TEMPLATE: &str = r#"Copyright {year} {author}

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License."#;
