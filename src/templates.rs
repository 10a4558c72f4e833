//! # Templates Module
//!
//! This module renders license template bodies and synthesizes comment-wrapped
//! header blocks from them.
//!
//! Template bodies use single-brace placeholders (`{year}`, `{author}`, plus
//! any caller-supplied custom variables); `{{` and `}}` escape literal braces.
//! Rendering fails with a [`TemplateError`] when a body references a
//! placeholder the caller did not supply, since that indicates a caller
//! configuration mistake rather than a per-file condition.
//!
//! ## Example
//!
//! ```rust
//! use lichen::config::CommentStyle;
//! use lichen::templates::{build_header, render};
//!
//! # fn main() -> Result<(), lichen::templates::TemplateError> {
//! let rendered = render("Copyright (c) {year} {author}", "Ada", Some(2025), None)?;
//! let header = build_header(&rendered, &CommentStyle::line("//"));
//!
//! assert_eq!(header, ["// Copyright (c) 2025 Ada"]);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use chrono::Datelike;
use tracing::trace;

use crate::config::CommentStyle;

/// Error type for template rendering.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
  /// The template body references a placeholder that was not supplied.
  #[error("template references unknown placeholder '{{{name}}}'")]
  UnknownPlaceholder {
    /// The placeholder name as written in the template body.
    name: String,
  },

  /// A `{` was opened but never closed.
  #[error("template contains an unclosed '{{' placeholder")]
  UnclosedPlaceholder,
}

/// Returns the current local calendar year.
pub fn current_year() -> i32 {
  chrono::Local::now().year()
}

/// Renders a license template body with the given variables.
///
/// `{year}` defaults to the current calendar year when `year` is `None`.
/// `custom_vars` entries are merged on top of the `year`/`author` pair, so a
/// custom variable may override either.
///
/// # Errors
///
/// Returns [`TemplateError`] if the body references a placeholder not present
/// in the substitution set, or contains an unclosed `{`.
pub fn render(
  body: &str,
  author: &str,
  year: Option<i32>,
  custom_vars: Option<&HashMap<String, String>>,
) -> Result<String, TemplateError> {
  let year = year.unwrap_or_else(current_year);
  trace!("Rendering template with year {} and author '{}'", year, author);

  let mut vars = HashMap::new();
  vars.insert("year".to_string(), year.to_string());
  vars.insert("author".to_string(), author.to_string());
  if let Some(custom) = custom_vars {
    for (key, value) in custom {
      vars.insert(key.clone(), value.clone());
    }
  }

  substitute(body, &vars)
}

/// Substitutes `{placeholder}` slots in a template body.
///
/// `{{` and `}}` are unescaped to literal braces. Only `{` opens a
/// placeholder, so a lone `}` deliberately passes through unchanged instead
/// of being rejected; license bodies quoting code or legal text may contain
/// stray closers.
fn substitute(body: &str, vars: &HashMap<String, String>) -> Result<String, TemplateError> {
  let mut result = String::with_capacity(body.len());
  let mut chars = body.chars().peekable();

  while let Some(ch) = chars.next() {
    match ch {
      '{' => {
        if chars.peek() == Some(&'{') {
          chars.next();
          result.push('{');
          continue;
        }

        let mut name = String::new();
        loop {
          match chars.next() {
            Some('}') => break,
            Some(inner) => name.push(inner),
            None => return Err(TemplateError::UnclosedPlaceholder),
          }
        }

        match vars.get(&name) {
          Some(value) => result.push_str(value),
          None => return Err(TemplateError::UnknownPlaceholder { name }),
        }
      }
      '}' if chars.peek() == Some(&'}') => {
        chars.next();
        result.push('}');
      }
      other => result.push(other),
    }
  }

  Ok(result)
}

/// Wraps rendered license text in a comment-formatted header block.
///
/// For block styles the result is the opening delimiter on its own line, each
/// body line prefixed with a single space (blank lines become a lone space),
/// and the closing delimiter on its own line. For line styles every body line
/// gets `start + " "` prefixed, with blank lines rendered as the bare marker.
///
/// The rendered text is trimmed before splitting, so surrounding blank lines
/// in a template body never produce empty comment lines at the block edges.
pub fn build_header(rendered: &str, style: &CommentStyle) -> Vec<String> {
  let lines: Vec<&str> = rendered.trim().split('\n').collect();

  if style.is_block() {
    let mut header = Vec::with_capacity(lines.len() + 2);
    header.push(style.start.clone());
    for line in &lines {
      if line.trim().is_empty() {
        header.push(" ".to_string());
      } else {
        header.push(format!(" {line}"));
      }
    }
    header.push(style.end.clone());
    header
  } else {
    lines
      .iter()
      .map(|line| {
        if line.trim().is_empty() {
          style.start.clone()
        } else {
          format!("{} {}", style.start, line)
        }
      })
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_render_basic_placeholders() {
    let rendered = render("Copyright (c) {year} {author}", "Test Author", Some(2023), None).unwrap();
    assert_eq!(rendered, "Copyright (c) 2023 Test Author");
  }

  #[test]
  fn test_render_defaults_to_current_year() {
    let rendered = render("{year}", "x", None, None).unwrap();
    assert_eq!(rendered, current_year().to_string());
  }

  #[test]
  fn test_render_custom_vars() {
    let mut vars = HashMap::new();
    vars.insert("project".to_string(), "lichen".to_string());

    let rendered = render("{project} - (c) {year} {author}", "Ada", Some(2024), Some(&vars)).unwrap();
    assert_eq!(rendered, "lichen - (c) 2024 Ada");
  }

  #[test]
  fn test_render_unknown_placeholder_fails() {
    let err = render("Copyright {owner}", "Ada", Some(2024), None).unwrap_err();
    assert!(matches!(err, TemplateError::UnknownPlaceholder { name } if name == "owner"));
  }

  #[test]
  fn test_render_unclosed_placeholder_fails() {
    let err = render("Copyright {year", "Ada", Some(2024), None).unwrap_err();
    assert!(matches!(err, TemplateError::UnclosedPlaceholder));
  }

  #[test]
  fn test_render_escaped_braces() {
    let rendered = render("{{year}} means the year, which is {year}", "x", Some(2024), None).unwrap();
    assert_eq!(rendered, "{year} means the year, which is 2024");
  }

  #[test]
  fn test_render_lone_closing_brace_passes_through() {
    let rendered = render("end} of {year}", "x", Some(2024), None).unwrap();
    assert_eq!(rendered, "end} of 2024");
  }

  #[test]
  fn test_build_header_line_style() {
    let style = CommentStyle::line("#");
    let header = build_header("First line\n\nThird line", &style);

    assert_eq!(header, ["# First line", "#", "# Third line"]);
  }

  #[test]
  fn test_build_header_block_style() {
    let style = CommentStyle::block("<!--", "-->");
    let header = build_header("First line\n\nThird line", &style);

    assert_eq!(header, ["<!--", " First line", " ", " Third line", "-->"]);
  }

  #[test]
  fn test_build_header_trims_surrounding_blank_lines() {
    let style = CommentStyle::line("//");
    let header = build_header("\n\nOnly line\n", &style);

    assert_eq!(header, ["// Only line"]);
  }
}
