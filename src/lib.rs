//! # lichen
//!
//! A tool that walks a directory tree and inserts, updates, or verifies
//! license header comments in source files.
//!
//! `lichen` selects comment syntax by file extension, preserves file-type
//! preambles (shebang lines, XML declarations), skips binary files and
//! ignored directories, and never touches a file that already carries a
//! recognizable header unless forced. It can also stamp out a plain
//! `LICENSE` file from the same templates.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use lichen::config::LicenseConfig;
//! use lichen::processor::Processor;
//!
//! fn main() -> Result<(), lichen::templates::TemplateError> {
//!   // Default configuration carries the mit/gpl3/apache2 templates and the
//!   // built-in extension tables; customize it before building a processor.
//!   let mut config = LicenseConfig::default();
//!   config.add_ignored_dir("target");
//!
//!   let processor = Processor::new(config);
//!
//!   // Add MIT headers to every eligible file under src/
//!   let modified = processor.apply(Path::new("src"), "mit", "Ada Lovelace", Some(2025), None, false)?;
//!   println!("{modified} files modified");
//!
//!   // Verify them afterwards
//!   let (with_license, total) = processor.verify(Path::new("src"), "mit");
//!   println!("{with_license}/{total} files carry the expected license");
//!
//!   Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - the per-file engine and the bulk operations
//! * [`config`] - comment-style registry, template store, and skip sets
//! * [`templates`] - template rendering and header synthesis
//! * [`detect`] - header detection and year rewriting heuristics
//! * [`filter`] - binary file classification
//! * [`logging`] - tracing subscriber setup for the CLI

pub mod config;
pub mod detect;
pub mod filter;
pub mod logging;
pub mod processor;
pub mod templates;

pub use config::{CommentStyle, FilePattern, LicenseConfig};
pub use processor::Processor;
pub use templates::TemplateError;
