//! # lichen
//!
//! A tool that inserts, updates, and verifies license header comments in
//! source trees.

use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
  cli::run()
}
