//! # Logging Module
//!
//! Tracing-subscriber setup for the CLI. Library code logs through the
//! `tracing` macros only; this module decides what actually reaches the
//! terminal. Diagnostics go to stderr so that stdout stays clean for
//! pipeline use.

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber.
///
/// The default level is `info`; `--quiet` restricts output to errors and
/// each `-v` occurrence lowers the threshold (`-v` debug, `-vv` trace). An
/// explicit `RUST_LOG` environment filter takes precedence over the flags.
///
/// Safe to call more than once; only the first initialization wins.
pub fn init_tracing(quiet: bool, verbose: u8) {
  let default_level = if quiet {
    "error"
  } else {
    match verbose {
      0 => "info",
      1 => "debug",
      _ => "trace",
    }
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .try_init();
}
