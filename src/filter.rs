//! # File Filter Module
//!
//! Classifies paths that no license operation should touch: binary files,
//! identified either by extension or by a null byte in the leading content.
//! Directory-level pruning (the ignored-directory set) lives on
//! [`LicenseConfig`](crate::config::LicenseConfig) and is applied during
//! traversal.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::config::LicenseConfig;

/// Number of leading bytes probed for null bytes.
const BINARY_PROBE_LEN: u64 = 1024;

/// Checks whether a file should be treated as binary.
///
/// Returns `true` immediately when the extension is in the configured
/// binary-extension set. Otherwise the first 1024 bytes are probed for a null
/// byte. Any I/O failure while probing also classifies the file as binary,
/// failing safe toward skipping.
pub fn is_binary(path: &Path, config: &LicenseConfig) -> bool {
  if config.is_binary_extension(path) {
    return true;
  }

  let file = match File::open(path) {
    Ok(file) => file,
    Err(e) => {
      debug!("Failed to open {} while probing for binary content: {}", path.display(), e);
      return true;
    }
  };

  let mut prefix = Vec::with_capacity(BINARY_PROBE_LEN as usize);
  match file.take(BINARY_PROBE_LEN).read_to_end(&mut prefix) {
    Ok(_) => prefix.contains(&0),
    Err(e) => {
      debug!("Failed to read {} while probing for binary content: {}", path.display(), e);
      true
    }
  }
}
