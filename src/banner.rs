//! Message of the day shown before the first prompt.

use log::debug;
use std::ffi::OsStr;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// File looked up inside `HOME`.
pub const MOTD_FILE: &str = ".dsh_motd";

/// Where the banner lives for the given home directory, if there is one.
pub fn default_motd_path(home: Option<&OsStr>) -> Option<PathBuf> {
    home.map(|home| Path::new(home).join(MOTD_FILE))
}

/// Copies the banner file to `out` byte for byte, then writes one newline.
///
/// A missing or unreadable file only produces the newline.
pub fn print_banner(path: Option<&Path>, out: &mut dyn Write) -> io::Result<()> {
    if let Some(path) = path {
        match fs::read(path) {
            Ok(bytes) => out.write_all(&bytes)?,
            Err(e) => debug!("no banner at {}: {}", path.display(), e),
        }
    }
    out.write_all(b"\n")?;
    out.flush()
}
