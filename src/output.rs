//! Output file handling.
//!
//! The design is written to a temporary file created next to the requested path which
//! is renamed once fully written, so that a failure never leaves a partial file behind.
use crate::errors::{LhcubeError, Result};
use lhcube_doe::LhsDesign;
use log::debug;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Directory the output file will be created in
pub fn output_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Checks the output file can be created without creating anything:
/// its directory exists and the path is not a directory.
pub fn check_output(path: &Path) -> Result<()> {
    let invalid = |reason: &str| LhcubeError::InvalidOutput {
        path: path.display().to_string(),
        reason: reason.to_string(),
    };
    if path.as_os_str().is_empty() {
        return Err(invalid("empty path"));
    }
    if path.is_dir() {
        return Err(invalid("is a directory"));
    }
    let dir = output_dir(path);
    if !dir.is_dir() {
        return Err(invalid("parent directory does not exist"));
    }
    let readonly = dir.metadata()?.permissions().readonly();
    if readonly {
        return Err(invalid("parent directory is read only"));
    }
    Ok(())
}

/// Writes `design` with `headings` as CSV into `path`, replacing any existing file.
pub fn write_design<S: AsRef<str>>(
    path: &Path,
    design: &LhsDesign<f64>,
    headings: &[S],
) -> Result<()> {
    let mut tmp = NamedTempFile::new_in(output_dir(path))?;
    debug!("Write design into temporary file {:?}", tmp.path());
    design.write_csv(BufWriter::new(tmp.as_file_mut()), headings)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}
