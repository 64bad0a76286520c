use super::error::Error;
use super::library::SERIE_FILE_PREFIX;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// `<library>/serie_file_<scaffold stem>.conf`.
pub fn default_output_path(library: &Path, scaffold: &Path) -> PathBuf {
    let stem = scaffold
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    library.join(format!("{SERIE_FILE_PREFIX}{stem}.conf"))
}

/// Writes `text` verbatim to `path`, replacing any existing file.
pub fn write_output(path: &Path, text: &str) -> Result<(), Error> {
    fs::write(path, text).map_err(|source| Error::Output {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Serie file saved in {}", path.display());
    Ok(())
}
