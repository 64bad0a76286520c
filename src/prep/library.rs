use super::error::Error;
use crate::io::Format;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Fragment library in the source tree the crate was built from.
pub const DEFAULT_LIBRARY_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/Libraries/global");

/// Library path relative to an installation directory.
const INSTALLED_LIBRARY_DIR: [&str; 2] = ["Libraries", "global"];

/// Bundled fragment library, looked up at run time.
///
/// A `Libraries/global` directory next to the running executable wins, so an
/// installed binary does not depend on the build tree; otherwise this is
/// [`DEFAULT_LIBRARY_DIR`].
pub fn default_library_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().and_then(installed_library_dir))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LIBRARY_DIR))
}

fn installed_library_dir(install_dir: &Path) -> Option<PathBuf> {
    let dir = INSTALLED_LIBRARY_DIR
        .iter()
        .fold(install_dir.to_path_buf(), |dir, part| dir.join(part));
    dir.is_dir().then_some(dir)
}

/// Prefix of the instruction files written into a library by default.
pub const SERIE_FILE_PREFIX: &str = "serie_file_";

/// A validated fragment library: one directory, one structure format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    pub root: PathBuf,
    pub format: Format,
    /// Fragment files, sorted by path.
    pub files: Vec<PathBuf>,
}

impl Library {
    /// Lists and validates the fragment files directly under `root`.
    ///
    /// Hidden entries, sub-directories and previously written serie files
    /// are ignored. Every remaining file must map to the same [`Format`].
    pub fn open(root: impl AsRef<Path>) -> Result<Self, Error> {
        let root = root.as_ref();
        if !root.exists() {
            return Err(Error::LibraryNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(Error::NotADirectory(root.to_path_buf()));
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(root)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() || is_ignored(&path) {
                debug!("Ignoring library entry {}", path.display());
                continue;
            }
            files.push(path);
        }
        files.sort();

        let mut format = None;
        for path in &files {
            let found =
                Format::from_path(path).ok_or_else(|| Error::UnrecognizedFile(path.clone()))?;
            match format {
                None => format = Some(found),
                Some(expected) if expected != found => {
                    return Err(Error::MixedFormats {
                        path: path.clone(),
                        expected,
                        found,
                    });
                }
                Some(_) => {}
            }
        }

        let format = format.ok_or_else(|| Error::EmptyLibrary(root.to_path_buf()))?;
        debug!(
            "Library {} holds {} {} fragments",
            root.display(),
            files.len(),
            format
        );

        Ok(Self {
            root: root.to_path_buf(),
            format,
            files,
        })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn is_ignored(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.starts_with('.') || (name.starts_with(SERIE_FILE_PREFIX) && name.ends_with(".conf"))
}
