//! Instruction-file preparation for fragment growing.
//!
//! [`prepare`] runs the whole pipeline: validate the [`Library`], pick an
//! attachment atom in every fragment, and write the serie file.
//! [`prepare_global`] instead renders the global-library template.
//! The individual steps are public for callers that want to drive them
//! one by one (the CLI does, to report progress).

mod config;
mod error;
mod instruction;
mod library;
mod output;
mod select;
mod template;

pub use config::{PrepConfig, SelectionMode};
pub use error::Error;
pub use instruction::{
    BuildReport, Instruction, InstructionSet, Skipped, build_instruction, build_instructions,
    build_instructions_with,
};
pub use library::{DEFAULT_LIBRARY_DIR, Library, SERIE_FILE_PREFIX, default_library_dir};
pub use output::{default_output_path, write_output};
pub use select::{resolve_atom_name, select_attachment_atom};
pub use template::{DEFAULT_TEMPLATE, load_template, render_global, safe_substitute};

use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Result of a completed [`prepare`] run.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub output: PathBuf,
    pub report: BuildReport,
}

pub fn prepare(
    scaffold: &Path,
    heavy_atom: &str,
    library: &Path,
    output: Option<&Path>,
    config: &PrepConfig,
) -> Result<Outcome, Error> {
    check_scaffold(scaffold, heavy_atom);

    let library = Library::open(library)?;
    let report = build_instructions(&library, heavy_atom, config)?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(&library.root, scaffold));
    write_output(&output, &report.instructions.to_string())?;

    Ok(Outcome { output, report })
}

/// Renders the global-library template and writes it out. The library is
/// neither listed nor validated.
pub fn prepare_global(
    scaffold: &Path,
    heavy_atom: &str,
    library: &Path,
    template: Option<&Path>,
    output: Option<&Path>,
) -> Result<PathBuf, Error> {
    check_scaffold(scaffold, heavy_atom);

    let template = load_template(template)?;
    let text = render_global(&template, heavy_atom, library);

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(library, scaffold));
    write_output(&output, &text)?;

    Ok(output)
}

/// Looks for `heavy_atom` in the scaffold.
///
/// Returns `None` when the scaffold cannot be read. A missing atom is only
/// warned about; the growing tool is the final authority on scaffold names.
pub fn check_scaffold(scaffold: &Path, heavy_atom: &str) -> Option<bool> {
    let system = match crate::io::read_structure(scaffold) {
        Ok(system) => system,
        Err(e) => {
            debug!("Scaffold {} not inspected: {e}", scaffold.display());
            return None;
        }
    };

    let found = system.find_atom(heavy_atom).is_some();
    if !found {
        warn!(
            "Scaffold {} has no atom named '{}'",
            scaffold.display(),
            heavy_atom.trim()
        );
    }
    Some(found)
}
